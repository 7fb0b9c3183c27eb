/// Pointer and wheel handling for the viewer
///
/// Every handler is a plain function over borrowed viewer state, so the
/// interaction rules can be exercised without a window.

use cgmath::Point2;

use super::camera::Camera;
use crate::state::config::ViewerConfig;

/// Pixels per wheel "line", matching what browsers report per notch
pub const PIXELS_PER_LINE: f32 = 100.0;

/// Input delivered to a viewer.
///
/// Pointer positions only need to share one coordinate space; rotation is
/// driven by the deltas between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(Point2<f32>),
    PointerMoved(Point2<f32>),
    PointerUp,
    /// Positive values zoom out
    Wheel(f32),
    Resized { width: f32, height: f32 },
}

/// Model orientation in radians
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rotation {
    /// Around the vertical axis, driven by horizontal drags
    pub yaw: f32,
    /// Around the horizontal axis, driven by vertical drags
    pub pitch: f32,
}

/// State for drag interactions
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    pub is_dragging: bool,
    pub last_position: Option<Point2<f32>>,
}

/// Begin a drag at `position`
pub fn pointer_down(drag: &mut DragState, position: Point2<f32>) {
    drag.is_dragging = true;
    drag.last_position = Some(position);
}

/// Rotate by the pointer delta since the last recorded position.
///
/// Returns whether the rotation changed.
pub fn pointer_move(
    drag: &mut DragState,
    rotation: &mut Rotation,
    position: Point2<f32>,
    config: &ViewerConfig,
) -> bool {
    if !drag.is_dragging {
        return false;
    }
    let Some(last) = drag.last_position else {
        drag.last_position = Some(position);
        return false;
    };

    let delta = position - last;
    rotation.yaw += delta.x * config.rotate_sensitivity;
    rotation.pitch += delta.y * config.rotate_sensitivity;

    if config.clamp_vertical_rotation {
        let limit = config.vertical_limit.abs();
        rotation.pitch = rotation.pitch.clamp(-limit, limit);
    }

    drag.last_position = Some(position);
    delta.x != 0.0 || delta.y != 0.0
}

/// End the drag. Returns whether a drag was active.
pub fn pointer_up(drag: &mut DragState) -> bool {
    let was_dragging = drag.is_dragging;
    drag.is_dragging = false;
    drag.last_position = None;
    was_dragging
}

/// Zoom by a wheel delta in pixels
pub fn wheel(camera: &mut Camera, delta: f32, config: &ViewerConfig) -> bool {
    camera.zoom(delta * config.zoom_sensitivity, config)
}

/// Per-frame idle rotation, skipped while the user is dragging
pub fn idle_tick(drag: &DragState, rotation: &mut Rotation, config: &ViewerConfig) -> bool {
    if !config.auto_idle_rotate || drag.is_dragging {
        return false;
    }
    rotation.yaw += config.idle_rotate_step;
    true
}
