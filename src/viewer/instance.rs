/// Viewer instance and lifecycle
///
/// One `Viewer` is created each time the workspace view is entered and
/// disposed when it is left. The instance owns the scene, camera, model and
/// interaction state; input is routed through the pure handlers in
/// `controls` and only reaches the instance while it is running.

use iced::task;
use std::fmt;

use super::camera::Camera;
use super::controls::{self, DragState, InputEvent, Rotation};
use super::lighting::{hex_rgb, LightSet, BACKGROUND};
use super::mesh::Model;
use super::primitives::placeholder_head;
use super::raster::{self, ShadedTriangle};
use crate::error::AssetError;
use crate::state::config::{RenderMode, ViewerConfig};

/// Identifies one mount of the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewerId(u64);

impl ViewerId {
    pub fn first() -> Self {
        ViewerId(1)
    }

    pub fn next(self) -> Self {
        ViewerId(self.0 + 1)
    }
}

impl fmt::Display for ViewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed, nothing allocated
    Idle,
    /// Scene and camera built, waiting for a model
    Initializing,
    /// Model attached, accepting input, render loop active
    Running,
    /// Listeners removed and resources released
    Disposed,
}

/// Event sources a running viewer listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listener {
    Pointer,
    Wheel,
    Resize,
    /// Per-display-frame callback driving the render loop
    Frame,
}

/// Background color and lights
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub background: [f32; 3],
    pub lights: LightSet,
}

pub struct Viewer {
    id: ViewerId,
    config: ViewerConfig,
    lifecycle: Lifecycle,
    scene: Option<Scene>,
    camera: Camera,
    rotation: Rotation,
    drag: DragState,
    model: Option<Model>,
    listeners: Vec<Listener>,
    /// In-flight asset probe, aborted on dispose
    pending_load: Option<task::Handle>,
    /// Surface size in pixels
    surface: (f32, f32),
}

// Manual Debug implementation (task handles and meshes are noisy)
impl fmt::Debug for Viewer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Viewer")
            .field("id", &self.id)
            .field("lifecycle", &self.lifecycle)
            .field("distance", &self.camera.distance)
            .field("rotation", &self.rotation)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

impl Viewer {
    pub fn new(id: ViewerId, config: ViewerConfig) -> Self {
        Self {
            id,
            config,
            lifecycle: Lifecycle::Idle,
            scene: None,
            camera: Camera::new(&config),
            rotation: Rotation::default(),
            drag: DragState::default(),
            model: None,
            listeners: Vec::new(),
            pending_load: None,
            surface: (0.0, 0.0),
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging
    }

    pub fn surface(&self) -> (f32, f32) {
        self.surface
    }

    pub fn background(&self) -> [f32; 3] {
        self.scene
            .as_ref()
            .map(|scene| scene.background)
            .unwrap_or_else(|| hex_rgb(BACKGROUND))
    }

    pub fn is_listening(&self, listener: Listener) -> bool {
        self.listeners.contains(&listener)
    }

    /// Idle → Initializing: build the scene and reset camera and rotation
    pub fn initialize(&mut self) -> bool {
        if self.lifecycle != Lifecycle::Idle {
            return false;
        }

        self.scene = Some(Scene {
            background: hex_rgb(BACKGROUND),
            lights: LightSet::studio(),
        });
        self.camera = Camera::new(&self.config);
        self.rotation = Rotation::default();
        self.drag = DragState::default();
        self.lifecycle = Lifecycle::Initializing;

        log::debug!("Viewer {} initializing", self.id);
        true
    }

    /// Remember the asset probe so it can be cancelled
    pub fn track_load(&mut self, handle: task::Handle) {
        if self.lifecycle == Lifecycle::Initializing {
            self.pending_load = Some(handle);
        } else {
            handle.abort();
        }
    }

    /// Deliver the outcome of the asset probe.
    ///
    /// Results for another instance, or arriving after the viewer moved past
    /// initialization, are discarded. A failed probe falls back to the
    /// placeholder head. Returns whether a model was attached.
    pub fn attach_model(&mut self, id: ViewerId, result: Result<Model, AssetError>) -> bool {
        if id != self.id || self.lifecycle != Lifecycle::Initializing {
            log::debug!("Discarding model for viewer {} (current {}, {:?})", id, self.id, self.lifecycle);
            return false;
        }
        self.pending_load = None;

        let model = match result {
            Ok(model) => model,
            Err(e) => {
                log::info!("🙂 Using placeholder head ({})", e);
                placeholder_head(self.config.include_mouth)
            }
        };
        self.model = Some(model);
        self.start();
        true
    }

    /// Skip asset loading and show the placeholder right away
    pub fn use_placeholder(&mut self) -> bool {
        self.attach_model(self.id, Err(AssetError::Exhausted { tried: 0 }))
    }

    /// Initializing → Running
    fn start(&mut self) {
        self.listeners = vec![Listener::Pointer, Listener::Wheel, Listener::Resize];
        if self.config.render_mode == RenderMode::Continuous {
            self.listeners.push(Listener::Frame);
        }
        self.lifecycle = Lifecycle::Running;
        log::info!("▶️  Viewer {} running", self.id);
    }

    /// Route one input event. Returns whether the view changed.
    pub fn handle(&mut self, event: InputEvent) -> bool {
        if self.lifecycle != Lifecycle::Running {
            return false;
        }

        match event {
            InputEvent::PointerDown(position) if self.is_listening(Listener::Pointer) => {
                controls::pointer_down(&mut self.drag, position);
                false
            }
            InputEvent::PointerMoved(position) if self.is_listening(Listener::Pointer) => {
                controls::pointer_move(&mut self.drag, &mut self.rotation, position, &self.config)
            }
            InputEvent::PointerUp if self.is_listening(Listener::Pointer) => controls::pointer_up(&mut self.drag),
            InputEvent::Wheel(delta) if self.is_listening(Listener::Wheel) => {
                controls::wheel(&mut self.camera, delta, &self.config)
            }
            InputEvent::Resized { width, height } if self.is_listening(Listener::Resize) => {
                self.surface = (width, height);
                self.camera.set_viewport(width, height)
            }
            _ => false,
        }
    }

    /// One display frame of the render loop
    pub fn tick(&mut self) -> bool {
        if self.lifecycle != Lifecycle::Running || !self.is_listening(Listener::Frame) {
            return false;
        }
        controls::idle_tick(&self.drag, &mut self.rotation, &self.config)
    }

    /// Tear down: cancel loading, detach listeners, release the scene.
    pub fn dispose(&mut self) {
        if self.lifecycle == Lifecycle::Disposed {
            return;
        }
        if let Some(handle) = self.pending_load.take() {
            handle.abort();
        }
        self.listeners.clear();
        self.model = None;
        self.scene = None;
        self.drag = DragState::default();
        self.lifecycle = Lifecycle::Disposed;
        log::info!("⏹️  Viewer {} disposed", self.id);
    }

    /// Screen triangles for the current frame
    pub fn triangles(&self, width: f32, height: f32) -> Vec<ShadedTriangle> {
        match (&self.model, &self.scene) {
            (Some(model), Some(scene)) if self.lifecycle == Lifecycle::Running => {
                // The first frames can be drawn before a resize is delivered
                let mut camera = self.camera;
                camera.set_viewport(width, height);
                raster::project(model, &camera, self.rotation, &scene.lights, width, height)
            }
            _ => Vec::new(),
        }
    }
}

impl Drop for Viewer {
    fn drop(&mut self) {
        if let Some(handle) = self.pending_load.take() {
            handle.abort();
        }
    }
}
