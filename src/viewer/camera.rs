//! Perspective camera orbiting the origin

use cgmath::{perspective, Deg, Matrix4, Point3, Vector3};

use crate::state::config::{clamp_distance, ViewerConfig};

/// A camera on the +z axis looking at the origin.
///
/// Zoom moves it along its forward axis; the model rotates, not the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub distance: f32,
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            distance: config.clamped_initial_distance(),
            fov: config.fov_degrees,
            aspect_ratio: 1.0,
            near: 0.1,
            far: 1000.0,
        }
    }

    pub fn eye(&self) -> Point3<f32> {
        Point3::new(0.0, 0.0, self.distance)
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye(), Point3::new(0.0, 0.0, 0.0), Vector3::unit_y())
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        perspective(Deg(self.fov), self.aspect_ratio, self.near, self.far)
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    /// Recompute the aspect ratio for a surface size in pixels.
    ///
    /// Degenerate sizes (a collapsed pane) keep the previous ratio.
    pub fn set_viewport(&mut self, width: f32, height: f32) -> bool {
        if width < 1.0 || height < 1.0 {
            return false;
        }
        let aspect_ratio = width / height;
        if (aspect_ratio - self.aspect_ratio).abs() <= f32::EPSILON {
            return false;
        }
        self.aspect_ratio = aspect_ratio;
        true
    }

    /// Move along the forward axis, staying inside the configured range
    pub fn zoom(&mut self, amount: f32, config: &ViewerConfig) -> bool {
        let distance = clamp_distance(self.distance + amount, config);
        if distance == self.distance {
            return false;
        }
        self.distance = distance;
        true
    }
}
