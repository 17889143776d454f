//! Orbiting camera that circles the object about the world Y axis.

use std::f32::consts::TAU;

use glam::{Mat3, Mat4, Vec3};

use crate::params::{OrbitCamera, RenderConfig};

/// Camera system with a constant-rate orbit
pub struct CameraSystem {
    params: OrbitCamera,
    eye: Vec3,
}

impl CameraSystem {
    /// Create new camera system at the orbit's start position
    pub fn new(params: OrbitCamera) -> Self {
        let eye = Vec3::from_array(params.start_position);
        Self { params, eye }
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn target(&self) -> Vec3 {
        Vec3::from_array(self.params.target)
    }

    /// Rotate the eye about world Y by one period-fraction of `dt_s`
    pub fn advance(&mut self, dt_s: f32) {
        if self.params.period_s <= 0.0 {
            return;
        }
        let angle = dt_s * TAU / self.params.period_s;
        self.eye = Mat3::from_rotation_y(angle) * self.eye;
    }

    /// Create view-projection matrix for rendering
    pub fn view_proj(&self, render_config: &RenderConfig) -> Mat4 {
        // Always keep Y as up vector (camera never rolls)
        let view = Mat4::look_at_rh(self.eye, self.target(), Vec3::Y);
        let proj = Mat4::perspective_rh(
            render_config.fov_degrees.to_radians(),
            render_config.aspect_ratio(),
            render_config.near_plane,
            render_config.far_plane,
        );

        proj * view
    }
}
