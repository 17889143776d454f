//! Rendering and camera configuration.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (world units)
    pub near_plane: f32,

    /// Far clipping plane (world units)
    /// Must cover the camera orbit (radius ~856) plus the far wall
    pub far_plane: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fov_degrees: 45.0,
            near_plane: 0.1,
            far_plane: 5000.0,
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }
}

/// Camera orbiting the world Y axis while looking at a fixed target
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Starting eye position (world units)
    pub start_position: [f32; 3],

    /// Point the camera keeps looking at (the object)
    pub target: [f32; 3],

    /// Seconds per full revolution
    pub period_s: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            start_position: [0.0, -100.0, -850.0],
            target: [0.0, 0.0, 0.0],
            period_s: 10.0,
        }
    }
}
