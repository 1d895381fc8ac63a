use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Camera projection and look-around parameters.
pub struct CameraOptions {
    /// Initial vertical field of view in degrees.
    pub fov: f32,
    /// Narrowest field of view the wheel can zoom to.
    pub min_fov: f32,
    /// Widest field of view the wheel can zoom to.
    pub max_fov: f32,
    /// Lowest latitude the view may tilt to, in degrees.
    pub min_latitude: f32,
    /// Highest latitude the view may tilt to, in degrees.
    pub max_latitude: f32,
    /// Degrees of rotation per pixel of drag.
    pub drag_sensitivity: f32,
    /// Degrees of field of view per unit of wheel delta.
    pub zoom_speed: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fov: 75.0,
            min_fov: 10.0,
            max_fov: 75.0,
            min_latitude: -85.0,
            max_latitude: 85.0,
            drag_sensitivity: 0.1,
            zoom_speed: 0.05,
            znear: 1.0,
            zfar: 1100.0,
        }
    }
}
