use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Tessellation of the sphere the panorama is painted on.
pub struct SphereOptions {
    /// Sphere radius in world units. Must stay inside the far plane.
    pub radius: f32,
    /// Segments around the equator.
    pub width_segments: u32,
    /// Segments from pole to pole.
    pub height_segments: u32,
}

impl Default for SphereOptions {
    fn default() -> Self {
        Self {
            radius: 500.0,
            width_segments: 60,
            height_segments: 40,
        }
    }
}
