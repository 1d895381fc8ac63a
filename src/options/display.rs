use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Window and presentation settings.
pub struct DisplayOptions {
    /// Frame rate cap; 0 renders as fast as vsync allows.
    pub target_fps: u32,
    /// Whether the info panel starts visible.
    pub show_info: bool,
    /// Panorama opacity while a file is dragged over the window.
    pub drop_hover_opacity: f32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            target_fps: 0,
            show_info: false,
            drop_hover_opacity: 0.5,
        }
    }
}
