use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Where panoramas and the image list live.
pub struct ImageOptions {
    /// Directory panorama files are loaded from.
    pub directory: PathBuf,
    /// Image list location: a path relative to `directory`, or an
    /// `http(s)://` URL.
    pub list: String,
    /// Image shown when no initial image is requested.
    pub default_image: String,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("textures"),
            list: "_images.json".into(),
            default_image: "default.jpg".into(),
        }
    }
}
