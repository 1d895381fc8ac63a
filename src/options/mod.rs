//! Viewer options with TOML preset support.
//!
//! Every tunable constant (camera limits, drag and zoom rates, sphere
//! tessellation, image locations, key bindings, display toggles) lives
//! here. Options serialize to/from TOML; every section is
//! `#[serde(default)]` so a file that only overrides `[camera]` works.

mod camera;
mod display;
mod images;
mod keybindings;
mod sphere;

use std::path::Path;

pub use camera::CameraOptions;
pub use display::DisplayOptions;
pub use images::ImageOptions;
pub use keybindings::KeybindingOptions;
use serde::{Deserialize, Serialize};
pub use sphere::SphereOptions;

use crate::error::PanoError;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Camera projection and look-around parameters.
    pub camera: CameraOptions,
    /// Sphere tessellation.
    pub sphere: SphereOptions,
    /// Image directory and list location.
    pub images: ImageOptions,
    /// Window and presentation settings.
    pub display: DisplayOptions,
    /// Keyboard binding options.
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PanoError::OptionsParse`] if the text is not valid TOML
    /// or the values are inconsistent (see [`validate`](Self::validate)).
    pub fn from_toml(content: &str) -> Result<Self, PanoError> {
        let mut opts: Self = toml::from_str(content)
            .map_err(|e| PanoError::OptionsParse(e.to_string()))?;
        opts.keybindings.rebuild_reverse_map();
        opts.validate()?;
        Ok(opts)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, PanoError> {
        let content = std::fs::read_to_string(path).map_err(PanoError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), PanoError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PanoError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(PanoError::Io)?;
        }
        std::fs::write(path, content).map_err(PanoError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }

    /// Reject values the viewer cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`PanoError::OptionsParse`] naming the first bad value.
    pub fn validate(&self) -> Result<(), PanoError> {
        let cam = &self.camera;
        let sphere = &self.sphere;
        let bad = |msg: String| Err(PanoError::OptionsParse(msg));

        if !(cam.min_fov > 0.0 && cam.min_fov <= cam.max_fov) {
            return bad(format!(
                "camera fov range [{}, {}] is empty or not positive",
                cam.min_fov, cam.max_fov
            ));
        }
        if cam.max_fov >= 180.0 {
            return bad(format!("camera.max_fov {} must be below 180", cam.max_fov));
        }
        // At a pole the look direction is parallel to the up vector
        if cam.min_latitude > cam.max_latitude
            || cam.min_latitude <= -90.0
            || cam.max_latitude >= 90.0
        {
            return bad(format!(
                "camera latitude range [{}, {}] must lie strictly within (-90, 90)",
                cam.min_latitude, cam.max_latitude
            ));
        }
        if !(cam.znear > 0.0 && cam.znear < cam.zfar) {
            return bad(format!(
                "camera clip planes {} / {} are invalid",
                cam.znear, cam.zfar
            ));
        }
        if !(sphere.radius > cam.znear && sphere.radius < cam.zfar) {
            return bad(format!(
                "sphere.radius {} must lie between the clip planes",
                sphere.radius
            ));
        }
        if sphere.width_segments < 3 || sphere.height_segments < 2 {
            return bad(format!(
                "sphere needs at least 3x2 segments, got {}x{}",
                sphere.width_segments, sphere.height_segments
            ));
        }
        if !(0.0..=1.0).contains(&self.display.drop_hover_opacity) {
            return bad(format!(
                "display.drop_hover_opacity {} must be within [0, 1]",
                self.display.drop_hover_opacity
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyAction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn defaults_are_valid() {
        assert!(Options::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[camera]
drag_sensitivity = 0.2
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.camera.drag_sensitivity, 0.2);
        // Everything else should be default
        assert_eq!(opts.camera.zoom_speed, 0.05);
        assert_eq!(opts.camera.max_latitude, 85.0);
        assert_eq!(opts.sphere.width_segments, 60);
        assert_eq!(opts.images.default_image, "default.jpg");
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("ArrowRight"),
            Some(KeyAction::NextImage)
        );
        assert_eq!(
            opts.keybindings.lookup("ArrowLeft"),
            Some(KeyAction::PreviousImage)
        );
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn loaded_keybindings_rebuild_reverse_map() {
        let toml_str = r#"
[keybindings.bindings]
next_image = "KeyN"
previous_image = "KeyP"
toggle_info = "KeyI"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.keybindings.lookup("KeyN"), Some(KeyAction::NextImage));
        assert_eq!(opts.keybindings.lookup("ArrowRight"), None);
    }

    #[test]
    fn rejects_inverted_fov_range() {
        let toml_str = r"
[camera]
min_fov = 80.0
max_fov = 20.0
";
        assert!(matches!(
            Options::from_toml(toml_str),
            Err(PanoError::OptionsParse(_))
        ));
    }

    #[test]
    fn rejects_latitude_bounds_at_the_poles() {
        let toml_str = r"
[camera]
min_latitude = -90.0
max_latitude = 90.0
";
        assert!(matches!(
            Options::from_toml(toml_str),
            Err(PanoError::OptionsParse(_))
        ));

        let mut opts = Options::default();
        opts.camera.max_latitude = 90.0;
        assert!(opts.validate().is_err());
        opts.camera.max_latitude = 89.5;
        opts.camera.min_latitude = -89.5;
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn rejects_sphere_outside_far_plane() {
        let mut opts = Options::default();
        opts.sphere.radius = 2000.0;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn save_load_and_list_presets() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = Options::default();
        opts.display.show_info = true;
        opts.save(&dir.path().join("presets/tour.toml")).unwrap();
        std::fs::write(dir.path().join("presets/notes.txt"), "x").unwrap();

        let loaded = Options::load(&dir.path().join("presets/tour.toml")).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(
            Options::list_presets(&dir.path().join("presets")),
            vec!["tour".to_owned()]
        );
    }
}
