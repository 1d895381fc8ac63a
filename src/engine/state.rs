//! GPU-free viewer state: camera, navigation, and overlay flags.
//!
//! Everything the engine decides lives here so it can be exercised
//! without a device. The engine layers the surface, the texture, and the
//! background workers on top.

use std::path::PathBuf;

use serde::Serialize;

use super::command::ViewerCommand;
use crate::camera::core::{Camera, ViewUniform};
use crate::camera::{CameraOrientation, FrameUpdater, OrbitController};
use crate::navigator::{ImageList, ImageNavigator, NavigationInfo};
use crate::options::Options;
use crate::panorama::TextureSource;

/// What the info panel shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoSnapshot {
    /// List identifier of the current image.
    pub current_image: String,
    /// Name of the texture on screen (differs after a drop).
    pub displayed: Option<String>,
    /// Position of the current image in the list.
    pub index: Option<usize>,
    /// Length of the list.
    pub total: usize,
    /// Whether "next" is available.
    pub has_next: bool,
    /// Whether "previous" is available.
    pub has_previous: bool,
    /// Whether the panel is open.
    pub show_info: bool,
    /// Look longitude in degrees.
    pub longitude: f32,
    /// Look latitude in degrees.
    pub latitude: f32,
    /// Field of view in degrees.
    pub fov: f32,
}

/// Camera, navigator, and presentation flags.
pub struct ViewerState {
    controller: OrbitController,
    frame: FrameUpdater,
    camera: Camera,
    navigator: ImageNavigator,
    image_dir: PathBuf,
    displayed: Option<String>,
    show_info: bool,
    drop_hover: bool,
    drop_hover_opacity: f32,
    /// Set once a drop in the current gesture has been taken.
    drop_claimed: bool,
}

impl ViewerState {
    /// State showing `initial_image`, with an empty list until one loads.
    #[must_use]
    pub fn new(options: &Options, initial_image: &str, aspect: f32) -> Self {
        let cam = &options.camera;
        Self {
            controller: OrbitController::new(cam),
            frame: FrameUpdater::new(options.sphere.radius),
            camera: Camera::new(aspect, cam.fov, cam.znear, cam.zfar),
            navigator: ImageNavigator::new(initial_image),
            image_dir: options.images.directory.clone(),
            displayed: None,
            show_info: options.display.show_info,
            drop_hover: false,
            drop_hover_opacity: options.display.drop_hover_opacity,
            drop_claimed: false,
        }
    }

    /// Source for the image the navigator currently points at.
    #[must_use]
    pub fn current_source(&self) -> TextureSource {
        TextureSource::in_directory(&self.image_dir, self.navigator.current())
    }

    /// Apply a command. Returns a texture to load when the command changed
    /// the current image.
    pub fn execute(&mut self, command: ViewerCommand) -> Option<TextureSource> {
        match command {
            ViewerCommand::BeginDrag { pointer } => {
                self.controller.begin_drag(pointer);
            }
            ViewerCommand::UpdateDrag { pointer } => {
                self.controller.update_drag(pointer);
            }
            ViewerCommand::EndDrag { pointer } => {
                self.controller.end_drag(pointer);
            }
            ViewerCommand::CancelDrag => self.controller.cancel_drag(),
            ViewerCommand::Zoom { delta_y } => {
                self.controller.adjust_zoom(delta_y);
            }
            ViewerCommand::Navigate(direction) => {
                return match self.navigator.step(direction) {
                    Ok(name) => {
                        log::info!("Set current image to {name}");
                        Some(self.current_source())
                    }
                    Err(e) => {
                        log::warn!("{e}");
                        None
                    }
                };
            }
            ViewerCommand::ToggleInfo => self.show_info = !self.show_info,
        }
        None
    }

    /// Install the image list once it arrives.
    pub fn set_images(&mut self, images: ImageList) {
        log::info!("Image list loaded with {} entries", images.len());
        if !images.is_empty()
            && images.position(self.navigator.current()).is_none()
        {
            log::warn!(
                "Current image {} is not in the image list",
                self.navigator.current()
            );
        }
        self.navigator.set_images(images);
    }

    /// Record the texture now on screen.
    pub fn set_displayed(&mut self, label: String) {
        self.displayed = Some(label);
    }

    /// Dim the panorama while a file hovers the window. Any hover change
    /// starts a new drag gesture.
    pub fn set_drop_hover(&mut self, hovering: bool) {
        self.drop_hover = hovering;
        self.drop_claimed = false;
    }

    /// Take the drop for the current gesture. A multi-file drop arrives as
    /// one event per file; only the first is accepted. Restores the
    /// opacity either way.
    pub fn claim_drop(&mut self) -> bool {
        self.drop_hover = false;
        !std::mem::replace(&mut self.drop_claimed, true)
    }

    /// Panorama opacity for this frame.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        if self.drop_hover {
            self.drop_hover_opacity
        } else {
            1.0
        }
    }

    /// Update the projection aspect ratio.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }

    /// Run the frame updater and build this frame's uniform.
    pub fn frame_uniform(&mut self) -> ViewUniform {
        let _ = self.frame.update(&mut self.controller, &mut self.camera);
        let mut uniform = ViewUniform::new();
        uniform.update_view_proj(&self.camera);
        uniform.set_opacity(self.opacity());
        uniform
    }

    /// Current look angles.
    #[must_use]
    pub fn orientation(&self) -> CameraOrientation {
        self.controller.orientation()
    }

    /// The camera as of the last frame.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The navigator.
    #[must_use]
    pub fn navigator(&self) -> &ImageNavigator {
        &self.navigator
    }

    /// Navigation availability for the overlay buttons.
    #[must_use]
    pub fn navigation_info(&self) -> NavigationInfo {
        self.navigator.navigation_info()
    }

    /// Whether the info panel is open.
    #[must_use]
    pub fn show_info(&self) -> bool {
        self.show_info
    }

    /// Everything the info panel displays.
    #[must_use]
    pub fn info(&self) -> InfoSnapshot {
        let nav = self.navigation_info();
        let orientation = self.orientation();
        InfoSnapshot {
            current_image: self.navigator.current().to_owned(),
            displayed: self.displayed.clone(),
            index: nav.current_index,
            total: nav.total_count,
            has_next: nav.has_next,
            has_previous: nav.has_previous,
            show_info: self.show_info,
            longitude: orientation.longitude,
            latitude: orientation.latitude,
            fov: orientation.fov,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::input::PointerSample;
    use crate::navigator::Direction;

    fn state(current: &str) -> ViewerState {
        let mut s = ViewerState::new(&Options::default(), current, 2.0);
        s.set_images(["A", "B", "C"].into_iter().collect());
        s
    }

    #[test]
    fn navigation_returns_source_in_image_dir() {
        let mut s = state("B");
        let source = s.execute(ViewerCommand::Navigate(Direction::Next));
        assert_eq!(
            source,
            Some(TextureSource::in_directory(Path::new("textures"), "C"))
        );
        assert_eq!(s.navigator().current(), "C");
    }

    #[test]
    fn failed_navigation_loads_nothing() {
        let mut s = state("C");
        assert_eq!(s.execute(ViewerCommand::Navigate(Direction::Next)), None);
        assert_eq!(s.navigator().current(), "C");

        let mut s = state("Z");
        assert_eq!(
            s.execute(ViewerCommand::Navigate(Direction::Previous)),
            None
        );
    }

    #[test]
    fn drag_then_frame_points_camera() {
        let mut s = state("A");
        let _ = s.execute(ViewerCommand::BeginDrag {
            pointer: PointerSample::primary(100.0, 100.0),
        });
        // 900px left at 0.1°/px turns the view 90° toward +z
        let _ = s.execute(ViewerCommand::UpdateDrag {
            pointer: PointerSample::primary(-800.0, 100.0),
        });
        let _ = s.execute(ViewerCommand::EndDrag {
            pointer: PointerSample::primary(-800.0, 100.0),
        });
        let _ = s.frame_uniform();
        let dir = s.camera().target.normalize();
        assert!((dir - glam::Vec3::Z).length() < 1e-4, "{dir:?}");
    }

    #[test]
    fn frame_writes_back_clamped_latitude() {
        let mut s = state("A");
        let _ = s.execute(ViewerCommand::BeginDrag {
            pointer: PointerSample::primary(0.0, 0.0),
        });
        let _ = s.execute(ViewerCommand::UpdateDrag {
            pointer: PointerSample::primary(0.0, 5000.0),
        });
        assert_eq!(s.orientation().latitude, 500.0);
        let _ = s.frame_uniform();
        assert_eq!(s.orientation().latitude, 85.0);
    }

    #[test]
    fn steepest_valid_latitude_keeps_view_finite() {
        let mut options = Options::default();
        options.camera.min_latitude = -89.5;
        options.camera.max_latitude = 89.5;
        assert!(options.validate().is_ok());

        let mut s = ViewerState::new(&options, "A", 2.0);
        let _ = s.execute(ViewerCommand::BeginDrag {
            pointer: PointerSample::primary(0.0, 0.0),
        });
        let _ = s.execute(ViewerCommand::UpdateDrag {
            pointer: PointerSample::primary(0.0, 5000.0),
        });
        let uniform = s.frame_uniform();
        assert_eq!(s.orientation().latitude, 89.5);
        assert!(uniform.view_proj.iter().flatten().all(|v| v.is_finite()));
    }

    #[test]
    fn zoom_reaches_camera_fov() {
        let mut s = state("A");
        let _ = s.execute(ViewerCommand::Zoom { delta_y: -300.0 });
        let _ = s.frame_uniform();
        assert_eq!(s.camera().fovy, 60.0);
    }

    #[test]
    fn drop_hover_dims_and_toggle_info_flips() {
        let mut s = state("A");
        s.set_drop_hover(true);
        assert_eq!(s.frame_uniform().params[0], 0.5);
        s.set_drop_hover(false);
        assert_eq!(s.frame_uniform().params[0], 1.0);

        assert!(!s.show_info());
        let _ = s.execute(ViewerCommand::ToggleInfo);
        assert!(s.info().show_info);
    }

    #[test]
    fn only_first_file_of_a_drop_is_taken() {
        let mut s = state("A");
        for _ in 0..3 {
            s.set_drop_hover(true);
        }
        assert!(s.claim_drop());
        assert_eq!(s.opacity(), 1.0);
        assert!(!s.claim_drop());
        assert!(!s.claim_drop());

        // The next drag gesture may drop again
        s.set_drop_hover(true);
        assert!(s.claim_drop());
        s.set_drop_hover(false);
        assert!(s.claim_drop());
    }

    #[test]
    fn info_reflects_navigation_and_display() {
        let mut s = state("B");
        s.set_displayed("dropped.jpg".into());
        let info = s.info();
        assert_eq!(info.current_image, "B");
        assert_eq!(info.displayed.as_deref(), Some("dropped.jpg"));
        assert_eq!(info.index, Some(1));
        assert_eq!(info.total, 3);
        assert!(info.has_next && info.has_previous);
    }
}
