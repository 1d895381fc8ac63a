//! Per-frame conversion of look angles into a camera look-at target.

use glam::Vec3;

use super::controller::OrbitController;
use super::core::Camera;
use super::orientation::{AngleBounds, CameraOrientation};

/// Point on a sphere of `radius` that the camera looks at for the given
/// orientation.
///
/// Latitude is clamped to `latitude` first. `phi` is measured down from
/// the +Y pole and `theta` around it starting at +X. Only the direction
/// matters to the view matrix, so any `radius > 0` gives the same view.
#[must_use]
pub fn look_at_target(
    orientation: &CameraOrientation,
    latitude: AngleBounds,
    radius: f32,
) -> Vec3 {
    let lat = latitude.clamp(orientation.latitude);
    let phi = (90.0 - lat).to_radians();
    let theta = orientation.longitude.to_radians();

    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

/// Drives the camera from the controller once per displayed frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUpdater {
    radius: f32,
}

impl FrameUpdater {
    /// Create an updater for a sphere of the given radius. Non-positive
    /// radii fall back to 1.
    #[must_use]
    pub fn new(radius: f32) -> Self {
        let radius = if radius > 0.0 { radius } else { 1.0 };
        Self { radius }
    }

    /// Sphere radius used for the look-at target.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Settle the controller's latitude, then point the camera and set its
    /// field of view. Returns the look-at target.
    pub fn update(
        &self,
        controller: &mut OrbitController,
        camera: &mut Camera,
    ) -> Vec3 {
        let orientation = controller.settle();
        let target = look_at_target(
            &orientation,
            controller.latitude_bounds(),
            self.radius,
        );
        camera.target = target;
        camera.fovy = orientation.fov;
        target
    }
}
