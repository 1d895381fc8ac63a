use super::orientation::{AngleBounds, CameraOrientation};
use crate::input::PointerSample;
use crate::options::CameraOptions;

/// Snapshot taken when a drag starts.
///
/// Every drag update is computed from this anchor rather than accumulated
/// from the previous update, so a fast drag that overshoots the latitude
/// bounds keeps its excess until the pointer comes back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Pointer x at drag start, in physical pixels.
    pub anchor_x: f32,
    /// Pointer y at drag start, in physical pixels.
    pub anchor_y: f32,
    /// Longitude at drag start.
    pub anchor_longitude: f32,
    /// Latitude at drag start.
    pub anchor_latitude: f32,
}

/// Look-around camera controller for the inside of a sphere.
///
/// Owns the [`CameraOrientation`] and the active [`DragSession`], if any.
/// While no session exists, drag updates and drag ends are ignored; this
/// replaces attaching and detaching move/up handlers per drag.
#[derive(Debug, Clone)]
pub struct OrbitController {
    orientation: CameraOrientation,
    drag: Option<DragSession>,
    drag_sensitivity: f32,
    zoom_speed: f32,
    latitude_bounds: AngleBounds,
    fov_bounds: AngleBounds,
}

impl OrbitController {
    /// Create a controller looking at the horizon with the configured
    /// initial field of view.
    #[must_use]
    pub fn new(options: &CameraOptions) -> Self {
        let fov_bounds = AngleBounds::new(options.min_fov, options.max_fov);
        Self {
            orientation: CameraOrientation::new(fov_bounds.clamp(options.fov)),
            drag: None,
            drag_sensitivity: options.drag_sensitivity,
            zoom_speed: options.zoom_speed,
            latitude_bounds: AngleBounds::new(
                options.min_latitude,
                options.max_latitude,
            ),
            fov_bounds,
        }
    }

    /// Current orientation.
    #[must_use]
    pub fn orientation(&self) -> CameraOrientation {
        self.orientation
    }

    /// Active drag session, if the user is dragging.
    #[must_use]
    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Latitude clamp range.
    #[must_use]
    pub fn latitude_bounds(&self) -> AngleBounds {
        self.latitude_bounds
    }

    /// Start a drag anchored at `pointer` and the current look angles.
    ///
    /// Secondary pointers (extra touch points) are ignored so that
    /// simultaneous touches cannot fight over the orientation.
    pub fn begin_drag(&mut self, pointer: PointerSample) {
        if !pointer.is_primary {
            return;
        }
        self.drag = Some(DragSession {
            anchor_x: pointer.x,
            anchor_y: pointer.y,
            anchor_longitude: self.orientation.longitude,
            anchor_latitude: self.orientation.latitude,
        });
    }

    /// Recompute the look angles from the drag anchor.
    ///
    /// Dragging right turns the view left and dragging down tilts it up.
    /// No clamping happens here.
    pub fn update_drag(&mut self, pointer: PointerSample) {
        if !pointer.is_primary {
            return;
        }
        let Some(drag) = self.drag else {
            return;
        };
        self.orientation.longitude = (drag.anchor_x - pointer.x)
            * self.drag_sensitivity
            + drag.anchor_longitude;
        self.orientation.latitude = (pointer.y - drag.anchor_y)
            * self.drag_sensitivity
            + drag.anchor_latitude;
    }

    /// Finish the drag. The orientation from the last update persists.
    pub fn end_drag(&mut self, pointer: PointerSample) {
        if !pointer.is_primary {
            return;
        }
        self.drag = None;
    }

    /// Drop the drag session regardless of which pointer owns it (focus
    /// loss, pointer capture lost).
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// Change the field of view by a wheel delta (positive zooms out).
    pub fn adjust_zoom(&mut self, wheel_delta_y: f32) {
        self.orientation.fov = self
            .fov_bounds
            .clamp(self.orientation.fov + wheel_delta_y * self.zoom_speed);
    }

    /// Clamp the latitude into its bounds and return the orientation a
    /// frame should be rendered with.
    pub fn settle(&mut self) -> CameraOrientation {
        self.orientation.latitude =
            self.latitude_bounds.clamp(self.orientation.latitude);
        self.orientation
    }
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new(&CameraOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primary(x: f32, y: f32) -> PointerSample {
        PointerSample::primary(x, y)
    }

    #[test]
    fn drag_right_turns_view_left() {
        let mut c = OrbitController::default();
        c.begin_drag(primary(100.0, 100.0));
        c.update_drag(primary(150.0, 100.0));
        assert!((c.orientation().longitude - -5.0).abs() < 1e-6);
        assert_eq!(c.orientation().latitude, 0.0);
    }

    #[test]
    fn drag_down_tilts_view_up() {
        let mut c = OrbitController::default();
        c.begin_drag(primary(0.0, 0.0));
        c.update_drag(primary(0.0, 200.0));
        assert!((c.orientation().latitude - 20.0).abs() < 1e-5);
    }

    #[test]
    fn update_is_relative_to_anchor_not_accumulated() {
        let mut c = OrbitController::default();
        c.begin_drag(primary(0.0, 0.0));
        c.update_drag(primary(0.0, 2000.0));
        // far past the latitude bound while dragging
        assert!((c.orientation().latitude - 200.0).abs() < 1e-3);
        c.update_drag(primary(0.0, 100.0));
        assert!((c.orientation().latitude - 10.0).abs() < 1e-5);
    }

    #[test]
    fn update_without_session_is_ignored() {
        let mut c = OrbitController::default();
        c.update_drag(primary(500.0, 500.0));
        assert_eq!(c.orientation(), CameraOrientation::default());
    }

    #[test]
    fn secondary_pointer_cannot_start_or_move_a_drag() {
        let mut c = OrbitController::default();
        c.begin_drag(PointerSample::secondary(10.0, 10.0));
        assert!(!c.is_dragging());

        c.begin_drag(primary(10.0, 10.0));
        c.update_drag(PointerSample::secondary(400.0, 400.0));
        assert_eq!(c.orientation().longitude, 0.0);
        c.end_drag(PointerSample::secondary(400.0, 400.0));
        assert!(c.is_dragging());
        c.end_drag(primary(10.0, 10.0));
        assert!(!c.is_dragging());
    }

    #[test]
    fn end_then_begin_at_same_point_keeps_orientation() {
        let mut c = OrbitController::default();
        c.begin_drag(primary(300.0, 200.0));
        c.update_drag(primary(250.0, 260.0));
        c.end_drag(primary(250.0, 260.0));
        let after_first = c.orientation();

        c.begin_drag(primary(250.0, 260.0));
        let session = *c.drag_session().unwrap();
        assert_eq!(session.anchor_longitude, after_first.longitude);
        assert_eq!(session.anchor_latitude, after_first.latitude);
        c.update_drag(primary(250.0, 260.0));
        assert_eq!(c.orientation(), after_first);
    }

    #[test]
    fn zoom_stays_within_bounds_for_any_history() {
        let mut c = OrbitController::default();
        let deltas = [
            1e6, -3.0, 120.0, -1e6, -100.0, 40.0, 0.0, 7.5, -2e3, 2e3,
        ];
        for delta in deltas {
            c.adjust_zoom(delta);
            let fov = c.orientation().fov;
            assert!((10.0..=75.0).contains(&fov), "fov {fov}");
        }
    }

    #[test]
    fn zoom_has_no_overshoot_memory() {
        let mut c = OrbitController::default();
        for _ in 0..50 {
            c.adjust_zoom(100.0);
        }
        assert_eq!(c.orientation().fov, 75.0);
        c.adjust_zoom(-100.0);
        assert!((c.orientation().fov - 70.0).abs() < 1e-5);
    }

    #[test]
    fn settle_clamps_latitude() {
        let mut c = OrbitController::default();
        c.begin_drag(primary(0.0, 0.0));
        c.update_drag(primary(0.0, -5000.0));
        let settled = c.settle();
        assert_eq!(settled.latitude, -85.0);
        assert_eq!(c.orientation().latitude, -85.0);
    }

    #[test]
    fn options_tune_sensitivity_and_bounds() {
        let options = CameraOptions {
            drag_sensitivity: 0.5,
            min_fov: 20.0,
            max_fov: 60.0,
            fov: 90.0,
            ..CameraOptions::default()
        };
        let mut c = OrbitController::new(&options);
        assert_eq!(c.orientation().fov, 60.0);
        c.begin_drag(primary(0.0, 0.0));
        c.update_drag(primary(-10.0, 0.0));
        assert!((c.orientation().longitude - 5.0).abs() < 1e-6);
    }
}
