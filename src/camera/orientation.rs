/// Where the camera is looking, in degrees.
///
/// `longitude` is unbounded and wraps through trigonometric periodicity.
/// `latitude` may temporarily leave its bounds while a drag is in
/// progress; it is clamped when a frame is computed. `fov` is always kept
/// within its bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraOrientation {
    /// Horizontal look angle in degrees.
    pub longitude: f32,
    /// Vertical look angle in degrees (positive looks up).
    pub latitude: f32,
    /// Vertical field of view in degrees.
    pub fov: f32,
}

/// Inclusive range used to clamp a camera angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleBounds {
    /// Lower bound in degrees.
    pub min: f32,
    /// Upper bound in degrees.
    pub max: f32,
}

impl AngleBounds {
    /// Latitude bounds that keep the view away from the poles.
    pub const LATITUDE: Self = Self {
        min: -85.0,
        max: 85.0,
    };
    /// Field-of-view bounds.
    pub const FOV: Self = Self {
        min: 10.0,
        max: 75.0,
    };

    /// Create bounds, swapping the ends if given in reverse order.
    #[must_use]
    pub fn new(min: f32, max: f32) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Clamp `value` into the range.
    #[must_use]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Whether `value` lies within the range.
    #[must_use]
    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

impl CameraOrientation {
    /// Looking at the horizon along +X with the given field of view.
    #[must_use]
    pub fn new(fov: f32) -> Self {
        Self {
            longitude: 0.0,
            latitude: 0.0,
            fov,
        }
    }
}

impl Default for CameraOrientation {
    fn default() -> Self {
        Self::new(AngleBounds::FOV.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latitude_clamp_stays_in_range() {
        let bounds = AngleBounds::LATITUDE;
        for lat in [-1000.0, -85.5, -85.0, -12.25, 0.0, 42.0, 85.0, 90.0, 1e6]
        {
            let clamped = bounds.clamp(lat);
            assert!(bounds.contains(clamped), "{lat} -> {clamped}");
        }
    }

    #[test]
    fn in_range_values_pass_through() {
        let bounds = AngleBounds::LATITUDE;
        for lat in [-85.0, -30.5, 0.0, 17.0, 85.0] {
            assert_eq!(bounds.clamp(lat), lat);
        }
    }

    #[test]
    fn reversed_bounds_are_normalized() {
        let bounds = AngleBounds::new(75.0, 10.0);
        assert_eq!(bounds, AngleBounds::FOV);
    }
}
