use std::collections::BTreeSet;

/// Tracks the mouse position and which touch contact is primary.
///
/// The first finger to touch down while no other finger is down becomes
/// primary and stays primary until it lifts, even if other fingers remain.
/// A finger that lands while another is down is secondary for its whole
/// lifetime.
#[derive(Debug, Default)]
pub(crate) struct PointerTracker {
    pub mouse_pos: (f32, f32),
    pub mouse_down: bool,
    primary_touch: Option<u64>,
    active_touches: BTreeSet<u64>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update cursor position.
    pub fn handle_mouse_position(&mut self, x: f32, y: f32) {
        self.mouse_pos = (x, y);
    }

    /// Register a new contact and report whether it is primary.
    pub fn touch_started(&mut self, id: u64) -> bool {
        let primary = self.active_touches.is_empty();
        let _ = self.active_touches.insert(id);
        if primary {
            self.primary_touch = Some(id);
        }
        primary
    }

    pub fn is_primary_touch(&self, id: u64) -> bool {
        self.primary_touch == Some(id)
    }

    /// Forget a contact and report whether it was primary.
    pub fn touch_ended(&mut self, id: u64) -> bool {
        let _ = self.active_touches.remove(&id);
        let was_primary = self.is_primary_touch(id);
        if was_primary {
            self.primary_touch = None;
        }
        was_primary
    }

    /// Drop all pressed state (focus lost).
    pub fn reset(&mut self) {
        self.mouse_down = false;
        self.primary_touch = None;
        self.active_touches.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_finger_is_primary_until_lifted() {
        let mut t = PointerTracker::new();
        assert!(t.touch_started(7));
        assert!(!t.touch_started(9));
        assert!(t.is_primary_touch(7));
        assert!(!t.is_primary_touch(9));

        assert!(t.touch_ended(7));
        // the remaining finger does not get promoted
        assert!(!t.is_primary_touch(9));
        assert!(!t.touch_ended(9));

        assert!(t.touch_started(9));
    }

    #[test]
    fn reset_clears_contacts() {
        let mut t = PointerTracker::new();
        t.mouse_down = true;
        let _ = t.touch_started(1);
        t.reset();
        assert!(!t.mouse_down);
        assert!(t.touch_started(2));
    }
}
