//! Read-only queries and option updates for [`PanoramaEngine`].

use super::{InfoSnapshot, PanoramaEngine, ViewerState};
use crate::options::Options;

impl PanoramaEngine {
    /// Camera and navigation state.
    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    /// Options the engine was built with.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Info panel contents.
    pub fn info(&self) -> InfoSnapshot {
        self.state.info()
    }

    /// Smoothed frames per second.
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }

    /// Whether the frame cap allows drawing now.
    pub fn should_render(&self) -> bool {
        self.frame_timing.should_render()
    }
}
