//! Command execution and drag-and-drop for PanoramaEngine

use std::path::Path;

use super::{PanoramaEngine, ViewerCommand};
use crate::panorama::{self, DropPrompt, TextureSource};

impl PanoramaEngine {
    /// Execute a command. Navigation queues a texture load.
    pub fn execute(&mut self, command: ViewerCommand) {
        if let Some(source) = self.state.execute(command) {
            self.loader.request(source);
        }
    }

    /// Queue `source` for display without touching the navigator.
    pub fn replace_active_image(&mut self, source: TextureSource) {
        log::info!("Replacing displayed image with {}", source.label());
        self.loader.request(source);
    }

    /// A file is being dragged over (`true`) or away from the window.
    pub fn set_drop_hover(&mut self, hovering: bool) {
        self.state.set_drop_hover(hovering);
    }

    /// A file was dropped: validate, confirm, and load it. The list
    /// position and current identifier are left alone. Further files from
    /// the same drop are ignored.
    pub fn handle_dropped_file(
        &mut self,
        path: &Path,
        prompt: &mut dyn DropPrompt,
    ) {
        if !self.state.claim_drop() {
            log::debug!("Ignoring extra dropped file {}", path.display());
            return;
        }
        if let Some(source) = panorama::handle_drop(path, prompt) {
            self.replace_active_image(source);
        }
    }
}
