//! Drag-and-drop replacement of the panorama on screen.

use std::path::Path;

use super::source::{self, DropError, TextureSource};

/// Alert shown when a dropped file is refused.
pub const REJECT_MESSAGE: &str = "Only .JPG files can be added to the viewer.";

/// Asks the user about a drop. The viewer shows native dialogs; tests
/// script the answers.
pub trait DropPrompt {
    /// Ask whether to switch to the file called `name`.
    fn confirm_switch(&mut self, name: &str) -> bool;
    /// Tell the user the drop was refused.
    fn reject(&mut self, message: &str);
}

/// Validate a dropped file, ask for confirmation, and read it.
///
/// Returns the source to load, or `None` if the user declined or the file
/// was refused (the prompt has already been told).
pub fn handle_drop(
    path: &Path,
    prompt: &mut dyn DropPrompt,
) -> Option<TextureSource> {
    let name = source::display_name(path);

    if let Err(e) = source::check_jpeg_name(path) {
        log::warn!("Refused drop of {name}: {e}");
        prompt.reject(REJECT_MESSAGE);
        return None;
    }

    if !prompt.confirm_switch(&name) {
        log::info!("Kept current image; {name} declined");
        return None;
    }

    match source::load_dropped_file(path) {
        Ok(source) => Some(source),
        Err(e @ DropError::UnsupportedFormat { .. }) => {
            log::warn!("Refused drop of {name}: {e}");
            prompt.reject(REJECT_MESSAGE);
            None
        }
        Err(e @ DropError::Unreadable(_)) => {
            log::error!("{e}");
            prompt.reject(&e.to_string());
            None
        }
    }
}

/// Native message boxes.
#[cfg(feature = "viewer")]
#[derive(Debug, Default, Clone, Copy)]
pub struct DialogPrompt;

#[cfg(feature = "viewer")]
impl DropPrompt for DialogPrompt {
    fn confirm_switch(&mut self, name: &str) -> bool {
        let answer = rfd::MessageDialog::new()
            .set_title("Switch image")
            .set_description(format!("Switch image to {name}?"))
            .set_buttons(rfd::MessageButtons::OkCancel)
            .show();
        matches!(answer, rfd::MessageDialogResult::Ok)
    }

    fn reject(&mut self, message: &str) {
        let _ = rfd::MessageDialog::new()
            .set_title("Unsupported file")
            .set_description(message)
            .set_level(rfd::MessageLevel::Warning)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JPEG_HEADER: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0];

    #[derive(Default)]
    struct Scripted {
        answer: bool,
        asked: Vec<String>,
        rejected: Vec<String>,
    }

    impl DropPrompt for Scripted {
        fn confirm_switch(&mut self, name: &str) -> bool {
            self.asked.push(name.to_owned());
            self.answer
        }

        fn reject(&mut self, message: &str) {
            self.rejected.push(message.to_owned());
        }
    }

    fn jpeg_on_disk(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("hall.jpg");
        std::fs::write(&path, JPEG_HEADER).unwrap();
        path
    }

    #[test]
    fn confirmed_jpeg_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let mut prompt = Scripted {
            answer: true,
            ..Scripted::default()
        };
        let source = handle_drop(&jpeg_on_disk(dir.path()), &mut prompt);
        assert_eq!(source.map(|s| s.label()), Some("hall.jpg".into()));
        assert_eq!(prompt.asked, ["hall.jpg"]);
        assert!(prompt.rejected.is_empty());
    }

    #[test]
    fn declined_jpeg_is_not_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let mut prompt = Scripted::default();
        assert!(handle_drop(&jpeg_on_disk(dir.path()), &mut prompt).is_none());
        assert_eq!(prompt.asked.len(), 1);
        assert!(prompt.rejected.is_empty());
    }

    #[test]
    fn non_jpeg_is_rejected_without_asking() {
        let mut prompt = Scripted {
            answer: true,
            ..Scripted::default()
        };
        assert!(handle_drop(Path::new("notes.png"), &mut prompt).is_none());
        assert!(prompt.asked.is_empty());
        assert_eq!(prompt.rejected, [REJECT_MESSAGE]);
    }
}
