//! The viewer's complete interactive vocabulary.
//!
//! Every user-facing operation, whether triggered by a pointer, the wheel,
//! a key press, or an overlay button, is a `ViewerCommand`. Consumers
//! construct commands and pass them to
//! [`PanoramaEngine::execute`](super::PanoramaEngine::execute).

use crate::input::PointerSample;
use crate::navigator::Direction;

/// A single viewer operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerCommand {
    /// Pointer went down: start a look-around drag.
    BeginDrag {
        /// The pointer that went down.
        pointer: PointerSample,
    },
    /// Pointer moved while down.
    UpdateDrag {
        /// The pointer that moved.
        pointer: PointerSample,
    },
    /// Pointer went up.
    EndDrag {
        /// The pointer that was released.
        pointer: PointerSample,
    },
    /// Abandon any drag (focus lost); the orientation is kept.
    CancelDrag,
    /// Wheel zoom with a browser-style delta (positive zooms out).
    Zoom {
        /// Vertical wheel delta.
        delta_y: f32,
    },
    /// Show the next or previous image in the list.
    Navigate(Direction),
    /// Show or hide the info panel.
    ToggleInfo,
}
