//! Panorama sources, background decoding, and drag-and-drop.

mod drop;
mod loader;
mod source;

#[cfg(feature = "viewer")]
pub use drop::DialogPrompt;
pub use drop::{handle_drop, DropPrompt, REJECT_MESSAGE};
pub use loader::{decode, DecodedPanorama, LoadOutcome, PanoramaLoader};
pub use source::{
    check_jpeg_bytes, check_jpeg_name, display_name, load_dropped_file,
    DropError, TextureSource,
};
