//! Where panorama pixels come from, and the JPEG gate for dropped files.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::PanoError;

/// A panorama to decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureSource {
    /// A file on disk (the navigation path).
    File(PathBuf),
    /// Bytes already in memory (the drop path).
    Bytes {
        /// Name shown in logs and the info panel.
        label: String,
        /// Encoded image bytes.
        bytes: Arc<[u8]>,
    },
}

impl TextureSource {
    /// The panorama called `name` inside `image_dir`.
    #[must_use]
    pub fn in_directory(image_dir: &Path, name: &str) -> Self {
        Self::File(image_dir.join(name))
    }

    /// Human-readable name of the source.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::File(path) => display_name(path),
            Self::Bytes { label, .. } => label.clone(),
        }
    }

    /// Read the encoded bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PanoError::Io`] if a file source cannot be read.
    pub fn read(&self) -> Result<Arc<[u8]>, PanoError> {
        match self {
            Self::File(path) => Ok(std::fs::read(path)?.into()),
            Self::Bytes { bytes, .. } => Ok(Arc::clone(bytes)),
        }
    }
}

/// Why a dropped file was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropError {
    /// The file is not a JPEG.
    UnsupportedFormat {
        /// What the file appears to be instead.
        mime: String,
    },
    /// The file could not be read.
    Unreadable(String),
}

impl fmt::Display for DropError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat { mime } => {
                write!(f, "unsupported format {mime}; only JPEG is accepted")
            }
            Self::Unreadable(msg) => write!(f, "cannot read dropped file: {msg}"),
        }
    }
}

impl std::error::Error for DropError {}

const JPEG_MIME: &str = "image/jpeg";

/// Check the MIME type implied by a file name.
///
/// # Errors
///
/// Returns [`DropError::UnsupportedFormat`] unless the extension maps to
/// `image/jpeg`.
pub fn check_jpeg_name(path: &Path) -> Result<(), DropError> {
    let guessed = mime_guess::from_path(path).first();
    match guessed {
        Some(mime) if mime.essence_str() == JPEG_MIME => Ok(()),
        Some(mime) => Err(DropError::UnsupportedFormat {
            mime: mime.essence_str().to_owned(),
        }),
        None => Err(DropError::UnsupportedFormat {
            mime: "application/octet-stream".into(),
        }),
    }
}

/// Check that `bytes` really are a JPEG (magic `FF D8 FF`).
///
/// # Errors
///
/// Returns [`DropError::UnsupportedFormat`] naming the sniffed format.
pub fn check_jpeg_bytes(bytes: &[u8]) -> Result<(), DropError> {
    match image::guess_format(bytes) {
        Ok(image::ImageFormat::Jpeg) => Ok(()),
        Ok(other) => Err(DropError::UnsupportedFormat {
            mime: other.to_mime_type().to_owned(),
        }),
        Err(_) => Err(DropError::UnsupportedFormat {
            mime: "application/octet-stream".into(),
        }),
    }
}

/// Read a dropped file and turn it into a texture source.
///
/// # Errors
///
/// Returns [`DropError`] if the name or the contents are not JPEG, or the
/// file cannot be read.
pub fn load_dropped_file(path: &Path) -> Result<TextureSource, DropError> {
    check_jpeg_name(path)?;
    let bytes = std::fs::read(path)
        .map_err(|e| DropError::Unreadable(format!("{}: {e}", path.display())))?;
    check_jpeg_bytes(&bytes)?;
    Ok(TextureSource::Bytes {
        label: display_name(path),
        bytes: bytes.into(),
    })
}

/// File name for prompts; falls back to the whole path.
#[must_use]
pub fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const JPEG_HEADER: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J'];
    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn jpeg_names_pass() {
        assert!(check_jpeg_name(Path::new("lobby.jpg")).is_ok());
        assert!(check_jpeg_name(Path::new("/tmp/LOBBY.JPG")).is_ok());
        assert!(check_jpeg_name(Path::new("lobby.jpeg")).is_ok());
    }

    #[test]
    fn other_names_report_their_mime() {
        assert_eq!(
            check_jpeg_name(Path::new("lobby.png")),
            Err(DropError::UnsupportedFormat {
                mime: "image/png".into()
            })
        );
        assert!(check_jpeg_name(Path::new("no_extension")).is_err());
    }

    #[test]
    fn sniffing_checks_magic_bytes() {
        assert!(check_jpeg_bytes(JPEG_HEADER).is_ok());
        assert_eq!(
            check_jpeg_bytes(PNG_HEADER),
            Err(DropError::UnsupportedFormat {
                mime: "image/png".into()
            })
        );
        assert!(check_jpeg_bytes(b"hello").is_err());
    }

    #[test]
    fn renamed_png_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.jpg");
        std::fs::write(&path, PNG_HEADER).unwrap();
        assert!(matches!(
            load_dropped_file(&path),
            Err(DropError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn dropped_jpeg_becomes_byte_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garden.jpg");
        std::fs::write(&path, JPEG_HEADER).unwrap();
        let source = load_dropped_file(&path).unwrap();
        assert_eq!(source.label(), "garden.jpg");
        assert_eq!(&*source.read().unwrap(), JPEG_HEADER);
    }

    #[test]
    fn missing_file_is_unreadable() {
        assert!(matches!(
            load_dropped_file(Path::new("/definitely/not/here.jpg")),
            Err(DropError::Unreadable(_))
        ));
    }

    #[test]
    fn file_source_label_is_file_name() {
        let source = TextureSource::in_directory(Path::new("textures"), "a.jpg");
        assert_eq!(source, TextureSource::File(PathBuf::from("textures/a.jpg")));
        assert_eq!(source.label(), "a.jpg");
    }
}
