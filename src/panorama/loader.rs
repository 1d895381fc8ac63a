//! Background panorama decoder.
//!
//! Decoding a full-size equirectangular JPEG takes long enough to drop
//! frames, so it happens on a worker thread. Requests go in over an mpsc
//! channel; the latest result comes back through a triple buffer that the
//! frame loop polls without blocking.

use std::sync::mpsc;

use image::imageops::FilterType;

use super::source::TextureSource;
use crate::error::PanoError;

/// RGBA8 pixels ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPanorama {
    /// Name of the source, for logs and the info panel.
    pub label: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Tightly packed RGBA8 rows.
    pub rgba: Vec<u8>,
}

/// Result of one load request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Decoded and ready for upload.
    Ready(DecodedPanorama),
    /// The source could not be read or decoded.
    Failed {
        /// Name of the source.
        label: String,
        /// What went wrong.
        reason: String,
    },
}

enum LoaderRequest {
    Load(TextureSource),
    Shutdown,
}

/// Worker thread that decodes panoramas off the frame loop.
pub struct PanoramaLoader {
    request_tx: mpsc::Sender<LoaderRequest>,
    result: triple_buffer::Output<Option<LoadOutcome>>,
    thread: Option<std::thread::JoinHandle<()>>,
}

impl PanoramaLoader {
    /// Spawn the loader. Images larger than `max_dimension` on either side
    /// are downscaled to fit, keeping their aspect ratio.
    ///
    /// # Errors
    ///
    /// Returns [`PanoError::ThreadSpawn`] if the thread fails to spawn.
    pub fn new(max_dimension: u32) -> Result<Self, PanoError> {
        let (request_tx, request_rx) = mpsc::channel();
        let (input, output) = triple_buffer::triple_buffer(&None);

        let thread = std::thread::Builder::new()
            .name("panorama-loader".into())
            .spawn(move || {
                Self::thread_loop(&request_rx, input, max_dimension.max(1));
            })
            .map_err(PanoError::ThreadSpawn)?;

        Ok(Self {
            request_tx,
            result: output,
            thread: Some(thread),
        })
    }

    /// Queue a load (non-blocking). Older queued requests are superseded.
    pub fn request(&self, source: TextureSource) {
        log::debug!("Queued panorama load: {}", source.label());
        let _ = self.request_tx.send(LoaderRequest::Load(source));
    }

    /// Non-blocking check for a finished load.
    pub fn try_recv(&mut self) -> Option<LoadOutcome> {
        let _ = self.result.update();
        self.result.output_buffer_mut().take()
    }

    /// Shut down the worker and wait for it to finish.
    pub fn shutdown(&mut self) {
        let _ = self.request_tx.send(LoaderRequest::Shutdown);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }

    fn thread_loop(
        request_rx: &mpsc::Receiver<LoaderRequest>,
        mut output: triple_buffer::Input<Option<LoadOutcome>>,
        max_dimension: u32,
    ) {
        while let Ok(request) = request_rx.recv() {
            match drain_latest(request, request_rx) {
                LoaderRequest::Shutdown => break,
                LoaderRequest::Load(source) => {
                    let label = source.label();
                    let outcome = match decode(&source, max_dimension) {
                        Ok(decoded) => LoadOutcome::Ready(decoded),
                        Err(e) => LoadOutcome::Failed {
                            label,
                            reason: e.to_string(),
                        },
                    };
                    output.write(Some(outcome));
                }
            }
        }
    }
}

impl Drop for PanoramaLoader {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Keep only the newest queued request; a shutdown always wins.
fn drain_latest(
    initial: LoaderRequest,
    rx: &mpsc::Receiver<LoaderRequest>,
) -> LoaderRequest {
    let mut latest = initial;
    while let Ok(newer) = rx.try_recv() {
        if matches!(latest, LoaderRequest::Shutdown) {
            break;
        }
        latest = newer;
    }
    latest
}

/// Decode `source` to RGBA8, downscaling past `max_dimension`.
///
/// # Errors
///
/// Returns an error if the source cannot be read or decoded.
pub fn decode(
    source: &TextureSource,
    max_dimension: u32,
) -> Result<DecodedPanorama, PanoError> {
    let bytes = source.read()?;
    let mut img = image::load_from_memory(&bytes)?;

    if img.width() > max_dimension || img.height() > max_dimension {
        log::info!(
            "Downscaling {} from {}x{} to fit {max_dimension}px",
            source.label(),
            img.width(),
            img.height()
        );
        img = img.resize(max_dimension, max_dimension, FilterType::Triangle);
    }

    let rgba = img.into_rgba8();
    Ok(DecodedPanorama {
        label: source.label(),
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::time::{Duration, Instant};

    use super::*;

    fn write_jpeg(dir: &Path, name: &str, width: u32, height: u32) {
        let img = image::RgbImage::from_pixel(
            width,
            height,
            image::Rgb([200, 40, 10]),
        );
        img.save(dir.join(name)).unwrap();
    }

    fn wait_for(loader: &mut PanoramaLoader) -> LoadOutcome {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(outcome) = loader.try_recv() {
                return outcome;
            }
            assert!(Instant::now() < deadline, "loader timed out");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn decodes_file_source() {
        let dir = tempfile::tempdir().unwrap();
        write_jpeg(dir.path(), "a.jpg", 32, 16);

        let decoded =
            decode(&TextureSource::in_directory(dir.path(), "a.jpg"), 4096)
                .unwrap();
        assert_eq!(decoded.label, "a.jpg");
        assert_eq!((decoded.width, decoded.height), (32, 16));
        assert_eq!(decoded.rgba.len(), 32 * 16 * 4);
        assert_eq!(decoded.rgba[3], 255);
    }

    #[test]
    fn downscales_oversized_images_keeping_aspect() {
        let dir = tempfile::tempdir().unwrap();
        write_jpeg(dir.path(), "wide.jpg", 64, 32);

        let decoded =
            decode(&TextureSource::in_directory(dir.path(), "wide.jpg"), 16)
                .unwrap();
        assert_eq!((decoded.width, decoded.height), (16, 8));
    }

    #[test]
    fn loader_reports_success_and_failure() {
        let dir = tempfile::tempdir().unwrap();
        write_jpeg(dir.path(), "ok.jpg", 8, 4);
        let mut loader = PanoramaLoader::new(4096).unwrap();
        assert_eq!(loader.try_recv(), None);

        loader.request(TextureSource::in_directory(dir.path(), "ok.jpg"));
        assert!(matches!(
            wait_for(&mut loader),
            LoadOutcome::Ready(p) if p.label == "ok.jpg" && p.width == 8
        ));

        loader.request(TextureSource::Bytes {
            label: "junk.jpg".into(),
            bytes: vec![0xFF, 0xD8, 0x00].into(),
        });
        assert!(matches!(
            wait_for(&mut loader),
            LoadOutcome::Failed { label, .. } if label == "junk.jpg"
        ));

        // Results are taken once
        assert_eq!(loader.try_recv(), None);
        loader.shutdown();
    }
}
