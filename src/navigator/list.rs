//! The ordered list of panoramas and where it comes from.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::mpsc;

use serde::{Deserialize, Serialize};

use crate::error::PanoError;

/// One entry of the image list endpoint.
///
/// The endpoint may carry extra fields per entry; only `name` is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// File name relative to the image directory.
    pub name: String,
}

impl ImageDescriptor {
    /// Descriptor for `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Ordered panorama identifiers; insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageList {
    images: Vec<ImageDescriptor>,
}

impl ImageList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the endpoint's JSON array of `{ "name": ... }` objects.
    ///
    /// # Errors
    ///
    /// Returns [`PanoError::ImageList`] if the document is not such an
    /// array.
    pub fn from_json(json: &str) -> Result<Self, PanoError> {
        serde_json::from_str(json)
            .map_err(|e| PanoError::ImageList(e.to_string()))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Entry at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ImageDescriptor> {
        self.images.get(index)
    }

    /// Position of the entry called `name`. Linear scan; lists hold tens
    /// of entries.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.images.iter().position(|image| image.name == name)
    }

    /// Iterate entries in display order.
    pub fn iter(&self) -> impl Iterator<Item = &ImageDescriptor> {
        self.images.iter()
    }
}

impl<'a> IntoIterator for &'a ImageList {
    type Item = &'a ImageDescriptor;
    type IntoIter = std::slice::Iter<'a, ImageDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for ImageList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            images: iter.into_iter().map(ImageDescriptor::new).collect(),
        }
    }
}

/// Where the image list is fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageListSource {
    /// A JSON file on disk.
    File(PathBuf),
    /// An `http://` or `https://` URL.
    Url(String),
}

impl ImageListSource {
    /// Resolve a configured location. URLs are used as is; relative paths
    /// are taken relative to `image_dir`.
    #[must_use]
    pub fn resolve(location: &str, image_dir: &Path) -> Self {
        if location.starts_with("http://") || location.starts_with("https://")
        {
            Self::Url(location.to_owned())
        } else {
            Self::File(image_dir.join(location))
        }
    }

    /// Fetch and parse the list, blocking the calling thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or is not a valid
    /// image list.
    pub fn fetch(&self) -> Result<ImageList, PanoError> {
        match self {
            Self::File(path) => {
                let json = std::fs::read_to_string(path).map_err(|e| {
                    PanoError::ImageList(format!("{}: {e}", path.display()))
                })?;
                ImageList::from_json(&json)
            }
            Self::Url(url) => fetch_url(url),
        }
    }

    /// Fetch on a background thread. The receiver yields exactly one
    /// result.
    ///
    /// # Errors
    ///
    /// Returns [`PanoError::ThreadSpawn`] if the thread cannot be started.
    pub fn spawn_fetch(
        &self,
    ) -> Result<mpsc::Receiver<Result<ImageList, PanoError>>, PanoError> {
        let (tx, rx) = mpsc::channel();
        let source = self.clone();
        let _handle = std::thread::Builder::new()
            .name("image-list".into())
            .spawn(move || {
                let _ = tx.send(source.fetch());
            })
            .map_err(PanoError::ThreadSpawn)?;
        Ok(rx)
    }
}

impl FromStr for ImageListSource {
    type Err = std::convert::Infallible;

    /// Parse without an image directory; relative paths stay relative to
    /// the working directory.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::resolve(s, Path::new("")))
    }
}

#[cfg(feature = "remote")]
fn fetch_url(url: &str) -> Result<ImageList, PanoError> {
    log::info!("Fetching image list from {url}");
    let json = ureq::get(url)
        .call()
        .map_err(|e| PanoError::ImageList(format!("{url}: {e}")))?
        .into_body()
        .read_to_string()
        .map_err(|e| PanoError::ImageList(format!("{url}: {e}")))?;
    ImageList::from_json(&json)
}

#[cfg(not(feature = "remote"))]
fn fetch_url(url: &str) -> Result<ImageList, PanoError> {
    Err(PanoError::ImageList(format!(
        "{url}: remote image lists need the `remote` feature"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_ignores_extra_fields() {
        let json = r#"[
            {"name": "lobby.jpg", "caption": "Front lobby"},
            {"name": "roof.jpg", "taken": 2021},
            {"name": "garden.jpg"}
        ]"#;
        let list = ImageList::from_json(json).unwrap();
        let names: Vec<_> = list.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["lobby.jpg", "roof.jpg", "garden.jpg"]);
        assert_eq!(list.position("roof.jpg"), Some(1));
        assert_eq!(list.position("cellar.jpg"), None);
    }

    #[test]
    fn rejects_entries_without_name() {
        assert!(ImageList::from_json(r#"[{"title": "x"}]"#).is_err());
        assert!(ImageList::from_json("{\"name\": \"a\"}").is_err());
        assert!(ImageList::from_json("not json").is_err());
    }

    #[test]
    fn resolve_distinguishes_urls_from_paths() {
        let dir = Path::new("textures");
        assert_eq!(
            ImageListSource::resolve("_images.json", dir),
            ImageListSource::File(PathBuf::from("textures/_images.json"))
        );
        assert_eq!(
            ImageListSource::resolve("https://example.org/list.json", dir),
            ImageListSource::Url("https://example.org/list.json".into())
        );
    }

    #[test]
    fn fetch_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_images.json");
        std::fs::write(&path, r#"[{"name": "a.jpg"}, {"name": "b.jpg"}]"#)
            .unwrap();

        let source = ImageListSource::File(path);
        let list = source.fetch().unwrap();
        assert_eq!(list.len(), 2);

        let rx = source.spawn_fetch().unwrap();
        assert_eq!(rx.recv().unwrap().unwrap(), list);
    }

    #[test]
    fn missing_file_is_an_image_list_error() {
        let source = ImageListSource::File(PathBuf::from(
            "/definitely/not/here/_images.json",
        ));
        assert!(matches!(source.fetch(), Err(PanoError::ImageList(_))));
    }
}
