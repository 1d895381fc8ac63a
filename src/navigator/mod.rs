//! Next/previous navigation through the panorama list.
//!
//! The navigator keeps the list and the identifier currently on screen.
//! It never touches the camera; the engine turns a successful step into a
//! texture load.

mod list;

use std::fmt;
use std::str::FromStr;

pub use list::{ImageDescriptor, ImageList, ImageListSource};

/// Which way to step through the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward the end of the list.
    Next,
    /// Toward the start of the list.
    Previous,
}

impl FromStr for Direction {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "next" => Ok(Self::Next),
            "previous" => Ok(Self::Previous),
            other => Err(NavigationError::InvalidDirection(other.to_owned())),
        }
    }
}

/// Why a navigation step did nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// The image on screen is not in the list (or the list is empty).
    CurrentImageNotFound {
        /// Identifier that was searched for.
        current: String,
    },
    /// Already at the first or last entry; there is no wraparound.
    BoundaryReached {
        /// Direction that was refused.
        direction: Direction,
    },
    /// A direction string other than `"next"` or `"previous"`.
    InvalidDirection(String),
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CurrentImageNotFound { current } => write!(
                f,
                "current image {current:?} was not found in the image list"
            ),
            Self::BoundaryReached { direction } => write!(
                f,
                "at the end of the image list; cannot go {direction:?}"
            ),
            Self::InvalidDirection(given) => write!(
                f,
                "invalid direction {given:?}; expected \"next\" or \"previous\""
            ),
        }
    }
}

impl std::error::Error for NavigationError {}

/// Snapshot of the navigation state for UI rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationInfo {
    /// Position of the current image, if it is in the list.
    pub current_index: Option<usize>,
    /// Number of entries in the list.
    pub total_count: usize,
    /// Whether `next` would succeed.
    pub has_next: bool,
    /// Whether `previous` would succeed.
    pub has_previous: bool,
}

/// The image list plus the identifier currently displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageNavigator {
    images: ImageList,
    current: String,
}

impl ImageNavigator {
    /// Navigator with an empty list, showing `current`.
    pub fn new(current: impl Into<String>) -> Self {
        Self {
            images: ImageList::new(),
            current: current.into(),
        }
    }

    /// Navigator over `images`, showing `current`.
    pub fn with_images(images: ImageList, current: impl Into<String>) -> Self {
        Self {
            images,
            current: current.into(),
        }
    }

    /// Install the list once it has loaded.
    pub fn set_images(&mut self, images: ImageList) {
        self.images = images;
    }

    /// The loaded list.
    #[must_use]
    pub fn images(&self) -> &ImageList {
        &self.images
    }

    /// Identifier of the image on screen.
    #[must_use]
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Position of the current image in the list, `None` when absent.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.images.position(&self.current)
    }

    /// Step to the next image and return its identifier.
    ///
    /// # Errors
    ///
    /// See [`step`](Self::step).
    pub fn next(&mut self) -> Result<&str, NavigationError> {
        self.step(Direction::Next)
    }

    /// Step to the previous image and return its identifier.
    ///
    /// # Errors
    ///
    /// See [`step`](Self::step).
    pub fn previous(&mut self) -> Result<&str, NavigationError> {
        self.step(Direction::Previous)
    }

    /// Step one entry in `direction` and return the new identifier.
    ///
    /// # Errors
    ///
    /// [`NavigationError::CurrentImageNotFound`] if the current image is
    /// not in the list, [`NavigationError::BoundaryReached`] if the step
    /// would leave the list. State is unchanged on error.
    pub fn step(&mut self, direction: Direction) -> Result<&str, NavigationError> {
        let index = self.cursor().ok_or_else(|| {
            NavigationError::CurrentImageNotFound {
                current: self.current.clone(),
            }
        })?;

        let target = match direction {
            Direction::Next => index.checked_add(1),
            Direction::Previous => index.checked_sub(1),
        };
        let entry = target
            .and_then(|i| self.images.get(i))
            .ok_or(NavigationError::BoundaryReached { direction })?;

        self.current.clone_from(&entry.name);
        Ok(&self.current)
    }

    /// Snapshot for enabling and disabling navigation controls.
    #[must_use]
    pub fn navigation_info(&self) -> NavigationInfo {
        let current_index = self.cursor();
        let total_count = self.images.len();
        NavigationInfo {
            current_index,
            total_count,
            has_next: current_index.is_some_and(|i| i + 1 < total_count),
            has_previous: current_index.is_some_and(|i| i > 0),
        }
    }
}
