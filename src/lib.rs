// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Interactive 360° equirectangular panorama viewer built on wgpu.
//!
//! A panorama is mapped onto the inside of a sphere and viewed from its
//! centre. Dragging looks around, the wheel zooms, and an image list lets
//! the user step to the next or previous panorama. JPEG files dropped on
//! the window replace the image on screen.
//!
//! # Key entry points
//!
//! - [`engine::PanoramaEngine`] - the rendering engine and frame loop
//! - [`camera::OrbitController`] - drag and zoom state
//! - [`navigator::ImageNavigator`] - next/previous over the image list
//! - [`options::Options`] - runtime configuration (camera, sphere, images,
//!   display, key bindings)
//!
//! # Architecture
//!
//! Decoding runs on a background [`panorama::PanoramaLoader`] thread that
//! hands finished images to the main thread through a lock-free triple
//! buffer. The main thread uploads the texture and draws a single pass:
//! the textured sphere, seen from inside.

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
#[cfg(feature = "gui")]
pub mod gui;
pub mod input;
pub mod navigator;
pub mod options;
pub mod panorama;
pub mod query;
pub mod renderer;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::{PanoramaEngine, ViewerCommand};
pub use error::PanoError;
pub use input::{InputEvent, InputProcessor, MouseButton};
pub use navigator::{Direction, ImageNavigator, NavigationError};
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
