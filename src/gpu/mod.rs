//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, the panorama texture, and
//! bind group boilerplate.

/// Bind group layout entries and samplers.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Panorama texture upload.
pub mod texture;
