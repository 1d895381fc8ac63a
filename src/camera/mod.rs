//! Camera system for looking around the inside of the panorama sphere.
//!
//! Provides drag-to-look and wheel zoom through [`controller`], the
//! per-frame look-at computation in [`frame`], and the projection and GPU
//! uniform types in [`core`].

/// Drag and zoom controller owning the look angles.
pub mod controller;
/// Perspective camera and GPU uniform types.
pub mod core;
/// Per-frame look-at target computation.
pub mod frame;
/// Look angles and their clamp ranges.
pub mod orientation;

pub use controller::{DragSession, OrbitController};
pub use frame::{look_at_target, FrameUpdater};
pub use orientation::{AngleBounds, CameraOrientation};
