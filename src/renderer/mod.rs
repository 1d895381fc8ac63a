//! Rendering: sphere tessellation and the panorama pass.

pub mod panorama_pass;
pub mod sphere_mesh;

pub use panorama_pass::PanoramaPass;
pub use sphere_mesh::{SphereMesh, SphereVertex};
