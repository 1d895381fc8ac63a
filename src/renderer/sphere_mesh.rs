//! UV sphere tessellation, mirrored so it is seen from the inside.
//!
//! Vertex layout follows the usual latitude/longitude grid: `(width + 1) *
//! (height + 1)` vertices with a duplicated seam column so texture
//! coordinates run 0..1 without wrapping. The x axis is mirrored, which
//! both flips the image the right way round for a viewer at the centre and
//! turns the triangles to face inward (counter-clockwise seen from the
//! origin).

use std::f32::consts::PI;

/// One sphere vertex: position and equirectangular texture coordinate.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SphereVertex {
    /// Position in world space.
    pub position: [f32; 3],
    /// Texture coordinate; `v = 0` is the top row of the image.
    pub uv: [f32; 2],
}

impl SphereVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    /// Vertex buffer layout matching the shader inputs.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// CPU-side sphere geometry.
#[derive(Debug, Clone)]
pub struct SphereMesh {
    /// Grid vertices, row-major from the north pole.
    pub vertices: Vec<SphereVertex>,
    /// Triangle list indices.
    pub indices: Vec<u32>,
}

impl SphereMesh {
    /// Tessellate a sphere of `radius` with `width_segments` around the
    /// equator and `height_segments` from pole to pole. Segment counts are
    /// raised to the 3x2 minimum.
    #[must_use]
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let ws = width_segments.max(3);
        let hs = height_segments.max(2);

        let mut vertices = Vec::with_capacity(((ws + 1) * (hs + 1)) as usize);
        for iy in 0..=hs {
            let v = iy as f32 / hs as f32;
            // Pole vertices sample the middle of their cell
            let u_offset = if iy == 0 {
                0.5 / ws as f32
            } else if iy == hs {
                -0.5 / ws as f32
            } else {
                0.0
            };
            let (sin_theta, cos_theta) = (v * PI).sin_cos();

            for ix in 0..=ws {
                let u = ix as f32 / ws as f32;
                let (sin_phi, cos_phi) = (u * 2.0 * PI).sin_cos();
                vertices.push(SphereVertex {
                    position: [
                        radius * cos_phi * sin_theta,
                        radius * cos_theta,
                        radius * sin_phi * sin_theta,
                    ],
                    uv: [u + u_offset, v],
                });
            }
        }

        let row = ws + 1;
        let mut indices = Vec::with_capacity((ws * (2 * hs - 2) * 3) as usize);
        for iy in 0..hs {
            for ix in 0..ws {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;
                // Skip the triangles that collapse onto a pole
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != hs - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self { vertices, indices }
    }

    /// Number of indices, as the draw call wants it.
    #[must_use]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    fn triangles(mesh: &SphereMesh) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        mesh.indices.chunks_exact(3).map(|t| {
            [t[0], t[1], t[2]]
                .map(|i| Vec3::from(mesh.vertices[i as usize].position))
        })
    }

    #[test]
    fn default_tessellation_counts() {
        let mesh = SphereMesh::new(500.0, 60, 40);
        assert_eq!(mesh.vertices.len(), 61 * 41);
        assert_eq!(mesh.indices.len(), 60 * (2 * 40 - 2) * 3);
        assert_eq!(mesh.index_count(), 14_040);
    }

    #[test]
    fn vertices_lie_on_the_sphere() {
        let mesh = SphereMesh::new(500.0, 24, 12);
        for v in &mesh.vertices {
            let r = Vec3::from(v.position).length();
            assert!((r - 500.0).abs() < 1e-2, "radius {r}");
            assert!((0.0..=1.0).contains(&v.uv[1]));
        }
    }

    #[test]
    fn every_triangle_faces_the_centre() {
        let mesh = SphereMesh::new(10.0, 16, 8);
        for [a, b, c] in triangles(&mesh) {
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.length() > 1e-6, "degenerate triangle");
            assert!(normal.dot(centroid) < 0.0, "outward triangle");
        }
    }

    #[test]
    fn mirrored_so_u_quarter_points_along_positive_z() {
        // With x mirrored, u = 0 sits on +x and u = 0.25 on +z, matching
        // the frame updater's longitude 0° and 90° look directions.
        let mesh = SphereMesh::new(1.0, 4, 2);
        let equator = &mesh.vertices[5..10];
        assert!((Vec3::from(equator[0].position) - Vec3::X).length() < 1e-6);
        assert!((Vec3::from(equator[1].position) - Vec3::Z).length() < 1e-6);
        assert_eq!(equator[1].uv, [0.25, 0.5]);
    }

    #[test]
    fn segment_counts_are_clamped() {
        let mesh = SphereMesh::new(1.0, 0, 0);
        assert_eq!(mesh.vertices.len(), 4 * 3);
        assert_eq!(mesh.indices.len(), 3 * 2 * 3);
    }
}
