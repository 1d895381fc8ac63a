use glam::{Mat4, Vec3};

/// Perspective camera sitting at the sphere center.
///
/// The eye never moves; only the look-at target and the field of view
/// change as the user drags and zooms.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix and shading
/// parameters for the panorama pass.
pub struct ViewUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// `x` = panorama opacity (dimmed while a file hovers the window),
    /// `yzw` unused.
    pub params: [f32; 4],
}

impl Camera {
    /// Camera at the origin looking down +X, with the given projection.
    #[must_use]
    pub fn new(aspect: f32, fovy: f32, znear: f32, zfar: f32) -> Self {
        Self {
            eye: Vec3::ZERO,
            target: Vec3::X,
            up: Vec3::Y,
            aspect,
            fovy,
            znear,
            zfar,
        }
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        let proj = Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        );
        proj * view
    }

    /// Update the aspect ratio from a surface size. Zero heights are
    /// ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }
}

impl Default for ViewUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewUniform {
    /// Create a new uniform with identity view-projection and full opacity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            params: [1.0, 0.0, 0.0, 0.0],
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
    }

    /// Set the panorama opacity multiplier.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.params[0] = opacity.clamp(0.0, 1.0);
    }
}
