use std::fmt;

/// Why the window surface could not be brought up.
#[derive(Debug)]
pub enum RenderContextError {
    /// The window handle could not back a surface.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No adapter can present to the window.
    AdapterRequest(wgpu::RequestAdapterError),
    /// The adapter refused the requested texture limits.
    DeviceRequest(wgpu::RequestDeviceError),
    /// The adapter has no default configuration for the surface.
    UnsupportedSurface,
}

impl fmt::Display for RenderContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SurfaceCreation(e) => {
                write!(f, "cannot create window surface: {e}")
            }
            Self::AdapterRequest(e) => {
                write!(f, "no GPU adapter for window: {e}")
            }
            Self::DeviceRequest(e) => write!(f, "cannot open GPU device: {e}"),
            Self::UnsupportedSurface => {
                write!(f, "window surface has no usable configuration")
            }
        }
    }
}

impl std::error::Error for RenderContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SurfaceCreation(e) => Some(e),
            Self::AdapterRequest(e) => Some(e),
            Self::DeviceRequest(e) => Some(e),
            Self::UnsupportedSurface => None,
        }
    }
}

/// Device and queue plus the window surface the panorama is presented to.
pub struct RenderContext {
    /// Logical GPU device.
    pub device: wgpu::Device,
    /// Command submission queue for `device`.
    pub queue: wgpu::Queue,
    /// Presentation surface of the viewer window.
    pub surface: wgpu::Surface<'static>,
    /// Format, size, and vsync mode last applied to `surface`.
    pub config: wgpu::SurfaceConfiguration,
}

impl RenderContext {
    /// Open a device for `window` and configure its surface at
    /// `initial_size`.
    ///
    /// The surface uses an sRGB format when the adapter offers one, so
    /// panorama texels (uploaded as sRGB) come out unchanged.
    ///
    /// # Errors
    ///
    /// Returns the [`RenderContextError`] variant for whichever setup step
    /// failed.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        initial_size: (u32, u32),
    ) -> Result<Self, RenderContextError> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .map_err(RenderContextError::SurfaceCreation)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                power_preference: wgpu::PowerPreference::default(),
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::AdapterRequest)?;
        log::info!("Using adapter {:?}", adapter.get_info().name);

        // Panoramas are large; ask for the biggest 2D texture the adapter
        // supports instead of the 8192 default.
        let required_limits = wgpu::Limits {
            max_texture_dimension_2d: adapter
                .limits()
                .max_texture_dimension_2d,
            ..wgpu::Limits::default()
        };

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Panorama Device"),
                required_features: wgpu::Features::empty(),
                required_limits,
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::DeviceRequest)?;

        let width = initial_size.0.max(1);
        let height = initial_size.1.max(1);
        let mut config = surface
            .get_default_config(&adapter, width, height)
            .ok_or(RenderContextError::UnsupportedSurface)?;
        let caps = surface.get_capabilities(&adapter);
        if let Some(srgb) = caps.formats.iter().copied().find(|f| f.is_srgb())
        {
            config.format = srgb;
        }
        config.present_mode = wgpu::PresentMode::Fifo;

        surface.configure(&device, &config);

        Ok(Self {
            device,
            queue,
            surface,
            config,
        })
    }

    /// Colour format the panorama pass renders into.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Current surface size in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Largest texture side the device accepts.
    pub fn max_texture_dimension(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }

    /// Reconfigure the surface for the new window size. Ignores zero-sized
    /// dimensions.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Reconfigure the surface at its current size (after `Lost` or
    /// `Outdated`).
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Texture to draw the next frame into.
    ///
    /// # Errors
    ///
    /// Passes through the [`wgpu::SurfaceError`]; the caller reconfigures
    /// on `Lost` or `Outdated`.
    pub fn get_next_frame(
        &self,
    ) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    /// Encoder for one frame.
    pub fn create_encoder(&self) -> wgpu::CommandEncoder {
        self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Panorama Frame Encoder"),
            })
    }

    /// Submit a finished frame.
    pub fn submit(&self, encoder: wgpu::CommandEncoder) {
        let _ = self.queue.submit(std::iter::once(encoder.finish()));
    }
}
