//! The panorama engine: GPU resources, background workers, and the frame
//! loop around [`ViewerState`].

mod accessors;
/// The viewer's command vocabulary.
pub mod command;
mod input;
/// GPU-free camera and navigation state.
pub mod state;

use std::sync::mpsc::{self, TryRecvError};

pub use self::command::ViewerCommand;
pub use self::state::{InfoSnapshot, ViewerState};
use crate::error::PanoError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::PanoramaTexture;
use crate::navigator::{ImageList, ImageListSource};
use crate::options::Options;
use crate::panorama::{LoadOutcome, PanoramaLoader};
use crate::renderer::{PanoramaPass, SphereMesh};
use crate::util::frame_timing::FrameTiming;

type ListReceiver = mpsc::Receiver<Result<ImageList, PanoError>>;

/// Renders one equirectangular panorama on the inside of a sphere.
///
/// # Construction
///
/// [`PanoramaEngine::new`] sets up the device, uploads the sphere, and
/// queues the initial image. The image list is fetched in the background
/// and only affects navigation, so the first frame never waits for it.
///
/// # Frame loop
///
/// Each frame, call [`update`](Self::update) to pick up finished
/// background work and then [`render`](Self::render) to draw and present.
/// Call [`resize`](Self::resize) when the window size changes. Input is
/// forwarded as [`ViewerCommand`]s via [`execute`](Self::execute).
pub struct PanoramaEngine {
    /// Core wgpu device, queue, and surface.
    pub context: RenderContext,
    pass: PanoramaPass,
    loader: PanoramaLoader,
    list_rx: Option<ListReceiver>,
    state: ViewerState,
    options: Options,
    frame_timing: FrameTiming,
}

impl PanoramaEngine {
    /// Engine showing `initial_image` from the configured image directory.
    ///
    /// # Errors
    ///
    /// Returns [`PanoError`] if GPU initialization fails or a worker
    /// thread cannot be spawned.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
        initial_image: &str,
    ) -> Result<Self, PanoError> {
        let context = RenderContext::new(window, size).await?;

        let sphere = &options.sphere;
        let mesh = SphereMesh::new(
            sphere.radius,
            sphere.width_segments,
            sphere.height_segments,
        );
        let pass = PanoramaPass::new(&context, &mesh);

        let loader = PanoramaLoader::new(context.max_texture_dimension())?;
        let (width, height) = context.size();
        let aspect = width as f32 / height as f32;
        let state = ViewerState::new(&options, initial_image, aspect);
        loader.request(state.current_source());

        let list_source = ImageListSource::resolve(
            &options.images.list,
            &options.images.directory,
        );
        let list_rx = match list_source.spawn_fetch() {
            Ok(rx) => Some(rx),
            Err(e) => {
                log::error!("Image list fetch not started: {e}");
                None
            }
        };

        Ok(Self {
            context,
            pass,
            loader,
            list_rx,
            state,
            frame_timing: FrameTiming::new(options.display.target_fps),
            options,
        })
    }

    /// Pick up the image list and finished decodes. Never blocks.
    pub fn update(&mut self) {
        self.poll_image_list();
        if let Some(outcome) = self.loader.try_recv() {
            self.apply_load(outcome);
        }
    }

    fn poll_image_list(&mut self) {
        let Some(rx) = &self.list_rx else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(images)) => {
                self.state.set_images(images);
                self.list_rx = None;
            }
            Ok(Err(e)) => {
                log::warn!("Navigation disabled: {e}");
                self.list_rx = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => self.list_rx = None,
        }
    }

    fn apply_load(&mut self, outcome: LoadOutcome) {
        match outcome {
            LoadOutcome::Ready(decoded) => {
                let texture = PanoramaTexture::from_rgba(
                    &self.context.device,
                    &self.context.queue,
                    &decoded.label,
                    decoded.width,
                    decoded.height,
                    &decoded.rgba,
                );
                self.pass.set_texture(&self.context.device, &texture);
                log::info!(
                    "Switched image to {} ({}x{})",
                    decoded.label,
                    decoded.width,
                    decoded.height
                );
                self.state.set_displayed(decoded.label);
            }
            LoadOutcome::Failed { label, reason } => {
                log::error!("Could not load {label}: {reason}");
            }
        }
    }

    /// Draw one frame and present it.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the next swapchain texture cannot
    /// be acquired.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let uniform = self.state.frame_uniform();
        self.pass.write_view(&self.context.queue, &uniform);

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();
        self.pass.render(&mut encoder, &view);
        self.context.submit(encoder);
        frame.present();

        self.frame_timing.end_frame();
        Ok(())
    }

    /// Resize the surface and the projection. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.state.resize(width, height);
    }

    /// Recover from a lost or outdated surface.
    pub fn recover_surface(&self) {
        self.context.reconfigure();
    }

    /// Stop the background loader thread.
    pub fn shutdown(&mut self) {
        self.loader.shutdown();
    }
}
