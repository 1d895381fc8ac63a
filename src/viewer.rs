//! Standalone panorama window backed by winit.
//!
//! When the `gui` feature is enabled, a wry webview overlay with the info
//! panel and navigation buttons is created over the bottom of the window.
//!
//! ```no_run
//! # use panoview::Viewer;
//! Viewer::builder()
//!     .with_initial_image("lobby.jpg")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;
#[cfg(feature = "gui")]
use std::time::{Duration, Instant};

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    error::PanoError, options::Options, panorama::DialogPrompt, InputEvent,
    InputProcessor, MouseButton, PanoramaEngine,
};

/// Browser-style pixels per wheel line.
const PIXELS_PER_LINE: f32 = 100.0;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    initial_image: Option<String>,
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with sensible defaults (title "panoview", the
    /// configured default image, default options).
    fn new() -> Self {
        Self {
            initial_image: None,
            options: None,
            title: "panoview".into(),
        }
    }

    /// Image identifier to show first, relative to the image directory.
    #[must_use]
    pub fn with_initial_image(mut self, name: impl Into<String>) -> Self {
        self.initial_image = Some(name.into());
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        let options = self.options.unwrap_or_default();
        let initial_image = self
            .initial_image
            .unwrap_or_else(|| options.images.default_image.clone());
        Viewer {
            initial_image,
            options,
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays one panorama at a time.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    initial_image: String,
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`PanoError::Viewer`] if the event loop cannot be created
    /// or exits abnormally.
    pub fn run(self) -> Result<(), PanoError> {
        // The webview is a GTK widget on Linux
        #[cfg(all(feature = "gui", target_os = "linux"))]
        gtk::init().map_err(|e| PanoError::Viewer(e.to_string()))?;

        let event_loop =
            EventLoop::new().map_err(|e| PanoError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            input: InputProcessor::with_key_bindings(
                self.options.keybindings.clone(),
            ),
            initial_image: self.initial_image,
            options: Some(self.options),
            title: self.title,
            #[cfg(feature = "gui")]
            webview: None,
            #[cfg(feature = "gui")]
            action_rx: None,
            #[cfg(feature = "gui")]
            last_state_push: Instant::now(),
            #[cfg(feature = "gui")]
            overlay_open: false,
        };

        let result = event_loop
            .run_app(&mut app)
            .map_err(|e| PanoError::Viewer(e.to_string()));
        if let Some(engine) = &mut app.engine {
            engine.shutdown();
        }
        result
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<PanoramaEngine>,
    input: InputProcessor,
    initial_image: String,
    /// Taken when the engine is built.
    options: Option<Options>,
    title: String,
    #[cfg(feature = "gui")]
    webview: Option<wry::WebView>,
    #[cfg(feature = "gui")]
    action_rx: Option<std::sync::mpsc::Receiver<crate::gui::webview::UiAction>>,
    #[cfg(feature = "gui")]
    last_state_push: Instant,
    /// Whether the overlay is sized for the open info panel.
    #[cfg(feature = "gui")]
    overlay_open: bool,
}

/// Surface size for a window; never zero.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

/// Convert a wheel delta to browser-style pixels, positive when scrolling
/// down.
fn wheel_delta_y(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y * PIXELS_PER_LINE,
        MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
    }
}

/// Drain IPC actions from the overlay and apply them to the engine.
#[cfg(feature = "gui")]
fn drain_ui_actions(
    rx: &std::sync::mpsc::Receiver<crate::gui::webview::UiAction>,
    engine: &mut PanoramaEngine,
) {
    use crate::gui::webview::UiAction;
    use crate::navigator::Direction;
    use crate::ViewerCommand;

    while let Ok(action) = rx.try_recv() {
        match action {
            UiAction::Navigate { direction } => {
                match direction.parse::<Direction>() {
                    Ok(dir) => engine.execute(ViewerCommand::Navigate(dir)),
                    Err(e) => log::warn!("Navigation failed: {e}"),
                }
            }
            UiAction::ToggleInfo => engine.execute(ViewerCommand::ToggleInfo),
            UiAction::FileHover(hovering) => engine.set_drop_hover(hovering),
            UiAction::FileDropped(path) => {
                engine.handle_dropped_file(&path, &mut DialogPrompt);
            }
        }
    }
}

impl ViewerApp {
    fn forward(&mut self, event: InputEvent) {
        if let (Some(cmd), Some(engine)) =
            (self.input.handle_event(event), &mut self.engine)
        {
            engine.execute(cmd);
        }
    }

    /// Grow or shrink the overlay to follow the info panel.
    #[cfg(feature = "gui")]
    fn sync_overlay_bounds(&mut self, force: bool) {
        let (Some(window), Some(engine), Some(wv)) =
            (&self.window, &self.engine, &self.webview)
        else {
            return;
        };
        let open = engine.state().show_info();
        if open == self.overlay_open && !force {
            return;
        }
        self.overlay_open = open;
        let inner = window.inner_size();
        let _ = wv.set_bounds(crate::gui::webview::overlay_bounds(
            inner.width,
            inner.height,
            open,
        ));
    }

    fn request_redraw(&self) {
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn redraw(&mut self) {
        #[cfg(all(feature = "gui", target_os = "linux"))]
        while gtk::events_pending() {
            let _ = gtk::main_iteration_do(false);
        }

        let Some(engine) = &mut self.engine else {
            return;
        };

        #[cfg(feature = "gui")]
        if let Some(rx) = &self.action_rx {
            drain_ui_actions(rx, engine);
        }

        engine.update();
        if engine.should_render() {
            match engine.render() {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost) => engine.recover_surface(),
                Err(wgpu::SurfaceError::Outdated) => {
                    if let Some(w) = &self.window {
                        let (vp_w, vp_h) = viewport_size(w.inner_size());
                        engine.resize(vp_w, vp_h);
                    }
                }
                Err(e) => log::error!("render error: {e:?}"),
            }
        }

        // Push the info snapshot to the overlay at ~4 Hz
        #[cfg(feature = "gui")]
        if let Some(ref wv) = self.webview {
            let now = Instant::now();
            if now.duration_since(self.last_state_push)
                >= Duration::from_millis(250)
            {
                crate::gui::webview::push_state(wv, &engine.info(), engine.fps());
                self.last_state_push = now;
            }
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some(options) = self.options.take() else {
            return;
        };

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (mon_size.width as f64 / scale * 0.75) as u32;
            let logical_h = (mon_size.height as f64 / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        let engine = match pollster::block_on(PanoramaEngine::new(
            window.clone(),
            viewport_size(inner),
            options,
            &self.initial_image,
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        #[cfg(feature = "gui")]
        match crate::gui::webview::create_webview(
            window.as_ref(),
            inner.width,
            inner.height,
        ) {
            Ok((wv, rx)) => {
                crate::gui::webview::push_state(&wv, &engine.info(), 0.0);
                self.webview = Some(wv);
                self.action_rx = Some(rx);
            }
            Err(e) => {
                // Keyboard navigation still works without the overlay
                log::error!("Failed to create webview: {e}");
            }
        }

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        // Guard: both window and engine must be initialised.
        if self.window.is_none() || self.engine.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(event_size) => {
                let (vp_w, vp_h) = viewport_size(event_size);
                if let Some(engine) = &mut self.engine {
                    engine.resize(vp_w, vp_h);
                }
                #[cfg(feature = "gui")]
                self.sync_overlay_bounds(true);
            }

            WindowEvent::RedrawRequested => {
                self.redraw();
                #[cfg(feature = "gui")]
                self.sync_overlay_bounds(false);
                self.request_redraw();
            }

            WindowEvent::MouseInput { button, state, .. } => {
                self.forward(InputEvent::MouseButton {
                    button: MouseButton::from(button),
                    pressed: state == ElementState::Pressed,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.forward(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::Touch(touch) => {
                self.forward(InputEvent::Touch {
                    id: touch.id,
                    phase: touch.phase.into(),
                    x: touch.location.x as f32,
                    y: touch.location.y as f32,
                });
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.forward(InputEvent::Wheel {
                    delta_y: wheel_delta_y(delta),
                });
            }

            WindowEvent::Focused(false) => self.forward(InputEvent::FocusLost),

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                use winit::keyboard::PhysicalKey;
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let key_str = format!("{code:?}");
                if let (Some(cmd), Some(engine)) =
                    (self.input.handle_key_press(&key_str), &mut self.engine)
                {
                    engine.execute(cmd);
                }
            }

            WindowEvent::HoveredFile(_) => {
                if let Some(engine) = &mut self.engine {
                    engine.set_drop_hover(true);
                }
            }

            WindowEvent::HoveredFileCancelled => {
                if let Some(engine) = &mut self.engine {
                    engine.set_drop_hover(false);
                }
            }

            WindowEvent::DroppedFile(path) => {
                // The confirm dialog blocks; a drag must not survive it
                self.forward(InputEvent::FocusLost);
                if let Some(engine) = &mut self.engine {
                    engine.handle_dropped_file(&path, &mut DialogPrompt);
                }
            }

            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use winit::dpi::PhysicalPosition;

    use super::*;

    #[test]
    fn wheel_lines_scale_to_pixels() {
        assert_eq!(
            wheel_delta_y(MouseScrollDelta::LineDelta(0.0, 1.0)),
            -100.0
        );
        assert_eq!(
            wheel_delta_y(MouseScrollDelta::LineDelta(0.0, -2.0)),
            200.0
        );
    }

    #[test]
    fn wheel_pixels_flip_sign() {
        let delta =
            MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 30.0));
        assert_eq!(wheel_delta_y(delta), -30.0);
    }

    #[test]
    fn viewport_is_never_empty() {
        let size = winit::dpi::PhysicalSize::new(0, 0);
        assert_eq!(viewport_size(size), (1, 1));
    }

    #[test]
    fn builder_falls_back_to_default_image() {
        let viewer = Viewer::builder().build();
        assert_eq!(viewer.initial_image, "default.jpg");
        assert_eq!(viewer.title, "panoview");

        let viewer = Viewer::builder().with_initial_image("hall.jpg").build();
        assert_eq!(viewer.initial_image, "hall.jpg");
    }
}
