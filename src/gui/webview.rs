//! Wry webview child of the winit window.
//!
//! Creates a transparent [`wry::WebView`] along the bottom edge of the
//! window, serves the embedded overlay page through a custom
//! `panoview://` protocol, and bridges IPC between its buttons and the
//! native engine. File drops that land on the overlay are handed back to
//! the engine, since winit never sees them.

use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::mpsc;

use rust_embed::RustEmbed;
use serde::Serialize;
use wry::http::{header::CONTENT_TYPE, Response};
use wry::{dpi, DragDropEvent, Rect, WebView, WebViewBuilder};

use crate::engine::InfoSnapshot;

/// Embedded overlay page.
#[derive(RustEmbed)]
#[folder = "assets/ui/"]
struct UiAssets;

/// Overlay width in physical pixels.
pub const OVERLAY_WIDTH: u32 = 420;
/// Overlay height with the info panel open.
pub const OVERLAY_HEIGHT: u32 = 180;
/// Overlay height with only the button bar showing.
pub const BAR_HEIGHT: u32 = 40;
/// Gap between the overlay and the window's bottom edge.
const OVERLAY_MARGIN: u32 = 16;

/// Actions sent from the overlay page to the native engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// A navigation button was pressed. The direction string is passed
    /// through unparsed so bad values surface as navigation errors.
    Navigate {
        /// `"next"` or `"previous"`.
        direction: String,
    },
    /// The info button was pressed.
    ToggleInfo,
    /// A file is being dragged over (`true`) or away from the overlay.
    FileHover(bool),
    /// A file was dropped on the overlay. Only the first path of a
    /// multi-file drop is kept.
    FileDropped(PathBuf),
}

/// State pushed to the overlay page.
#[derive(Debug, Serialize)]
struct OverlayState<'a> {
    #[serde(flatten)]
    info: &'a InfoSnapshot,
    fps: f32,
}

/// Create the wry webview as a child of the given window, collapsed to
/// the button bar.
///
/// Returns `(webview, action_rx)`; the receiver yields [`UiAction`]s
/// from the overlay page.
///
/// # Errors
///
/// Returns [`wry::Error`] if the webview cannot be created.
pub fn create_webview<W: wry::raw_window_handle::HasWindowHandle>(
    window: &W,
    window_width: u32,
    window_height: u32,
) -> Result<(WebView, mpsc::Receiver<UiAction>), wry::Error> {
    let (tx, rx) = mpsc::channel();
    let drop_tx = tx.clone();

    let webview = WebViewBuilder::new()
        .with_bounds(overlay_bounds(window_width, window_height, false))
        .with_transparent(true)
        .with_custom_protocol("panoview".into(), |_id, request| {
            let path = request.uri().path();
            // Default to index.html for the root path.
            let path = if path == "/" { "index.html" } else { &path[1..] };
            serve_asset(path)
        })
        .with_url("panoview://localhost/")
        .with_initialization_script(BRIDGE_JS)
        .with_ipc_handler(move |req| match parse_message(req.body()) {
            Some(action) => {
                let _ = tx.send(action);
            }
            None => log::warn!("Ignoring overlay message: {}", req.body()),
        })
        .with_drag_drop_handler(move |event| {
            if let Some(action) = drop_action(event) {
                let _ = drop_tx.send(action);
            }
            // Keep the webview from navigating to the dropped file
            true
        })
        .build_as_child(window)?;

    Ok((webview, rx))
}

fn serve_asset(path: &str) -> Response<Cow<'static, [u8]>> {
    match UiAssets::get(path) {
        Some(asset) => {
            let mime = mime_guess::from_path(path)
                .first_or_octet_stream()
                .to_string();
            Response::builder()
                .header(CONTENT_TYPE, mime)
                .body(Cow::from(asset.data.to_vec()))
                .unwrap_or_else(|_| Response::new(Cow::from(Vec::new())))
        }
        None => Response::builder()
            .status(404)
            .body(Cow::from(Vec::new()))
            .unwrap_or_else(|_| Response::new(Cow::from(Vec::new()))),
    }
}

/// Compute the [`Rect`] for the overlay, centred on the bottom edge. With
/// the info panel closed only the button bar is covered, so drags over
/// the rest of the panorama reach the window.
#[must_use]
pub fn overlay_bounds(
    window_width: u32,
    window_height: u32,
    info_open: bool,
) -> Rect {
    let full = if info_open { OVERLAY_HEIGHT } else { BAR_HEIGHT };
    let width = OVERLAY_WIDTH.min(window_width);
    let height = full.min(window_height);
    let x = (window_width - width) / 2;
    let y = window_height.saturating_sub(height + OVERLAY_MARGIN);
    Rect {
        position: dpi::Position::Physical(dpi::PhysicalPosition::new(
            x as i32, y as i32,
        )),
        size: dpi::Size::Physical(dpi::PhysicalSize::new(width, height)),
    }
}

/// Push the current viewer state to the overlay page.
pub fn push_state(webview: &WebView, info: &InfoSnapshot, fps: f32) {
    let json =
        serde_json::to_string(&OverlayState { info, fps }).unwrap_or_default();
    let escaped = json.replace('\\', "\\\\").replace('\'', "\\'");
    let _ = webview.evaluate_script(&format!(
        "window.__panoview_push_state('{escaped}')"
    ));
}

// ── Internals ────────────────────────────────────────────────────────────

/// JavaScript injected before page load. Buffers the latest state until
/// the page script registers its listener.
const BRIDGE_JS: &str = r#"
(function() {
    var pending = null;

    window.__panoview_push_state = function(json) {
        pending = json;
        window.dispatchEvent(new CustomEvent('panoview-state', { detail: json }));
    };

    var origAdd = EventTarget.prototype.addEventListener;
    EventTarget.prototype.addEventListener = function(type, fn, opts) {
        origAdd.call(this, type, fn, opts);
        if (this === window && type === 'panoview-state' && pending) {
            window.dispatchEvent(new CustomEvent('panoview-state', { detail: pending }));
        }
    };
})();
"#;

/// Map a webview drag-and-drop event to a [`UiAction`].
fn drop_action(event: DragDropEvent) -> Option<UiAction> {
    match event {
        DragDropEvent::Enter { .. } => Some(UiAction::FileHover(true)),
        DragDropEvent::Leave => Some(UiAction::FileHover(false)),
        DragDropEvent::Drop { paths, .. } => {
            paths.into_iter().next().map(UiAction::FileDropped)
        }
        _ => None,
    }
}

/// Parse an IPC message body into a [`UiAction`].
fn parse_message(body: &str) -> Option<UiAction> {
    let msg = serde_json::from_str::<serde_json::Value>(body).ok()?;
    match msg.get("action")?.as_str()? {
        "navigate" => {
            let direction = msg.get("direction")?.as_str()?.to_owned();
            Some(UiAction::Navigate { direction })
        }
        "toggle_info" => Some(UiAction::ToggleInfo),
        _ => None,
    }
}
