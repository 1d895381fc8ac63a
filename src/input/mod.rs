//! Input handling: event types, pointer tracking, and the input processor
//! that converts raw window events into viewer commands.

/// Platform-agnostic input events.
pub mod event;
/// Key-bindable actions.
pub mod keyboard;
/// Mouse state and primary-touch tracking.
pub(crate) mod pointer;
/// Converts raw events into viewer commands.
pub mod processor;

pub use event::{InputEvent, MouseButton, PointerSample, TouchPhase};
pub use keyboard::KeyAction;
pub use processor::InputProcessor;
