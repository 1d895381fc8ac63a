//! Converts raw platform events into viewer commands.
//!
//! The `InputProcessor` owns all transient input state (mouse position,
//! button state, primary touch tracking) and the key-binding map. It is
//! the only thing that sits between raw window events and the engine's
//! [`execute`](crate::PanoramaEngine::execute) method.

use super::event::{InputEvent, MouseButton, PointerSample, TouchPhase};
use super::pointer::PointerTracker;
use crate::engine::command::ViewerCommand;
use crate::options::KeybindingOptions;

/// Converts raw window events into [`ViewerCommand`]s.
///
/// # Usage
///
/// ```ignore
/// if let Some(cmd) = input_processor.handle_event(event) {
///     engine.execute(cmd);
/// }
///
/// if let Some(cmd) = input_processor.handle_key_press("ArrowRight") {
///     engine.execute(cmd);
/// }
/// ```
pub struct InputProcessor {
    pointers: PointerTracker,
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pointers: PointerTracker::new(),
            key_bindings: KeybindingOptions::default(),
        }
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeybindingOptions) -> Self {
        Self {
            key_bindings,
            ..Self::new()
        }
    }

    /// Current cursor position in physical pixels.
    #[must_use]
    pub fn mouse_pos(&self) -> (f32, f32) {
        self.pointers.mouse_pos
    }

    /// Whether the left mouse button is held.
    #[must_use]
    pub fn mouse_pressed(&self) -> bool {
        self.pointers.mouse_down
    }

    /// Look up a key press and return the corresponding command, if bound.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<ViewerCommand> {
        self.key_bindings.lookup(key).map(|a| a.to_command())
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<ViewerCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => self.handle_cursor_moved(x, y),
            InputEvent::MouseButton { button, pressed } => {
                self.handle_mouse_button(button, pressed)
            }
            InputEvent::Touch { id, phase, x, y } => {
                Some(self.handle_touch(id, phase, x, y))
            }
            InputEvent::Wheel { delta_y } => {
                Some(ViewerCommand::Zoom { delta_y })
            }
            InputEvent::FocusLost => {
                self.pointers.reset();
                Some(ViewerCommand::CancelDrag)
            }
        }
    }

    /// The mouse is always the primary pointer.
    fn handle_cursor_moved(&mut self, x: f32, y: f32) -> Option<ViewerCommand> {
        self.pointers.handle_mouse_position(x, y);
        self.pointers.mouse_down.then(|| ViewerCommand::UpdateDrag {
            pointer: PointerSample::primary(x, y),
        })
    }

    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
    ) -> Option<ViewerCommand> {
        if button != MouseButton::Left {
            return None;
        }
        let (x, y) = self.pointers.mouse_pos;
        let pointer = PointerSample::primary(x, y);

        if pressed {
            self.pointers.mouse_down = true;
            return Some(ViewerCommand::BeginDrag { pointer });
        }

        // Release; ignore a stray release with no matching press
        if !self.pointers.mouse_down {
            return None;
        }
        self.pointers.mouse_down = false;
        Some(ViewerCommand::EndDrag { pointer })
    }

    fn handle_touch(
        &mut self,
        id: u64,
        phase: TouchPhase,
        x: f32,
        y: f32,
    ) -> ViewerCommand {
        let sample = |is_primary| PointerSample { x, y, is_primary };
        match phase {
            TouchPhase::Started => {
                let is_primary = self.pointers.touch_started(id);
                ViewerCommand::BeginDrag {
                    pointer: sample(is_primary),
                }
            }
            TouchPhase::Moved => ViewerCommand::UpdateDrag {
                pointer: sample(self.pointers.is_primary_touch(id)),
            },
            TouchPhase::Ended | TouchPhase::Cancelled => {
                let was_primary = self.pointers.touch_ended(id);
                ViewerCommand::EndDrag {
                    pointer: sample(was_primary),
                }
            }
        }
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::Direction;

    fn press(pressed: bool) -> InputEvent {
        InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed,
        }
    }

    #[test]
    fn mouse_drag_produces_begin_update_end() {
        let mut p = InputProcessor::new();
        assert_eq!(
            p.handle_event(InputEvent::CursorMoved { x: 10.0, y: 20.0 }),
            None
        );
        assert_eq!(
            p.handle_event(press(true)),
            Some(ViewerCommand::BeginDrag {
                pointer: PointerSample::primary(10.0, 20.0)
            })
        );
        assert_eq!(
            p.handle_event(InputEvent::CursorMoved { x: 30.0, y: 25.0 }),
            Some(ViewerCommand::UpdateDrag {
                pointer: PointerSample::primary(30.0, 25.0)
            })
        );
        assert_eq!(
            p.handle_event(press(false)),
            Some(ViewerCommand::EndDrag {
                pointer: PointerSample::primary(30.0, 25.0)
            })
        );
        assert!(!p.mouse_pressed());
    }

    #[test]
    fn other_buttons_and_stray_releases_are_ignored() {
        let mut p = InputProcessor::new();
        let right = InputEvent::MouseButton {
            button: MouseButton::Right,
            pressed: true,
        };
        assert_eq!(p.handle_event(right), None);
        assert_eq!(p.handle_event(press(false)), None);
    }

    #[test]
    fn second_finger_is_secondary() {
        let mut p = InputProcessor::new();
        let touch = |id, phase| InputEvent::Touch {
            id,
            phase,
            x: 1.0,
            y: 2.0,
        };
        assert_eq!(
            p.handle_event(touch(1, TouchPhase::Started)),
            Some(ViewerCommand::BeginDrag {
                pointer: PointerSample::primary(1.0, 2.0)
            })
        );
        assert_eq!(
            p.handle_event(touch(2, TouchPhase::Started)),
            Some(ViewerCommand::BeginDrag {
                pointer: PointerSample::secondary(1.0, 2.0)
            })
        );
        assert_eq!(
            p.handle_event(touch(2, TouchPhase::Moved)),
            Some(ViewerCommand::UpdateDrag {
                pointer: PointerSample::secondary(1.0, 2.0)
            })
        );
        assert_eq!(
            p.handle_event(touch(1, TouchPhase::Ended)),
            Some(ViewerCommand::EndDrag {
                pointer: PointerSample::primary(1.0, 2.0)
            })
        );
    }

    #[test]
    fn wheel_and_focus_loss() {
        let mut p = InputProcessor::new();
        assert_eq!(
            p.handle_event(InputEvent::Wheel { delta_y: 100.0 }),
            Some(ViewerCommand::Zoom { delta_y: 100.0 })
        );
        let _ = p.handle_event(press(true));
        assert_eq!(
            p.handle_event(InputEvent::FocusLost),
            Some(ViewerCommand::CancelDrag)
        );
        assert!(!p.mouse_pressed());
    }

    #[test]
    fn default_key_bindings() {
        let p = InputProcessor::new();
        assert_eq!(
            p.handle_key_press("ArrowRight"),
            Some(ViewerCommand::Navigate(Direction::Next))
        );
        assert_eq!(
            p.handle_key_press("ArrowLeft"),
            Some(ViewerCommand::Navigate(Direction::Previous))
        );
        assert_eq!(p.handle_key_press("KeyI"), Some(ViewerCommand::ToggleInfo));
        assert_eq!(p.handle_key_press("KeyZ"), None);
    }
}
