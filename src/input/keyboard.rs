use serde::{Deserialize, Serialize};

use crate::engine::command::ViewerCommand;
use crate::navigator::Direction;

/// Discrete actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Show the next image in the list.
    NextImage,
    /// Show the previous image in the list.
    PreviousImage,
    /// Show or hide the info panel.
    ToggleInfo,
}

impl KeyAction {
    /// The command this action produces.
    #[must_use]
    pub fn to_command(self) -> ViewerCommand {
        match self {
            Self::NextImage => ViewerCommand::Navigate(Direction::Next),
            Self::PreviousImage => {
                ViewerCommand::Navigate(Direction::Previous)
            }
            Self::ToggleInfo => ViewerCommand::ToggleInfo,
        }
    }
}
