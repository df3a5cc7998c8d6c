use serde::{Deserialize, Serialize};

use crate::input::{MouseButton, ToolKind};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Tool bound to each mouse button after startup and after a reset.
pub struct ToolOptions {
    /// Primary button.
    pub left: ToolKind,
    /// Wheel button.
    pub middle: ToolKind,
    /// Secondary button.
    pub right: ToolKind,
}

impl Default for ToolOptions {
    fn default() -> Self {
        Self {
            left: ToolKind::Select,
            middle: ToolKind::Rotate,
            right: ToolKind::Pan,
        }
    }
}

impl ToolOptions {
    /// Default tool for `button`.
    #[must_use]
    pub fn for_button(&self, button: MouseButton) -> ToolKind {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Middle => self.middle,
            MouseButton::Right => self.right,
        }
    }
}
