//! The session's interactive vocabulary.
//!
//! Key presses, wheel events and programmatic calls are all expressed as a
//! `ViewCommand` and passed to
//! [`ViewSession::execute`](super::ViewSession::execute). Drag gestures are
//! not commands: they arm their tool and run on the next frame.

use glam::Vec2;

use crate::camera::StandardView;
use crate::input::{KeyAction, MouseButton, ToolKind};
use crate::selection::EntityKind;

/// A discrete operation on the view session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewCommand {
    /// Wheel zoom; positive zooms in.
    Zoom {
        /// Sign carries the direction.
        direction: f32,
    },
    /// One rotation step along the dominant axis of `delta`.
    RotateCamera {
        /// Screen-space drag vector.
        delta: Vec2,
    },
    /// Pan along the direction of `delta`.
    PanCamera {
        /// Inverted screen-space drag vector.
        delta: Vec2,
    },
    /// Jump to a preset orientation.
    SetView(StandardView),
    /// Refit the camera to the visible geometry now.
    FitToView,
    /// Full reset: deselect, cancel gestures, default tools and kinds.
    Cancel,
    /// Select every visible entity.
    SelectAll,
    /// Hide the selection.
    HideSelected,
    /// Unhide everything.
    ShowAll,
    /// Remove selected elements and orphaned selected coordinates.
    DeleteSelected,
    /// Flip one kind in the select tool's kind mask.
    ToggleKind(EntityKind),
    /// Bind a tool to a button.
    BindTool {
        /// Button to rebind.
        button: MouseButton,
        /// Tool to bind.
        tool: ToolKind,
    },
}

impl From<KeyAction> for ViewCommand {
    fn from(action: KeyAction) -> Self {
        let left = |tool| Self::BindTool {
            button: MouseButton::Left,
            tool,
        };
        match action {
            KeyAction::Cancel => Self::Cancel,
            KeyAction::FitToView => Self::FitToView,
            KeyAction::ViewFront => Self::SetView(StandardView::Front),
            KeyAction::ViewBack => Self::SetView(StandardView::Back),
            KeyAction::ViewLeft => Self::SetView(StandardView::Left),
            KeyAction::ViewRight => Self::SetView(StandardView::Right),
            KeyAction::ViewTop => Self::SetView(StandardView::Top),
            KeyAction::ViewBottom => Self::SetView(StandardView::Bottom),
            KeyAction::ViewIsometric => Self::SetView(StandardView::Isometric),
            KeyAction::SelectAll => Self::SelectAll,
            KeyAction::HideSelected => Self::HideSelected,
            KeyAction::ShowAll => Self::ShowAll,
            KeyAction::DeleteSelected => Self::DeleteSelected,
            KeyAction::TogglePoints => Self::ToggleKind(EntityKind::Point),
            KeyAction::ToggleLines => Self::ToggleKind(EntityKind::Line),
            KeyAction::ToggleTriangles => Self::ToggleKind(EntityKind::Triangle),
            KeyAction::ToggleQuads => Self::ToggleKind(EntityKind::Quad),
            KeyAction::ToolSelect => left(ToolKind::Select),
            KeyAction::ToolAddLine => left(ToolKind::AddLine),
            KeyAction::ToolAddTriangle => left(ToolKind::AddTriangle),
            KeyAction::ToolAddQuad => left(ToolKind::AddQuad),
        }
    }
}
