//! Mouse tools: the gesture state machine plus what each tool does when its
//! gesture completes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::gesture::TwoPointGesture;
use crate::mesh::ElementKind;
use crate::picking::ScreenRect;

/// Serializable tool identifier, used for button bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// Rectangle selection.
    Select,
    /// Discrete orbit rotation.
    Rotate,
    /// Screen-plane pan.
    Pan,
    /// Wheel zoom only; button presses do nothing.
    Zoom,
    /// Create a line from two point picks.
    AddLine,
    /// Create a triangle from three point picks.
    AddTriangle,
    /// Create a quad from four point picks.
    AddQuad,
}

/// Work requested by a completed gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolAction {
    /// Pick entities under `rect`.
    Select {
        /// Gesture rectangle.
        rect: ScreenRect,
        /// Shift was held at press time.
        additive: bool,
    },
    /// Rotate by the drag vector `to - from`.
    Rotate {
        /// Screen-space drag.
        delta: Vec2,
    },
    /// Pan by `from - to`.
    Pan {
        /// Inverted screen-space drag.
        delta: Vec2,
    },
    /// Pick a single coordinate for the add tool.
    AddPick {
        /// Gesture rectangle.
        rect: ScreenRect,
    },
}

/// Rectangle-select gesture with its shift modifier.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SelectTool {
    gesture: TwoPointGesture,
    additive: bool,
}

impl SelectTool {
    fn press(&mut self, at: Vec2, shift: bool) {
        self.gesture.press(at);
        self.additive = shift;
    }

    fn preview(&self) -> Option<ScreenRect> {
        self.gesture
            .preview()
            .map(|(from, to)| ScreenRect::new(from, to))
    }

    fn take(&mut self) -> Option<(ScreenRect, bool)> {
        self.gesture
            .take()
            .map(|(from, to)| (ScreenRect::new(from, to), self.additive))
    }
}

/// Multi-click element creation: each completed pick contributes one
/// coordinate until the target kind's arity is reached.
#[derive(Debug, Clone, PartialEq)]
pub struct AddTool {
    select: SelectTool,
    target: ElementKind,
    picked: Vec<usize>,
}

impl AddTool {
    /// Tool creating elements of `target`.
    #[must_use]
    pub fn new(target: ElementKind) -> Self {
        Self {
            select: SelectTool::default(),
            target,
            picked: Vec::with_capacity(target.arity()),
        }
    }

    /// Element kind being built.
    #[must_use]
    pub fn target(&self) -> ElementKind {
        self.target
    }

    /// Coordinates accumulated so far.
    #[must_use]
    pub fn picked(&self) -> &[usize] {
        &self.picked
    }

    /// Record a picked coordinate. A repeat of an already accumulated index
    /// is ignored. Once the target arity is reached the accumulated indices
    /// are returned and the accumulator starts over.
    pub fn accept(&mut self, coordinate: usize) -> Option<Vec<usize>> {
        if self.picked.contains(&coordinate) {
            return None;
        }
        self.picked.push(coordinate);
        (self.picked.len() >= self.target.arity())
            .then(|| std::mem::take(&mut self.picked))
    }
}

/// A tool bound to a mouse button.
#[derive(Debug, Clone, PartialEq)]
pub enum MouseTool {
    /// Rectangle selection.
    Select(SelectTool),
    /// Orbit rotation.
    Rotate(TwoPointGesture),
    /// Pan.
    Pan(TwoPointGesture),
    /// Wheel-only zoom.
    Zoom,
    /// Element creation.
    Add(AddTool),
}

impl MouseTool {
    /// Fresh, idle tool of the given kind.
    #[must_use]
    pub fn from_kind(kind: ToolKind) -> Self {
        match kind {
            ToolKind::Select => Self::Select(SelectTool::default()),
            ToolKind::Rotate => Self::Rotate(TwoPointGesture::default()),
            ToolKind::Pan => Self::Pan(TwoPointGesture::default()),
            ToolKind::Zoom => Self::Zoom,
            ToolKind::AddLine => Self::Add(AddTool::new(ElementKind::Line)),
            ToolKind::AddTriangle => {
                Self::Add(AddTool::new(ElementKind::Triangle))
            }
            ToolKind::AddQuad => Self::Add(AddTool::new(ElementKind::Quad)),
        }
    }

    /// The kind this tool was built from.
    #[must_use]
    pub fn kind(&self) -> ToolKind {
        match self {
            Self::Select(_) => ToolKind::Select,
            Self::Rotate(_) => ToolKind::Rotate,
            Self::Pan(_) => ToolKind::Pan,
            Self::Zoom => ToolKind::Zoom,
            Self::Add(add) => match add.target {
                ElementKind::Triangle => ToolKind::AddTriangle,
                ElementKind::Quad => ToolKind::AddQuad,
                ElementKind::Line | ElementKind::Removed => ToolKind::AddLine,
            },
        }
    }

    /// Button went down at `at`.
    pub fn press(&mut self, at: Vec2, shift: bool) {
        match self {
            Self::Select(select) => select.press(at, shift),
            Self::Add(add) => add.select.press(at, false),
            Self::Rotate(g) | Self::Pan(g) => g.press(at),
            Self::Zoom => {}
        }
    }

    /// Cursor moved to `at`.
    pub fn update(&mut self, at: Vec2) {
        if let Some(g) = self.gesture_mut() {
            g.update(at);
        }
    }

    /// Button went up at `at`.
    pub fn release(&mut self, at: Vec2) {
        if let Some(g) = self.gesture_mut() {
            g.release(at);
        }
    }

    /// Cancel any pending gesture. Accumulated add picks are kept.
    pub fn reset(&mut self) {
        if let Some(g) = self.gesture_mut() {
            g.reset();
        }
    }

    /// Rubber-band rectangle for select-style tools while dragging.
    #[must_use]
    pub fn preview(&self) -> Option<ScreenRect> {
        match self {
            Self::Select(select) => select.preview(),
            Self::Add(add) => add.select.preview(),
            _ => None,
        }
    }

    /// Consume a completed gesture.
    pub fn take_action(&mut self) -> Option<ToolAction> {
        match self {
            Self::Select(select) => select
                .take()
                .map(|(rect, additive)| ToolAction::Select { rect, additive }),
            Self::Add(add) => add
                .select
                .take()
                .map(|(rect, _)| ToolAction::AddPick { rect }),
            Self::Rotate(g) => g
                .take()
                .map(|(from, to)| ToolAction::Rotate { delta: to - from }),
            Self::Pan(g) => g
                .take()
                .map(|(from, to)| ToolAction::Pan { delta: from - to }),
            Self::Zoom => None,
        }
    }

    /// The add tool, if this is one.
    pub fn as_add_mut(&mut self) -> Option<&mut AddTool> {
        match self {
            Self::Add(add) => Some(add),
            _ => None,
        }
    }

    fn gesture_mut(&mut self) -> Option<&mut TwoPointGesture> {
        match self {
            Self::Select(select) => Some(&mut select.gesture),
            Self::Add(add) => Some(&mut add.select.gesture),
            Self::Rotate(g) | Self::Pan(g) => Some(g),
            Self::Zoom => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_line_emits_after_two_distinct_picks() {
        let mut add = AddTool::new(ElementKind::Line);
        assert_eq!(add.accept(5), None);
        assert_eq!(add.accept(5), None);
        assert_eq!(add.picked(), &[5]);
        assert_eq!(add.accept(9), Some(vec![5, 9]));
        assert!(add.picked().is_empty());
    }

    #[test]
    fn add_quad_needs_four() {
        let mut add = AddTool::new(ElementKind::Quad);
        for i in 0..3 {
            assert_eq!(add.accept(i), None);
        }
        assert_eq!(add.accept(3), Some(vec![0, 1, 2, 3]));
    }

    #[test]
    fn pan_inverts_the_drag() {
        let mut tool = MouseTool::from_kind(ToolKind::Pan);
        tool.press(Vec2::new(10.0, 10.0), false);
        tool.release(Vec2::new(40.0, 0.0));
        assert_eq!(
            tool.take_action(),
            Some(ToolAction::Pan {
                delta: Vec2::new(-30.0, 10.0)
            })
        );
        assert_eq!(tool.take_action(), None);
    }

    #[test]
    fn rotate_uses_the_drag() {
        let mut tool = MouseTool::from_kind(ToolKind::Rotate);
        tool.press(Vec2::ZERO, false);
        tool.update(Vec2::new(1.0, 1.0));
        assert_eq!(tool.preview(), None);
        tool.release(Vec2::new(-20.0, 3.0));
        assert_eq!(
            tool.take_action(),
            Some(ToolAction::Rotate {
                delta: Vec2::new(-20.0, 3.0)
            })
        );
    }

    #[test]
    fn select_carries_shift_and_preview() {
        let mut tool = MouseTool::from_kind(ToolKind::Select);
        tool.press(Vec2::ZERO, true);
        tool.update(Vec2::new(8.0, 8.0));
        assert_eq!(
            tool.preview(),
            Some(ScreenRect::new(Vec2::ZERO, Vec2::splat(8.0)))
        );
        tool.release(Vec2::new(9.0, 9.0));
        assert_eq!(
            tool.take_action(),
            Some(ToolAction::Select {
                rect: ScreenRect::new(Vec2::ZERO, Vec2::splat(9.0)),
                additive: true
            })
        );
    }

    #[test]
    fn reset_aborts_pending_gesture() {
        let mut tool = MouseTool::from_kind(ToolKind::AddTriangle);
        tool.press(Vec2::ZERO, false);
        tool.reset();
        tool.release(Vec2::ONE);
        assert_eq!(tool.take_action(), None);
        assert_eq!(tool.kind(), ToolKind::AddTriangle);
    }

    #[test]
    fn zoom_tool_ignores_buttons() {
        let mut tool = MouseTool::from_kind(ToolKind::Zoom);
        tool.press(Vec2::ZERO, false);
        tool.release(Vec2::ONE);
        assert_eq!(tool.take_action(), None);
    }
}
