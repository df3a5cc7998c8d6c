//! Routes raw input events to the mouse tools bound to each button.
//!
//! The `InputProcessor` owns all transient input state (cursor position,
//! per-button gesture state machines, which button is down) and the
//! key-binding map. Completed gestures sit armed until the session drains
//! them with [`InputProcessor::take_actions`].

use glam::Vec2;

use super::event::{InputEvent, MouseButton};
use super::keyboard::KeyAction;
use super::tools::{MouseTool, ToolAction, ToolKind};
use crate::options::{KeybindingOptions, ToolOptions};
use crate::picking::ScreenRect;

/// Immediate (non-gesture) effect of an input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputCommand {
    /// Wheel zoom; positive zooms in.
    Zoom {
        /// Sign carries the direction.
        direction: f32,
    },
}

/// Converts raw window events into gesture state and commands.
///
/// # Usage
///
/// ```ignore
/// if let Some(InputCommand::Zoom { direction }) = processor.handle_event(event) {
///     camera.zoom(direction);
/// }
/// for (button, action) in processor.take_actions() {
///     // run picks / camera moves
/// }
/// ```
pub struct InputProcessor {
    left: MouseTool,
    middle: MouseTool,
    right: MouseTool,
    defaults: ToolOptions,
    key_bindings: KeybindingOptions,
    cursor: Vec2,
    held: Option<MouseButton>,
}

impl InputProcessor {
    /// Processor with the given default tools and key bindings.
    #[must_use]
    pub fn new(defaults: ToolOptions, key_bindings: KeybindingOptions) -> Self {
        Self {
            left: MouseTool::from_kind(defaults.left),
            middle: MouseTool::from_kind(defaults.middle),
            right: MouseTool::from_kind(defaults.right),
            defaults,
            key_bindings,
            cursor: Vec2::ZERO,
            held: None,
        }
    }

    /// Last cursor position seen.
    #[must_use]
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Button currently driving a gesture, if any.
    #[must_use]
    pub fn held_button(&self) -> Option<MouseButton> {
        self.held
    }

    /// Tool bound to `button`.
    #[must_use]
    pub fn tool(&self, button: MouseButton) -> &MouseTool {
        match button {
            MouseButton::Left => &self.left,
            MouseButton::Middle => &self.middle,
            MouseButton::Right => &self.right,
        }
    }

    /// Mutable access to the tool bound to `button`.
    pub fn tool_mut(&mut self, button: MouseButton) -> &mut MouseTool {
        match button {
            MouseButton::Left => &mut self.left,
            MouseButton::Middle => &mut self.middle,
            MouseButton::Right => &mut self.right,
        }
    }

    /// Bind a fresh tool of `kind` to `button`. Rebinding the same kind
    /// keeps the existing tool and its state.
    pub fn bind(&mut self, button: MouseButton, kind: ToolKind) {
        let tool = self.tool_mut(button);
        if tool.kind() != kind {
            *tool = MouseTool::from_kind(kind);
        }
    }

    /// Rebind every button to its configured default, discarding all tool
    /// state.
    pub fn restore_default_bindings(&mut self) {
        for button in MouseButton::ALL {
            let kind = self.defaults.for_button(button);
            *self.tool_mut(button) = MouseTool::from_kind(kind);
        }
        self.held = None;
    }

    /// Cancel every pending gesture.
    pub fn reset_gestures(&mut self) {
        for button in MouseButton::ALL {
            self.tool_mut(button).reset();
        }
        self.held = None;
    }

    /// Rubber-band rectangle of the gesture in progress, if it has one.
    #[must_use]
    pub fn preview(&self) -> Option<ScreenRect> {
        self.held.and_then(|button| self.tool(button).preview())
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeybindingOptions {
        &self.key_bindings
    }

    /// Look up a key press and return the bound action, if any.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<KeyAction> {
        self.key_bindings.lookup(key)
    }

    /// Feed one event to the bound tools.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<InputCommand> {
        match event {
            InputEvent::Press {
                button,
                x,
                y,
                shift,
            } => {
                self.cursor = Vec2::new(x, y);
                // One gesture at a time: a second button cancels the first.
                if let Some(other) = self.held.filter(|b| *b != button) {
                    self.tool_mut(other).reset();
                }
                let at = self.cursor;
                self.tool_mut(button).press(at, shift);
                self.held = Some(button);
                None
            }
            InputEvent::Move { x, y } => {
                self.cursor = Vec2::new(x, y);
                if let Some(button) = self.held {
                    let at = self.cursor;
                    self.tool_mut(button).update(at);
                }
                None
            }
            InputEvent::Release { button, x, y } => {
                self.cursor = Vec2::new(x, y);
                let at = self.cursor;
                self.tool_mut(button).release(at);
                if self.held == Some(button) {
                    self.held = None;
                }
                None
            }
            InputEvent::Scroll { dy, x, y, .. } => {
                self.cursor = Vec2::new(x, y);
                (dy != 0.0).then_some(InputCommand::Zoom {
                    direction: dy.signum(),
                })
            }
        }
    }

    /// Drain armed gestures, in [`MouseButton::ALL`] order.
    pub fn take_actions(&mut self) -> Vec<(MouseButton, ToolAction)> {
        MouseButton::ALL
            .into_iter()
            .filter_map(|button| {
                self.tool_mut(button)
                    .take_action()
                    .map(|action| (button, action))
            })
            .collect()
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new(ToolOptions::default(), KeybindingOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(button: MouseButton, x: f32, y: f32) -> InputEvent {
        InputEvent::Press {
            button,
            x,
            y,
            shift: false,
        }
    }

    #[test]
    fn default_bindings() {
        let p = InputProcessor::default();
        assert_eq!(p.tool(MouseButton::Left).kind(), ToolKind::Select);
        assert_eq!(p.tool(MouseButton::Middle).kind(), ToolKind::Rotate);
        assert_eq!(p.tool(MouseButton::Right).kind(), ToolKind::Pan);
    }

    #[test]
    fn drag_arms_the_bound_tool() {
        let mut p = InputProcessor::default();
        assert_eq!(p.handle_event(press(MouseButton::Right, 50.0, 50.0)), None);
        let _ = p.handle_event(InputEvent::Move { x: 20.0, y: 50.0 });
        assert_eq!(p.preview(), None);
        let _ = p.handle_event(InputEvent::Release {
            button: MouseButton::Right,
            x: 10.0,
            y: 50.0,
        });
        assert_eq!(
            p.take_actions(),
            vec![(
                MouseButton::Right,
                ToolAction::Pan {
                    delta: Vec2::new(40.0, 0.0)
                }
            )]
        );
        assert!(p.take_actions().is_empty());
    }

    #[test]
    fn press_tracks_cursor_and_held_button() {
        let mut p = InputProcessor::default();
        assert_eq!(p.handle_event(press(MouseButton::Left, 12.0, 34.0)), None);
        assert_eq!(p.cursor(), Vec2::new(12.0, 34.0));
        assert_eq!(p.held_button(), Some(MouseButton::Left));

        let _ = p.handle_event(InputEvent::Move { x: 40.0, y: 50.0 });
        assert_eq!(p.cursor(), Vec2::new(40.0, 50.0));
        assert_eq!(
            p.preview(),
            Some(ScreenRect::new(Vec2::new(12.0, 34.0), Vec2::new(40.0, 50.0)))
        );
    }

    #[test]
    fn scroll_is_an_immediate_zoom() {
        let mut p = InputProcessor::default();
        let cmd = p.handle_event(InputEvent::Scroll {
            dx: 0.0,
            dy: -3.5,
            x: 0.0,
            y: 0.0,
        });
        assert_eq!(cmd, Some(InputCommand::Zoom { direction: -1.0 }));
        let cmd = p.handle_event(InputEvent::Scroll {
            dx: 2.0,
            dy: 0.0,
            x: 0.0,
            y: 0.0,
        });
        assert_eq!(cmd, None);
    }

    #[test]
    fn second_button_cancels_first_gesture() {
        let mut p = InputProcessor::default();
        let _ = p.handle_event(press(MouseButton::Left, 0.0, 0.0));
        let _ = p.handle_event(press(MouseButton::Middle, 5.0, 5.0));
        let _ = p.handle_event(InputEvent::Release {
            button: MouseButton::Left,
            x: 9.0,
            y: 9.0,
        });
        assert!(p.take_actions().is_empty());
    }

    #[test]
    fn restore_defaults_replaces_rebound_tools() {
        let mut p = InputProcessor::default();
        p.bind(MouseButton::Left, ToolKind::AddQuad);
        assert_eq!(p.tool(MouseButton::Left).kind(), ToolKind::AddQuad);
        let _ = p.handle_event(press(MouseButton::Left, 0.0, 0.0));
        p.restore_default_bindings();
        assert_eq!(p.tool(MouseButton::Left).kind(), ToolKind::Select);
        assert_eq!(p.held_button(), None);
    }

    #[test]
    fn key_lookup_uses_bindings() {
        let p = InputProcessor::default();
        assert_eq!(p.handle_key_press("Escape"), Some(KeyAction::Cancel));
        assert_eq!(p.handle_key_press("F13"), None);
    }
}
