/// Platform-agnostic input events.
///
/// Positions are viewport-local physical pixels, y down. These are fed into
/// an [`InputProcessor`](super::InputProcessor), which drives the gesture
/// state machine of the tool bound to each button.
///
/// # Example
///
/// ```ignore
/// processor.handle_event(InputEvent::Press {
///     button: MouseButton::Left,
///     x: 100.0,
///     y: 200.0,
///     shift: false,
/// });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Mouse button pressed.
    Press {
        /// Which button went down.
        button: MouseButton,
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
        /// Whether shift was held at press time.
        shift: bool,
    },
    /// Cursor moved.
    Move {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
    },
    /// Mouse button released.
    Release {
        /// Which button went up.
        button: MouseButton,
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
    },
    /// Scroll wheel (positive `dy` = zoom in).
    Scroll {
        /// Horizontal scroll amount.
        dx: f32,
        /// Vertical scroll amount.
        dy: f32,
        /// Cursor position at scroll time.
        x: f32,
        /// Cursor position at scroll time.
        y: f32,
    },
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

impl MouseButton {
    /// Every button, in the order armed gestures are executed.
    pub const ALL: [MouseButton; 3] = [Self::Left, Self::Middle, Self::Right];
}
