//! Input handling: event types, the shared gesture state machine, mouse
//! tools, and the processor that routes events to them.

/// Platform-agnostic input events.
pub mod event;
/// Press/update/release/reset protocol shared by all tools.
pub mod gesture;
mod keyboard;
/// Routes raw events to the tools bound to each button.
pub mod processor;
/// Select, rotate, pan, zoom and add tools.
pub mod tools;

pub use event::{InputEvent, MouseButton};
pub use gesture::TwoPointGesture;
pub use keyboard::KeyAction;
pub use processor::{InputCommand, InputProcessor};
pub use tools::{AddTool, MouseTool, SelectTool, ToolAction, ToolKind};
