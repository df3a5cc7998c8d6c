use serde::{Deserialize, Serialize};

/// Viewer actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// fit_to_view = "KeyF"
/// hide_selected = "KeyH"
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Deselect all, cancel gestures, restore default tools.
    Cancel,
    /// Refit the camera to the visible geometry.
    FitToView,
    /// Front view.
    ViewFront,
    /// Back view.
    ViewBack,
    /// Left view.
    ViewLeft,
    /// Right view.
    ViewRight,
    /// Top view.
    ViewTop,
    /// Bottom view.
    ViewBottom,
    /// Isometric view.
    ViewIsometric,
    /// Select every visible entity.
    SelectAll,
    /// Hide the selection.
    HideSelected,
    /// Unhide everything.
    ShowAll,
    /// Remove selected elements and orphaned selected coordinates.
    DeleteSelected,
    /// Toggle points in the select kind mask.
    TogglePoints,
    /// Toggle lines in the select kind mask.
    ToggleLines,
    /// Toggle triangles in the select kind mask.
    ToggleTriangles,
    /// Toggle quads in the select kind mask.
    ToggleQuads,
    /// Bind rectangle select to the left button.
    ToolSelect,
    /// Bind add-line to the left button.
    ToolAddLine,
    /// Bind add-triangle to the left button.
    ToolAddTriangle,
    /// Bind add-quad to the left button.
    ToolAddQuad,
}
