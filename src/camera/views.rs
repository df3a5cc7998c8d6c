use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Axis-aligned and isometric view presets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum StandardView {
    /// Looking down -Z.
    Front,
    /// Looking down +Z.
    Back,
    /// Looking down +X.
    Left,
    /// Looking down -X.
    Right,
    /// Looking down -Y.
    Top,
    /// Looking down +Y.
    Bottom,
    /// Yaw -45°, pitch 30°.
    #[default]
    Isometric,
}

impl StandardView {
    /// Every preset.
    pub const ALL: [StandardView; 7] = [
        Self::Front,
        Self::Back,
        Self::Left,
        Self::Right,
        Self::Top,
        Self::Bottom,
        Self::Isometric,
    ];

    /// Raw `(yaw, pitch)` in degrees, before normalization.
    #[must_use]
    pub const fn angles(self) -> (f32, f32) {
        match self {
            Self::Front => (0.0, 0.0),
            Self::Back => (180.0, 0.0),
            Self::Left => (-90.0, 0.0),
            Self::Right => (90.0, 0.0),
            Self::Top => (0.0, 90.0),
            Self::Bottom => (0.0, -90.0),
            Self::Isometric => (-45.0, 30.0),
        }
    }
}
