use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::render::FillMode;
use crate::selection::{EntityKind, KindMask};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Picking", inline)]
#[serde(default)]
/// How selection gestures rasterize each element kind and what they target.
pub struct PickingOptions {
    /// Fill mode for line elements.
    #[schemars(title = "Lines")]
    pub lines: FillMode,
    /// Fill mode for triangle elements.
    #[schemars(title = "Triangles")]
    pub triangles: FillMode,
    /// Fill mode for quad elements.
    #[schemars(title = "Quads")]
    pub quads: FillMode,
    /// Kinds the left select tool targets after a reset.
    #[schemars(skip)]
    pub default_kinds: KindMask,
    /// Left-to-right drags keep only fully enclosed elements.
    #[schemars(title = "Enclose on Left-to-Right Drag")]
    pub enclose_on_left_to_right: bool,
}

impl Default for PickingOptions {
    fn default() -> Self {
        Self {
            lines: FillMode::Filled,
            triangles: FillMode::Filled,
            quads: FillMode::Filled,
            default_kinds: KindMask::only(EntityKind::Point),
            enclose_on_left_to_right: true,
        }
    }
}

impl PickingOptions {
    /// Fill mode used when picking `kind`. Points have a single
    /// representation, reported as [`FillMode::Filled`].
    #[must_use]
    pub fn fill_mode(&self, kind: EntityKind) -> FillMode {
        match kind {
            EntityKind::Point => FillMode::Filled,
            EntityKind::Line => self.lines,
            EntityKind::Triangle => self.triangles,
            EntityKind::Quad => self.quads,
        }
    }
}
