//! Entity kinds, the kind mask the left mouse tool targets, and saved
//! selection state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::mesh::Mesh;

/// Category of a pickable mesh entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A coordinate (vertex).
    Point,
    /// A two-coordinate line element.
    Line,
    /// A three-coordinate triangle element.
    Triangle,
    /// A four-coordinate quad element.
    Quad,
}

impl EntityKind {
    /// All kinds, in the order picking visits them.
    pub const ALL: [EntityKind; 4] = [Self::Point, Self::Line, Self::Triangle, Self::Quad];

    const fn bit(self) -> u8 {
        match self {
            Self::Point => 1,
            Self::Line => 1 << 1,
            Self::Triangle => 1 << 2,
            Self::Quad => 1 << 3,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Point => "point",
            Self::Line => "line",
            Self::Triangle => "triangle",
            Self::Quad => "quad",
        };
        f.write_str(name)
    }
}

/// Bitset over [`EntityKind`]: which kinds a selection gesture targets.
///
/// Serializes as a list of kind names so TOML stays readable:
/// ```toml
/// default_kinds = ["point", "triangle"]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<EntityKind>", into = "Vec<EntityKind>")]
pub struct KindMask(u8);

impl KindMask {
    /// Mask with no kinds set.
    pub const NONE: Self = Self(0);
    /// Mask with every kind set.
    pub const ALL: Self = Self(0b1111);

    /// Mask containing exactly `kind`.
    #[must_use]
    pub const fn only(kind: EntityKind) -> Self {
        Self(kind.bit())
    }

    /// Whether `kind` is set.
    #[must_use]
    pub const fn contains(self, kind: EntityKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// Whether no kind is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether any element kind (line, triangle, quad) is set.
    #[must_use]
    pub const fn has_elements(self) -> bool {
        self.0 & !EntityKind::Point.bit() != 0
    }

    /// Copy of this mask with `kind` set.
    #[must_use]
    pub const fn with(self, kind: EntityKind) -> Self {
        Self(self.0 | kind.bit())
    }

    /// Set `kind`.
    pub fn insert(&mut self, kind: EntityKind) {
        self.0 |= kind.bit();
    }

    /// Clear `kind`.
    pub fn remove(&mut self, kind: EntityKind) {
        self.0 &= !kind.bit();
    }

    /// Flip `kind`.
    pub fn toggle(&mut self, kind: EntityKind) {
        self.0 ^= kind.bit();
    }

    /// Set kinds in [`EntityKind::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = EntityKind> {
        EntityKind::ALL.into_iter().filter(move |k| self.contains(*k))
    }
}

impl From<Vec<EntityKind>> for KindMask {
    fn from(kinds: Vec<EntityKind>) -> Self {
        kinds.into_iter().fold(Self::NONE, Self::with)
    }
}

impl From<KindMask> for Vec<EntityKind> {
    fn from(mask: KindMask) -> Self {
        mask.iter().collect()
    }
}

/// Saved `selected` flags for every coordinate and element of a mesh.
///
/// Taken at the start of a pick; merged back in for additive (shift)
/// gestures, dropped otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSnapshot {
    coordinates: Vec<bool>,
    elements: Vec<bool>,
}

impl SelectionSnapshot {
    /// Record the current flags of `mesh`.
    #[must_use]
    pub fn capture(mesh: &Mesh) -> Self {
        Self {
            coordinates: mesh.coordinates().iter().map(|c| c.selected).collect(),
            elements: mesh.elements().iter().map(|e| e.selected).collect(),
        }
    }

    /// OR the recorded flags back into `mesh`.
    ///
    /// Entities created after the snapshot are left untouched.
    pub fn merge_into(&self, mesh: &mut Mesh) {
        for (coord, was) in mesh.coordinates_mut().iter_mut().zip(&self.coordinates) {
            coord.selected |= *was;
        }
        for (element, was) in mesh.elements_mut().iter_mut().zip(&self.elements) {
            element.selected |= *was;
        }
    }

    /// Overwrite the flags of `mesh` with the recorded ones.
    pub fn restore_into(&self, mesh: &mut Mesh) {
        for (coord, was) in mesh.coordinates_mut().iter_mut().zip(&self.coordinates) {
            coord.selected = *was;
        }
        for (element, was) in mesh.elements_mut().iter_mut().zip(&self.elements) {
            element.selected = *was;
        }
    }
}
