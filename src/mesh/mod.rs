//! Mesh entity store: coordinates and the line/triangle/quad elements that
//! reference them.
//!
//! Indices are storage slots. A removed coordinate or element keeps its slot
//! (tombstoned) until a later insertion reuses it, so an index never changes
//! meaning while anything still refers to it.

use glam::Vec3;

use crate::error::MeshViewError;
use crate::selection::EntityKind;

/// A mesh vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinate {
    /// World-space position.
    pub position: Vec3,
    /// Part of the current selection.
    pub selected: bool,
    /// Excluded from display, picking and camera fit.
    pub hidden: bool,
    /// Tombstoned slot.
    pub removed: bool,
}

impl Coordinate {
    /// A fresh, visible, unselected coordinate.
    #[must_use]
    pub const fn new(position: Vec3) -> Self {
        Self {
            position,
            selected: false,
            hidden: false,
            removed: false,
        }
    }

    /// Neither hidden nor removed.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        !self.hidden && !self.removed
    }
}

/// Shape tag of an [`Element`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Two coordinates.
    Line,
    /// Three coordinates.
    Triangle,
    /// Four coordinates, in winding order.
    Quad,
    /// Tombstone left behind by a deleted element.
    Removed,
}

impl ElementKind {
    /// Number of coordinate indices this kind references.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Line => 2,
            Self::Triangle => 3,
            Self::Quad => 4,
            Self::Removed => 0,
        }
    }

    /// The pickable kind, or `None` for tombstones.
    #[must_use]
    pub const fn entity_kind(self) -> Option<EntityKind> {
        match self {
            Self::Line => Some(EntityKind::Line),
            Self::Triangle => Some(EntityKind::Triangle),
            Self::Quad => Some(EntityKind::Quad),
            Self::Removed => None,
        }
    }

    /// Element kind for a pickable kind, `None` for points.
    #[must_use]
    pub const fn from_entity(kind: EntityKind) -> Option<Self> {
        match kind {
            EntityKind::Point => None,
            EntityKind::Line => Some(Self::Line),
            EntityKind::Triangle => Some(Self::Triangle),
            EntityKind::Quad => Some(Self::Quad),
        }
    }
}

/// A line, triangle or quad over coordinate indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Shape tag.
    pub kind: ElementKind,
    /// Referenced coordinate slots; length equals `kind.arity()`.
    pub coords: Vec<usize>,
    /// Part of the current selection.
    pub selected: bool,
    /// Excluded from display and picking.
    pub hidden: bool,
}

impl Element {
    /// Live (not tombstoned) and not hidden.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.kind != ElementKind::Removed && !self.hidden
    }
}

/// Indexed coordinate and element collections.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    coordinates: Vec<Coordinate>,
    elements: Vec<Element>,
}

impl Mesh {
    /// Empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All coordinate slots, removed ones included.
    #[must_use]
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    /// Mutable access to coordinate flags and positions.
    pub fn coordinates_mut(&mut self) -> &mut [Coordinate] {
        &mut self.coordinates
    }

    /// All element slots, tombstones included.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Mutable access to element flags.
    pub fn elements_mut(&mut self) -> &mut [Element] {
        &mut self.elements
    }

    /// Insert a coordinate, reusing the first removed slot that no live
    /// element references. Returns its index.
    pub fn add_coordinate(&mut self, position: Vec3) -> usize {
        let free = (0..self.coordinates.len()).find(|&i| {
            self.coordinates[i].removed && !self.is_referenced(i)
        });
        match free {
            Some(slot) => {
                self.coordinates[slot] = Coordinate::new(position);
                slot
            }
            None => {
                self.coordinates.push(Coordinate::new(position));
                self.coordinates.len() - 1
            }
        }
    }

    /// Insert an element over existing, non-removed coordinates, reusing a
    /// tombstoned slot if one exists. Returns its index.
    ///
    /// # Errors
    ///
    /// [`MeshViewError::InvalidGestureArity`] if `coords` does not match the
    /// arity of `kind`; [`MeshViewError::IndexOutOfRange`] if a coordinate
    /// is missing or removed.
    pub fn add_element(
        &mut self,
        kind: ElementKind,
        coords: &[usize],
    ) -> Result<usize, MeshViewError> {
        if kind == ElementKind::Removed || coords.len() != kind.arity() {
            return Err(MeshViewError::InvalidGestureArity {
                expected: kind.arity(),
                got: coords.len(),
            });
        }
        if let Some(&bad) = coords
            .iter()
            .find(|&&c| self.coordinates.get(c).is_none_or(|co| co.removed))
        {
            return Err(MeshViewError::IndexOutOfRange {
                kind: EntityKind::Point,
                index: bad,
            });
        }

        let element = Element {
            kind,
            coords: coords.to_vec(),
            selected: false,
            hidden: false,
        };
        let free = self
            .elements
            .iter()
            .position(|e| e.kind == ElementKind::Removed);
        Ok(match free {
            Some(slot) => {
                self.elements[slot] = element;
                slot
            }
            None => {
                self.elements.push(element);
                self.elements.len() - 1
            }
        })
    }

    /// Whether any live element references coordinate `index`.
    #[must_use]
    pub fn is_referenced(&self, index: usize) -> bool {
        self.elements.iter().any(|e| {
            e.kind != ElementKind::Removed && e.coords.contains(&index)
        })
    }

    /// Whether `index` names a live (non-removed) entity of `kind`.
    #[must_use]
    pub fn is_live(&self, kind: EntityKind, index: usize) -> bool {
        match ElementKind::from_entity(kind) {
            None => self.coordinates.get(index).is_some_and(|c| !c.removed),
            Some(ek) => self.elements.get(index).is_some_and(|e| e.kind == ek),
        }
    }

    /// Number of live entities of `kind`.
    #[must_use]
    pub fn count(&self, kind: EntityKind) -> usize {
        match ElementKind::from_entity(kind) {
            None => self.coordinates.iter().filter(|c| !c.removed).count(),
            Some(ek) => self.elements.iter().filter(|e| e.kind == ek).count(),
        }
    }

    /// Whether entity `index` of `kind` is currently selected.
    #[must_use]
    pub fn is_selected(&self, kind: EntityKind, index: usize) -> bool {
        match kind {
            EntityKind::Point => {
                self.coordinates.get(index).is_some_and(|c| c.selected)
            }
            _ => self.elements.get(index).is_some_and(|e| e.selected),
        }
    }

    /// Set the `selected` flag of entity `index` of `kind`.
    ///
    /// Returns `false` if no live entity of that kind sits at `index`.
    pub fn set_selected(&mut self, kind: EntityKind, index: usize, selected: bool) -> bool {
        if !self.is_live(kind, index) {
            return false;
        }
        match kind {
            EntityKind::Point => self.coordinates[index].selected = selected,
            _ => self.elements[index].selected = selected,
        }
        true
    }

    /// Positions of coordinates that are neither hidden nor removed.
    pub fn visible_positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.coordinates
            .iter()
            .filter(|c| c.is_visible())
            .map(|c| c.position)
    }

    /// Indices of selected coordinates.
    #[must_use]
    pub fn selected_coordinates(&self) -> Vec<usize> {
        (0..self.coordinates.len())
            .filter(|&i| self.coordinates[i].selected)
            .collect()
    }

    /// Indices of selected elements.
    #[must_use]
    pub fn selected_elements(&self) -> Vec<usize> {
        (0..self.elements.len())
            .filter(|&i| self.elements[i].selected)
            .collect()
    }

    /// Clear every `selected` flag.
    pub fn deselect_all(&mut self) {
        for c in &mut self.coordinates {
            c.selected = false;
        }
        for e in &mut self.elements {
            e.selected = false;
        }
    }

    /// Select every visible coordinate and element.
    pub fn select_all(&mut self) {
        for c in &mut self.coordinates {
            c.selected = c.is_visible();
        }
        for e in &mut self.elements {
            e.selected = e.is_visible();
        }
    }

    /// Hide the current selection and deselect it. Returns how many entities
    /// were hidden.
    pub fn hide_selected(&mut self) -> usize {
        let mut hidden = 0;
        for c in self.coordinates.iter_mut().filter(|c| c.selected) {
            c.hidden = true;
            c.selected = false;
            hidden += 1;
        }
        for e in self.elements.iter_mut().filter(|e| e.selected) {
            e.hidden = true;
            e.selected = false;
            hidden += 1;
        }
        hidden
    }

    /// Unhide everything. Returns how many entities changed.
    pub fn show_all(&mut self) -> usize {
        let mut shown = 0;
        for c in self.coordinates.iter_mut().filter(|c| c.hidden) {
            c.hidden = false;
            shown += 1;
        }
        for e in self.elements.iter_mut().filter(|e| e.hidden) {
            e.hidden = false;
            shown += 1;
        }
        shown
    }

    /// Tombstone selected elements, then remove selected coordinates that no
    /// surviving element references. Returns how many entities were removed.
    pub fn delete_selected(&mut self) -> usize {
        let mut removed = 0;
        for e in self.elements.iter_mut().filter(|e| e.selected) {
            e.kind = ElementKind::Removed;
            e.coords.clear();
            e.selected = false;
            removed += 1;
        }
        for i in 0..self.coordinates.len() {
            if self.coordinates[i].selected && !self.is_referenced(i) {
                let c = &mut self.coordinates[i];
                c.removed = true;
                c.selected = false;
                removed += 1;
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_mesh() -> Mesh {
        let mut mesh = Mesh::new();
        let a = mesh.add_coordinate(Vec3::ZERO);
        let b = mesh.add_coordinate(Vec3::X);
        let c = mesh.add_coordinate(Vec3::Y);
        let _ = mesh.add_element(ElementKind::Triangle, &[a, b, c]).unwrap();
        mesh
    }

    #[test]
    fn add_element_checks_arity_and_coords() {
        let mut mesh = triangle_mesh();
        assert!(matches!(
            mesh.add_element(ElementKind::Line, &[0, 1, 2]),
            Err(MeshViewError::InvalidGestureArity { expected: 2, got: 3 })
        ));
        assert!(matches!(
            mesh.add_element(ElementKind::Line, &[0, 7]),
            Err(MeshViewError::IndexOutOfRange { index: 7, .. })
        ));
        assert_eq!(mesh.add_element(ElementKind::Line, &[0, 1]).unwrap(), 1);
    }

    #[test]
    fn delete_keeps_referenced_coordinates() {
        let mut mesh = triangle_mesh();
        let _ = mesh.add_coordinate(Vec3::Z);
        mesh.select_all();
        mesh.elements_mut()[0].selected = false;

        // Only coordinate 3 is unreferenced.
        assert_eq!(mesh.delete_selected(), 1);
        assert!(mesh.coordinates()[3].removed);
        assert_eq!(mesh.count(EntityKind::Point), 3);
        assert!(!mesh.is_live(EntityKind::Point, 3));
    }

    #[test]
    fn tombstoned_slots_are_reused() {
        let mut mesh = triangle_mesh();
        mesh.elements_mut()[0].selected = true;
        assert_eq!(mesh.delete_selected(), 1);
        assert_eq!(mesh.elements()[0].kind, ElementKind::Removed);
        assert_eq!(mesh.count(EntityKind::Triangle), 0);

        let idx = mesh.add_element(ElementKind::Line, &[0, 2]).unwrap();
        assert_eq!(idx, 0);
        assert!(mesh.is_live(EntityKind::Line, 0));
        assert!(!mesh.is_live(EntityKind::Triangle, 0));
    }

    #[test]
    fn hide_and_show_round_trip() {
        let mut mesh = triangle_mesh();
        assert!(mesh.set_selected(EntityKind::Point, 1, true));
        assert_eq!(mesh.hide_selected(), 1);
        assert_eq!(mesh.visible_positions().count(), 2);
        assert!(mesh.selected_coordinates().is_empty());
        assert_eq!(mesh.show_all(), 1);
        assert_eq!(mesh.visible_positions().count(), 3);
    }
}
