//! Multi-pass color-coded picking.
//!
//! Each pass renders every still-unselected entity of one kind in its codec
//! color, reads back the pick rectangle and selects whatever decodes. An
//! entity selected in one pass is not drawn in the next, which uncovers
//! entities of the same kind it was hiding. The loop stops at the first pass
//! with no new hits.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;

use super::codec::{self, Rgb};
use super::rect::{PixelRect, ScreenRect};
use crate::camera::Camera;
use crate::error::MeshViewError;
use crate::mesh::{ElementKind, Mesh};
use crate::options::PickingOptions;
use crate::render::PickRenderer;
use crate::selection::{EntityKind, KindMask, SelectionSnapshot};

/// One selection pick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickRequest {
    /// Gesture rectangle, viewport-local.
    pub rect: ScreenRect,
    /// Kinds to pick.
    pub kinds: KindMask,
    /// OR the previous selection back into the result.
    pub additive: bool,
    /// Keep only elements whose every coordinate lies in the rectangle.
    pub enclose: bool,
}

/// Counters from one [`PickingEngine::pick`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickOutcome {
    /// Render + readback round trips performed.
    pub passes: usize,
    /// Entities selected by the render loop, per kind, before enclosure
    /// refinement.
    pub hits: [usize; 4],
    /// Pixels rejected by the codec margins.
    pub rejected_pixels: usize,
    /// Distinct decoded indices with no live entity of the picked kind.
    pub stale_indices: usize,
    /// A kind hit the pass cap before converging.
    pub capped: bool,
}

impl PickOutcome {
    /// Render-loop hits for `kind`.
    #[must_use]
    pub fn hits(&self, kind: EntityKind) -> usize {
        self.hits[slot(kind)]
    }

    /// Render-loop hits over all kinds.
    #[must_use]
    pub fn total_hits(&self) -> usize {
        self.hits.iter().sum()
    }
}

const fn slot(kind: EntityKind) -> usize {
    match kind {
        EntityKind::Point => 0,
        EntityKind::Line => 1,
        EntityKind::Triangle => 2,
        EntityKind::Quad => 3,
    }
}

/// Resolves screen rectangles to mesh entities through a [`PickRenderer`].
#[derive(Debug, Clone, Default)]
pub struct PickingEngine {
    options: PickingOptions,
}

impl PickingEngine {
    /// Engine using the given fill modes.
    #[must_use]
    pub fn new(options: PickingOptions) -> Self {
        Self { options }
    }

    /// Current picking options.
    #[must_use]
    pub fn options(&self) -> &PickingOptions {
        &self.options
    }

    /// Select the entities of `request.kinds` under `request.rect`.
    ///
    /// The current selection is cleared first. If `request.enclose` is set,
    /// coordinates are picked as well and elements survive only when all of
    /// their coordinates were hit; coordinate selection is then narrowed to
    /// the surviving elements' coordinates (plus point hits, when points were
    /// requested). If `request.additive` is set the previous selection is
    /// OR-ed back in at the end.
    pub fn pick<R>(
        &self,
        renderer: &mut R,
        mesh: &mut Mesh,
        camera: &Camera,
        request: &PickRequest,
    ) -> PickOutcome
    where
        R: PickRenderer + ?Sized,
    {
        let previous = SelectionSnapshot::capture(mesh);
        mesh.deselect_all();

        let mut outcome = PickOutcome::default();
        let enclose = request.enclose && request.kinds.has_elements();

        if let Some(pixels) = request.rect.to_pixel_rect(renderer.viewport()) {
            let kinds = if enclose {
                request.kinds.with(EntityKind::Point)
            } else {
                request.kinds
            };
            for kind in kinds.iter() {
                self.pick_kind(renderer, mesh, camera, kind, pixels, &mut outcome);
            }
        } else {
            log::debug!("pick rectangle {:?} is outside the viewport", request.rect);
        }

        if enclose {
            keep_enclosed(mesh, request.kinds.contains(EntityKind::Point));
        }
        if request.additive {
            previous.merge_into(mesh);
        }

        log::debug!(
            "pick {:?}: {} passes, {} hits, {} rejected pixels, {} stale",
            request.kinds,
            outcome.passes,
            outcome.total_hits(),
            outcome.rejected_pixels,
            outcome.stale_indices
        );
        outcome
    }

    /// Render/readback/decode until a pass selects nothing new.
    fn pick_kind<R>(
        &self,
        renderer: &mut R,
        mesh: &mut Mesh,
        camera: &Camera,
        kind: EntityKind,
        pixels: PixelRect,
        outcome: &mut PickOutcome,
    ) where
        R: PickRenderer + ?Sized,
    {
        let fill = self.options.fill_mode(kind);
        let live = mesh.count(kind);
        let slots = slot_count(mesh, kind);
        if exceeds_codec(slots) {
            log::warn!(
                "{kind} slots reach index {}; indices above {} are not pickable",
                slots - 1,
                codec::MAX_INDEX
            );
        }

        // Each productive pass selects at least one entity and selected
        // entities are never drawn again, so `live + 1` passes always suffice.
        let cap = live + 1;
        for pass in 0..cap {
            {
                let scene: &Mesh = mesh;
                let color_of = |index: usize| pick_color(scene, kind, index);
                renderer.render(scene, camera, kind, fill, &color_of);
            }
            let buffer = renderer.read_pixels(pixels);
            outcome.passes += 1;

            let new_hits = decode_pass(&buffer, mesh, kind, outcome);
            log::trace!("{kind} pass {pass}: {new_hits} new hits");
            if new_hits == 0 {
                return;
            }
        }
        outcome.capped = true;
        log::warn!("{kind} picking stopped after {cap} passes without converging");
    }
}

/// Codec color for a drawable, not-yet-selected entity; `None` otherwise.
fn pick_color(mesh: &Mesh, kind: EntityKind, index: usize) -> Option<Rgb> {
    if is_pick_target(mesh, kind, index) && !mesh.is_selected(kind, index) {
        codec::encode(index)
    } else {
        None
    }
}

/// One past the highest slot index held by a live entity of `kind`.
/// Removed slots keep their index, so this can exceed the live count.
fn slot_count(mesh: &Mesh, kind: EntityKind) -> usize {
    let last = match ElementKind::from_entity(kind) {
        None => mesh.coordinates().iter().rposition(|c| !c.removed),
        Some(ek) => mesh.elements().iter().rposition(|e| e.kind == ek),
    };
    last.map_or(0, |i| i + 1)
}

/// Whether some slot in `0..slots` has no pick color.
const fn exceeds_codec(slots: usize) -> bool {
    slots > codec::MAX_INDEX + 1
}

/// Live and visible entity of `kind` at `index`.
fn is_pick_target(mesh: &Mesh, kind: EntityKind, index: usize) -> bool {
    match ElementKind::from_entity(kind) {
        None => mesh.coordinates().get(index).is_some_and(|c| c.is_visible()),
        Some(ek) => mesh
            .elements()
            .get(index)
            .is_some_and(|e| e.kind == ek && e.is_visible()),
    }
}

/// Decode a readback buffer and select every new valid hit. Returns the
/// number of entities newly selected.
fn decode_pass(
    buffer: &[u8],
    mesh: &mut Mesh,
    kind: EntityKind,
    outcome: &mut PickOutcome,
) -> usize {
    let pixels: &[[u8; 4]] = match bytemuck::try_cast_slice(buffer) {
        Ok(pixels) => pixels,
        Err(e) => {
            log::warn!("discarding malformed readback of {} bytes: {e}", buffer.len());
            return 0;
        }
    };

    let mut new_hits = 0;
    let mut stale = FxHashSet::default();
    for &[r, g, b, _] in pixels {
        match codec::decode([r, g, b]).into_result() {
            Ok(Some(index)) if is_pick_target(mesh, kind, index) => {
                if !mesh.is_selected(kind, index) {
                    let _ = mesh.set_selected(kind, index, true);
                    new_hits += 1;
                }
            }
            Ok(Some(index)) => {
                let _ = stale.insert(index);
            }
            Ok(None) => {}
            Err(e) => {
                log::trace!("rejected pixel {:?}: {e}", [r, g, b]);
                outcome.rejected_pixels += 1;
            }
        }
    }

    for &index in &stale {
        log::warn!("{}", MeshViewError::IndexOutOfRange { kind, index });
    }
    outcome.stale_indices += stale.len();
    outcome.hits[slot(kind)] += new_hits;
    new_hits
}

/// Drop selected elements with an unselected coordinate, then set coordinate
/// selection to the coordinates of the surviving elements. Point hits are
/// kept as well when `keep_points` is set.
fn keep_enclosed(mesh: &mut Mesh, keep_points: bool) {
    let hit_coords: Vec<bool> = mesh.coordinates().iter().map(|c| c.selected).collect();
    let mut referenced = FxHashSet::default();

    for element in mesh.elements_mut().iter_mut().filter(|e| e.selected) {
        let enclosed = element
            .coords
            .iter()
            .all(|&c| hit_coords.get(c).copied().unwrap_or(false));
        if enclosed {
            referenced.extend(element.coords.iter().copied());
        } else {
            element.selected = false;
        }
    }

    for (i, coord) in mesh.coordinates_mut().iter_mut().enumerate() {
        coord.selected = referenced.contains(&i) || (keep_points && coord.selected);
    }
}

/// Sample point used to draw element `index` in [`crate::render::FillMode::Outline`]:
/// a point on its first edge at a ratio in `[0.25, 0.75)` that is fixed per
/// element, so neighboring primitives sharing an edge do not land on the
/// same pixel.
#[must_use]
pub fn representative_point(index: usize, positions: &[Vec3]) -> Option<Vec3> {
    match positions {
        [] => None,
        [only] => Some(*only),
        [a, b, ..] => {
            let mut rng = StdRng::seed_from_u64(index as u64);
            let ratio: f32 = rng.random_range(0.25..0.75);
            Some(a.lerp(*b, ratio))
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::picking::rect::Viewport;
    use crate::render::FillMode;

    /// Renderer that ignores the scene and replays fixed readbacks.
    struct Scripted {
        frames: Vec<Vec<[u8; 4]>>,
        renders: usize,
    }

    impl PickRenderer for Scripted {
        fn viewport(&self) -> Viewport {
            Viewport::sized(4, 4)
        }

        fn set_viewport(&mut self, _viewport: Viewport) {}

        fn render(
            &mut self,
            _mesh: &Mesh,
            _camera: &Camera,
            _kind: EntityKind,
            _fill: FillMode,
            _color_of: &dyn Fn(usize) -> Option<Rgb>,
        ) {
            self.renders += 1;
        }

        fn read_pixels(&mut self, _rect: PixelRect) -> Vec<u8> {
            let frame = self
                .frames
                .get(self.renders - 1)
                .or_else(|| self.frames.last())
                .cloned()
                .unwrap_or_default();
            bytemuck::cast_slice(&frame).to_vec()
        }
    }

    fn px(index: usize) -> [u8; 4] {
        let [r, g, b] = codec::encode(index).unwrap();
        [r, g, b, 255]
    }

    fn points(n: usize) -> Mesh {
        let mut mesh = Mesh::new();
        for i in 0..n {
            let _ = mesh.add_coordinate(Vec3::new(i as f32, 0.0, 0.0));
        }
        mesh
    }

    fn request(kinds: KindMask) -> PickRequest {
        PickRequest {
            rect: ScreenRect::new(Vec2::ZERO, Vec2::splat(3.0)),
            kinds,
            additive: false,
            enclose: false,
        }
    }

    #[test]
    fn capacity_check_uses_slot_indices() {
        let mut mesh = points(4);
        for i in 0..3 {
            let _ = mesh.add_element(ElementKind::Line, &[i, i + 1]).unwrap();
        }
        mesh.elements_mut()[0].selected = true;
        mesh.elements_mut()[1].selected = true;
        let _ = mesh.delete_selected();

        assert_eq!(mesh.count(EntityKind::Line), 1);
        assert_eq!(slot_count(&mesh, EntityKind::Line), 3);
        assert_eq!(slot_count(&mesh, EntityKind::Point), 4);
        assert_eq!(slot_count(&mesh, EntityKind::Quad), 0);

        assert!(!exceeds_codec(codec::MAX_INDEX + 1));
        assert!(exceeds_codec(codec::MAX_INDEX + 2));
    }

    #[test]
    fn loop_runs_until_a_pass_finds_nothing_new() {
        let mut mesh = points(3);
        let mut renderer = Scripted {
            frames: vec![vec![px(0), px(0)], vec![px(2)], vec![px(2)]],
            renders: 0,
        };
        let outcome = PickingEngine::default().pick(
            &mut renderer,
            &mut mesh,
            &Camera::default(),
            &request(KindMask::only(EntityKind::Point)),
        );
        assert_eq!(outcome.passes, 3);
        assert_eq!(outcome.hits(EntityKind::Point), 2);
        assert_eq!(mesh.selected_coordinates(), vec![0, 2]);
        assert!(!outcome.capped);
    }

    #[test]
    fn stale_and_blended_pixels_are_ignored() {
        let mut mesh = points(2);
        let mut renderer = Scripted {
            frames: vec![vec![px(9), px(9), [0, 0, 0, 255], [252, 100, 7, 255], px(1)], vec![]],
            renders: 0,
        };
        let outcome = PickingEngine::default().pick(
            &mut renderer,
            &mut mesh,
            &Camera::default(),
            &request(KindMask::only(EntityKind::Point)),
        );
        assert_eq!(mesh.selected_coordinates(), vec![1]);
        assert_eq!(outcome.stale_indices, 1);
        assert_eq!(outcome.rejected_pixels, 2);
    }

    #[test]
    fn faulty_renderer_is_bounded_by_entity_count() {
        // Pass p reports entities 0..p, ignoring the exclusion of earlier
        // hits, then keeps repeating the whole set.
        let n = 5;
        let frames = (1..=n + 1)
            .map(|pass| (0..pass.min(n)).map(px).collect())
            .collect();
        let mut mesh = points(n);
        let mut renderer = Scripted { frames, renders: 0 };
        let outcome = PickingEngine::default().pick(
            &mut renderer,
            &mut mesh,
            &Camera::default(),
            &request(KindMask::only(EntityKind::Point)),
        );
        assert_eq!(outcome.passes, n + 1);
        assert_eq!(mesh.selected_coordinates().len(), n);
        assert!(!outcome.capped);
    }

    #[test]
    fn malformed_readback_selects_nothing() {
        struct Short;
        impl PickRenderer for Short {
            fn viewport(&self) -> Viewport {
                Viewport::sized(2, 2)
            }
            fn set_viewport(&mut self, _viewport: Viewport) {}
            fn render(
                &mut self,
                _mesh: &Mesh,
                _camera: &Camera,
                _kind: EntityKind,
                _fill: FillMode,
                _color_of: &dyn Fn(usize) -> Option<Rgb>,
            ) {
            }
            fn read_pixels(&mut self, _rect: PixelRect) -> Vec<u8> {
                vec![5, 5, 5]
            }
        }
        let mut mesh = points(1);
        let outcome = PickingEngine::default().pick(
            &mut Short,
            &mut mesh,
            &Camera::default(),
            &request(KindMask::only(EntityKind::Point)),
        );
        assert_eq!(outcome.passes, 1);
        assert!(mesh.selected_coordinates().is_empty());
    }

    #[test]
    fn additive_merges_previous_selection() {
        let mut mesh = points(3);
        mesh.coordinates_mut()[0].selected = true;
        let mut renderer = Scripted {
            frames: vec![vec![px(2)], vec![]],
            renders: 0,
        };
        let mut req = request(KindMask::only(EntityKind::Point));
        req.additive = true;
        let _ = PickingEngine::default().pick(&mut renderer, &mut mesh, &Camera::default(), &req);
        assert_eq!(mesh.selected_coordinates(), vec![0, 2]);
    }

    #[test]
    fn hidden_entities_are_not_selected() {
        let mut mesh = points(2);
        mesh.coordinates_mut()[1].hidden = true;
        let mut renderer = Scripted {
            frames: vec![vec![px(1), px(0)], vec![]],
            renders: 0,
        };
        let outcome = PickingEngine::default().pick(
            &mut renderer,
            &mut mesh,
            &Camera::default(),
            &request(KindMask::only(EntityKind::Point)),
        );
        assert_eq!(mesh.selected_coordinates(), vec![0]);
        assert_eq!(outcome.stale_indices, 1);
    }

    #[test]
    fn enclosure_drops_partially_covered_elements() {
        let mut mesh = points(4);
        let t = mesh.add_element(ElementKind::Line, &[0, 1]).unwrap();
        let u = mesh.add_element(ElementKind::Line, &[2, 3]).unwrap();
        for i in [0, 1, 2] {
            mesh.coordinates_mut()[i].selected = true;
        }
        mesh.elements_mut()[t].selected = true;
        mesh.elements_mut()[u].selected = true;

        keep_enclosed(&mut mesh, false);
        assert_eq!(mesh.selected_elements(), vec![t]);
        assert_eq!(mesh.selected_coordinates(), vec![0, 1]);
    }

    #[test]
    fn representative_point_is_stable_and_on_the_first_edge() {
        let edge = [Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0), Vec3::Y];
        let p = representative_point(7, &edge).unwrap();
        assert_eq!(representative_point(7, &edge), Some(p));
        assert!(p.x >= 1.0 && p.x < 3.0);
        assert_eq!(p.y, 0.0);
        assert_eq!(representative_point(0, &[]), None);
    }
}
