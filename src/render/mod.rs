//! The rasterizer collaborator used by picking.
//!
//! Picking never draws anything itself: it hands a [`PickRenderer`] a color
//! per entity and reads the result back. A GPU backend implements this trait
//! against its offscreen target; [`software::SoftwareRenderer`] does the same
//! on the CPU.

pub mod software;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::mesh::Mesh;
use crate::picking::codec::Rgb;
use crate::picking::rect::{PixelRect, Viewport};
use crate::selection::EntityKind;

/// How element primitives are rasterized during a pick pass.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum FillMode {
    /// One representative pixel per primitive (see
    /// [`crate::picking::representative_point`]). Fast on large models but
    /// only hits primitives whose sample lands in the rectangle.
    Outline,
    /// The whole primitive is rasterized; any overlap counts as a hit.
    #[default]
    Filled,
}

/// Offscreen pick rendering and pixel readback.
pub trait PickRenderer {
    /// Current viewport, in framebuffer pixels.
    fn viewport(&self) -> Viewport;

    /// Set the viewport used by subsequent renders.
    fn set_viewport(&mut self, viewport: Viewport);

    /// Clear the target to [`crate::picking::codec::BACKGROUND`], then draw
    /// every entity of `kind` for which `color_of(index)` returns a color,
    /// flat-shaded in exactly that color (no blending, no lighting), with
    /// the projection of `camera` and a depth test.
    ///
    /// For [`EntityKind::Point`], `index` is a coordinate slot; otherwise it
    /// is an element slot and only elements of the matching kind are drawn.
    fn render(
        &mut self,
        mesh: &Mesh,
        camera: &Camera,
        kind: EntityKind,
        fill: FillMode,
        color_of: &dyn Fn(usize) -> Option<Rgb>,
    );

    /// Read back `rect` as tightly packed RGBA8, row-major from the rect's
    /// top-left pixel.
    fn read_pixels(&mut self, rect: PixelRect) -> Vec<u8>;
}
