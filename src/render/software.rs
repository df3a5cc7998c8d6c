//! CPU pick renderer.
//!
//! Flat-colored, depth-tested rasterization with no blending: points are
//! single pixels, lines are stepped with a DDA, triangles and quads are
//! filled by edge functions sampled at pixel centers.

use glam::{Mat4, Vec3};

use super::{FillMode, PickRenderer};
use crate::camera::Camera;
use crate::mesh::{ElementKind, Mesh};
use crate::picking::codec::{Rgb, BACKGROUND};
use crate::picking::rect::{PixelRect, Viewport};
use crate::picking::representative_point;
use crate::selection::EntityKind;

/// Below this absolute screen-space area a triangle is drawn as its edges.
const DEGENERATE_AREA: f32 = 1e-6;

/// RGBA8 color target with a float depth buffer.
pub struct SoftwareRenderer {
    width: u32,
    height: u32,
    viewport: Viewport,
    color: Vec<[u8; 4]>,
    depth: Vec<f32>,
}

/// Projected vertex: x/y in framebuffer pixels, z in `[0, 1]` (0 = near).
#[derive(Debug, Clone, Copy)]
struct ScreenVertex(Vec3);

impl SoftwareRenderer {
    /// Framebuffer of the given size with a full-size viewport.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            viewport: Viewport::sized(width, height),
            color: vec![background(); len],
            depth: vec![1.0; len],
        }
    }

    /// Framebuffer size.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Color at a framebuffer pixel, if inside.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        (x < self.width && y < self.height)
            .then(|| self.color[(y * self.width + x) as usize])
    }

    fn clear(&mut self) {
        self.color.fill(background());
        self.depth.fill(1.0);
    }

    fn project(&self, view_proj: &Mat4, p: Vec3) -> ScreenVertex {
        let ndc = view_proj.project_point3(p);
        let vp = self.viewport;
        ScreenVertex(Vec3::new(
            vp.x as f32 + (ndc.x + 1.0) * 0.5 * vp.width as f32,
            vp.y as f32 + (1.0 - ndc.y) * 0.5 * vp.height as f32,
            ndc.z,
        ))
    }

    /// Depth-tested write of one pixel; clipped to the viewport and the
    /// `[0, 1]` depth range.
    fn plot(&mut self, x: f32, y: f32, z: f32, rgb: Rgb) {
        if !(0.0..=1.0).contains(&z) || x < 0.0 || y < 0.0 {
            return;
        }
        let (px, py) = (x as u32, y as u32);
        let vp = self.viewport;
        if px < vp.x
            || py < vp.y
            || px >= (vp.x + vp.width).min(self.width)
            || py >= (vp.y + vp.height).min(self.height)
        {
            return;
        }
        let i = (py * self.width + px) as usize;
        if z < self.depth[i] {
            self.depth[i] = z;
            self.color[i] = [rgb[0], rgb[1], rgb[2], 255];
        }
    }

    fn point(&mut self, v: ScreenVertex, rgb: Rgb) {
        self.plot(v.0.x, v.0.y, v.0.z, rgb);
    }

    fn line(&mut self, a: ScreenVertex, b: ScreenVertex, rgb: Rgb) {
        let d = b.0 - a.0;
        let steps = d.x.abs().max(d.y.abs()).ceil().max(1.0) as u32;
        for s in 0..=steps {
            let p = a.0 + d * (s as f32 / steps as f32);
            self.plot(p.x, p.y, p.z, rgb);
        }
    }

    fn triangle(&mut self, a: ScreenVertex, b: ScreenVertex, c: ScreenVertex, rgb: Rgb) {
        let (a, b, c) = (a.0, b.0, c.0);
        let area = edge(a, b, c);
        if area.abs() < DEGENERATE_AREA {
            // Seen edge-on: still pickable along its outline.
            self.line(ScreenVertex(a), ScreenVertex(b), rgb);
            self.line(ScreenVertex(b), ScreenVertex(c), rgb);
            return;
        }

        let lo = a.min(b).min(c).floor().max(Vec3::ZERO);
        let hi = a.max(b).max(c).ceil();
        let x_end = hi.x.min(self.width as f32) as u32;
        let y_end = hi.y.min(self.height as f32) as u32;
        for py in lo.y as u32..y_end {
            for px in lo.x as u32..x_end {
                let p = Vec3::new(px as f32 + 0.5, py as f32 + 0.5, 0.0);
                let w0 = edge(b, c, p) / area;
                let w1 = edge(c, a, p) / area;
                let w2 = edge(a, b, p) / area;
                if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                    let z = w0 * a.z + w1 * b.z + w2 * c.z;
                    self.plot(p.x, p.y, z, rgb);
                }
            }
        }
    }

    fn element(&mut self, kind: ElementKind, corners: &[ScreenVertex], rgb: Rgb) {
        match (kind, corners) {
            (ElementKind::Line, &[a, b]) => self.line(a, b, rgb),
            (ElementKind::Triangle, &[a, b, c]) => self.triangle(a, b, c, rgb),
            (ElementKind::Quad, &[a, b, c, d]) => {
                self.triangle(a, b, c, rgb);
                self.triangle(a, c, d, rgb);
            }
            _ => {}
        }
    }
}

impl PickRenderer for SoftwareRenderer {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn render(
        &mut self,
        mesh: &Mesh,
        camera: &Camera,
        kind: EntityKind,
        fill: FillMode,
        color_of: &dyn Fn(usize) -> Option<Rgb>,
    ) {
        self.clear();
        let view_proj = camera.view_projection(self.viewport.aspect());

        if kind == EntityKind::Point {
            for (i, coord) in mesh.coordinates().iter().enumerate() {
                if let Some(rgb) = color_of(i) {
                    let v = self.project(&view_proj, coord.position);
                    self.point(v, rgb);
                }
            }
            return;
        }

        for (i, element) in mesh.elements().iter().enumerate() {
            if element.kind.entity_kind() != Some(kind) {
                continue;
            }
            let Some(rgb) = color_of(i) else {
                continue;
            };
            let positions: Vec<Vec3> = element
                .coords
                .iter()
                .filter_map(|&c| mesh.coordinates().get(c).map(|co| co.position))
                .collect();
            match fill {
                FillMode::Outline => {
                    if let Some(p) = representative_point(i, &positions) {
                        let v = self.project(&view_proj, p);
                        self.point(v, rgb);
                    }
                }
                FillMode::Filled => {
                    let corners: Vec<ScreenVertex> = positions
                        .iter()
                        .map(|&p| self.project(&view_proj, p))
                        .collect();
                    self.element(element.kind, &corners, rgb);
                }
            }
        }
    }

    /// Pixels of `rect` that lie inside the framebuffer, row by row. Parts of
    /// the rectangle past the framebuffer edge are skipped.
    fn read_pixels(&mut self, rect: PixelRect) -> Vec<u8> {
        let x_start = rect.x.min(self.width);
        let y_start = rect.y.min(self.height);
        let x_end = rect.x.saturating_add(rect.width).min(self.width);
        let y_end = rect.y.saturating_add(rect.height).min(self.height);
        let mut out = Vec::with_capacity(rect.pixel_count());
        for y in y_start..y_end {
            let row = (y * self.width) as usize;
            out.extend_from_slice(&self.color[row + x_start as usize..row + x_end as usize]);
        }
        bytemuck::cast_slice(&out).to_vec()
    }
}

const fn background() -> [u8; 4] {
    [BACKGROUND[0], BACKGROUND[1], BACKGROUND[2], 255]
}

/// Twice the signed area of `(a, b, p)` in the xy plane.
fn edge(a: Vec3, b: Vec3, p: Vec3) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}
