//! Screen-space rectangles and the viewport they are resolved against.

use glam::Vec2;

/// Region of the framebuffer the view is drawn into, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Left edge in framebuffer pixels.
    pub x: u32,
    /// Top edge in framebuffer pixels.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Viewport at the framebuffer origin.
    #[must_use]
    pub const fn sized(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// Width / height, or 1 for an empty viewport.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Rectangle spanned by a gesture, as the two corners the user dragged
/// between, in viewport-local pixels (y down). Corner order is preserved
/// because drag direction selects enclosure vs touch semantics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    /// Press position.
    pub from: Vec2,
    /// Release position.
    pub to: Vec2,
}

impl ScreenRect {
    /// Rectangle between two corners.
    #[must_use]
    pub const fn new(from: Vec2, to: Vec2) -> Self {
        Self { from, to }
    }

    /// Degenerate rectangle covering a single point.
    #[must_use]
    pub const fn point(at: Vec2) -> Self {
        Self { from: at, to: at }
    }

    /// Dragged strictly rightwards. A vertical or zero-width drag is a
    /// click-like gesture and counts as right-to-left.
    #[must_use]
    pub fn is_left_to_right(&self) -> bool {
        self.to.x > self.from.x
    }

    /// Top-left corner.
    #[must_use]
    pub fn min(&self) -> Vec2 {
        self.from.min(self.to)
    }

    /// Bottom-right corner.
    #[must_use]
    pub fn max(&self) -> Vec2 {
        self.from.max(self.to)
    }

    /// Framebuffer pixels covered by this rectangle: corners normalized,
    /// clamped to the viewport and offset by its origin. Both corners are
    /// inclusive, so a zero-area rectangle reads exactly one pixel.
    ///
    /// Returns `None` when the rectangle lies entirely outside the viewport.
    #[must_use]
    pub fn to_pixel_rect(&self, viewport: Viewport) -> Option<PixelRect> {
        if viewport.width == 0 || viewport.height == 0 {
            return None;
        }
        let limit = Vec2::new((viewport.width - 1) as f32, (viewport.height - 1) as f32);
        let lo = self.min().floor();
        let hi = self.max().floor();
        if hi.x < 0.0 || hi.y < 0.0 || lo.x > limit.x || lo.y > limit.y {
            return None;
        }
        let lo = lo.max(Vec2::ZERO);
        let hi = hi.min(limit);

        Some(PixelRect {
            x: viewport.x + lo.x as u32,
            y: viewport.y + lo.y as u32,
            width: (hi.x - lo.x) as u32 + 1,
            height: (hi.y - lo.y) as u32 + 1,
        })
    }
}

/// Integer pixel rectangle in framebuffer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    /// Left column.
    pub x: u32,
    /// Top row.
    pub y: u32,
    /// Columns covered.
    pub width: u32,
    /// Rows covered.
    pub height: u32,
}

impl PixelRect {
    /// Number of pixels covered.
    #[must_use]
    pub const fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
