//! Color-coded offscreen picking.
//!
//! Renders entity indices as colors through a
//! [`PickRenderer`](crate::render::PickRenderer), reads back the pixels
//! under a screen rectangle and selects the entities they decode to.

pub mod codec;
mod engine;
pub mod rect;

pub use engine::{representative_point, PickOutcome, PickRequest, PickingEngine};
pub use rect::{PixelRect, ScreenRect, Viewport};
