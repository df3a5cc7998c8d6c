//! Camera system for 3D mesh viewing.
//!
//! Orthographic orbit camera with discrete rotation steps, screen-space
//! panning, wheel zoom, fit-to-bounds and standard view presets.

/// Camera state, mutators and view/projection matrices.
pub mod core;
/// Fixed yaw/pitch presets.
pub mod views;

pub use self::core::{Camera, RADIUS_FLOOR};
pub use self::views::StandardView;
