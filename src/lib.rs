// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Picking, camera and mouse-gesture core of an interactive 3D mesh viewer.
//!
//! Screen-space mouse gestures are mapped onto mesh entities (points, line
//! segments, triangles, quads) by rendering the mesh offscreen with every
//! entity painted in a color that encodes its index, reading the pixels back
//! and decoding them.
//!
//! # Key entry points
//!
//! - [`session::ViewSession`] - owns the mesh, camera, renderer and input
//!   state for one view; the host feeds it events and calls `frame()`
//! - [`picking::PickingEngine`] - the multi-pass render-and-decode loop
//! - [`picking::codec`] - index <-> RGB color codec
//! - [`camera::Camera`] - orthographic orbit camera with standard views
//! - [`input::InputProcessor`] - mouse tool bindings and gesture state
//!   machines
//! - [`options::Options`] - TOML-backed configuration
//!
//! # Architecture
//!
//! Everything runs on the caller's thread. Input events only move gesture
//! state; actions armed by a release execute in [`session::ViewSession::frame`],
//! which runs the blocking pick loop (N offscreen render + readback round
//! trips) before the host's visible render of the same frame.
//!
//! The rasterizer is a collaborator behind [`render::PickRenderer`]. The crate
//! ships [`render::software::SoftwareRenderer`], a CPU implementation used
//! for headless runs and tests.

pub mod camera;
pub mod error;
pub mod input;
pub mod mesh;
pub mod options;
pub mod picking;
pub mod render;
pub mod selection;
pub mod session;

pub use error::MeshViewError;
