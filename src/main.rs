//! Headless demo: builds a small quad grid, drives a scripted gesture
//! session against the software renderer and logs what gets picked.
//!
//! Usage: `meshview [options.toml]`

use std::path::Path;

use glam::Vec3;
use meshview::input::MouseButton;
use meshview::mesh::{ElementKind, Mesh};
use meshview::options::Options;
use meshview::render::software::SoftwareRenderer;
use meshview::selection::{EntityKind, KindMask};
use meshview::session::{SessionEvent, ViewSession};
use meshview::MeshViewError;

const GRID: usize = 8;

fn grid_mesh() -> Result<Mesh, MeshViewError> {
    let mut mesh = Mesh::new();
    let mut ids = Vec::with_capacity((GRID + 1) * (GRID + 1));
    for z in 0..=GRID {
        for x in 0..=GRID {
            let height = ((x + z) % 3) as f32 * 0.1;
            ids.push(mesh.add_coordinate(Vec3::new(x as f32, height, z as f32)));
        }
    }
    let at = |x: usize, z: usize| ids[z * (GRID + 1) + x];
    for z in 0..GRID {
        for x in 0..GRID {
            let _ = mesh.add_element(
                ElementKind::Quad,
                &[at(x, z), at(x + 1, z), at(x + 1, z + 1), at(x, z + 1)],
            )?;
        }
    }
    Ok(mesh)
}

fn log_events(label: &str, events: &[SessionEvent]) {
    for event in events {
        log::info!("{label}: {event:?}");
    }
}

fn main() -> Result<(), MeshViewError> {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => Options::load(Path::new(&path))?,
        None => Options::default(),
    };

    let renderer = SoftwareRenderer::new(640, 480);
    let (width, height) = renderer.size();
    let mut session = ViewSession::new(grid_mesh()?, renderer, &options);
    log_events("startup", &session.frame());

    // Band over the middle ~40% of the view.
    let (w, h) = (width as f32, height as f32);
    let (left, top, right, bottom) = (w * 0.3, h * 0.3, w * 0.7, h * 0.7);
    let (cx, cy) = (w * 0.5, h * 0.5);

    // Left-to-right: enclosed quads only.
    session.set_kinds(KindMask::only(EntityKind::Quad));
    session.on_press(MouseButton::Left, left, top, false);
    session.on_move(right, bottom);
    if let Some(band) = session.preview_rect() {
        log::info!("rubber band {:?} -> {:?}", band.from, band.to);
    }
    session.on_release(MouseButton::Left, right, bottom);
    log_events("enclose", &session.frame());
    log::info!(
        "enclosed: {} quads, {} coordinates",
        session.mesh().selected_elements().len(),
        session.mesh().selected_coordinates().len()
    );

    // Same band right-to-left: every touched quad.
    session.on_press(MouseButton::Left, right, bottom, false);
    session.on_release(MouseButton::Left, left, top);
    log_events("touch", &session.frame());
    log::info!("touched: {} quads", session.mesh().selected_elements().len());

    // Rotate with the middle button, zoom in, then go back to the top view.
    session.on_press(MouseButton::Middle, cx - 20.0, cy - 40.0, false);
    session.on_release(MouseButton::Middle, cx + 40.0, cy - 30.0);
    session.on_scroll(0.0, 1.0, cx, cy);
    let _ = session.on_key("Digit5");
    log_events("camera", &session.frame());
    let camera = session.camera();
    log::info!(
        "camera yaw {:.0} pitch {:.0} radius {:.3}",
        camera.yaw(),
        camera.pitch(),
        camera.radius()
    );

    let _ = session.on_key("Escape");
    log_events("reset", &session.frame());
    Ok(())
}
