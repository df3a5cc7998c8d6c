//! One interactive view over a mesh.
//!
//! [`ViewSession`] is the explicit home of everything that would otherwise
//! be global viewer state: the mesh being edited, the camera, the pick
//! renderer, the picking engine, the input processor and the select tool's
//! kind mask. All of it is mutated on the caller's thread.
//!
//! # Frame protocol
//!
//! ```ignore
//! session.on_press(MouseButton::Left, x0, y0, shift);
//! session.on_move(x1, y1);          // preview_rect() now returns the band
//! session.on_release(MouseButton::Left, x1, y1);
//! let events = session.frame();     // pick runs here, before drawing
//! draw(session.mesh(), session.camera(), session.preview_rect());
//! ```

mod command;

pub use command::ViewCommand;

use crate::camera::Camera;
use crate::input::{InputCommand, InputEvent, InputProcessor, KeyAction, MouseButton, ToolAction};
use crate::mesh::{ElementKind, Mesh};
use crate::options::Options;
use crate::picking::{PickOutcome, PickRequest, PickingEngine, ScreenRect};
use crate::render::PickRenderer;
use crate::selection::{EntityKind, KindMask, SelectionSnapshot};

/// Something the host may want to redraw or report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A pick ran.
    Picked(PickOutcome),
    /// The add tool created an element.
    ElementCreated {
        /// Slot of the new element.
        index: usize,
        /// Its kind.
        kind: ElementKind,
        /// Its coordinates, in pick order.
        coords: Vec<usize>,
    },
    /// Camera parameters changed.
    CameraChanged,
    /// Selection flags changed outside a pick.
    SelectionChanged,
    /// Visibility or topology changed.
    MeshChanged,
}

/// Mesh, camera, renderer and input state for one view.
pub struct ViewSession<R> {
    mesh: Mesh,
    camera: Camera,
    renderer: R,
    picking: PickingEngine,
    input: InputProcessor,
    kinds: KindMask,
    events: Vec<SessionEvent>,
}

impl<R: PickRenderer> ViewSession<R> {
    /// New session; the camera fits the mesh on the first frame.
    pub fn new(mesh: Mesh, renderer: R, options: &Options) -> Self {
        Self {
            mesh,
            camera: Camera::new(options.camera.clone()),
            renderer,
            picking: PickingEngine::new(options.picking.clone()),
            input: InputProcessor::new(options.tools.clone(), options.keybindings.clone()),
            kinds: options.picking.default_kinds,
            events: Vec::new(),
        }
    }

    /// The mesh.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Mutable mesh access. Call [`Self::request_refit`] after changing
    /// positions or visibility.
    pub fn mesh_mut(&mut self) -> &mut Mesh {
        &mut self.mesh
    }

    /// The camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable camera access.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// The pick renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable renderer access (resize, viewport changes).
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// The input processor.
    pub fn input(&self) -> &InputProcessor {
        &self.input
    }

    /// Kinds the select tool picks.
    pub fn kinds(&self) -> KindMask {
        self.kinds
    }

    /// Replace the select tool's kind mask.
    pub fn set_kinds(&mut self, kinds: KindMask) {
        self.kinds = kinds;
    }

    /// Refit the camera on the next frame.
    pub fn request_refit(&mut self) {
        self.camera.request_refit();
    }

    /// Rubber band of the select or add gesture in progress.
    pub fn preview_rect(&self) -> Option<ScreenRect> {
        self.input.preview()
    }

    /// Mouse button pressed at `(x, y)`.
    pub fn on_press(&mut self, button: MouseButton, x: f32, y: f32, shift: bool) {
        let _ = self.input.handle_event(InputEvent::Press {
            button,
            x,
            y,
            shift,
        });
    }

    /// Cursor moved to `(x, y)`.
    pub fn on_move(&mut self, x: f32, y: f32) {
        let _ = self.input.handle_event(InputEvent::Move { x, y });
    }

    /// Mouse button released at `(x, y)`. The gesture's action runs on the
    /// next [`Self::frame`].
    pub fn on_release(&mut self, button: MouseButton, x: f32, y: f32) {
        let _ = self.input.handle_event(InputEvent::Release { button, x, y });
    }

    /// Wheel scrolled; zooms immediately.
    pub fn on_scroll(&mut self, dx: f32, dy: f32, x: f32, y: f32) {
        let cmd = self.input.handle_event(InputEvent::Scroll { dx, dy, x, y });
        if let Some(InputCommand::Zoom { direction }) = cmd {
            log::debug!("zoom {direction} at {}", self.input.cursor());
            self.execute(ViewCommand::Zoom { direction });
        }
    }

    /// Key pressed. Runs the bound action, if any, and returns it.
    pub fn on_key(&mut self, key: &str) -> Option<KeyAction> {
        let action = self.input.handle_key_press(key)?;
        log::debug!("key {key} -> {action:?}");
        self.execute(action.into());
        Some(action)
    }

    /// Run a command immediately.
    pub fn execute(&mut self, command: ViewCommand) {
        match command {
            ViewCommand::Zoom { direction } => {
                self.camera.zoom(direction);
                self.events.push(SessionEvent::CameraChanged);
            }
            ViewCommand::RotateCamera { delta } => {
                if self.camera.rotate(delta) {
                    self.events.push(SessionEvent::CameraChanged);
                }
            }
            ViewCommand::PanCamera { delta } => {
                if self.camera.pan(delta) {
                    self.events.push(SessionEvent::CameraChanged);
                }
            }
            ViewCommand::SetView(view) => {
                self.camera.set_standard_view(view);
                self.events.push(SessionEvent::CameraChanged);
            }
            ViewCommand::FitToView => self.refit(),
            ViewCommand::Cancel => {
                self.mesh.deselect_all();
                self.input.reset_gestures();
                self.input.restore_default_bindings();
                self.kinds = self.picking.options().default_kinds;
                self.events.push(SessionEvent::SelectionChanged);
            }
            ViewCommand::SelectAll => {
                self.mesh.select_all();
                self.events.push(SessionEvent::SelectionChanged);
            }
            ViewCommand::HideSelected => {
                let changed = self.mesh.hide_selected();
                self.mesh_changed(changed);
            }
            ViewCommand::ShowAll => {
                let changed = self.mesh.show_all();
                self.mesh_changed(changed);
            }
            ViewCommand::DeleteSelected => {
                let changed = self.mesh.delete_selected();
                self.mesh_changed(changed);
            }
            ViewCommand::ToggleKind(kind) => self.kinds.toggle(kind),
            ViewCommand::BindTool { button, tool } => {
                self.input.bind(button, tool);
            }
        }
    }

    /// Pick with an explicit request, outside any gesture.
    pub fn pick(&mut self, request: &PickRequest) -> PickOutcome {
        let outcome = self.picking.pick(&mut self.renderer, &mut self.mesh, &self.camera, request);
        self.events.push(SessionEvent::Picked(outcome.clone()));
        outcome
    }

    /// Per-frame update: refit if pending, then run every armed gesture.
    /// Must be called before the visible render of the frame. Returns the
    /// events produced since the previous frame.
    pub fn frame(&mut self) -> Vec<SessionEvent> {
        if self.camera.needs_refit() {
            self.refit();
        }
        for (button, action) in self.input.take_actions() {
            self.run_action(button, action);
        }
        std::mem::take(&mut self.events)
    }

    fn run_action(&mut self, button: MouseButton, action: ToolAction) {
        match action {
            ToolAction::Select { rect, additive } => {
                // Enclosure and the additive merge apply uniformly to every
                // kind in the mask, not just the default kind.
                let enclose = self.picking.options().enclose_on_left_to_right
                    && rect.is_left_to_right();
                let _ = self.pick(&PickRequest {
                    rect,
                    kinds: self.kinds,
                    additive,
                    enclose,
                });
            }
            ToolAction::Rotate { delta } => {
                self.execute(ViewCommand::RotateCamera { delta });
            }
            ToolAction::Pan { delta } => {
                self.execute(ViewCommand::PanCamera { delta });
            }
            ToolAction::AddPick { rect } => self.add_pick(button, rect),
        }
    }

    /// One sub-pick of the add tool. The non-additive pick clears the
    /// previous selection, so each sub-pick shows only its own point. A
    /// sub-pick that misses puts the previous selection back.
    fn add_pick(&mut self, button: MouseButton, rect: ScreenRect) {
        let before = SelectionSnapshot::capture(&self.mesh);
        let _ = self.pick(&PickRequest {
            rect,
            kinds: KindMask::only(EntityKind::Point),
            additive: false,
            enclose: false,
        });
        let picked = self.mesh.selected_coordinates();
        let &[coordinate] = picked.as_slice() else {
            log::debug!("add pick ignored: {} coordinates under the cursor", picked.len());
            before.restore_into(&mut self.mesh);
            return;
        };
        let Some(add) = self.input.tool_mut(button).as_add_mut() else {
            return;
        };
        let kind = add.target();
        let Some(coords) = add.accept(coordinate) else {
            return;
        };

        match self.mesh.add_element(kind, &coords) {
            Ok(index) => {
                log::info!("created {kind:?} {index} from {coords:?}");
                self.mesh.deselect_all();
                self.events.push(SessionEvent::ElementCreated {
                    index,
                    kind,
                    coords,
                });
            }
            Err(e) => log::warn!("could not create {kind:?}: {e}"),
        }
    }

    fn refit(&mut self) {
        match self.camera.fit_to_bounds(self.mesh.visible_positions()) {
            Ok(()) => self.events.push(SessionEvent::CameraChanged),
            Err(e) => log::debug!("camera fit skipped: {e}"),
        }
    }

    fn mesh_changed(&mut self, changed: usize) {
        if changed > 0 {
            self.camera.request_refit();
            self.events.push(SessionEvent::MeshChanged);
        }
    }
}
