//! Interaction state machine: pointer events in, commands out.
//!
//! One engine instance drives one canvas. Each pointer handler receives the
//! current scene snapshot and returns the commands the gesture implies; the
//! embedder dispatches them to its store and feeds the updated snapshot back
//! on the next tick.

use crate::command::Command;
use crate::config::EngineConfig;
use crate::element::{Element, ElementId};
use crate::input::{Modifiers, MouseButton, PointerEvent};
use crate::marquee::Marquee;
use crate::scene::Scene;
use crate::selection::{
    hit_test_handles, selection_handles, Handle, HandleKind, SelectionState, HANDLE_HIT_TOLERANCE,
};
use crate::snap::{detect_guides, snap_move_delta, snap_vec_to_grid, Guide};
use crate::transform::{
    normalize_degrees, resize_bounds, rotate_about, rotation_delta, snap_rotation,
};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Canvas tool modes. The engine only acts in [`ToolMode::Select`]; the
/// other modes belong to other tools and leave every handler a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolMode {
    #[default]
    Select,
    Pan,
    Draw,
    Text,
    Measure,
}

/// Where the state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    MarqueeSelecting,
    Dragging,
    Resizing,
    Rotating,
}

/// Per-gesture session data. Reset to `Idle` on pointer-up or pointer-leave.
#[derive(Debug, Clone, Default)]
enum Session {
    #[default]
    Idle,
    Marquee {
        marquee: Marquee,
        additive: bool,
    },
    Dragging {
        start: Point,
        /// Snapped total already emitted, so each tick sends an increment.
        applied: Vec2,
        /// Selection bounds at gesture start, the reference for snapping.
        origin_bounds: Rect,
    },
    Resizing {
        handle: HandleKind,
        start: Point,
        /// Gesture-start bounds per participating element.
        origins: Vec<(ElementId, Rect)>,
    },
    Rotating {
        pivot: Point,
        start: Point,
        /// Last applied rotation delta in radians.
        prev_delta: f64,
        /// Gesture-start center and rotation (degrees) per element.
        origins: Vec<(ElementId, Point, f64)>,
    },
}

/// The canvas interaction engine.
#[derive(Debug, Clone)]
pub struct CanvasEngine {
    config: EngineConfig,
    mode: ToolMode,
    zoom: f64,
    selection: SelectionState,
    session: Session,
    guides: Vec<Guide>,
    hovered_handle: Option<HandleKind>,
}

impl Default for CanvasEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl CanvasEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            mode: ToolMode::Select,
            zoom: 1.0,
            selection: SelectionState::new(),
            session: Session::Idle,
            guides: Vec::new(),
            hovered_handle: None,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
    }

    /// Current tool mode.
    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    /// Switch tool mode. Ends any active session.
    pub fn set_mode(&mut self, mode: ToolMode) {
        if self.mode != mode {
            log::debug!("tool mode -> {:?}", mode);
        }
        self.mode = mode;
        self.session = Session::Idle;
        self.guides.clear();
        self.hovered_handle = None;
    }

    /// Update the zoom the embedder is rendering at. Only used to scale
    /// handle hit tolerance; non-finite or non-positive values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() && zoom > 0.0 {
            self.zoom = zoom;
        }
    }

    /// The current selection.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Sync the selection from the store (e.g. after an undo or a layer
    /// panel click).
    pub fn set_selection(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        self.selection.set(ids);
    }

    /// Recompute derived overlay state (alignment guides) after the store
    /// changed the element list or the selection outside a gesture.
    pub fn sync_scene(&mut self, scene: &Scene) {
        self.refresh_guides(scene, None);
    }

    /// Where the state machine currently is.
    pub fn state(&self) -> InteractionState {
        match self.session {
            Session::Idle => InteractionState::Idle,
            Session::Marquee { .. } => InteractionState::MarqueeSelecting,
            Session::Dragging { .. } => InteractionState::Dragging,
            Session::Resizing { .. } => InteractionState::Resizing,
            Session::Rotating { .. } => InteractionState::Rotating,
        }
    }

    /// The handle driving the current resize/rotate session, if any.
    pub fn active_handle(&self) -> Option<HandleKind> {
        match &self.session {
            Session::Resizing { handle, .. } => Some(*handle),
            Session::Rotating { .. } => Some(HandleKind::Rotate),
            _ => None,
        }
    }

    /// The handle under the pointer while idle, for cursor feedback.
    pub fn hovered_handle(&self) -> Option<HandleKind> {
        self.hovered_handle
    }

    /// The in-progress marquee rectangle, for overlay rendering.
    pub fn marquee(&self) -> Option<&Marquee> {
        match &self.session {
            Session::Marquee { marquee, .. } => Some(marquee),
            _ => None,
        }
    }

    /// Currently detected alignment guides, for overlay rendering.
    pub fn guides(&self) -> &[Guide] {
        &self.guides
    }

    /// Manipulation handles for the current selection, for overlay
    /// rendering. Empty when nothing is selected.
    pub fn handles(&self, scene: &Scene) -> Vec<Handle> {
        self.selection
            .bounds(scene)
            .map(selection_handles)
            .unwrap_or_default()
    }

    /// Translate a pointer event to the matching handler. Only left-button
    /// downs start a session.
    pub fn handle_event(&mut self, scene: &Scene, event: &PointerEvent) -> Vec<Command> {
        match *event {
            PointerEvent::Down {
                position,
                button,
                modifiers,
            } => {
                if button == MouseButton::Left {
                    self.pointer_down(scene, position, modifiers)
                } else {
                    Vec::new()
                }
            }
            PointerEvent::Move {
                position,
                modifiers,
            } => self.pointer_move(scene, position, modifiers),
            PointerEvent::Up {
                position,
                modifiers,
            } => self.pointer_up(scene, position, modifiers),
            PointerEvent::Leave => self.pointer_leave(scene),
        }
    }

    /// Begin an interaction session at a canvas-local point.
    pub fn pointer_down(
        &mut self,
        scene: &Scene,
        point: Point,
        modifiers: Modifiers,
    ) -> Vec<Command> {
        if self.mode != ToolMode::Select {
            return Vec::new();
        }
        if !matches!(self.session, Session::Idle) {
            // A second concurrent pointer during an active gesture.
            log::debug!("pointer-down ignored: session already active");
            return Vec::new();
        }

        let mut commands = Vec::new();
        self.hovered_handle = None;

        // Handles win over element bodies: a pointer-down on the selection's
        // handles starts a resize or rotation.
        if let Some(bounds) = self.selection.bounds(scene) {
            let tolerance = HANDLE_HIT_TOLERANCE / self.zoom;
            if let Some(handle) = hit_test_handles(bounds, point, tolerance) {
                self.begin_handle_session(scene, bounds, handle, point);
                self.refresh_guides(scene, Some(bounds));
                return commands;
            }
        }

        match scene.topmost_at(point) {
            Some(el) => {
                if modifiers.shift {
                    self.selection.toggle(el.id);
                    commands.push(self.selection_changed(scene));
                } else {
                    if !self.selection.is_selected(el.id) {
                        self.selection.select(el.id);
                        commands.push(self.selection_changed(scene));
                    }
                    if let Some(bounds) = self.selection.bounds(scene) {
                        log::debug!("session: dragging {} element(s)", self.selection.len());
                        self.session = Session::Dragging {
                            start: point,
                            applied: Vec2::ZERO,
                            origin_bounds: bounds,
                        };
                    }
                }
            }
            None => {
                if !modifiers.shift && !self.selection.is_empty() {
                    self.selection.clear();
                    commands.push(self.selection_changed(scene));
                }
                log::debug!("session: marquee selecting");
                self.session = Session::Marquee {
                    marquee: Marquee::new(point),
                    additive: modifiers.shift,
                };
            }
        }

        self.refresh_guides(scene, None);
        commands
    }

    /// Advance the active session (or update hover feedback while idle).
    pub fn pointer_move(
        &mut self,
        scene: &Scene,
        point: Point,
        modifiers: Modifiers,
    ) -> Vec<Command> {
        if self.mode != ToolMode::Select {
            return Vec::new();
        }

        let mut commands = Vec::new();
        let session = std::mem::take(&mut self.session);
        self.session = match session {
            Session::Idle => {
                self.hovered_handle = self.selection.bounds(scene).and_then(|bounds| {
                    hit_test_handles(bounds, point, HANDLE_HIT_TOLERANCE / self.zoom)
                });
                Session::Idle
            }
            Session::Marquee {
                mut marquee,
                additive,
            } => {
                marquee.update(point);
                Session::Marquee { marquee, additive }
            }
            Session::Dragging {
                start,
                applied,
                origin_bounds,
            } => {
                let raw = point - start;
                let snap = snap_move_delta(raw, origin_bounds, scene, &self.selection, &self.config);
                let step = snap.delta - applied;
                let applied = if step.x.abs() > 1e-9 || step.y.abs() > 1e-9 {
                    for el in self.transform_targets(scene) {
                        commands.push(Command::Move {
                            id: el.id,
                            delta: step,
                        });
                    }
                    snap.delta
                } else {
                    applied
                };
                self.refresh_guides(scene, Some(origin_bounds + applied));
                Session::Dragging {
                    start,
                    applied,
                    origin_bounds,
                }
            }
            Session::Resizing {
                handle,
                start,
                origins,
            } => {
                let raw = point - start;
                let delta = if self.config.snap_to_grid {
                    snap_vec_to_grid(raw, self.config.grid_size)
                } else {
                    raw
                };
                let keep_aspect = modifiers.shift;
                for (id, origin) in &origins {
                    commands.push(Command::Resize {
                        id: *id,
                        bounds: resize_bounds(*origin, handle, delta, keep_aspect),
                        handle,
                    });
                }
                Session::Resizing {
                    handle,
                    start,
                    origins,
                }
            }
            Session::Rotating {
                pivot,
                start,
                prev_delta,
                origins,
            } => {
                let mut delta = rotation_delta(pivot, start, point);
                if modifiers.shift {
                    delta = snap_rotation(delta);
                }
                let prev_delta = if (delta - prev_delta).abs() > 1e-12 {
                    let orbiting = self.selection.len() > 1;
                    for (id, center, rotation) in &origins {
                        commands.push(Command::Rotate {
                            id: *id,
                            degrees: normalize_degrees(rotation + delta.to_degrees()),
                        });
                        if orbiting {
                            let step = rotate_about(*center, pivot, delta)
                                - rotate_about(*center, pivot, prev_delta);
                            if step.x.abs() > 1e-9 || step.y.abs() > 1e-9 {
                                commands.push(Command::Move {
                                    id: *id,
                                    delta: step,
                                });
                            }
                        }
                    }
                    delta
                } else {
                    prev_delta
                };
                Session::Rotating {
                    pivot,
                    start,
                    prev_delta,
                    origins,
                }
            }
        };
        commands
    }

    /// End the active session, finalizing a marquee selection if one is in
    /// progress.
    pub fn pointer_up(
        &mut self,
        scene: &Scene,
        point: Point,
        _modifiers: Modifiers,
    ) -> Vec<Command> {
        if self.mode != ToolMode::Select {
            return Vec::new();
        }

        let mut commands = Vec::new();
        if let Session::Marquee {
            mut marquee,
            additive,
        } = std::mem::take(&mut self.session)
        {
            marquee.update(point);
            commands.extend(self.finish_marquee(scene, &marquee, additive));
        }
        self.hovered_handle = None;
        self.refresh_guides(scene, None);
        commands
    }

    /// The pointer left the canvas container: treated exactly like
    /// pointer-up so a session can never outlive its gesture.
    pub fn pointer_leave(&mut self, scene: &Scene) -> Vec<Command> {
        if self.mode != ToolMode::Select {
            return Vec::new();
        }

        let mut commands = Vec::new();
        if let Session::Marquee { marquee, additive } = std::mem::take(&mut self.session) {
            commands.extend(self.finish_marquee(scene, &marquee, additive));
        }
        self.hovered_handle = None;
        self.refresh_guides(scene, None);
        commands
    }

    /// Emit a duplicate intent for every selected element. Not gated by
    /// `locked`: duplicating a locked element is harmless.
    pub fn duplicate_selection(&self, scene: &Scene) -> Vec<Command> {
        scene
            .elements()
            .iter()
            .filter(|el| self.selection.is_selected(el.id))
            .map(|el| Command::Duplicate { id: el.id })
            .collect()
    }

    /// Emit a delete intent for every selected unlocked element, and drop
    /// the deleted ids from the selection.
    pub fn delete_selection(&mut self, scene: &Scene) -> Vec<Command> {
        let mut commands: Vec<Command> = scene
            .elements()
            .iter()
            .filter(|el| self.selection.is_selected(el.id))
            .filter(|el| {
                if el.locked {
                    log::debug!("delete skipped: element {} is locked", el.id);
                }
                !el.locked
            })
            .map(|el| Command::Delete { id: el.id })
            .collect();
        if !commands.is_empty() {
            for cmd in &commands {
                if let Command::Delete { id } = cmd {
                    self.selection.toggle(*id);
                }
            }
            commands.push(self.selection_changed(scene));
        }
        commands
    }

    /// Emit a lock-toggle intent for every selected element.
    pub fn toggle_lock_selection(&self, scene: &Scene) -> Vec<Command> {
        scene
            .elements()
            .iter()
            .filter(|el| self.selection.is_selected(el.id))
            .map(|el| Command::Lock { id: el.id })
            .collect()
    }

    /// Start a resize or rotation session from a handle hit.
    fn begin_handle_session(
        &mut self,
        scene: &Scene,
        bounds: Rect,
        handle: HandleKind,
        point: Point,
    ) {
        match handle {
            HandleKind::Rotate => {
                let pivot = if self.selection.len() == 1 {
                    self.transform_targets(scene)
                        .first()
                        .map(|el| el.center())
                        .unwrap_or_else(|| bounds.center())
                } else {
                    bounds.center()
                };
                let origins = self
                    .transform_targets(scene)
                    .iter()
                    .map(|el| (el.id, el.center(), el.rotation))
                    .collect();
                log::debug!("session: rotating around {:?}", pivot);
                self.session = Session::Rotating {
                    pivot,
                    start: point,
                    prev_delta: 0.0,
                    origins,
                };
            }
            _ => {
                let origins = self
                    .transform_targets(scene)
                    .iter()
                    .map(|el| (el.id, el.bounds))
                    .collect();
                log::debug!("session: resizing with {:?}", handle);
                self.session = Session::Resizing {
                    handle,
                    start: point,
                    origins,
                };
            }
        }
    }

    /// Selected elements that transforms apply to, in z-order: unlocked,
    /// with finite non-empty bounds.
    fn transform_targets<'a>(&self, scene: &Scene<'a>) -> Vec<&'a Element> {
        scene
            .elements()
            .iter()
            .filter(|el| {
                self.selection.is_selected(el.id)
                    && !el.locked
                    && el.has_valid_bounds()
                    && el.bounds.area() > 0.0
            })
            .collect()
    }

    /// Apply a finished marquee to the selection.
    fn finish_marquee(
        &mut self,
        scene: &Scene,
        marquee: &Marquee,
        additive: bool,
    ) -> Option<Command> {
        if marquee.is_click() {
            return None;
        }
        let ids = scene.intersecting(marquee.to_rect());
        if additive {
            self.selection.extend(ids);
        } else {
            self.selection.set(ids);
        }
        Some(self.selection_changed(scene))
    }

    /// Full-replacement selection command, ids in z-order.
    fn selection_changed(&self, scene: &Scene) -> Command {
        let ids = scene
            .elements()
            .iter()
            .filter(|el| self.selection.is_selected(el.id))
            .map(|el| el.id)
            .collect();
        Command::SelectionChanged { ids }
    }

    /// Recompute alignment guides against the given selection bounds (or
    /// the selection's current bounds when `None`).
    fn refresh_guides(&mut self, scene: &Scene, bounds: Option<Rect>) {
        if !self.config.show_guides {
            self.guides.clear();
            return;
        }
        match bounds.or_else(|| self.selection.bounds(scene)) {
            Some(b) => self.guides = detect_guides(scene, &self.selection, b),
            None => self.guides.clear(),
        }
    }
}
