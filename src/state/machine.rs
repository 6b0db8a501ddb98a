use egui::{Pos2, Vec2};
use log::{debug, warn};

use crate::command::{Operation, OperationHistory};
use crate::document::DocumentStore;
use crate::shape::{
    Shape, ShapeGeometry, ShapeId, POLYGON_MIN_VERTICES, POLYGON_SNAP_DISTANCE,
};
use crate::tools::{ToolConfig, ToolKind};

/// What an in-flight drag is doing to its target shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Move,
    Resize { control: usize },
}

/// Current gesture mode. Transient by definition: discarded on completion
/// or cancellation, never persisted.
#[derive(Debug, Clone)]
enum Mode {
    Idle,
    Creating {
        kind: ToolKind,
        start: Pos2,
        current: Pos2,
    },
    Dragging {
        id: ShapeId,
        drag: DragKind,
        start: Pos2,
        start_geometry: ShapeGeometry,
        current: Pos2,
    },
    PolygonBuilding {
        vertices: Vec<Pos2>,
        cursor: Option<Pos2>,
    },
}

/// In-progress geometry for the renderer. Lives only in the machine; the
/// store is mutated exclusively by committed operations.
#[derive(Debug, Clone)]
pub enum GesturePreview {
    /// A shape being created, styled with the active tool settings.
    New {
        geometry: ShapeGeometry,
        color: egui::Color32,
        line_width: f32,
    },
    /// An existing shape mid-drag; draw this geometry in place of its own.
    Reshape {
        id: ShapeId,
        geometry: ShapeGeometry,
    },
    /// An open polygon under construction. `closing` is set when the cursor
    /// has snapped onto the start vertex.
    Polygon {
        vertices: Vec<Pos2>,
        cursor: Option<Pos2>,
        closing: bool,
    },
}

/// Turns semantic pointer input into shape mutations.
///
/// Transitions emit [`Operation`]s through the history; the machine itself
/// only ever holds transient gesture state. Out-of-order input (a release
/// without a press, a move mid-nothing) is absorbed without panicking.
pub struct InteractionMachine {
    mode: Mode,
    /// Control-point index of the selected shape under the pointer, for the
    /// renderer to emphasize. Recomputed on every idle pointer move.
    hovered_control: Option<usize>,
}

impl InteractionMachine {
    pub fn new() -> Self {
        Self {
            mode: Mode::Idle,
            hovered_control: None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.mode, Mode::Idle)
    }

    pub fn hovered_control(&self) -> Option<usize> {
        self.hovered_control
    }

    /// Discard any in-flight gesture without emitting an operation.
    pub fn cancel_gesture(&mut self) {
        if !self.is_idle() {
            debug!("gesture cancelled");
            self.mode = Mode::Idle;
        }
    }

    pub fn on_pointer_down(
        &mut self,
        pos: Pos2,
        store: &mut DocumentStore,
        history: &mut OperationHistory,
        config: &ToolConfig,
    ) {
        match &self.mode {
            Mode::Idle => self.idle_pointer_down(pos, store, config),
            Mode::PolygonBuilding { .. } => self.polygon_pointer_down(pos, store, history, config),
            Mode::Creating { .. } | Mode::Dragging { .. } => {
                // A second press without a release in between; the gesture in
                // flight already tracks the pointer, so absorb it.
                warn!("pointer down during active gesture ignored");
            }
        }
    }

    pub fn on_pointer_move(&mut self, pos: Pos2, store: &mut DocumentStore, config: &ToolConfig) {
        match &mut self.mode {
            Mode::Idle => {
                store.set_hovered(store.hit_test_top(pos));
                self.hovered_control = store
                    .selected_shape()
                    .and_then(|shape| shape.control_point_at(pos))
                    .map(|cp| cp.index);
            }
            Mode::Creating { current, .. } => *current = pos,
            Mode::Dragging { current, .. } => *current = config.snapped(pos),
            Mode::PolygonBuilding { vertices, cursor } => {
                *cursor = Some(polygon_cursor(vertices, pos));
            }
        }
    }

    pub fn on_pointer_up(
        &mut self,
        pos: Pos2,
        store: &mut DocumentStore,
        history: &mut OperationHistory,
        config: &ToolConfig,
    ) {
        match std::mem::replace(&mut self.mode, Mode::Idle) {
            Mode::Idle => {
                warn!("pointer up without matching pointer down ignored");
            }
            Mode::Creating { kind, start, .. } => {
                // A bare click with an area tool spans nothing; only the
                // point tool creates from a click.
                if pos == start && kind != ToolKind::Point {
                    return;
                }
                let geometry = creation_geometry(kind, start, pos);
                self.commit_create(geometry, store, history, config);
            }
            Mode::Dragging {
                id,
                drag,
                start,
                start_geometry,
                ..
            } => {
                // Compare raw positions first: snapping the endpoint of a
                // plain click must not manufacture a displacement.
                if pos == start {
                    return;
                }
                let end = config.snapped(pos);
                let op = match drag {
                    DragKind::Move => {
                        let delta = end - start;
                        // A drag snapped back onto its start commits nothing,
                        // keeping the history free of no-op entries.
                        if delta == Vec2::ZERO {
                            return;
                        }
                        Operation::Move { id, delta }
                    }
                    DragKind::Resize { control } => {
                        let new = start_geometry.resized(control, end);
                        if new == start_geometry {
                            return;
                        }
                        Operation::Resize {
                            id,
                            control,
                            old: start_geometry,
                            new,
                        }
                    }
                };
                if let Err(err) = history.record_and_apply(op, store) {
                    debug_assert!(false, "drag commit rejected: {err}");
                    log::error!("drag commit rejected: {err}");
                }
            }
            // Polygon vertices accumulate on presses; releases are not part
            // of the gesture.
            mode @ Mode::PolygonBuilding { .. } => self.mode = mode,
        }
    }

    /// Renderer view of the in-progress gesture, if any.
    pub fn preview(&self, config: &ToolConfig) -> Option<GesturePreview> {
        match &self.mode {
            Mode::Idle => None,
            Mode::Creating { kind, start, current } => Some(GesturePreview::New {
                geometry: creation_geometry(*kind, *start, *current),
                color: config.color,
                line_width: config.line_width,
            }),
            Mode::Dragging {
                id,
                drag,
                start,
                start_geometry,
                current,
            } => {
                let geometry = match drag {
                    DragKind::Move => start_geometry.translated(*current - *start),
                    DragKind::Resize { control } => start_geometry.resized(*control, *current),
                };
                Some(GesturePreview::Reshape { id: *id, geometry })
            }
            Mode::PolygonBuilding { vertices, cursor } => Some(GesturePreview::Polygon {
                vertices: vertices.clone(),
                cursor: *cursor,
                closing: matches!(
                    (cursor, vertices.first()),
                    (Some(c), Some(first)) if c == first && vertices.len() >= POLYGON_MIN_VERTICES
                ),
            }),
        }
    }

    fn idle_pointer_down(&mut self, pos: Pos2, store: &mut DocumentStore, config: &ToolConfig) {
        // Control points of the selected shape win over shape bodies.
        if let Some(shape) = store.selected_shape() {
            if let Some(cp) = shape.control_point_at(pos) {
                self.mode = Mode::Dragging {
                    id: shape.id,
                    drag: DragKind::Resize { control: cp.index },
                    start: pos,
                    start_geometry: shape.geometry.clone(),
                    current: pos,
                };
                return;
            }
        }

        if let Some(hit) = store.hit_test_top(pos) {
            store.set_selected(Some(hit));
            if let Some(shape) = store.get(hit) {
                self.mode = Mode::Dragging {
                    id: hit,
                    drag: DragKind::Move,
                    start: pos,
                    start_geometry: shape.geometry.clone(),
                    current: pos,
                };
            }
            return;
        }

        // Empty canvas: begin a creation gesture with the active tool.
        store.set_selected(None);
        match config.active_tool {
            ToolKind::Polygon => {
                self.mode = Mode::PolygonBuilding {
                    vertices: vec![pos],
                    cursor: None,
                };
            }
            kind => {
                self.mode = Mode::Creating {
                    kind,
                    start: pos,
                    current: pos,
                };
            }
        }
    }

    fn polygon_pointer_down(
        &mut self,
        pos: Pos2,
        store: &mut DocumentStore,
        history: &mut OperationHistory,
        config: &ToolConfig,
    ) {
        let Mode::PolygonBuilding { vertices, cursor } = &mut self.mode else {
            unreachable!("checked by caller");
        };

        let near_start = vertices
            .first()
            .is_some_and(|first| first.distance(pos) <= POLYGON_SNAP_DISTANCE);
        let on_shape = store.hit_test_top(pos).is_some();

        if (near_start && vertices.len() >= POLYGON_MIN_VERTICES) || on_shape {
            // Close attempt: commit when legal, otherwise a cancelled no-op.
            let vertices = std::mem::take(vertices);
            self.mode = Mode::Idle;
            match ShapeGeometry::polygon(vertices) {
                Ok(geometry) => self.commit_create(geometry, store, history, config),
                Err(err) => debug!("polygon close discarded: {err}"),
            }
        } else {
            vertices.push(pos);
            *cursor = None;
        }
    }

    fn commit_create(
        &mut self,
        geometry: ShapeGeometry,
        store: &mut DocumentStore,
        history: &mut OperationHistory,
        config: &ToolConfig,
    ) {
        let shape = Shape::new(
            store.allocate_id(),
            geometry,
            config.color,
            config.line_width,
            store.allocate_z(),
        );
        if let Err(err) = history.record_and_apply(Operation::Create { shape }, store) {
            debug_assert!(false, "create rejected: {err}");
            log::error!("create rejected: {err}");
        }
    }
}

impl Default for InteractionMachine {
    fn default() -> Self {
        Self::new()
    }
}

fn creation_geometry(kind: ToolKind, start: Pos2, end: Pos2) -> ShapeGeometry {
    match kind {
        ToolKind::Point => ShapeGeometry::point(end),
        ToolKind::Rectangle => ShapeGeometry::rectangle(start, end),
        ToolKind::Ellipse => ShapeGeometry::ellipse(start, end),
        // Polygon creation never reaches `Creating`; it has its own mode.
        ToolKind::Polygon => ShapeGeometry::point(end),
    }
}

/// Preview cursor for an open polygon: snaps onto the start vertex once the
/// polygon is closable and the pointer is within snap distance.
fn polygon_cursor(vertices: &[Pos2], pos: Pos2) -> Pos2 {
    if vertices.len() >= POLYGON_MIN_VERTICES {
        if let Some(first) = vertices.first() {
            if first.distance(pos) <= POLYGON_SNAP_DISTANCE {
                return *first;
            }
        }
    }
    pos
}
