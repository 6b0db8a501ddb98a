use egui::{Color32, Key, Modifiers, Pos2};
use log::debug;

use crate::command::{Operation, OperationHistory};
use crate::document::DocumentStore;
use crate::event::{EventBus, EventHandler};
use crate::input::InputEvent;
use crate::shape::{Shape, ShapeId};
use crate::snapshot::{ShapeRecord, SnapshotError};
use crate::state::{GesturePreview, InteractionMachine};
use crate::tools::{ToolConfig, ToolKind};

/// The annotation editor core: document store, operation log, tool
/// configuration and the interaction machine, wired together behind the
/// command surface a host embeds.
///
/// Single-threaded by contract; a multi-threaded host must marshal all
/// calls onto one owning thread.
pub struct CanvasEditor {
    store: DocumentStore,
    history: OperationHistory,
    config: ToolConfig,
    machine: InteractionMachine,
}

impl CanvasEditor {
    pub fn new() -> Self {
        Self::with_bus(EventBus::new())
    }

    pub fn with_bus(bus: EventBus) -> Self {
        Self {
            store: DocumentStore::new(bus),
            history: OperationHistory::new(),
            config: ToolConfig::default(),
            machine: InteractionMachine::new(),
        }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.store.subscribe(handler);
    }

    /// In-progress gesture geometry for the render collaborator.
    pub fn preview(&self) -> Option<GesturePreview> {
        self.machine.preview(&self.config)
    }

    /// Control point of the selected shape currently under the pointer.
    pub fn hovered_control(&self) -> Option<usize> {
        self.machine.hovered_control()
    }

    /// Feed one semantic input event through the interaction machine.
    ///
    /// Key bindings that bypass gesture state (undo/redo/delete/escape) are
    /// resolved here; pointer events drive the machine's gesture modes.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { pos, .. } => {
                self.machine
                    .on_pointer_down(pos, &mut self.store, &mut self.history, &self.config);
            }
            InputEvent::PointerMove { pos } => {
                self.machine.on_pointer_move(pos, &mut self.store, &self.config);
            }
            InputEvent::PointerUp { pos } => {
                self.machine
                    .on_pointer_up(pos, &mut self.store, &mut self.history, &self.config);
            }
            InputEvent::KeyPress { key, modifiers } => self.handle_key(key, modifiers),
        }
    }

    fn handle_key(&mut self, key: Key, modifiers: Modifiers) {
        match key {
            Key::Escape => self.machine.cancel_gesture(),
            Key::Delete | Key::Backspace => {
                self.delete_selected();
            }
            Key::Z if modifiers.command && modifiers.shift => {
                self.redo();
            }
            Key::Z if modifiers.command => {
                self.undo();
            }
            Key::Y if modifiers.command => {
                self.redo();
            }
            _ => {}
        }
    }

    // Tool configuration commands.

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.config.active_tool = tool;
    }

    pub fn set_color(&mut self, color: Color32) {
        self.config.color = color;
    }

    pub fn set_line_width(&mut self, width: f32) {
        self.config.line_width = width;
    }

    pub fn set_snap_to_grid(&mut self, enabled: bool) {
        self.config.snap_to_grid = enabled;
    }

    pub fn set_grid_size(&mut self, size: f32) {
        self.config.grid_size = size;
    }

    // History commands.

    /// Undo the last operation. No-op (returning false) with empty history
    /// or while a gesture is in flight, so an active drag is never corrupted.
    pub fn undo(&mut self) -> bool {
        if !self.machine.is_idle() {
            debug!("undo ignored during active gesture");
            return false;
        }
        self.history.undo(&mut self.store)
    }

    pub fn redo(&mut self) -> bool {
        if !self.machine.is_idle() {
            debug!("redo ignored during active gesture");
            return false;
        }
        self.history.redo(&mut self.store)
    }

    /// Delete the selected shape as one undoable operation. Cancels any
    /// in-flight gesture first so a drag never targets a removed shape.
    pub fn delete_selected(&mut self) -> bool {
        self.machine.cancel_gesture();
        let Some(shape) = self.store.selected_shape().map(Shape::detached) else {
            return false;
        };
        self.history
            .record_and_apply(Operation::Delete { shape }, &mut self.store)
            .is_ok()
    }

    /// Remove every shape as a single batch operation, atomic under undo.
    pub fn clear_all(&mut self) -> bool {
        self.machine.cancel_gesture();
        if self.store.is_empty() {
            return false;
        }
        // Top-down order so undo re-inserts bottom-up, restoring stacking.
        let deletes: Vec<Operation> = self
            .store
            .shapes_top_down()
            .into_iter()
            .map(|shape| Operation::Delete {
                shape: shape.detached(),
            })
            .collect();
        self.history
            .record_and_apply(Operation::Batch(deletes), &mut self.store)
            .is_ok()
    }

    /// Select the topmost shape at `pos`, or clear the selection.
    pub fn select_shape_at(&mut self, pos: Pos2) -> Option<ShapeId> {
        let hit = self.store.hit_test_top(pos);
        self.store.set_selected(hit);
        hit
    }

    // Snapshot surface.

    /// Serialize current contents in z-order; no history included.
    pub fn export_snapshot(&self) -> Vec<ShapeRecord> {
        self.store
            .shapes_ordered()
            .into_iter()
            .map(|shape| ShapeRecord::from_shape(shape))
            .collect()
    }

    /// Atomically replace all shapes with the given records.
    ///
    /// Every record is validated before anything changes; failure leaves the
    /// prior state untouched. Success clears the operation log: imported
    /// state is a new baseline, not undoable to pre-import.
    pub fn import_snapshot(&mut self, records: &[ShapeRecord]) -> Result<(), SnapshotError> {
        let mut seen = std::collections::HashSet::new();
        let mut shapes = Vec::with_capacity(records.len());
        for record in records {
            if !seen.insert(record.id) {
                return Err(SnapshotError::DuplicateId(record.id));
            }
            shapes.push(record.into_shape()?);
        }
        self.machine.cancel_gesture();
        self.store.replace_all(shapes);
        self.history.clear();
        Ok(())
    }

    pub fn export_json(&self) -> serde_json::Result<String> {
        crate::snapshot::to_json(&self.export_snapshot())
    }

    /// Parse and import a JSON snapshot. Parse failures surface as the
    /// serde error; validation failures as [`SnapshotError`].
    pub fn import_json(&mut self, json: &str) -> Result<(), ImportJsonError> {
        let records = crate::snapshot::from_json(json)?;
        self.import_snapshot(&records)?;
        Ok(())
    }
}

impl Default for CanvasEditor {
    fn default() -> Self {
        Self::new()
    }
}

/// Failure modes of [`CanvasEditor::import_json`].
#[derive(Debug, thiserror::Error)]
pub enum ImportJsonError {
    #[error("snapshot JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] SnapshotError),
}
