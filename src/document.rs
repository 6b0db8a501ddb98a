use std::collections::HashMap;

use egui::Pos2;
use log::warn;

use crate::event::{CanvasEvent, EventBus, EventHandler};
use crate::id_generator::IdSource;
use crate::shape::{Shape, ShapeGeometry, ShapeId};

/// Errors from document mutations.
///
/// Both variants indicate a caller bug (operations always reference ids they
/// validated); they are debug-asserted at the failure site and surfaced as
/// errors so release builds degrade without corrupting the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("shape id {0} already exists in the store")]
    DuplicateId(ShapeId),
    #[error("no shape with id {0} in the store")]
    NotFound(ShapeId),
}

/// Owns the ordered shape collection and the selection/hover flags.
///
/// The store never decides *when* to mutate; shape lifecycle goes through
/// [`Operation`](crate::command::Operation)s so every change stays undoable.
/// Each successful mutation emits one event on the injected bus after the
/// new state is in place.
#[derive(Debug)]
pub struct DocumentStore {
    shapes: Vec<Shape>,
    index: HashMap<ShapeId, usize>,
    selected: Option<ShapeId>,
    hovered: Option<ShapeId>,
    ids: IdSource,
    next_z: u32,
    bus: EventBus,
}

impl DocumentStore {
    pub fn new(bus: EventBus) -> Self {
        Self {
            shapes: Vec::new(),
            index: HashMap::new(),
            selected: None,
            hovered: None,
            ids: IdSource::new(),
            next_z: 0,
            bus,
        }
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.bus.subscribe(handler);
    }

    pub fn allocate_id(&mut self) -> ShapeId {
        self.ids.allocate()
    }

    pub fn allocate_z(&mut self) -> u32 {
        let z = self.next_z;
        self.next_z += 1;
        z
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.index.get(&id).map(|&i| &self.shapes[i])
    }

    pub fn selected_id(&self) -> Option<ShapeId> {
        self.selected
    }

    pub fn hovered_id(&self) -> Option<ShapeId> {
        self.hovered
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selected.and_then(|id| self.get(id))
    }

    /// Shapes in ascending z-order (paint order: background first).
    pub fn shapes_ordered(&self) -> Vec<&Shape> {
        let mut shapes: Vec<&Shape> = self.shapes.iter().collect();
        shapes.sort_by_key(|s| s.z);
        shapes
    }

    /// Shapes in descending z-order (hit-test order: topmost first).
    pub fn shapes_top_down(&self) -> Vec<&Shape> {
        let mut shapes: Vec<&Shape> = self.shapes.iter().collect();
        shapes.sort_by_key(|s| std::cmp::Reverse(s.z));
        shapes
    }

    /// Topmost shape containing `pos`; on overlap the highest z wins.
    pub fn hit_test_top(&self, pos: Pos2) -> Option<ShapeId> {
        self.shapes_top_down()
            .into_iter()
            .find(|s| s.hit_test(pos))
            .map(|s| s.id)
    }

    pub fn insert(&mut self, shape: Shape) -> Result<(), StoreError> {
        if self.index.contains_key(&shape.id) {
            debug_assert!(false, "duplicate shape id {}", shape.id);
            return Err(StoreError::DuplicateId(shape.id));
        }
        self.ids.bump_past(shape.id);
        self.next_z = self.next_z.max(shape.z.saturating_add(1));
        self.index.insert(shape.id, self.shapes.len());
        self.shapes.push(shape.clone());
        self.bus.emit(CanvasEvent::ShapeAdded(shape));
        Ok(())
    }

    pub fn remove(&mut self, id: ShapeId) -> Result<Shape, StoreError> {
        let Some(pos) = self.index.remove(&id) else {
            debug_assert!(false, "remove of unknown shape id {id}");
            return Err(StoreError::NotFound(id));
        };
        let shape = self.shapes.remove(pos);
        for (i, moved) in self.shapes.iter().enumerate().skip(pos) {
            self.index.insert(moved.id, i);
        }
        // Selection and hover over a removed shape are cleared silently; the
        // removal notification already tells listeners everything they need.
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        self.bus.emit(CanvasEvent::ShapeRemoved { id });
        Ok(shape)
    }

    pub fn replace_geometry(&mut self, id: ShapeId, geometry: ShapeGeometry) -> Result<(), StoreError> {
        let Some(&pos) = self.index.get(&id) else {
            debug_assert!(false, "replace_geometry on unknown shape id {id}");
            return Err(StoreError::NotFound(id));
        };
        self.shapes[pos].geometry = geometry;
        let snapshot = self.shapes[pos].clone();
        self.bus.emit(CanvasEvent::ShapeModified(snapshot));
        Ok(())
    }

    /// Set (or clear) the primary selection. At most one shape is selected
    /// at a time; hover is independent.
    pub fn set_selected(&mut self, id: Option<ShapeId>) {
        if id == self.selected {
            return;
        }
        if let Some(new_id) = id {
            if !self.index.contains_key(&new_id) {
                debug_assert!(false, "select of unknown shape id {new_id}");
                warn!("ignoring selection of unknown shape id {new_id}");
                return;
            }
        }
        if let Some(old_id) = self.selected.take() {
            if let Some(&pos) = self.index.get(&old_id) {
                self.shapes[pos].selected = false;
            }
            self.bus.emit(CanvasEvent::ShapeDeselected { id: old_id });
        }
        if let Some(new_id) = id {
            let pos = self.index[&new_id];
            self.shapes[pos].selected = true;
            self.selected = Some(new_id);
            self.bus.emit(CanvasEvent::ShapeSelected { id: new_id });
        }
    }

    /// Update the hovered shape, emitting [`CanvasEvent::HoverChanged`] only
    /// when it actually changes. Hover is recomputed on every idle pointer
    /// move, so the same-shape case must stay silent.
    pub fn set_hovered(&mut self, id: Option<ShapeId>) {
        if id == self.hovered {
            return;
        }
        if let Some(new_id) = id {
            if !self.index.contains_key(&new_id) {
                warn!("ignoring hover of unknown shape id {new_id}");
                return;
            }
        }
        if let Some(old_id) = self.hovered.take() {
            if let Some(&pos) = self.index.get(&old_id) {
                self.shapes[pos].hovered = false;
            }
        }
        if let Some(new_id) = id {
            let pos = self.index[&new_id];
            self.shapes[pos].hovered = true;
        }
        self.hovered = id;
        self.bus.emit(CanvasEvent::HoverChanged { id });
    }

    /// Atomically replace all contents with pre-validated shapes (snapshot
    /// import). Emits a removal per old shape and an addition per new one.
    pub fn replace_all(&mut self, shapes: Vec<Shape>) {
        let removed: Vec<ShapeId> = self.shapes.drain(..).map(|s| s.id).collect();
        self.index.clear();
        self.selected = None;
        self.hovered = None;
        for id in removed {
            self.bus.emit(CanvasEvent::ShapeRemoved { id });
        }
        for shape in shapes {
            self.ids.bump_past(shape.id);
            self.next_z = self.next_z.max(shape.z.saturating_add(1));
            self.index.insert(shape.id, self.shapes.len());
            self.shapes.push(shape.clone());
            self.bus.emit(CanvasEvent::ShapeAdded(shape));
        }
    }
}
