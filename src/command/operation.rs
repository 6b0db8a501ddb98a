use egui::Vec2;

use crate::document::{DocumentStore, StoreError};
use crate::shape::{Shape, ShapeGeometry, ShapeId};

/// A reversible unit of change to the shape collection.
///
/// Every variant carries enough state to both apply and invert without
/// consulting external context, and is immutable once recorded.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Insert the snapshotted shape (id, style and z included).
    Create { shape: Shape },
    /// Remove the snapshotted shape; the snapshot makes the inverse exact.
    Delete { shape: Shape },
    /// Translate a shape by `delta`.
    Move { id: ShapeId, delta: Vec2 },
    /// Replace a shape's geometry via a control-point drag.
    Resize {
        id: ShapeId,
        control: usize,
        old: ShapeGeometry,
        new: ShapeGeometry,
    },
    /// An ordered group applied as one history entry (e.g. clear-all),
    /// atomic under undo.
    Batch(Vec<Operation>),
}

impl Operation {
    /// Apply this operation against the store.
    ///
    /// Failures mean an operation referenced an id the store does not know,
    /// which is a core bug rather than a recoverable condition.
    pub fn apply(&self, store: &mut DocumentStore) -> Result<(), StoreError> {
        match self {
            Operation::Create { shape } => store.insert(shape.clone()),
            Operation::Delete { shape } => store.remove(shape.id).map(|_| ()),
            Operation::Move { id, delta } => {
                let geometry = store
                    .get(*id)
                    .ok_or(StoreError::NotFound(*id))?
                    .geometry
                    .translated(*delta);
                store.replace_geometry(*id, geometry)
            }
            Operation::Resize { id, new, .. } => store.replace_geometry(*id, new.clone()),
            Operation::Batch(ops) => {
                for op in ops {
                    op.apply(store)?;
                }
                Ok(())
            }
        }
    }

    /// The inverse operation: applying it after `apply` restores the store
    /// to its pre-operation state.
    pub fn inverted(&self) -> Operation {
        match self {
            Operation::Create { shape } => Operation::Delete {
                shape: shape.clone(),
            },
            Operation::Delete { shape } => Operation::Create {
                shape: shape.clone(),
            },
            Operation::Move { id, delta } => Operation::Move {
                id: *id,
                delta: -*delta,
            },
            Operation::Resize {
                id,
                control,
                old,
                new,
            } => Operation::Resize {
                id: *id,
                control: *control,
                old: new.clone(),
                new: old.clone(),
            },
            Operation::Batch(ops) => {
                Operation::Batch(ops.iter().rev().map(Operation::inverted).collect())
            }
        }
    }
}
