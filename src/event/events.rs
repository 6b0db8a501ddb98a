use crate::shape::{Shape, ShapeId};

/// Notifications emitted by the document store after each mutation.
///
/// Shape-carrying variants hold the post-mutation snapshot, so listeners
/// always observe a consistent state without querying back mid-dispatch.
#[derive(Debug, Clone)]
pub enum CanvasEvent {
    ShapeAdded(Shape),
    ShapeRemoved { id: ShapeId },
    ShapeModified(Shape),
    ShapeSelected { id: ShapeId },
    ShapeDeselected { id: ShapeId },
    /// The hovered shape changed; `None` when the pointer left all shapes.
    HoverChanged { id: Option<ShapeId> },
}
