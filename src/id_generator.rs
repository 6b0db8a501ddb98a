use crate::shape::ShapeId;

/// Monotonic source of shape identifiers.
///
/// Owned by the [`DocumentStore`](crate::document::DocumentStore) so that a
/// snapshot import can advance it past every imported id, keeping ids unique
/// for the lifetime of the store.
#[derive(Debug, Clone)]
pub struct IdSource {
    next: ShapeId,
}

impl IdSource {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn allocate(&mut self) -> ShapeId {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Ensure future allocations are strictly greater than `id`.
    pub fn bump_past(&mut self, id: ShapeId) {
        if id >= self.next {
            self.next = id + 1;
        }
    }
}

impl Default for IdSource {
    fn default() -> Self {
        Self::new()
    }
}
