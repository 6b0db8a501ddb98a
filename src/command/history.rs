use log::debug;

use crate::command::Operation;
use crate::document::{DocumentStore, StoreError};

/// Linear undo history: an ordered operation log plus a cursor separating
/// applied entries from undone-but-retained ones.
pub struct OperationHistory {
    entries: Vec<Operation>,
    /// Number of applied entries; everything past it is the redo tail.
    cursor: usize,
}

impl OperationHistory {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
        }
    }

    /// Apply `op` against the store and append it after the cursor,
    /// truncating any redo tail.
    pub fn record_and_apply(
        &mut self,
        op: Operation,
        store: &mut DocumentStore,
    ) -> Result<(), StoreError> {
        op.apply(store)?;
        self.entries.truncate(self.cursor);
        self.entries.push(op);
        self.cursor += 1;
        Ok(())
    }

    /// Undo the most recent applied operation. Returns false (a silent
    /// no-op) when there is nothing to undo.
    pub fn undo(&mut self, store: &mut DocumentStore) -> bool {
        if self.cursor == 0 {
            debug!("undo requested with empty history");
            return false;
        }
        let inverse = self.entries[self.cursor - 1].inverted();
        match inverse.apply(store) {
            Ok(()) => {
                self.cursor -= 1;
                true
            }
            Err(err) => {
                debug_assert!(false, "undo failed to apply inverse: {err}");
                log::error!("undo failed to apply inverse: {err}");
                false
            }
        }
    }

    /// Re-apply the next undone operation. Returns false when the cursor is
    /// already at the end of the history.
    pub fn redo(&mut self, store: &mut DocumentStore) -> bool {
        if self.cursor == self.entries.len() {
            debug!("redo requested with no redo tail");
            return false;
        }
        match self.entries[self.cursor].apply(store) {
            Ok(()) => {
                self.cursor += 1;
                true
            }
            Err(err) => {
                debug_assert!(false, "redo failed to re-apply: {err}");
                log::error!("redo failed to re-apply: {err}");
                false
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }

    /// Total recorded entries, applied and undone.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all history. Does not touch the store; used when the current
    /// contents become a new baseline (full reset, snapshot import).
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}

impl Default for OperationHistory {
    fn default() -> Self {
        Self::new()
    }
}
