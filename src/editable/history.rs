//! Bounded undo/redo log for the text editing core.
//!
//! Operations live in a fixed-size ring. `undo_cursor` points at the most
//! recently applied operation and `insert_cursor` at the slot the next
//! recorded operation goes to. Slots walking backward from `undo_cursor` are
//! undoable; slots ahead of it, up to `insert_cursor`, are redoable.

use super::buffer::TextBuffer;

/// Default number of slots in the ring
pub const DEFAULT_MAX_EDIT_OPERATIONS: usize = 128;

/// Smallest ring that can hold an undoable entry. One slot is always lost
/// to the cursor bookkeeping, so a ring of `n` undoes at most `n - 1` steps.
pub const MIN_EDIT_OPERATIONS: usize = 2;

/// A single reversible edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOperation {
    Insert {
        start: usize,
        text: String,
    },
    Delete {
        start: usize,
        text: String,
    },
    /// Delete `removed` then insert `added`, as one undo step
    Replace {
        start: usize,
        removed: String,
        added: String,
    },
}

impl EditOperation {
    /// Index where the operation starts
    pub fn start(&self) -> usize {
        match self {
            EditOperation::Insert { start, .. }
            | EditOperation::Delete { start, .. }
            | EditOperation::Replace { start, .. } => *start,
        }
    }

    /// Perform the operation forward
    pub fn apply(&self, buffer: &mut TextBuffer) {
        match self {
            EditOperation::Insert { start, text } => {
                buffer.insert(*start, text);
            }
            EditOperation::Delete { start, text } => {
                buffer.delete(*start, text.chars().count());
            }
            EditOperation::Replace {
                start,
                removed,
                added,
            } => {
                buffer.delete(*start, removed.chars().count());
                buffer.insert(*start, added);
            }
        }
    }

    /// Undo the operation
    pub fn revert(&self, buffer: &mut TextBuffer) {
        match self {
            EditOperation::Insert { start, text } => {
                buffer.delete(*start, text.chars().count());
            }
            EditOperation::Delete { start, text } => {
                buffer.insert(*start, text);
            }
            EditOperation::Replace {
                start,
                removed,
                added,
            } => {
                buffer.delete(*start, added.chars().count());
                buffer.insert(*start, removed);
            }
        }
    }
}

/// Fixed-capacity circular log of edit operations.
#[derive(Debug, Clone)]
pub struct OperationLog {
    slots: Vec<Option<EditOperation>>,
    undo_cursor: usize,
    insert_cursor: usize,
}

impl Default for OperationLog {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_EDIT_OPERATIONS)
    }

    /// Create a log with `capacity` slots (at least [`MIN_EDIT_OPERATIONS`])
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(MIN_EDIT_OPERATIONS);
        Self {
            slots: vec![None; capacity],
            undo_cursor: capacity - 1,
            insert_cursor: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn undo_cursor(&self) -> usize {
        self.undo_cursor
    }

    pub fn insert_cursor(&self) -> usize {
        self.insert_cursor
    }

    /// Resize the ring. Drops every recorded operation.
    pub fn set_capacity(&mut self, capacity: usize) {
        *self = Self::with_capacity(capacity);
    }

    fn prev(&self, idx: usize) -> usize {
        if idx == 0 {
            self.capacity() - 1
        } else {
            idx - 1
        }
    }

    fn next(&self, idx: usize) -> usize {
        (idx + 1) % self.capacity()
    }

    /// Record an operation that has already been applied.
    ///
    /// Anything still redoable is discarded first. When the ring is full the
    /// oldest operation is overwritten.
    pub fn record(&mut self, op: EditOperation) {
        let mut last = self.prev(self.insert_cursor);
        if self.undo_cursor != last {
            let mut discarded = 0usize;
            while last != self.undo_cursor {
                if self.slots[last].take().is_some() {
                    discarded += 1;
                }
                last = self.prev(last);
            }
            tracing::trace!(discarded, "dropped redo history");
        }

        let slot = self.next(self.undo_cursor);
        self.slots[slot] = Some(op);
        self.insert_cursor = self.next(slot);
        self.undo_cursor = slot;
    }

    pub fn can_undo(&self) -> bool {
        self.slots[self.undo_cursor].is_some() && self.undo_cursor != self.insert_cursor
    }

    pub fn can_redo(&self) -> bool {
        let next = self.next(self.undo_cursor);
        next != self.insert_cursor && self.slots[next].is_some()
    }

    /// Revert the most recent operation against `buffer`.
    /// Returns false if there is nothing to undo.
    pub fn undo(&mut self, buffer: &mut TextBuffer) -> bool {
        if !self.can_undo() {
            return false;
        }
        if let Some(op) = &self.slots[self.undo_cursor] {
            op.revert(buffer);
        }
        self.undo_cursor = self.prev(self.undo_cursor);
        true
    }

    /// Re-apply the most recently undone operation against `buffer`.
    /// Returns false if there is nothing to redo.
    pub fn redo(&mut self, buffer: &mut TextBuffer) -> bool {
        if !self.can_redo() {
            return false;
        }
        let next = self.next(self.undo_cursor);
        if let Some(op) = &self.slots[next] {
            op.apply(buffer);
        }
        self.undo_cursor = next;
        true
    }

    /// Operation the next undo would revert
    pub fn peek_undo(&self) -> Option<&EditOperation> {
        if self.can_undo() {
            self.slots[self.undo_cursor].as_ref()
        } else {
            None
        }
    }

    /// Operation the next redo would apply
    pub fn peek_redo(&self) -> Option<&EditOperation> {
        if self.can_redo() {
            self.slots[self.next(self.undo_cursor)].as_ref()
        } else {
            None
        }
    }

    /// Number of consecutive undo steps available
    pub fn undo_count(&self) -> usize {
        let mut count = 0;
        let mut idx = self.undo_cursor;
        while count < self.capacity() && idx != self.insert_cursor && self.slots[idx].is_some() {
            count += 1;
            idx = self.prev(idx);
        }
        count
    }

    /// Number of consecutive redo steps available
    pub fn redo_count(&self) -> usize {
        let mut count = 0;
        let mut idx = self.next(self.undo_cursor);
        while count < self.capacity() && idx != self.insert_cursor && self.slots[idx].is_some() {
            count += 1;
            idx = self.next(idx);
        }
        count
    }

    /// Drop all recorded operations
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.undo_cursor = self.capacity() - 1;
        self.insert_cursor = 0;
    }
}
