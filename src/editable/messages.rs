//! Message types for the text editing core.
//!
//! [`EditMsg`] is what callers send in; [`EditEvent`] is what the pipeline
//! queues up for them to drain once the call has returned.

/// Notification produced by an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditEvent {
    /// Content changed; carries the text as it was before the edit
    TextChanged { previous: String },
    /// An insertion was cut short (or refused) by a limit
    TextFull,
    /// The selection was set, extended, or cleared
    SelectionChanged,
}

/// Request message for the text editing core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditMsg {
    // === Insertion ===
    /// Insert text at an index, recorded for undo
    Insert { idx: usize, text: String },
    /// Replace the selection with text (single undo step)
    ReplaceSelection(String),

    // === Deletion ===
    /// Delete `len` code units at an index, recorded for undo
    Delete { idx: usize, len: usize },
    /// Delete the selected text
    DeleteSelection,
    /// Remove all content and history
    Clear,

    // === Selection ===
    /// Select `[start, end)`
    SetSelection { start: usize, end: usize },
    /// Select all text
    SelectAll,
    /// Drop the selection
    ClearSelection,

    // === Undo/Redo ===
    /// Undo last edit
    Undo,
    /// Redo last undone edit
    Redo,
}

impl EditMsg {
    /// Check if this message can modify the buffer
    pub fn is_editing(&self) -> bool {
        matches!(
            self,
            EditMsg::Insert { .. }
                | EditMsg::ReplaceSelection(_)
                | EditMsg::Delete { .. }
                | EditMsg::DeleteSelection
                | EditMsg::Clear
                | EditMsg::Undo
                | EditMsg::Redo
        )
    }

    /// Check if this message only touches the selection
    pub fn is_selection(&self) -> bool {
        matches!(
            self,
            EditMsg::SetSelection { .. } | EditMsg::SelectAll | EditMsg::ClearSelection
        )
    }
}
