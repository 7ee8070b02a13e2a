//! Update function for message-driven callers
//!
//! Dispatches an [`EditMsg`] to the pipeline. In debug builds each message
//! runs inside a tracing span and the before/after state diff is logged.

use crate::editable::{EditMsg, EditPipeline};
use crate::layout::TextLayout;

#[cfg(debug_assertions)]
use crate::tracing::EditorSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, trace, Level};

/// Apply `msg` to `pipeline`. Returns true if it changed text or selection.
///
/// Events produced along the way stay queued on the pipeline.
#[inline]
pub fn update<L: TextLayout>(pipeline: &mut EditPipeline<L>, msg: EditMsg) -> bool {
    #[cfg(debug_assertions)]
    {
        update_traced(pipeline, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(pipeline, msg)
    }
}

/// Traced update wrapper (debug builds only)
#[cfg(debug_assertions)]
fn update_traced<L: TextLayout>(pipeline: &mut EditPipeline<L>, msg: EditMsg) -> bool {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = EditorSnapshot::from_pipeline(pipeline);
    debug!(target: "message", msg = %msg_name, "processing");

    let changed = update_inner(pipeline, msg);

    let after = EditorSnapshot::from_pipeline(pipeline);
    if let Some(diff) = before.diff(&after) {
        trace!(target: "state", %diff, "state changed");
    }
    changed
}

fn update_inner<L: TextLayout>(pipeline: &mut EditPipeline<L>, msg: EditMsg) -> bool {
    match msg {
        EditMsg::Insert { idx, text } => pipeline.insert(idx, &text, true),
        EditMsg::ReplaceSelection(text) => pipeline.replace_selection(&text),
        EditMsg::Delete { idx, len } => !pipeline.delete(idx, len, true).is_empty(),
        EditMsg::DeleteSelection => !pipeline.delete_selection(true).is_empty(),
        EditMsg::Clear => {
            let changed = !pipeline.is_empty() || pipeline.has_selection();
            pipeline.clear();
            changed
        }
        EditMsg::SetSelection { start, end } => pipeline.set_selection(start, end),
        EditMsg::SelectAll => pipeline.select_all(),
        EditMsg::ClearSelection => pipeline.clear_selection(),
        EditMsg::Undo => pipeline.undo(),
        EditMsg::Redo => pipeline.redo(),
    }
}

/// Display name for a message: the variant name without its payload
#[cfg(debug_assertions)]
fn msg_type_name(msg: &EditMsg) -> &'static str {
    match msg {
        EditMsg::Insert { .. } => "Insert",
        EditMsg::ReplaceSelection(_) => "ReplaceSelection",
        EditMsg::Delete { .. } => "Delete",
        EditMsg::DeleteSelection => "DeleteSelection",
        EditMsg::Clear => "Clear",
        EditMsg::SetSelection { .. } => "SetSelection",
        EditMsg::SelectAll => "SelectAll",
        EditMsg::ClearSelection => "ClearSelection",
        EditMsg::Undo => "Undo",
        EditMsg::Redo => "Redo",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_dispatches_edits() {
        let mut pipeline: EditPipeline = EditPipeline::default();
        assert!(update(
            &mut pipeline,
            EditMsg::Insert {
                idx: 0,
                text: "hello".into()
            }
        ));
        assert!(update(&mut pipeline, EditMsg::SelectAll));
        assert!(update(
            &mut pipeline,
            EditMsg::ReplaceSelection("bye".into())
        ));
        assert_eq!(pipeline.text(), "bye");

        assert!(update(&mut pipeline, EditMsg::Undo));
        assert_eq!(pipeline.text(), "hello");
        assert!(update(&mut pipeline, EditMsg::Redo));
        assert!(!update(&mut pipeline, EditMsg::Redo));
    }

    #[test]
    fn test_update_reports_noops() {
        let mut pipeline: EditPipeline = EditPipeline::default();
        assert!(!update(&mut pipeline, EditMsg::Delete { idx: 0, len: 3 }));
        assert!(!update(&mut pipeline, EditMsg::DeleteSelection));
        assert!(!update(&mut pipeline, EditMsg::ClearSelection));
        assert!(!update(&mut pipeline, EditMsg::Clear));
        assert!(!update(&mut pipeline, EditMsg::Undo));
    }
}
