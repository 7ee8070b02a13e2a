//! Text editing tests - insert, delete, replace, clear

mod common;

use common::{test_pipeline, test_pipeline_with_selection, text_changed_count};
use token_textedit::editable::{EditEvent, EditMsg};
use token_textedit::update::update;

// ========================================================================
// Insert tests
// ========================================================================

#[test]
fn test_insert_at_start() {
    let mut pipeline = test_pipeline("hello");
    assert!(pipeline.insert(0, "X", true));
    assert_eq!(pipeline.text(), "Xhello");
}

#[test]
fn test_insert_at_middle() {
    let mut pipeline = test_pipeline("hello");
    assert!(pipeline.insert(2, "XY", true));
    assert_eq!(pipeline.text(), "heXYllo");
}

#[test]
fn test_insert_at_end_fires_text_changed() {
    let mut pipeline = test_pipeline("hello");
    assert!(pipeline.insert(5, " world", true));
    assert_eq!(pipeline.text(), "hello world");
    assert_eq!(
        pipeline.take_events(),
        vec![EditEvent::TextChanged {
            previous: "hello".to_string()
        }]
    );
}

#[test]
fn test_insert_past_end_appends() {
    let mut pipeline = test_pipeline("abc");
    assert!(pipeline.insert(100, "!", true));
    assert_eq!(pipeline.text(), "abc!");
}

#[test]
fn test_insert_multibyte_counts_code_units() {
    let mut pipeline = test_pipeline("");
    pipeline.insert(0, "héllo wörld", true);
    assert_eq!(pipeline.len(), 11);
    pipeline.insert(1, "ß", true);
    assert_eq!(pipeline.text(), "hßéllo wörld");
    assert_eq!(pipeline.char_at(2), Some('é'));
}

#[test]
fn test_many_scattered_inserts() {
    let mut pipeline = test_pipeline("");
    let mut expected = String::new();
    for i in 0..500 {
        let idx = (i * 7) % (expected.chars().count() + 1);
        let byte = expected
            .char_indices()
            .nth(idx)
            .map_or(expected.len(), |(b, _)| b);
        expected.insert(byte, 'x');
        pipeline.insert(idx, "x", true);
    }
    assert_eq!(pipeline.text(), expected);
    assert_eq!(pipeline.len(), 500);
}

// ========================================================================
// Delete tests
// ========================================================================

#[test]
fn test_delete_middle() {
    let mut pipeline = test_pipeline("hello world");
    assert_eq!(pipeline.delete(4, 3, true), "o w");
    assert_eq!(pipeline.text(), "hellorld");
}

#[test]
fn test_delete_clamps_length() {
    let mut pipeline = test_pipeline("hello");
    assert_eq!(pipeline.delete(3, 99, true), "lo");
    assert_eq!(pipeline.text(), "hel");
}

#[test]
fn test_delete_out_of_range_is_noop() {
    let mut pipeline = test_pipeline("hello");
    assert_eq!(pipeline.delete(5, 1, true), "");
    assert_eq!(pipeline.delete(0, 0, true), "");
    assert_eq!(pipeline.text(), "hello");
    assert!(pipeline.take_events().is_empty());
    assert!(!pipeline.can_undo());
}

#[test]
fn test_delete_then_reinsert_round_trips() {
    let mut pipeline = test_pipeline("the quick brown fox");
    let removed = pipeline.delete(4, 6, true);
    pipeline.insert(4, &removed, true);
    assert_eq!(pipeline.text(), "the quick brown fox");
}

// ========================================================================
// Selection-based edits
// ========================================================================

#[test]
fn test_delete_selection() {
    let mut pipeline = test_pipeline_with_selection("hello world", 5, 11);
    assert_eq!(pipeline.delete_selection(true), " world");
    assert_eq!(pipeline.text(), "hello");
    assert!(!pipeline.has_selection());
}

#[test]
fn test_replace_selection_fires_one_text_changed() {
    let mut pipeline = test_pipeline_with_selection("hello world", 0, 5);
    assert!(pipeline.replace_selection("howdy"));
    assert_eq!(pipeline.text(), "howdy world");

    let events = pipeline.take_events();
    assert_eq!(text_changed_count(&events), 1);
    assert!(events.contains(&EditEvent::TextChanged {
        previous: "hello world".to_string()
    }));
}

#[test]
fn test_replace_selection_with_empty_deletes() {
    let mut pipeline = test_pipeline_with_selection("abcdef", 1, 3);
    assert!(pipeline.replace_selection(""));
    assert_eq!(pipeline.text(), "adef");
    pipeline.undo();
    assert_eq!(pipeline.text(), "abcdef");
}

// ========================================================================
// Clear / set_text
// ========================================================================

#[test]
fn test_clear() {
    let mut pipeline = test_pipeline("hello");
    pipeline.clear();
    assert_eq!(pipeline.text(), "");
    assert_eq!(
        pipeline.take_events(),
        vec![EditEvent::TextChanged {
            previous: "hello".to_string()
        }]
    );
}

#[test]
fn test_clear_empty_is_silent() {
    let mut pipeline = test_pipeline("");
    pipeline.clear();
    assert!(pipeline.take_events().is_empty());
}

#[test]
fn test_set_text_bypasses_history() {
    let mut pipeline = test_pipeline("abc");
    pipeline.insert(3, "d", true);
    pipeline.set_text("fresh");
    assert_eq!(pipeline.text(), "fresh");
    assert!(!pipeline.can_undo());
}

// ========================================================================
// Message dispatch
// ========================================================================

#[test]
fn test_update_insert_and_delete() {
    let mut pipeline = test_pipeline("hello");
    update(
        &mut pipeline,
        EditMsg::Insert {
            idx: 5,
            text: "!".into(),
        },
    );
    assert_eq!(pipeline.text(), "hello!");

    update(&mut pipeline, EditMsg::Delete { idx: 0, len: 1 });
    assert_eq!(pipeline.text(), "ello!");

    update(&mut pipeline, EditMsg::Clear);
    assert!(pipeline.is_empty());
}
