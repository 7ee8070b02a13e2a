//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use token_textedit::editable::{EditEvent, EditPipeline};
use token_textedit::layout::FixedPitchLayout;

/// Create a pipeline holding `text` with no history and no pending events
pub fn test_pipeline(text: &str) -> EditPipeline<FixedPitchLayout> {
    let mut pipeline = EditPipeline::new(FixedPitchLayout::new());
    pipeline.set_text(text);
    pipeline.take_events();
    pipeline
}

/// Create a pipeline holding `text` with `[start, end)` selected
pub fn test_pipeline_with_selection(
    text: &str,
    start: usize,
    end: usize,
) -> EditPipeline<FixedPitchLayout> {
    let mut pipeline = test_pipeline(text);
    pipeline.set_selection(start, end);
    pipeline.take_events();
    pipeline
}

/// Multi-line pipeline: 10pt font, 12pt spacing, 100 wide, 3 visible lines
pub fn multiline_pipeline(text: &str) -> EditPipeline<FixedPitchLayout> {
    let mut pipeline = test_pipeline(text);
    pipeline.enable_multiline(true);
    pipeline.set_font_size(10.0);
    pipeline.set_line_spacing(12.0);
    pipeline.set_available_width(100.0);
    pipeline.set_visible_line_count(3);
    pipeline
}

/// Number of `TextFull` events in `events`
pub fn text_full_count(events: &[EditEvent]) -> usize {
    events
        .iter()
        .filter(|event| **event == EditEvent::TextFull)
        .count()
}

/// Number of `TextChanged` events in `events`
pub fn text_changed_count(events: &[EditEvent]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, EditEvent::TextChanged { .. }))
        .count()
}
