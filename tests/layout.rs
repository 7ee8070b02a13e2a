//! Layout tests - dirty-flag lifecycle, geometry queries, hit-testing

mod common;

use common::{multiline_pipeline, test_pipeline};
use token_textedit::editable::EditPipeline;
use token_textedit::layout::{
    Alignment, Point, Rect, Size, TextLayout, TextPiece, TextStyle,
};

/// Layout collaborator that counts rebuilds
#[derive(Debug, Default)]
struct CountingLayout {
    rebuilds: usize,
}

impl TextLayout for CountingLayout {
    fn measure(&self, text: &str, style: &TextStyle) -> Size {
        Size::new(text.chars().count() as f32, style.line_spacing)
    }

    fn rebuild_layout(&mut self, text: &str, style: &TextStyle) -> Vec<TextPiece> {
        self.rebuilds += 1;
        let len = text.chars().count();
        vec![TextPiece {
            start: 0,
            len,
            bounds: Rect::new(0.0, 0.0, len as f32, style.line_spacing),
            advances: vec![1.0; len],
        }]
    }
}

// ========================================================================
// Invalidation
// ========================================================================

#[test]
fn test_queries_rebuild_once() {
    let mut pipeline = EditPipeline::new(CountingLayout::default());
    pipeline.insert(0, "hello", true);
    assert!(pipeline.is_layout_dirty());

    pipeline.contents_bounding_box();
    pipeline.char_width(0);
    pipeline.character_rect(1);
    assert_eq!(pipeline.layout_engine().rebuilds, 1);

    pipeline.delete(0, 1, true);
    pipeline.char_width(0);
    assert_eq!(pipeline.layout_engine().rebuilds, 2);
}

#[test]
fn test_selection_does_not_invalidate() {
    let mut pipeline = test_pipeline("hello");
    pipeline.layout();
    pipeline.set_selection(0, 3);
    assert!(!pipeline.is_layout_dirty());
}

#[test]
fn test_rejected_insert_does_not_invalidate() {
    let mut pipeline = test_pipeline("hello");
    pipeline.layout();
    pipeline.set_validator(Some(Box::new(|_: &str| false)));
    pipeline.insert(0, "x", true);
    assert!(!pipeline.is_layout_dirty());
}

#[test]
fn test_style_changes_invalidate() {
    let mut pipeline = test_pipeline("hello");

    let changes: [fn(&mut EditPipeline); 8] = [
        |p| p.set_font_size(20.0),
        |p| p.set_line_spacing(30.0),
        |p| p.set_tab_width(10.0),
        |p| p.set_alignment(Alignment::Center),
        |p| p.enable_multiline(true),
        |p| p.enable_line_wrap(true),
        |p| p.set_visible_line_count(4),
        |p| p.enable_comb_text(true),
    ];
    for change in changes {
        pipeline.layout();
        assert!(!pipeline.is_layout_dirty());
        change(&mut pipeline);
        assert!(pipeline.is_layout_dirty());
    }
}

#[test]
fn test_invalidate_layout() {
    let mut pipeline = EditPipeline::new(CountingLayout::default());
    pipeline.insert(0, "abc", true);
    pipeline.layout();
    pipeline.invalidate_layout();
    pipeline.layout();
    assert_eq!(pipeline.layout_engine().rebuilds, 2);
}

// ========================================================================
// Geometry
// ========================================================================

#[test]
fn test_bounding_box_multiline() {
    let mut pipeline = multiline_pipeline("abcd\nef");
    let bounds = pipeline.contents_bounding_box();
    assert_eq!(bounds, Rect::new(0.0, 0.0, 20.0, 22.0));
    assert_eq!(pipeline.pieces().len(), 2);
}

#[test]
fn test_empty_text_geometry() {
    let mut pipeline = test_pipeline("");
    pipeline.invalidate_layout();
    assert_eq!(pipeline.contents_bounding_box(), Rect::default());
    assert!(pipeline.pieces().is_empty());
    assert_eq!(pipeline.character_rect(0), None);
}

#[test]
fn test_alignment_offsets() {
    let mut pipeline = multiline_pipeline("ab");
    pipeline.set_alignment(Alignment::Right);
    assert_eq!(pipeline.contents_bounding_box().x, 90.0);

    pipeline.set_alignment(Alignment::Center);
    assert_eq!(pipeline.contents_bounding_box().x, 45.0);
}

#[test]
fn test_character_rect() {
    let mut pipeline = multiline_pipeline("ab\ncd");
    assert_eq!(
        pipeline.character_rect(1),
        Some(Rect::new(5.0, 0.0, 5.0, 12.0))
    );
    assert_eq!(
        pipeline.character_rect(4),
        Some(Rect::new(5.0, 12.0, 5.0, 10.0))
    );
    assert_eq!(pipeline.character_rect(5), None);
}

#[test]
fn test_character_rects_in_range() {
    let mut pipeline = multiline_pipeline("abc\ndef");
    let rects = pipeline.character_rects_in_range(2, 4);
    assert_eq!(rects.len(), 2);
    // the line break has no width
    assert_eq!(rects[0], Rect::new(10.0, 0.0, 5.0, 12.0));
    assert_eq!(rects[1], Rect::new(0.0, 12.0, 10.0, 10.0));
}

#[test]
fn test_character_rects_in_range_huge_count() {
    let mut pipeline = test_pipeline("abc");
    let rects = pipeline.character_rects_in_range(1, usize::MAX);
    assert_eq!(rects, vec![Rect::new(5.0, 0.0, 10.0, 10.0)]);
}

#[test]
fn test_password_alias_measured() {
    let mut pipeline = test_pipeline("iiii");
    pipeline.set_password_alias(Some('*'));
    assert_eq!(pipeline.contents_bounding_box().width, 20.0);
}

// ========================================================================
// Hit-testing
// ========================================================================

#[test]
fn test_index_for_point_inside_character() {
    let mut pipeline = multiline_pipeline("abc\ndef");
    assert_eq!(pipeline.index_for_point(Point::new(0.0, 0.0)), 0);
    assert_eq!(pipeline.index_for_point(Point::new(12.0, 5.0)), 2);
    assert_eq!(pipeline.index_for_point(Point::new(7.0, 15.0)), 5);
}

#[test]
fn test_index_for_point_beside_lines() {
    let mut pipeline = multiline_pipeline("abc\ndef");
    pipeline.set_alignment(Alignment::Right);
    // left of the right-aligned second line
    assert_eq!(pipeline.index_for_point(Point::new(1.0, 15.0)), 4);
    // right of the first line stops before the line break
    assert_eq!(pipeline.index_for_point(Point::new(100.5, 5.0)), 3);
}

#[test]
fn test_index_for_point_below_text() {
    let mut pipeline = multiline_pipeline("abc\ndef");
    assert_eq!(pipeline.index_for_point(Point::new(3.0, 200.0)), 7);
}

#[test]
fn test_index_for_point_crlf() {
    let mut pipeline = multiline_pipeline("ab\r\ncd");
    assert_eq!(pipeline.index_for_point(Point::new(80.0, 4.0)), 2);
}
