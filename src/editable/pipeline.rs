//! EditPipeline - the single entry point for mutating text.
//!
//! Insertions pass through the character limit, the optional validation hook,
//! and optional size limiting before they touch the buffer. Undo and redo go
//! straight to the buffer through the operation log, since everything in the
//! log was already accepted once.

use std::fmt;
use std::ops::Range;

use crate::config::EditorConfig;
use crate::layout::{
    Alignment, FixedPitchLayout, LayoutCache, Point, Rect, Size, TextLayout, TextPiece, TextStyle,
};

use super::buffer::TextBuffer;
use super::constraints::{EditConstraints, Validator};
use super::history::{EditOperation, OperationLog};
use super::messages::EditEvent;
use super::selection::{Selection, SelectionModel};

/// Outcome of running an insertion through the limits
enum InsertPlan {
    /// Validation hook declined the candidate
    Rejected,
    /// Nothing of the text fits
    Full,
    Accept { text: String, truncated: bool },
}

/// Text editing core: buffer, selection, undo log, and layout cache behind
/// one mutation API.
///
/// Notifications are queued as [`EditEvent`]s and handed out by
/// [`EditPipeline::take_events`] once the call that produced them returned.
pub struct EditPipeline<L = FixedPitchLayout> {
    buffer: TextBuffer,
    selection: SelectionModel,
    history: OperationLog,
    constraints: EditConstraints,
    validator: Option<Validator>,
    style: TextStyle,
    comb_text: bool,
    layout: L,
    cache: LayoutCache,
    events: Vec<EditEvent>,
}

impl<L> fmt::Debug for EditPipeline<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditPipeline")
            .field("buffer", &self.buffer)
            .field("selection", &self.selection)
            .field("history", &self.history)
            .field("constraints", &self.constraints)
            .field("has_validator", &self.validator.is_some())
            .field("style", &self.style)
            .field("comb_text", &self.comb_text)
            .field("cache", &self.cache)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl Default for EditPipeline<FixedPitchLayout> {
    fn default() -> Self {
        Self::new(FixedPitchLayout::new())
    }
}

impl<L: TextLayout> EditPipeline<L> {
    pub fn new(layout: L) -> Self {
        Self::with_constraints(layout, EditConstraints::default())
    }

    pub fn with_constraints(layout: L, constraints: EditConstraints) -> Self {
        let mut buffer = TextBuffer::new();
        buffer.set_password_alias(constraints.password_alias);
        Self {
            buffer,
            selection: SelectionModel::new(),
            history: OperationLog::new(),
            constraints,
            validator: None,
            style: TextStyle::default(),
            comb_text: false,
            layout,
            cache: LayoutCache::new(),
            events: Vec::new(),
        }
    }

    /// Build a pipeline configured from `config`
    pub fn from_config(config: &EditorConfig, layout: L) -> Self {
        let mut pipeline = Self::with_constraints(layout, config.constraints());
        pipeline.style = config.style();
        pipeline.history.set_capacity(config.max_edit_operations);
        pipeline.comb_text = config.comb_text;
        pipeline.update_comb_width();
        pipeline
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Code unit at `idx` as displayed (password alias applied)
    pub fn char_at(&self, idx: usize) -> Option<char> {
        self.buffer.char_at(idx)
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn history(&self) -> &OperationLog {
        &self.history
    }

    pub fn constraints(&self) -> &EditConstraints {
        &self.constraints
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    pub fn is_comb_text(&self) -> bool {
        self.comb_text
    }

    pub fn has_validator(&self) -> bool {
        self.validator.is_some()
    }

    /// Events queued since the last drain
    pub fn pending_events(&self) -> &[EditEvent] {
        &self.events
    }

    /// Drain queued events
    pub fn take_events(&mut self) -> Vec<EditEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Insert `text` at `idx` (clamped).
    ///
    /// The text may be cut short by the character limit or the size limit, in
    /// which case `TextFull` follows `TextChanged`. Returns false when nothing
    /// was inserted; a validation rejection leaves no trace at all.
    pub fn insert(&mut self, idx: usize, text: &str, record: bool) -> bool {
        let idx = idx.min(self.buffer.len());
        if text.is_empty() {
            return false;
        }

        match self.plan_insert(idx..idx, text) {
            InsertPlan::Rejected => false,
            InsertPlan::Full => {
                self.events.push(EditEvent::TextFull);
                false
            }
            InsertPlan::Accept { text, truncated } => {
                let previous = self.buffer.text();
                self.buffer.insert(idx, &text);
                if record {
                    self.history.record(EditOperation::Insert { start: idx, text });
                }
                self.finish_edit(previous, truncated);
                true
            }
        }
    }

    /// Delete up to `len` code units at `idx` and return them.
    /// Nothing happens for an empty or out-of-range request.
    pub fn delete(&mut self, idx: usize, len: usize, record: bool) -> String {
        if idx >= self.buffer.len() || len == 0 {
            return String::new();
        }

        let previous = self.buffer.text();
        let removed = self.buffer.delete(idx, len);
        if record {
            self.history.record(EditOperation::Delete {
                start: idx,
                text: removed.clone(),
            });
        }
        self.finish_edit(previous, false);
        removed
    }

    /// Delete the selected text, if any
    pub fn delete_selection(&mut self, record: bool) -> String {
        match self.selection.get() {
            Some(sel) => self.delete(sel.start, sel.len(), record),
            None => String::new(),
        }
    }

    /// Replace the selection with `new_text` as a single undo step.
    ///
    /// The replacement is checked against the text with the selection already
    /// removed, so a rejected replacement leaves the buffer untouched.
    pub fn replace_selection(&mut self, new_text: &str) -> bool {
        let Some(sel) = self.selection.get() else {
            return false;
        };

        let plan = if new_text.is_empty() {
            InsertPlan::Accept {
                text: String::new(),
                truncated: false,
            }
        } else {
            self.plan_insert(sel.range(), new_text)
        };

        match plan {
            InsertPlan::Rejected => false,
            InsertPlan::Full => {
                self.events.push(EditEvent::TextFull);
                false
            }
            InsertPlan::Accept { text, truncated } => {
                let previous = self.buffer.text();
                let removed = self.buffer.delete(sel.start, sel.len());
                self.buffer.insert(sel.start, &text);
                self.history.record(EditOperation::Replace {
                    start: sel.start,
                    removed,
                    added: text,
                });
                self.finish_edit(previous, truncated);
                true
            }
        }
    }

    /// Undo the last recorded edit
    pub fn undo(&mut self) -> bool {
        if !self.history.can_undo() {
            return false;
        }
        let previous = self.buffer.text();
        self.history.undo(&mut self.buffer);
        self.finish_edit(previous, false);
        true
    }

    /// Redo the last undone edit
    pub fn redo(&mut self) -> bool {
        if !self.history.can_redo() {
            return false;
        }
        let previous = self.buffer.text();
        self.history.redo(&mut self.buffer);
        self.finish_edit(previous, false);
        true
    }

    /// Remove all content, the selection, and the undo history
    pub fn clear(&mut self) {
        let previous = self.buffer.text();
        self.buffer.clear();
        self.history.clear();
        if self.selection.clear() {
            self.events.push(EditEvent::SelectionChanged);
        }
        self.cache.mark_dirty();
        if !previous.is_empty() {
            self.events.push(EditEvent::TextChanged { previous });
        }
    }

    /// Replace the whole content without applying limits. Drops the undo history.
    pub fn set_text(&mut self, text: &str) {
        let previous = self.buffer.text();
        self.buffer.clear();
        self.buffer.insert(0, text);
        self.history.clear();
        if self.selection.clear() {
            self.events.push(EditEvent::SelectionChanged);
        }
        self.cache.mark_dirty();
        if previous != text {
            self.events.push(EditEvent::TextChanged { previous });
        }
    }

    fn finish_edit(&mut self, previous: String, truncated: bool) {
        self.cache.mark_dirty();
        if self.selection.clear() {
            self.events.push(EditEvent::SelectionChanged);
        }
        self.events.push(EditEvent::TextChanged { previous });
        if truncated {
            self.events.push(EditEvent::TextFull);
        }
    }

    /// Run `text`, destined to replace `replaced`, through the limits
    fn plan_insert(&self, replaced: Range<usize>, text: &str) -> InsertPlan {
        let base_len = self.buffer.len() - replaced.len();
        let total = text.chars().count();

        let mut keep = self.constraints.room_for(base_len, total);
        let mut truncated = keep < total;
        if keep == 0 {
            tracing::debug!(limit = ?self.constraints.character_limit, "character limit reached");
            return InsertPlan::Full;
        }
        let mut accepted: String = text.chars().take(keep).collect();

        if self.validator.is_some() || self.constraints.size_limit.is_enabled() {
            if let Some(validator) = &self.validator {
                let candidate = self.buffer.spliced(replaced.clone(), &accepted);
                if !validator(&candidate) {
                    tracing::debug!("insert rejected by validator");
                    return InsertPlan::Rejected;
                }
            }

            let exceeding = self.count_chars_exceeding_size(replaced, &accepted);
            if exceeding == keep {
                tracing::debug!("no room left in the layout area");
                return InsertPlan::Full;
            }
            if exceeding > 0 {
                keep -= exceeding;
                accepted = accepted.chars().take(keep).collect();
                truncated = true;
            }
        }

        if truncated {
            tracing::debug!(requested = total, accepted = keep, "insert truncated");
        }
        InsertPlan::Accept {
            text: accepted,
            truncated,
        }
    }

    /// How many trailing code units of `text` must be dropped for the
    /// candidate to fit the layout area
    fn count_chars_exceeding_size(&self, replaced: Range<usize>, text: &str) -> usize {
        if !self.constraints.size_limit.is_enabled() {
            return 0;
        }

        let chars: Vec<char> = text.chars().collect();
        let fits = |keep: usize| {
            let inserted: String = chars[..keep].iter().collect();
            let candidate = self.display_candidate(replaced.clone(), &inserted);
            self.fits_area(self.layout.measure(&candidate, &self.style))
        };

        let total = chars.len();
        if fits(total) {
            return 0;
        }

        // Largest prefix that still fits; `hi` never fits
        let (mut lo, mut hi) = (0, total);
        while lo + 1 < hi {
            let mid = lo + (hi - lo) / 2;
            if fits(mid) {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        total - lo
    }

    fn display_candidate(&self, replaced: Range<usize>, inserted: &str) -> String {
        let candidate = self.buffer.spliced(replaced, inserted);
        match self.buffer.password_alias() {
            Some(alias) => std::iter::repeat(alias)
                .take(candidate.chars().count())
                .collect(),
            None => candidate,
        }
    }

    fn fits_area(&self, size: Size) -> bool {
        let limit = self.constraints.size_limit;
        (!limit.horizontal || size.width <= self.style.available_width)
            && (!limit.vertical || size.height <= self.style.visible_height())
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn selection(&self) -> Option<Selection> {
        self.selection.get()
    }

    pub fn has_selection(&self) -> bool {
        self.selection.has_selection()
    }

    /// Select `[start, end)`. See [`SelectionModel::set`] for clamping rules.
    pub fn set_selection(&mut self, start: usize, end: usize) -> bool {
        let changed = self.selection.set(start, end, self.buffer.len());
        if changed {
            self.events.push(EditEvent::SelectionChanged);
        }
        changed
    }

    pub fn select_all(&mut self) -> bool {
        let changed = self.selection.select_all(self.buffer.len());
        if changed {
            self.events.push(EditEvent::SelectionChanged);
        }
        changed
    }

    pub fn clear_selection(&mut self) -> bool {
        let changed = self.selection.clear();
        if changed {
            self.events.push(EditEvent::SelectionChanged);
        }
        changed
    }

    /// Get the selected text (empty string if no selection)
    pub fn selected_text(&self) -> String {
        self.selection
            .get()
            .map(|sel| self.buffer.slice(sel.range()))
            .unwrap_or_default()
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Install or remove the content validation hook
    pub fn set_validator(&mut self, validator: Option<Validator>) {
        self.validator = validator;
    }

    pub fn set_character_limit(&mut self, limit: Option<usize>) {
        if self.constraints.character_limit == limit {
            return;
        }
        self.history.clear();
        self.constraints.character_limit = limit;
        self.update_comb_width();
        self.cache.mark_dirty();
    }

    pub fn set_password_alias(&mut self, alias: Option<char>) {
        if self.constraints.password_alias == alias {
            return;
        }
        self.constraints.password_alias = alias;
        self.buffer.set_password_alias(alias);
        self.cache.mark_dirty();
    }

    pub fn limit_horizontal_area(&mut self, enabled: bool) {
        if self.constraints.size_limit.horizontal == enabled {
            return;
        }
        self.history.clear();
        self.constraints.size_limit.horizontal = enabled;
    }

    pub fn limit_vertical_area(&mut self, enabled: bool) {
        if self.constraints.size_limit.vertical == enabled {
            return;
        }
        self.history.clear();
        self.constraints.size_limit.vertical = enabled;
    }

    /// Resize the undo ring. Drops the recorded history.
    pub fn set_max_edit_operations(&mut self, max: usize) {
        self.history.set_capacity(max);
    }

    pub fn set_available_width(&mut self, width: f32) {
        if self.style.available_width == width {
            return;
        }
        self.history.clear();
        self.style.available_width = width;
        self.update_comb_width();
        self.cache.mark_dirty();
    }

    pub fn set_visible_line_count(&mut self, count: usize) {
        let count = count.max(1);
        if self.style.visible_line_count == count {
            return;
        }
        self.style.visible_line_count = count;
        self.cache.mark_dirty();
    }

    pub fn set_font_size(&mut self, size: f32) {
        if self.style.font_size == size {
            return;
        }
        self.style.font_size = size;
        self.cache.mark_dirty();
    }

    pub fn set_line_spacing(&mut self, spacing: f32) {
        if self.style.line_spacing == spacing {
            return;
        }
        self.style.line_spacing = spacing;
        self.cache.mark_dirty();
    }

    pub fn set_tab_width(&mut self, width: f32) {
        if self.style.tab_width == width {
            return;
        }
        self.style.tab_width = width;
        self.cache.mark_dirty();
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        if self.style.alignment == alignment {
            return;
        }
        self.style.alignment = alignment;
        self.cache.mark_dirty();
    }

    pub fn enable_multiline(&mut self, enabled: bool) {
        if self.style.multiline == enabled {
            return;
        }
        self.style.multiline = enabled;
        self.cache.mark_dirty();
    }

    pub fn enable_line_wrap(&mut self, enabled: bool) {
        if self.style.line_wrap == enabled {
            return;
        }
        self.style.line_wrap = enabled;
        self.cache.mark_dirty();
    }

    pub fn enable_comb_text(&mut self, enabled: bool) {
        if self.comb_text == enabled {
            return;
        }
        self.comb_text = enabled;
        self.update_comb_width();
        self.cache.mark_dirty();
    }

    /// Comb cells split the available width evenly across the character limit
    fn update_comb_width(&mut self) {
        self.style.comb_width = if self.comb_text {
            let width = self.style.available_width;
            Some(match self.constraints.character_limit {
                Some(limit) if limit > 0 => width / limit as f32,
                _ => width,
            })
        } else {
            None
        };
    }

    // =========================================================================
    // Layout
    // =========================================================================

    pub fn is_layout_dirty(&self) -> bool {
        self.cache.is_dirty()
    }

    /// Force the next geometry query to rebuild, e.g. after reconfiguring
    /// the layout collaborator
    pub fn invalidate_layout(&mut self) {
        self.cache.mark_dirty();
    }

    pub fn layout_engine(&self) -> &L {
        &self.layout
    }

    pub fn layout_engine_mut(&mut self) -> &mut L {
        &mut self.layout
    }

    /// Rebuild visual geometry if anything changed since the last rebuild.
    /// Returns true if it rebuilt.
    pub fn layout(&mut self) -> bool {
        if !self.cache.is_dirty() {
            return false;
        }
        let text = self.buffer.display_text();
        self.cache.layout(&mut self.layout, &text, &self.style)
    }

    pub fn pieces(&mut self) -> &[TextPiece] {
        self.layout();
        self.cache.pieces()
    }

    pub fn contents_bounding_box(&mut self) -> Rect {
        self.layout();
        self.cache.bounding_box()
    }

    pub fn char_width(&mut self, idx: usize) -> f32 {
        self.layout();
        self.cache.char_width(idx)
    }

    pub fn character_rect(&mut self, idx: usize) -> Option<Rect> {
        self.layout();
        self.cache.character_rect(idx)
    }

    pub fn character_rects_in_range(&mut self, start: usize, count: usize) -> Vec<Rect> {
        self.layout();
        self.cache.character_rects_in_range(start, count)
    }

    /// Text index under `point` (hit-testing)
    pub fn index_for_point(&mut self, point: Point) -> usize {
        self.layout();
        self.cache.index_for_point(point, &self.buffer)
    }
}
