//! Layout invalidation and geometry queries.
//!
//! The editing core does not break lines or measure glyphs itself. It talks
//! to a [`TextLayout`] collaborator and keeps the collaborator's output in a
//! [`LayoutCache`]. Every structural edit or style change marks the cache
//! dirty; the next geometry query rebuilds it.

mod fixed_pitch;
mod geometry;

use serde::{Deserialize, Serialize};

use crate::editable::TextBuffer;

pub use fixed_pitch::FixedPitchLayout;
pub use geometry::{Point, Rect, Size};

/// Layout width used when no wrapping width applies
pub const PAGE_WIDTH_MAX: f32 = 65535.0;

/// Horizontal alignment of laid out lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Everything the layout collaborator needs to shape the text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    /// Distance between line tops
    pub line_spacing: f32,
    /// Tab stop interval in layout units
    pub tab_width: f32,
    pub alignment: Alignment,
    /// Newlines start a new line (otherwise they are laid out inline)
    pub multiline: bool,
    /// Wrap at `available_width`
    pub line_wrap: bool,
    pub available_width: f32,
    /// Lines that fit the visible area, at least 1
    pub visible_line_count: usize,
    /// Fixed cell width per character when comb text is on
    pub comb_width: Option<f32>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            line_spacing: 10.0,
            tab_width: 36.0,
            alignment: Alignment::Left,
            multiline: false,
            line_wrap: false,
            available_width: PAGE_WIDTH_MAX,
            visible_line_count: 1,
            comb_width: None,
        }
    }
}

impl TextStyle {
    /// Width lines are broken at
    pub fn wrap_width(&self) -> f32 {
        if self.line_wrap {
            self.available_width
        } else {
            PAGE_WIDTH_MAX
        }
    }

    /// Height of the visible area
    pub fn visible_height(&self) -> f32 {
        self.line_spacing * self.visible_line_count as f32
    }
}

/// A run of consecutive code units laid out on one visual line.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPiece {
    /// Index of the first code unit
    pub start: usize,
    /// Number of code units
    pub len: usize,
    pub bounds: Rect,
    /// Horizontal advance of each code unit, `len` entries
    pub advances: Vec<f32>,
}

impl TextPiece {
    /// One past the last code unit
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn contains_index(&self, idx: usize) -> bool {
        idx >= self.start && idx < self.end()
    }

    /// Rect of every code unit, left to right
    pub fn char_rects(&self) -> Vec<Rect> {
        let mut x = self.bounds.x;
        self.advances
            .iter()
            .map(|advance| {
                let rect = Rect::new(x, self.bounds.y, *advance, self.bounds.height);
                x += advance;
                rect
            })
            .collect()
    }
}

/// The line-breaking / measurement collaborator.
pub trait TextLayout {
    /// Extent of `text` laid out with `style`
    fn measure(&self, text: &str, style: &TextStyle) -> Size;

    /// Break `text` into positioned pieces, in text order, with piece
    /// `start` offsets relative to the beginning of `text`
    fn rebuild_layout(&mut self, text: &str, style: &TextStyle) -> Vec<TextPiece>;
}

/// Cached visual geometry plus the dirty flag guarding it.
#[derive(Debug, Clone, Default)]
pub struct LayoutCache {
    dirty: bool,
    pieces: Vec<TextPiece>,
    char_widths: Vec<f32>,
    bounding_box: Rect,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn pieces(&self) -> &[TextPiece] {
        &self.pieces
    }

    pub fn bounding_box(&self) -> Rect {
        self.bounding_box
    }

    /// Rebuild the cached geometry if dirty. Returns true if it rebuilt.
    pub fn layout<L: TextLayout + ?Sized>(
        &mut self,
        layout: &mut L,
        text: &str,
        style: &TextStyle,
    ) -> bool {
        if !self.dirty {
            return false;
        }
        self.dirty = false;

        self.pieces.clear();
        self.char_widths.clear();
        self.bounding_box = Rect::default();

        if text.is_empty() {
            return true;
        }

        self.pieces = layout.rebuild_layout(text, style);
        let Some(first) = self.pieces.first() else {
            return true;
        };

        let mut bounds = first.bounds;
        for piece in &self.pieces {
            bounds = bounds.union(&piece.bounds);
            self.char_widths.extend_from_slice(&piece.advances);
        }

        let delta = if bounds.width < style.available_width {
            match style.alignment {
                Alignment::Left => 0.0,
                Alignment::Center => (style.available_width - bounds.width) / 2.0,
                Alignment::Right => style.available_width - bounds.width,
            }
        } else {
            0.0
        };
        if delta != 0.0 {
            let offset = delta - bounds.x;
            for piece in &mut self.pieces {
                piece.bounds.offset(offset, 0.0);
            }
            bounds.offset(offset, 0.0);
        }

        // The last line only needs the glyph height, not the full spacing
        bounds.height -= style.line_spacing - style.font_size;
        if let Some(last) = self.pieces.last_mut() {
            last.bounds.height = style.font_size;
        }
        self.bounding_box = bounds;

        tracing::trace!(pieces = self.pieces.len(), "layout rebuilt");
        true
    }

    /// Advance of the code unit at `idx`, 0 when out of range
    pub fn char_width(&self, idx: usize) -> f32 {
        self.char_widths.get(idx).copied().unwrap_or(0.0)
    }

    fn piece_for_index(&self, idx: usize) -> Option<&TextPiece> {
        self.pieces.iter().find(|piece| piece.contains_index(idx))
    }

    /// Rect of the code unit at `idx`
    pub fn character_rect(&self, idx: usize) -> Option<Rect> {
        let piece = self.piece_for_index(idx)?;
        piece.char_rects().get(idx - piece.start).copied()
    }

    /// One rect per piece covering `[start, start + count)`
    pub fn character_rects_in_range(&self, start: usize, count: usize) -> Vec<Rect> {
        if count == 0 {
            return Vec::new();
        }
        let last = start.saturating_add(count - 1);

        let mut rects = Vec::new();
        for piece in &self.pieces {
            if piece.end() <= start || piece.start > last || piece.len == 0 {
                continue;
            }
            let chars = piece.char_rects();
            let from = start.max(piece.start) - piece.start;
            let to = last.min(piece.end() - 1) - piece.start;
            if let (Some(a), Some(b)) = (chars.get(from), chars.get(to)) {
                rects.push(a.union(b));
            }
        }
        rects
    }

    /// Text index closest to `point`.
    ///
    /// Inside a character → that character. Below every line → end of text.
    /// Left of a line → its first index; right of it → its end, stopping
    /// before a trailing line break. A `\r\n` pair resolves to the `\r`.
    pub fn index_for_point(&self, point: Point, buffer: &TextBuffer) -> usize {
        let text_len = buffer.len();
        let on_line =
            |piece: &TextPiece| piece.bounds.y <= point.y && point.y < piece.bounds.bottom();

        let Some(first) = self.pieces.iter().position(on_line) else {
            return text_len;
        };
        let last = self.pieces[first..]
            .iter()
            .position(|piece| !on_line(piece))
            .map_or(self.pieces.len() - 1, |offset| first + offset - 1);

        for piece in &self.pieces[first..=last] {
            if !piece.bounds.contains(point) {
                continue;
            }
            for (i, rect) in piece.char_rects().iter().enumerate() {
                if rect.contains(point) {
                    return Self::snap_line_break(piece.start + i, buffer);
                }
            }
        }

        let line_start = &self.pieces[first];
        if point.x < line_start.bounds.x {
            return line_start.start;
        }

        let line_end = self.pieces[last].end().min(text_len);
        match buffer.raw_char_at(line_end.saturating_sub(1)) {
            Some('\n') | Some('\r') if line_end > line_start.start => {
                Self::snap_line_break(line_end - 1, buffer)
            }
            _ => line_end,
        }
    }

    fn snap_line_break(pos: usize, buffer: &TextBuffer) -> usize {
        if pos >= buffer.len() {
            return buffer.len();
        }
        if buffer.raw_char_at(pos) == Some('\n')
            && pos > 0
            && buffer.raw_char_at(pos - 1) == Some('\r')
        {
            return pos - 1;
        }
        pos
    }
}
