//! Monospace layout collaborator.
//!
//! Every code unit advances by the same fraction of the font size, tabs jump
//! to the next tab stop, and line breaks take no horizontal space. Good
//! enough for terminal-style fields and for exercising the editing core
//! without a shaping engine.

use super::{Rect, Size, TextLayout, TextPiece, TextStyle};

/// Advance of one code unit relative to the font size
const DEFAULT_ADVANCE_RATIO: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPitchLayout {
    advance_ratio: f32,
}

impl Default for FixedPitchLayout {
    fn default() -> Self {
        Self::new()
    }
}

/// One visual line: first index, per-unit advances, total width
struct Line {
    start: usize,
    advances: Vec<f32>,
    width: f32,
}

impl FixedPitchLayout {
    pub fn new() -> Self {
        Self {
            advance_ratio: DEFAULT_ADVANCE_RATIO,
        }
    }

    /// Use `ratio * font_size` as the advance of every code unit
    pub fn with_advance_ratio(ratio: f32) -> Self {
        Self {
            advance_ratio: ratio,
        }
    }

    fn advance(&self, ch: char, x: f32, style: &TextStyle) -> f32 {
        match (ch, style.comb_width) {
            ('\n' | '\r', _) => 0.0,
            (_, Some(cell)) => cell,
            ('\t', None) if style.tab_width > 0.0 => style.tab_width - (x % style.tab_width),
            _ => style.font_size * self.advance_ratio,
        }
    }

    fn break_lines(&self, text: &str, style: &TextStyle) -> Vec<Line> {
        let wrap_width = style.wrap_width();
        let mut lines = Vec::new();
        let mut current = Line {
            start: 0,
            advances: Vec::new(),
            width: 0.0,
        };

        for (idx, ch) in text.chars().enumerate() {
            let advance = self.advance(ch, current.width, style);
            if style.line_wrap
                && !current.advances.is_empty()
                && current.width + advance > wrap_width
            {
                let next = Line {
                    start: idx,
                    advances: Vec::new(),
                    width: 0.0,
                };
                lines.push(std::mem::replace(&mut current, next));
            }

            // Re-measure: tab advances depend on the line position
            let advance = self.advance(ch, current.width, style);
            current.advances.push(advance);
            current.width += advance;

            if ch == '\n' && style.multiline {
                let next = Line {
                    start: idx + 1,
                    advances: Vec::new(),
                    width: 0.0,
                };
                lines.push(std::mem::replace(&mut current, next));
            }
        }

        if !current.advances.is_empty() || lines.is_empty() {
            lines.push(current);
        }
        lines
    }
}

impl TextLayout for FixedPitchLayout {
    fn measure(&self, text: &str, style: &TextStyle) -> Size {
        let lines = self.break_lines(text, style);
        let width = lines.iter().map(|line| line.width).fold(0.0, f32::max);
        Size::new(width, lines.len() as f32 * style.line_spacing)
    }

    fn rebuild_layout(&mut self, text: &str, style: &TextStyle) -> Vec<TextPiece> {
        self.break_lines(text, style)
            .into_iter()
            .enumerate()
            .filter(|(_, line)| !line.advances.is_empty())
            .map(|(row, line)| TextPiece {
                start: line.start,
                len: line.advances.len(),
                bounds: Rect::new(
                    0.0,
                    row as f32 * style.line_spacing,
                    line.width,
                    style.line_spacing,
                ),
                advances: line.advances,
            })
            .collect()
    }
}
