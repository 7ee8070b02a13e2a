//! Gap buffer storage for the text editing core.
//!
//! Text is held as a `Vec<char>` with one contiguous unused region (the gap)
//! that slides to the edit point. Logical index `i` maps to physical index `i`
//! when `i < gap_position`, otherwise to `i + gap_size`.

use std::ops::Range;

/// Gap size of a freshly created or cleared buffer, and the amount added on
/// top of the requested length whenever the gap has to grow.
pub const GAP_GROWTH: usize = 128;

/// Gap-buffer backed text storage. One `char` is one code unit.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    /// `[pre-gap content | gap | post-gap content]`
    storage: Vec<char>,
    gap_position: usize,
    gap_size: usize,
    /// Character reported by display reads instead of the stored one
    password_alias: Option<char>,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            storage: vec!['\0'; GAP_GROWTH],
            gap_position: 0,
            gap_size: GAP_GROWTH,
            password_alias: None,
        }
    }

    /// Create a buffer holding `text`, with the gap at the end
    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.insert(0, text);
        buffer
    }

    /// Number of live code units
    pub fn len(&self) -> usize {
        self.storage.len() - self.gap_size
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Logical index where the gap currently sits
    pub fn gap_position(&self) -> usize {
        self.gap_position
    }

    /// Number of unused slots in the gap
    pub fn gap_size(&self) -> usize {
        self.gap_size
    }

    /// Physical size of the backing storage (content + gap)
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    pub fn password_alias(&self) -> Option<char> {
        self.password_alias
    }

    /// Set the alias reported by [`TextBuffer::char_at`]. Stored content is untouched.
    pub fn set_password_alias(&mut self, alias: Option<char>) {
        self.password_alias = alias;
    }

    /// Drop all content and shrink the storage back to the default gap
    pub fn clear(&mut self) {
        self.storage.clear();
        self.storage.resize(GAP_GROWTH, '\0');
        self.gap_position = 0;
        self.gap_size = GAP_GROWTH;
    }

    /// Move the gap to `idx` and make sure it can hold `length` more code units.
    ///
    /// Only the span between the old and the new gap position is moved. When
    /// the gap is too small the storage grows to `length + GAP_GROWTH` free
    /// slots and the post-gap span is shifted to the new end.
    fn adjust_gap(&mut self, idx: usize, length: usize) {
        let gap_end = self.gap_position + self.gap_size;
        if idx < self.gap_position {
            let shift = self.gap_position - idx;
            self.storage.copy_within(idx..self.gap_position, gap_end - shift);
            self.gap_position = idx;
        } else if idx > self.gap_position {
            let shift = idx - self.gap_position;
            self.storage.copy_within(gap_end..gap_end + shift, self.gap_position);
            self.gap_position = idx;
        }

        if self.gap_size < length {
            let text_length = self.len();
            let new_gap_size = length + GAP_GROWTH;
            let post_gap_len = text_length - self.gap_position;
            let old_gap_end = self.gap_position + self.gap_size;

            self.storage.resize(text_length + new_gap_size, '\0');
            self.storage.copy_within(
                old_gap_end..old_gap_end + post_gap_len,
                self.gap_position + new_gap_size,
            );
            self.gap_size = new_gap_size;
        }
    }

    /// Insert `text` at `idx` (clamped to the text length).
    /// Returns the number of code units inserted.
    pub fn insert(&mut self, idx: usize, text: &str) -> usize {
        let idx = idx.min(self.len());
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return 0;
        }

        self.adjust_gap(idx, chars.len());
        let start = self.gap_position;
        self.storage[start..start + chars.len()].copy_from_slice(&chars);
        self.gap_position += chars.len();
        self.gap_size -= chars.len();
        chars.len()
    }

    /// Remove up to `len` code units starting at `idx` and return them.
    /// An `idx` at or past the end removes nothing.
    pub fn delete(&mut self, idx: usize, len: usize) -> String {
        let text_length = self.len();
        if idx >= text_length || len == 0 {
            return String::new();
        }
        let len = len.min(text_length - idx);

        self.adjust_gap(idx + len, 0);
        let removed: String = self.storage[idx..idx + len].iter().collect();

        self.gap_position = idx;
        self.gap_size += len;
        removed
    }

    fn physical_index(&self, idx: usize) -> usize {
        if idx < self.gap_position {
            idx
        } else {
            idx + self.gap_size
        }
    }

    /// Stored code unit at `idx`, ignoring the password alias
    pub fn raw_char_at(&self, idx: usize) -> Option<char> {
        if idx >= self.len() {
            return None;
        }
        Some(self.storage[self.physical_index(idx)])
    }

    /// Code unit at `idx` as displayed: the password alias when one is set.
    /// `None` one past the end, which iterators use to detect EOF.
    pub fn char_at(&self, idx: usize) -> Option<char> {
        let ch = self.raw_char_at(idx)?;
        Some(self.password_alias.unwrap_or(ch))
    }

    /// Iterate the stored content in logical order
    pub fn chars(&self) -> impl DoubleEndedIterator<Item = char> + '_ {
        let gap_end = self.gap_position + self.gap_size;
        self.storage[..self.gap_position]
            .iter()
            .chain(self.storage[gap_end..].iter())
            .copied()
    }

    /// Full stored content
    pub fn text(&self) -> String {
        self.chars().collect()
    }

    /// Full content as displayed (password alias applied)
    pub fn display_text(&self) -> String {
        match self.password_alias {
            Some(alias) => std::iter::repeat(alias).take(self.len()).collect(),
            None => self.text(),
        }
    }

    /// Stored content in `range`, clamped to the text length
    pub fn slice(&self, range: Range<usize>) -> String {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        (start..end).filter_map(|idx| self.raw_char_at(idx)).collect()
    }

    /// Stored content with `range` (clamped) cut out and `text` put in its place.
    /// Used to build candidate strings without touching the buffer.
    pub fn spliced(&self, range: Range<usize>, text: &str) -> String {
        let len = self.len();
        let end = range.end.min(len);
        let start = range.start.min(end);

        let mut out = String::with_capacity(len + text.len());
        out.extend(self.chars().take(start));
        out.push_str(text);
        out.extend(self.chars().skip(end));
        out
    }
}
