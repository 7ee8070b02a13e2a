//! Selection model for the text editing core.
//!
//! A selection is a half-open `[start, end)` range over logical buffer
//! indices. It knows nothing about where the gap sits.

use std::ops::Range;

/// A non-empty half-open range of code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Number of selected code units
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Check if an index is within this selection (end is exclusive)
    pub fn contains(&self, idx: usize) -> bool {
        idx >= self.start && idx < self.end
    }
}

/// Optional selection. An empty range is always stored as "no selection".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionModel {
    current: Option<Selection>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<Selection> {
        self.current
    }

    pub fn has_selection(&self) -> bool {
        self.current.is_some()
    }

    /// Number of selected code units
    pub fn len(&self) -> usize {
        self.current.map_or(0, |sel| sel.len())
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    pub fn contains(&self, idx: usize) -> bool {
        self.current.is_some_and(|sel| sel.contains(idx))
    }

    /// Selected range, or an empty range at 0 when nothing is selected
    pub fn range(&self) -> Range<usize> {
        self.current.map_or(0..0, |sel| sel.range())
    }

    /// Set the selection to `[start, end)` over a text of `text_len` code units.
    ///
    /// Equal bounds clear the selection. A `start` past the end of the text
    /// rejects the whole call. `end` is clamped to `text_len`, and a reversed
    /// pair is swapped. Returns true if the selection changed.
    pub fn set(&mut self, start: usize, end: usize, text_len: usize) -> bool {
        if start == end {
            return self.clear();
        }
        if start > text_len {
            return false;
        }

        let end = end.min(text_len);
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        let next = (start != end).then_some(Selection { start, end });

        let changed = next != self.current;
        self.current = next;
        changed
    }

    /// Select `[0, text_len)`. No-op on an empty text.
    pub fn select_all(&mut self, text_len: usize) -> bool {
        if text_len == 0 {
            return false;
        }
        self.set(0, text_len, text_len)
    }

    /// Returns true if a selection was active
    pub fn clear(&mut self) -> bool {
        self.current.take().is_some()
    }
}
