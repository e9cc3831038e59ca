//! Selection type for the text buffer.

use std::ops::Range;

/// A selection range in char offsets. `start <= end` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Create a selection, swapping the bounds if they arrive reversed
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Create a collapsed selection (cursor with no selection)
    pub const fn collapsed(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Clamp both bounds to `[0, len]`, then order them.
    pub fn clamped(start: usize, end: usize, len: usize) -> Self {
        Self::new(start.min(len), end.min(len))
    }

    /// Check if selection is empty (start == end)
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of chars covered
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Re-clamp against a (possibly shorter) buffer length
    pub fn clamp_to(&self, len: usize) -> Self {
        Self::clamped(self.start, self.end, len)
    }

    /// Adjust for `count` chars inserted at `at` elsewhere in the buffer.
    ///
    /// An insertion at or before `start` moves the whole range; one strictly
    /// inside it grows the range.
    pub fn after_insert(&self, at: usize, count: usize) -> Self {
        if at <= self.start {
            Self::new(self.start + count, self.end + count)
        } else if at < self.end {
            Self::new(self.start, self.end + count)
        } else {
            *self
        }
    }

    /// Check if a position is within this selection (end exclusive)
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }
}
