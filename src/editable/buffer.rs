//! Text buffer holding the document markup and the current selection.
//!
//! All offsets are char offsets (Unicode scalar values), never byte offsets,
//! so splicing can't land inside a multi-byte character.

use std::ops::Range;

use thiserror::Error;

use super::selection::Selection;

/// Invalid offsets passed to [`TextBuffer::replace`].
///
/// Callers derive offsets from the buffer's own clamped selection, so this
/// indicates an internal bug rather than bad user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid range {start}..{end} for buffer of {len} chars")]
pub struct RangeError {
    pub start: usize,
    pub end: usize,
    pub len: usize,
}

/// Document text plus selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    content: String,
    selection: Selection,
    /// Cached char count of `content`
    len_chars: usize,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer with the cursor at the start of `text`
    pub fn from_text(text: &str) -> Self {
        Self {
            content: text.to_string(),
            selection: Selection::collapsed(0),
            len_chars: text.chars().count(),
        }
    }

    /// The full markup string
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn len_chars(&self) -> usize {
        self.len_chars
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selection_start(&self) -> usize {
        self.selection.start
    }

    pub fn selection_end(&self) -> usize {
        self.selection.end
    }

    /// Selected text (empty string if no selection)
    pub fn selected_text(&self) -> String {
        self.slice(self.selection.range())
    }

    /// Get slice of text as String (by char indices, clamped)
    pub fn slice(&self, range: Range<usize>) -> String {
        let start = range.start.min(self.len_chars);
        let end = range.end.min(self.len_chars);
        if start >= end {
            return String::new();
        }
        self.content[self.char_to_byte(start)..self.char_to_byte(end)].to_string()
    }

    /// Return a new buffer whose content is `content[..start] + text + content[end..]`.
    ///
    /// The current selection is carried over, clamped to the new length.
    pub fn replace(&self, start: usize, end: usize, text: &str) -> Result<TextBuffer, RangeError> {
        if start > end || end > self.len_chars {
            return Err(RangeError {
                start,
                end,
                len: self.len_chars,
            });
        }

        let start_byte = self.char_to_byte(start);
        let end_byte = self.char_to_byte(end);

        let mut content =
            String::with_capacity(self.content.len() - (end_byte - start_byte) + text.len());
        content.push_str(&self.content[..start_byte]);
        content.push_str(text);
        content.push_str(&self.content[end_byte..]);

        let len_chars = self.len_chars - (end - start) + text.chars().count();
        Ok(TextBuffer {
            content,
            selection: self.selection.clamp_to(len_chars),
            len_chars,
        })
    }

    /// Clamp to `[0, len]` and order the bounds. Never fails.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        self.selection = Selection::clamped(start, end, self.len_chars);
    }

    /// Collapse the selection to a single cursor position (clamped)
    pub fn set_cursor(&mut self, pos: usize) {
        self.set_selection(pos, pos);
    }

    /// Replace everything, as when the text area reports a keystroke
    pub fn set_content(&mut self, text: &str) {
        let len = self.len_chars;
        // 0..len is always in range
        if let Ok(next) = self.replace(0, len, text) {
            *self = next;
        }
    }

    /// Convert char offset to byte offset
    fn char_to_byte(&self, char_offset: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_offset)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }
}
