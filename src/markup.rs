//! Markup insertion by string splicing.
//!
//! Tags are spliced into the raw markup at char offsets. Nothing checks that
//! the result is well-formed: wrapping part of an existing element produces
//! overlapping tags, exactly as typing them would.

use crate::editable::{RangeError, TextBuffer};

/// Separator placed before and after every inserted block
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// A single markup edit, built and consumed within one toolbar action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupOperation {
    /// Wrap the selection (or the placeholder when nothing is selected)
    WrapSelection {
        prefix: String,
        suffix: String,
        placeholder: String,
    },
    /// Insert a block at the selection start, padded by blank lines
    InsertBlock { block: String },
}

impl MarkupOperation {
    pub fn wrap(
        prefix: impl Into<String>,
        suffix: impl Into<String>,
        placeholder: impl Into<String>,
    ) -> Self {
        MarkupOperation::WrapSelection {
            prefix: prefix.into(),
            suffix: suffix.into(),
            placeholder: placeholder.into(),
        }
    }

    pub fn block(block: impl Into<String>) -> Self {
        MarkupOperation::InsertBlock {
            block: block.into(),
        }
    }

    /// Apply this operation to `buffer`, producing a new buffer and cursor
    pub fn apply(&self, buffer: &TextBuffer) -> Result<MarkupEdit, RangeError> {
        match self {
            MarkupOperation::WrapSelection {
                prefix,
                suffix,
                placeholder,
            } => apply_wrap(buffer, prefix, suffix, placeholder),
            MarkupOperation::InsertBlock { block } => apply_block(buffer, block),
        }
    }
}

/// Result of a markup edit: the new buffer and where the cursor belongs.
///
/// The buffer's selection is already collapsed at `cursor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupEdit {
    pub buffer: TextBuffer,
    pub cursor: usize,
}

/// Wrap the selection in `prefix`/`suffix`.
///
/// The cursor lands right after the wrapped text, before `suffix`.
pub fn apply_wrap(
    buffer: &TextBuffer,
    prefix: &str,
    suffix: &str,
    placeholder: &str,
) -> Result<MarkupEdit, RangeError> {
    let selection = buffer.selection();
    let selected = buffer.selected_text();
    let insert_text = if selected.is_empty() {
        placeholder
    } else {
        selected.as_str()
    };

    let mut replacement = String::with_capacity(prefix.len() + insert_text.len() + suffix.len());
    replacement.push_str(prefix);
    replacement.push_str(insert_text);
    replacement.push_str(suffix);

    let mut next = buffer.replace(selection.start, selection.end, &replacement)?;
    let cursor = selection.start + prefix.chars().count() + insert_text.chars().count();
    next.set_cursor(cursor);

    Ok(MarkupEdit {
        buffer: next,
        cursor,
    })
}

/// Insert `block` surrounded by blank lines at the selection start.
///
/// Selected text is kept, not replaced: the block goes in front of it.
pub fn apply_block(buffer: &TextBuffer, block: &str) -> Result<MarkupEdit, RangeError> {
    let start = buffer.selection_start();

    let mut insertion = String::with_capacity(block.len() + BLOCK_SEPARATOR.len() * 2);
    insertion.push_str(BLOCK_SEPARATOR);
    insertion.push_str(block);
    insertion.push_str(BLOCK_SEPARATOR);

    let mut next = buffer.replace(start, start, &insertion)?;
    let cursor = start + block.chars().count() + BLOCK_SEPARATOR.len() * 2;
    next.set_cursor(cursor);

    Ok(MarkupEdit {
        buffer: next,
        cursor,
    })
}
