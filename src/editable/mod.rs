//! Editable document text for the post editor.
//!
//! The document is a single markup string plus one selection. Every content
//! change goes through [`TextBuffer::replace`], which returns a fresh buffer
//! and leaves the original untouched, so a failed edit can never leave the
//! document half-modified.
//!
//! # Example
//!
//! ```
//! use postedit::editable::TextBuffer;
//!
//! let mut buffer = TextBuffer::from_text("Hello world");
//! buffer.set_selection(0, 5);
//! assert_eq!(buffer.selected_text(), "Hello");
//!
//! let next = buffer.replace(5, 5, ",").unwrap();
//! assert_eq!(next.content(), "Hello, world");
//! ```

mod buffer;
mod selection;

pub use buffer::{RangeError, TextBuffer};
pub use selection::Selection;
