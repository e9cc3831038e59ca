//! Editor model - the complete state of one editor surface
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod ui;

use std::collections::VecDeque;

pub use ui::{PromptState, TransientMessage, UiState};

use crate::config::EditorConfig;
use crate::editable::TextBuffer;
use crate::image::ImageInsertionWorkflow;
use crate::toolbar::ToolbarAction;

/// The editor surface: document, UI state and the image dialog.
///
/// Nothing outside `update` mutates the buffer.
#[derive(Debug, Clone)]
pub struct EditorSurface {
    /// The document being edited
    pub buffer: TextBuffer,
    /// UI state (prompt, notices, focus)
    pub ui: UiState,
    /// Image insertion dialog
    pub image: ImageInsertionWorkflow,
    /// Editor configuration
    pub config: EditorConfig,
    /// Toolbar actions received while a prompt was open, applied in order
    /// once it closes
    pub queued_actions: VecDeque<ToolbarAction>,
    /// Bumped on every content change
    pub revision: u64,
}

impl EditorSurface {
    /// Mount a surface with initial content (possibly empty)
    pub fn new(initial_content: &str, config: EditorConfig) -> Self {
        let image =
            ImageInsertionWorkflow::new(config.max_image_bytes, config.upload_prefix.clone());
        Self {
            buffer: TextBuffer::from_text(initial_content),
            ui: UiState::new(),
            image,
            config,
            queued_actions: VecDeque::new(),
            revision: 0,
        }
    }

    /// Mount with default configuration
    pub fn with_text(initial_content: &str) -> Self {
        Self::new(initial_content, EditorConfig::default())
    }

    /// Current markup, as handed to the content store
    pub fn content(&self) -> &str {
        self.buffer.content()
    }

    /// Replace the buffer after a successful edit
    pub(crate) fn commit(&mut self, buffer: TextBuffer) {
        self.buffer = buffer;
        self.revision += 1;
    }

    /// Check invariants in debug builds
    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self, context: &str) {
        let sel = self.buffer.selection();
        debug_assert!(
            sel.start <= sel.end && sel.end <= self.buffer.len_chars(),
            "[{}] selection {:?} out of bounds for {} chars",
            context,
            sel,
            self.buffer.len_chars()
        );
        debug_assert!(
            self.image.is_open() || self.image.request().is_none(),
            "[{}] image request outlived its dialog",
            context
        );
    }
}
