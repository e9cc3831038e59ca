use std::time::{Duration, Instant};

use crate::editable::Selection;
use crate::toolbar::PromptKind;

// ============================================================================
// Prompt Modal
// ============================================================================

/// Open prompt for a toolbar action that needs a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptState {
    pub kind: PromptKind,
    /// Current text in the prompt input
    pub input: String,
    /// Selection at the moment the action was invoked
    pub selection: Selection,
}

impl PromptState {
    pub fn new(kind: PromptKind, selection: Selection) -> Self {
        Self {
            kind,
            input: String::new(),
            selection,
        }
    }

    pub fn message(&self) -> &'static str {
        self.kind.message()
    }
}

// ============================================================================
// Notices
// ============================================================================

/// A notice with auto-expiry
#[derive(Debug, Clone)]
pub struct TransientMessage {
    /// The message text
    pub text: String,
    /// When this message expires
    pub expires_at: Instant,
}

impl TransientMessage {
    /// Create a new transient message with the given duration
    pub fn new(text: impl Into<String>, duration: Duration) -> Self {
        Self {
            text: text.into(),
            expires_at: Instant::now() + duration,
        }
    }

    /// Check if this message has expired
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

// ============================================================================
// UI State
// ============================================================================

/// UI state - prompt modal, notices, focus and pending cursor placement
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently open prompt (if any)
    pub active_prompt: Option<PromptState>,
    /// Dismissible notice (collaborator failures, save results)
    pub notice: Option<TransientMessage>,
    /// Whether the text area has keyboard focus
    pub focused: bool,
    /// Cursor position waiting to be applied after the next render
    pub pending_cursor: Option<usize>,
    /// Whether a save is in flight
    pub is_saving: bool,
    /// Location reported by the last successful save
    pub last_saved: Option<String>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a prompt is currently open
    pub fn has_prompt(&self) -> bool {
        self.active_prompt.is_some()
    }

    pub fn open_prompt(&mut self, state: PromptState) {
        self.active_prompt = Some(state);
    }

    /// Close and return the active prompt
    pub fn take_prompt(&mut self) -> Option<PromptState> {
        self.active_prompt.take()
    }

    /// Show a notice for `duration`
    pub fn notify(&mut self, text: impl Into<String>, duration: Duration) {
        self.notice = Some(TransientMessage::new(text, duration));
    }

    /// Current notice text, if not expired
    pub fn notice_text(&self) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|notice| !notice.is_expired())
            .map(|notice| notice.text.as_str())
    }

    /// Drop an expired notice. Returns true if one was removed.
    pub fn expire_notice(&mut self) -> bool {
        if self.notice.as_ref().is_some_and(TransientMessage::is_expired) {
            self.notice = None;
            true
        } else {
            false
        }
    }
}
