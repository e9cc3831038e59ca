//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::editable::Selection;
use crate::image::{ImageFile, RequestId};
use crate::toolbar::ToolbarAction;

/// Text-area messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMsg {
    /// The text area changed; carries its full content and selection
    Input { text: String, selection: Selection },
    /// Selection moved without a content change (click, arrow keys)
    SetSelection { start: usize, end: usize },
    /// Deferred cursor placement after a toolbar edit has been rendered
    RestoreCursor { position: usize },
    /// Text area lost focus
    Blur,
}

/// Prompt modal messages (link URL, text color)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptMsg {
    /// Replace the prompt input
    SetInput(String),
    /// Apply the pending action with the current input
    Confirm,
    /// Close without editing
    Cancel,
}

/// Image dialog messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageMsg {
    OpenDialog,
    /// Close the dialog, abandoning any in-flight request
    CloseDialog,
    SetAltText(String),
    SetPrompt(String),
    /// Validate and upload a picked file
    SubmitUpload(ImageFile),
    /// Validate the prompt and request a generated image
    SubmitGeneration,
    /// A collaborator finished (URL on success, message on failure)
    Completed {
        request: RequestId,
        result: Result<String, String>,
    },
    /// Hide the current dialog error / notice
    DismissError,
}

/// Application-level messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMsg {
    /// Hand the current content to the content store
    SavePost {
        title: String,
        excerpt: Option<String>,
    },
    /// Content store finished (saved location on success)
    SaveCompleted(Result<String, String>),
    /// Periodic tick, expires transient notices
    Tick,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    Editor(EditorMsg),
    Toolbar(ToolbarAction),
    Prompt(PromptMsg),
    Image(ImageMsg),
    App(AppMsg),
}
