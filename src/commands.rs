//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use crate::image::{ImageFile, ImageJob, ImageJobKind, RequestId};
use crate::post::PostDraft;

/// Commands returned by update functions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Re-render the surface
    Redraw,
    /// After the next render, focus the text area and place the cursor.
    /// The runtime answers with `EditorMsg::RestoreCursor`.
    RestoreCursor { position: usize },
    /// Upload an image; answered with `ImageMsg::Completed`
    UploadImage {
        request: RequestId,
        file: ImageFile,
        path_hint: String,
    },
    /// Generate an image; answered with `ImageMsg::Completed`
    GenerateImage { request: RequestId, prompt: String },
    /// Persist a post; answered with `AppMsg::SaveCompleted`
    SavePost(PostDraft),
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw | Cmd::RestoreCursor { .. } => true,
            Cmd::UploadImage { .. } | Cmd::GenerateImage { .. } => true,
            Cmd::SavePost(_) => false,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }

    /// Merge an optional follow-up into an optional command
    pub fn and(first: Option<Cmd>, second: Option<Cmd>) -> Option<Cmd> {
        match (first, second) {
            (None, None) => None,
            (Some(cmd), None) | (None, Some(cmd)) => Some(cmd),
            (Some(Cmd::Batch(mut cmds)), Some(cmd)) => {
                cmds.push(cmd);
                Some(Cmd::Batch(cmds))
            }
            (Some(a), Some(b)) => Some(Cmd::Batch(vec![a, b])),
        }
    }
}

impl From<ImageJob> for Cmd {
    fn from(job: ImageJob) -> Self {
        match job.kind {
            ImageJobKind::Upload { file, path_hint } => Cmd::UploadImage {
                request: job.request,
                file,
                path_hint,
            },
            ImageJobKind::Generate { prompt } => Cmd::GenerateImage {
                request: job.request,
                prompt,
            },
        }
    }
}
