//! Image insertion for the post editor
//!
//! The dialog collects an image source (an uploaded file or a generation
//! prompt) plus required alt text, hands the work to an external
//! collaborator and inserts the resulting `<img>` into the document.
//!
//! - [`validation`]: type/size checks on uploads
//! - [`workflow`]: the dialog state machine
//! - [`service`]: collaborator traits and the shipped implementations

pub mod service;
pub mod validation;
pub mod workflow;

use thiserror::Error;

pub use service::{DirectoryUploader, ImageGenerator, ImageUploader, UnavailableGenerator};
pub use validation::{FileRejection, ImageFile, MAX_IMAGE_SIZE};
pub use workflow::{
    ImageInsertionRequest, ImageInsertionWorkflow, ImageJob, ImageJobKind, ImageSource,
    RequestId, Resolution, ResolvedImage, WorkflowState,
};

/// Errors reported by the image dialog.
///
/// None of these leave the dialog: validation errors are shown next to the
/// offending input, collaborator failures as a dismissible notice.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImageError {
    #[error("invalid file: {0}")]
    InvalidFile(FileRejection),
    #[error("alt text is required")]
    MissingAltText,
    #[error("a prompt is required to generate an image")]
    MissingPrompt,
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("image generation failed: {0}")]
    GenerationFailed(String),
    #[error("an image request is already in progress")]
    Busy,
    #[error("the image dialog is not open")]
    NotOpen,
}

impl ImageError {
    /// Local input problems, as opposed to collaborator failures
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ImageError::InvalidFile(_) | ImageError::MissingAltText | ImageError::MissingPrompt
        )
    }
}

/// Render the `<img>` tag for a resolved image.
///
/// Attribute values get `&` and `"` escaped so a URL or alt text can't break
/// out of its attribute.
pub fn img_tag(image: &ResolvedImage) -> String {
    format!(
        "<img src=\"{}\" alt=\"{}\" />",
        escape_attribute(&image.url),
        escape_attribute(&image.alt_text)
    )
}

fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
