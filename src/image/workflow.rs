//! Image dialog state machine
//!
//! ```text
//! Idle ──open──▶ AwaitingAltText ──submit──▶ Uploading | Generating
//!   ▲                 ▲     ▲                      │
//!   │                 │     └────── failure ───────┤
//!   │                 │                            ▼
//!   └──── cancel ─────┴──────── insert ◀──────── Resolved
//! ```
//!
//! The workflow never talks to a collaborator itself. A successful submit
//! returns an [`ImageJob`]; the caller runs it and feeds the outcome back
//! through [`ImageInsertionWorkflow::resolve`] with the job's request id.
//! Outcomes carrying any other id are stale and get dropped.

use super::validation::{upload_path_hint, validate_image_file, ImageFile, MAX_IMAGE_SIZE};
use super::ImageError;

/// Identifies one submission; never reused within a workflow
pub type RequestId = u64;

/// Default storage folder for uploads
pub const DEFAULT_UPLOAD_PREFIX: &str = "blog-images";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowState {
    /// Dialog closed
    Idle,
    /// Dialog open, collecting source and alt text
    AwaitingAltText,
    /// Upload in flight
    Uploading { request: RequestId },
    /// Generation in flight
    Generating { request: RequestId },
    /// URL received, insertion in progress
    Resolved { request: RequestId },
}

/// Where the image comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    UploadedFile { file_name: String },
    GeneratedFromPrompt { prompt: String },
}

/// The request behind an in-flight submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInsertionRequest {
    pub id: RequestId,
    pub source: ImageSource,
    pub alt_text: String,
    /// Set once the collaborator answers
    pub result_url: Option<String>,
}

impl ImageInsertionRequest {
    /// The `(url, alt)` pair, available only once both are present
    pub fn resolved(&self) -> Option<ResolvedImage> {
        let url = self.result_url.as_ref().filter(|url| !url.is_empty())?;
        if self.alt_text.is_empty() {
            return None;
        }
        Some(ResolvedImage {
            url: url.clone(),
            alt_text: self.alt_text.clone(),
        })
    }
}

/// What gets inserted into the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    pub url: String,
    pub alt_text: String,
}

/// Work for an external collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageJob {
    pub request: RequestId,
    pub kind: ImageJobKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageJobKind {
    Upload { file: ImageFile, path_hint: String },
    Generate { prompt: String },
}

/// Outcome of [`ImageInsertionWorkflow::resolve`]
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The image was handed to the insertion callback
    Inserted(ResolvedImage),
    /// The collaborator failed; the dialog is back to accepting input
    Failed(ImageError),
    /// Stale or duplicate response, ignored
    Discarded,
}

#[derive(Debug, Clone)]
pub struct ImageInsertionWorkflow {
    state: WorkflowState,
    alt_text: String,
    prompt: String,
    error: Option<ImageError>,
    request: Option<ImageInsertionRequest>,
    next_request_id: RequestId,
    max_image_bytes: u64,
    upload_prefix: String,
}

impl Default for ImageInsertionWorkflow {
    fn default() -> Self {
        Self::new(MAX_IMAGE_SIZE, DEFAULT_UPLOAD_PREFIX)
    }
}

impl ImageInsertionWorkflow {
    pub fn new(max_image_bytes: u64, upload_prefix: impl Into<String>) -> Self {
        Self {
            state: WorkflowState::Idle,
            alt_text: String::new(),
            prompt: String::new(),
            error: None,
            request: None,
            next_request_id: 1,
            max_image_bytes,
            upload_prefix: upload_prefix.into(),
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// Dialog is showing
    pub fn is_open(&self) -> bool {
        self.state != WorkflowState::Idle
    }

    /// A collaborator call is outstanding; the submit button is disabled
    pub fn is_busy(&self) -> bool {
        matches!(
            self.state,
            WorkflowState::Uploading { .. }
                | WorkflowState::Generating { .. }
                | WorkflowState::Resolved { .. }
        )
    }

    pub fn can_submit(&self) -> bool {
        self.state == WorkflowState::AwaitingAltText
    }

    pub fn alt_text(&self) -> &str {
        &self.alt_text
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Last error, shown inline or as a notice
    pub fn error(&self) -> Option<&ImageError> {
        self.error.as_ref()
    }

    pub fn request(&self) -> Option<&ImageInsertionRequest> {
        self.request.as_ref()
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        match self.state {
            WorkflowState::Uploading { request } | WorkflowState::Generating { request } => {
                Some(request)
            }
            _ => None,
        }
    }

    /// Open the dialog. Returns false if it was already open.
    pub fn open(&mut self) -> bool {
        if self.is_open() {
            return false;
        }
        self.state = WorkflowState::AwaitingAltText;
        self.error = None;
        true
    }

    pub fn set_alt_text(&mut self, alt_text: impl Into<String>) {
        if self.is_open() {
            self.alt_text = alt_text.into();
            if self.error == Some(ImageError::MissingAltText) {
                self.error = None;
            }
        }
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        if self.is_open() {
            self.prompt = prompt.into();
            if self.error == Some(ImageError::MissingPrompt) {
                self.error = None;
            }
        }
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Validate an upload and move to `Uploading`.
    ///
    /// On failure the state stays `AwaitingAltText` and the error is kept
    /// for display; no job is produced, so nothing reaches the uploader.
    pub fn submit_upload(&mut self, file: ImageFile) -> Result<ImageJob, ImageError> {
        self.check_can_submit()?;

        if let Err(rejection) = validate_image_file(&file, self.max_image_bytes) {
            return Err(self.fail_validation(ImageError::InvalidFile(rejection)));
        }
        let alt_text = self.required_alt_text()?;

        let id = self.take_request_id();
        let path_hint = upload_path_hint(&self.upload_prefix, id, &file.file_name);
        tracing::debug!(request = id, file = %file.file_name, %path_hint, "image upload submitted");

        self.request = Some(ImageInsertionRequest {
            id,
            source: ImageSource::UploadedFile {
                file_name: file.file_name.clone(),
            },
            alt_text,
            result_url: None,
        });
        self.state = WorkflowState::Uploading { request: id };
        self.error = None;

        Ok(ImageJob {
            request: id,
            kind: ImageJobKind::Upload { file, path_hint },
        })
    }

    /// Validate the prompt and move to `Generating`
    pub fn submit_generation(&mut self) -> Result<ImageJob, ImageError> {
        self.check_can_submit()?;

        let prompt = self.prompt.trim().to_string();
        if prompt.is_empty() {
            return Err(self.fail_validation(ImageError::MissingPrompt));
        }
        let alt_text = self.required_alt_text()?;

        let id = self.take_request_id();
        tracing::debug!(request = id, "image generation submitted");

        self.request = Some(ImageInsertionRequest {
            id,
            source: ImageSource::GeneratedFromPrompt {
                prompt: prompt.clone(),
            },
            alt_text,
            result_url: None,
        });
        self.state = WorkflowState::Generating { request: id };
        self.error = None;

        Ok(ImageJob {
            request: id,
            kind: ImageJobKind::Generate { prompt },
        })
    }

    /// Feed back a collaborator outcome.
    ///
    /// `insert` runs at most once, and only for the request currently in
    /// flight. Afterwards the dialog closes and its fields are cleared.
    pub fn resolve<F>(
        &mut self,
        request: RequestId,
        outcome: Result<String, String>,
        insert: F,
    ) -> Resolution
    where
        F: FnOnce(&ResolvedImage),
    {
        if self.in_flight() != Some(request) {
            tracing::warn!(
                request,
                state = ?self.state,
                "discarding stale image response"
            );
            return Resolution::Discarded;
        }

        let generating = matches!(self.state, WorkflowState::Generating { .. });
        let outcome = outcome.and_then(|url| {
            let url = url.trim().to_string();
            if url.is_empty() {
                Err("collaborator returned no URL".to_string())
            } else {
                Ok(url)
            }
        });

        match outcome {
            Ok(url) => {
                let resolved = self.request.as_mut().and_then(|req| {
                    req.result_url = Some(url);
                    req.resolved()
                });
                let Some(resolved) = resolved else {
                    // alt text was validated on submit, so this is unreachable in practice
                    return Resolution::Failed(self.fail_request(generating, "request lost"));
                };

                self.state = WorkflowState::Resolved { request };
                insert(&resolved);
                self.reset();
                tracing::info!(request, url = %resolved.url, "image inserted");
                Resolution::Inserted(resolved)
            }
            Err(message) => Resolution::Failed(self.fail_request(generating, &message)),
        }
    }

    /// Close the dialog, abandoning any in-flight request.
    ///
    /// Returns the abandoned request id, if any; its response will be discarded.
    pub fn cancel(&mut self) -> Option<RequestId> {
        let abandoned = self.in_flight();
        if let Some(request) = abandoned {
            tracing::debug!(request, "image request abandoned");
        }
        self.reset();
        abandoned
    }

    fn check_can_submit(&self) -> Result<(), ImageError> {
        match self.state {
            WorkflowState::Idle => Err(ImageError::NotOpen),
            WorkflowState::AwaitingAltText => Ok(()),
            _ => Err(ImageError::Busy),
        }
    }

    fn required_alt_text(&mut self) -> Result<String, ImageError> {
        let alt_text = self.alt_text.trim().to_string();
        if alt_text.is_empty() {
            return Err(self.fail_validation(ImageError::MissingAltText));
        }
        Ok(alt_text)
    }

    fn fail_validation(&mut self, error: ImageError) -> ImageError {
        tracing::debug!(%error, "image dialog validation failed");
        self.error = Some(error.clone());
        error
    }

    fn fail_request(&mut self, generating: bool, message: &str) -> ImageError {
        let error = if generating {
            ImageError::GenerationFailed(message.to_string())
        } else {
            ImageError::UploadFailed(message.to_string())
        };
        tracing::warn!(%error, "image request failed");
        self.state = WorkflowState::AwaitingAltText;
        self.request = None;
        self.error = Some(error.clone());
        error
    }

    fn take_request_id(&mut self) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    fn reset(&mut self) {
        self.state = WorkflowState::Idle;
        self.alt_text.clear();
        self.prompt.clear();
        self.error = None;
        self.request = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::FileRejection;

    fn png() -> ImageFile {
        ImageFile::new("chart.png", "image/png", vec![0u8; 128])
    }

    fn open_with_alt(alt: &str) -> ImageInsertionWorkflow {
        let mut workflow = ImageInsertionWorkflow::default();
        workflow.open();
        workflow.set_alt_text(alt);
        workflow
    }

    #[test]
    fn test_open_moves_to_awaiting() {
        let mut workflow = ImageInsertionWorkflow::default();
        assert_eq!(workflow.state(), &WorkflowState::Idle);
        assert!(workflow.open());
        assert_eq!(workflow.state(), &WorkflowState::AwaitingAltText);
        assert!(!workflow.open());
    }

    #[test]
    fn test_submit_requires_open_dialog() {
        let mut workflow = ImageInsertionWorkflow::default();
        assert_eq!(workflow.submit_upload(png()), Err(ImageError::NotOpen));
    }

    #[test]
    fn test_inputs_ignored_while_closed() {
        let mut workflow = ImageInsertionWorkflow::default();
        workflow.set_alt_text("alt");
        workflow.set_prompt("prompt");
        assert_eq!(workflow.alt_text(), "");
        assert_eq!(workflow.prompt(), "");
    }

    #[test]
    fn test_upload_missing_alt_text() {
        let mut workflow = open_with_alt("   ");
        assert_eq!(
            workflow.submit_upload(png()),
            Err(ImageError::MissingAltText)
        );
        assert_eq!(workflow.state(), &WorkflowState::AwaitingAltText);
        assert_eq!(workflow.error(), Some(&ImageError::MissingAltText));
    }

    #[test]
    fn test_upload_invalid_file() {
        let mut workflow = open_with_alt("Chart");
        let file = ImageFile::new("doc.txt", "text/plain", vec![1]);
        let err = workflow.submit_upload(file).unwrap_err();
        assert!(matches!(
            err,
            ImageError::InvalidFile(FileRejection::NotAnImage { .. })
        ));
        assert_eq!(workflow.state(), &WorkflowState::AwaitingAltText);
    }

    #[test]
    fn test_upload_respects_configured_limit() {
        let mut workflow = ImageInsertionWorkflow::new(100, "uploads");
        workflow.open();
        workflow.set_alt_text("Chart");
        let err = workflow.submit_upload(png()).unwrap_err();
        assert!(matches!(
            err,
            ImageError::InvalidFile(FileRejection::TooLarge { .. })
        ));
    }

    #[test]
    fn test_upload_produces_job() {
        let mut workflow = open_with_alt("Chart");
        let job = workflow.submit_upload(png()).unwrap();
        assert_eq!(job.request, 1);
        assert_eq!(
            job.kind,
            ImageJobKind::Upload {
                file: png(),
                path_hint: "blog-images/1-chart.png".into()
            }
        );
        assert_eq!(workflow.state(), &WorkflowState::Uploading { request: 1 });
        assert!(workflow.is_busy());
        assert_eq!(
            workflow.request().map(|r| &r.source),
            Some(&ImageSource::UploadedFile {
                file_name: "chart.png".into()
            })
        );
    }

    #[test]
    fn test_second_submit_while_busy_is_rejected() {
        let mut workflow = open_with_alt("Chart");
        workflow.submit_upload(png()).unwrap();
        assert_eq!(workflow.submit_upload(png()), Err(ImageError::Busy));
        assert_eq!(workflow.submit_generation(), Err(ImageError::Busy));
        assert_eq!(workflow.state(), &WorkflowState::Uploading { request: 1 });
    }

    #[test]
    fn test_generation_missing_prompt() {
        let mut workflow = open_with_alt("Chart");
        assert_eq!(workflow.submit_generation(), Err(ImageError::MissingPrompt));
        assert_eq!(workflow.state(), &WorkflowState::AwaitingAltText);
    }

    #[test]
    fn test_generation_missing_alt_text() {
        let mut workflow = open_with_alt("");
        workflow.set_prompt("a lighthouse at dusk");
        assert_eq!(
            workflow.submit_generation(),
            Err(ImageError::MissingAltText)
        );
    }

    #[test]
    fn test_generation_produces_job() {
        let mut workflow = open_with_alt("Lighthouse");
        workflow.set_prompt("  a lighthouse at dusk ");
        let job = workflow.submit_generation().unwrap();
        assert_eq!(
            job.kind,
            ImageJobKind::Generate {
                prompt: "a lighthouse at dusk".into()
            }
        );
        assert_eq!(workflow.state(), &WorkflowState::Generating { request: 1 });
    }

    #[test]
    fn test_resolve_inserts_once_and_resets() {
        let mut workflow = open_with_alt("Chart");
        let job = workflow.submit_upload(png()).unwrap();

        let mut inserted = Vec::new();
        let first = workflow.resolve(job.request, Ok("https://cdn/x.png".into()), |img| {
            inserted.push(img.clone())
        });
        let second = workflow.resolve(job.request, Ok("https://cdn/x.png".into()), |img| {
            inserted.push(img.clone())
        });

        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0].url, "https://cdn/x.png");
        assert_eq!(inserted[0].alt_text, "Chart");
        assert!(matches!(first, Resolution::Inserted(_)));
        assert_eq!(second, Resolution::Discarded);
        assert_eq!(workflow.state(), &WorkflowState::Idle);
        assert_eq!(workflow.alt_text(), "");
        assert!(workflow.request().is_none());
    }

    #[test]
    fn test_resolve_failure_allows_retry() {
        let mut workflow = open_with_alt("Chart");
        let job = workflow.submit_upload(png()).unwrap();

        let mut called = false;
        let result = workflow.resolve(job.request, Err("503".into()), |_| called = true);

        assert!(!called);
        assert_eq!(
            result,
            Resolution::Failed(ImageError::UploadFailed("503".into()))
        );
        assert_eq!(workflow.state(), &WorkflowState::AwaitingAltText);
        // input preserved for retry
        assert_eq!(workflow.alt_text(), "Chart");

        let retry = workflow.submit_upload(png()).unwrap();
        assert_eq!(retry.request, 2);
    }

    #[test]
    fn test_generation_failure_kind() {
        let mut workflow = open_with_alt("Chart");
        workflow.set_prompt("a chart");
        let job = workflow.submit_generation().unwrap();
        let result = workflow.resolve(job.request, Err("quota".into()), |_| {});
        assert_eq!(
            result,
            Resolution::Failed(ImageError::GenerationFailed("quota".into()))
        );
    }

    #[test]
    fn test_empty_url_counts_as_failure() {
        let mut workflow = open_with_alt("Chart");
        let job = workflow.submit_upload(png()).unwrap();
        let result = workflow.resolve(job.request, Ok("  ".into()), |_| {});
        assert!(matches!(
            result,
            Resolution::Failed(ImageError::UploadFailed(_))
        ));
    }

    #[test]
    fn test_late_response_after_cancel_is_discarded() {
        let mut workflow = open_with_alt("Chart");
        let job = workflow.submit_upload(png()).unwrap();

        assert_eq!(workflow.cancel(), Some(job.request));
        assert_eq!(workflow.state(), &WorkflowState::Idle);

        let mut called = false;
        let result = workflow.resolve(job.request, Ok("https://cdn/x.png".into()), |_| {
            called = true
        });
        assert!(!called);
        assert_eq!(result, Resolution::Discarded);
    }

    #[test]
    fn test_response_for_old_request_is_discarded() {
        let mut workflow = open_with_alt("Chart");
        let old = workflow.submit_upload(png()).unwrap();
        workflow.resolve(old.request, Err("timeout".into()), |_| {});
        let new = workflow.submit_upload(png()).unwrap();

        let result = workflow.resolve(old.request, Ok("https://cdn/old.png".into()), |_| {});
        assert_eq!(result, Resolution::Discarded);
        assert_eq!(
            workflow.state(),
            &WorkflowState::Uploading {
                request: new.request
            }
        );
    }

    #[test]
    fn test_request_resolved_requires_url_and_alt() {
        let mut request = ImageInsertionRequest {
            id: 1,
            source: ImageSource::GeneratedFromPrompt {
                prompt: "p".into(),
            },
            alt_text: "alt".into(),
            result_url: None,
        };
        assert!(request.resolved().is_none());
        request.result_url = Some("u".into());
        assert!(request.resolved().is_some());
        request.alt_text.clear();
        assert!(request.resolved().is_none());
    }
}
