//! Collaborators the runtime calls on behalf of the editor

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::EditorConfig;
use crate::image::{DirectoryUploader, ImageGenerator, ImageUploader, UnavailableGenerator};
use crate::post::{JsonPostStore, PostStore};

/// Upload, generation and content-store backends
#[derive(Clone)]
pub struct Services {
    pub uploader: Arc<dyn ImageUploader>,
    pub generator: Arc<dyn ImageGenerator>,
    pub store: Arc<dyn PostStore>,
}

impl Services {
    pub fn new(
        uploader: Arc<dyn ImageUploader>,
        generator: Arc<dyn ImageGenerator>,
        store: Arc<dyn PostStore>,
    ) -> Self {
        Self {
            uploader,
            generator,
            store,
        }
    }

    /// Filesystem-backed services from configuration
    ///
    /// Image generation has no local backend and always reports a failure.
    pub fn from_config(config: &EditorConfig) -> Result<Self> {
        let upload_dir = config.resolved_upload_dir();
        std::fs::create_dir_all(&upload_dir).with_context(|| {
            format!("Failed to create upload directory {}", upload_dir.display())
        })?;

        tracing::debug!(
            upload_dir = %upload_dir.display(),
            posts_dir = %config.resolved_posts_dir().display(),
            "services configured"
        );

        Ok(Self::new(
            Arc::new(DirectoryUploader::new(
                upload_dir,
                config.public_base_url.clone(),
            )),
            Arc::new(UnavailableGenerator),
            Arc::new(JsonPostStore::new(config.resolved_posts_dir())),
        ))
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}
