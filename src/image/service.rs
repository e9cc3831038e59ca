//! Collaborators that turn an image request into a public URL

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use super::validation::ImageFile;

/// Stores an uploaded image and returns its public URL
pub trait ImageUploader: Send + Sync {
    fn upload(&self, file: &ImageFile, path_hint: &str) -> Result<String>;
}

/// Produces an image for a prompt, returned as a URL or data URL
pub trait ImageGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// Uploader writing into a local directory served under `public_base_url`
#[derive(Debug, Clone)]
pub struct DirectoryUploader {
    root: PathBuf,
    public_base_url: String,
}

impl DirectoryUploader {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    fn public_url(&self, path_hint: &str) -> String {
        let base = self.public_base_url.trim_end_matches('/');
        if base.is_empty() {
            path_hint.to_string()
        } else {
            format!("{}/{}", base, path_hint)
        }
    }
}

impl ImageUploader for DirectoryUploader {
    fn upload(&self, file: &ImageFile, path_hint: &str) -> Result<String> {
        if path_hint.split('/').any(|part| part == "..") {
            bail!("refusing path outside upload directory: {}", path_hint);
        }

        let dest = self.root.join(path_hint);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&dest, &file.bytes)
            .with_context(|| format!("Failed to write {}", dest.display()))?;

        tracing::info!(
            "Uploaded {} ({} bytes) to {}",
            file.file_name,
            file.bytes.len(),
            dest.display()
        );
        Ok(self.public_url(path_hint))
    }
}

/// Generator used when no generation service is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableGenerator;

impl ImageGenerator for UnavailableGenerator {
    fn generate(&self, _prompt: &str) -> Result<String> {
        bail!("no image generation service is configured")
    }
}
