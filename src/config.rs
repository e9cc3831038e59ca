//! Editor configuration persistence
//!
//! Stores user preferences in `~/.config/postedit/config.yaml`

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::image::validation::MAX_IMAGE_SIZE;
use crate::image::workflow::DEFAULT_UPLOAD_PREFIX;

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Largest accepted image upload in bytes
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,

    /// Storage folder prefix for uploaded images
    #[serde(default = "default_upload_prefix")]
    pub upload_prefix: String,

    /// Local directory for the directory uploader (None = config dir `uploads/`)
    #[serde(default)]
    pub upload_dir: Option<PathBuf>,

    /// Base URL that `upload_dir` is served under
    #[serde(default)]
    pub public_base_url: String,

    /// Directory for the JSON post store (None = config dir `posts/`)
    #[serde(default)]
    pub posts_dir: Option<PathBuf>,

    /// Upper bound for a single upload or generation call
    #[serde(default = "default_collaborator_timeout_secs")]
    pub collaborator_timeout_secs: u64,

    /// How long failure notices stay visible
    #[serde(default = "default_notice_duration_ms")]
    pub notice_duration_ms: u64,

    /// Length of derived post excerpts, in chars
    #[serde(default = "default_excerpt_length")]
    pub excerpt_length: usize,
}

fn default_max_image_bytes() -> u64 {
    MAX_IMAGE_SIZE
}

fn default_upload_prefix() -> String {
    DEFAULT_UPLOAD_PREFIX.to_string()
}

fn default_collaborator_timeout_secs() -> u64 {
    30
}

fn default_notice_duration_ms() -> u64 {
    4000
}

fn default_excerpt_length() -> usize {
    160
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: default_max_image_bytes(),
            upload_prefix: default_upload_prefix(),
            upload_dir: None,
            public_base_url: String::new(),
            posts_dir: None,
            collaborator_timeout_secs: default_collaborator_timeout_secs(),
            notice_duration_ms: default_notice_duration_ms(),
            excerpt_length: default_excerpt_length(),
        }
    }
}

impl EditorConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn collaborator_timeout(&self) -> Duration {
        Duration::from_secs(self.collaborator_timeout_secs)
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_duration_ms)
    }

    /// Effective upload directory
    pub fn resolved_upload_dir(&self) -> PathBuf {
        self.upload_dir
            .clone()
            .or_else(crate::config_paths::uploads_dir)
            .unwrap_or_else(|| PathBuf::from("uploads"))
    }

    /// Effective posts directory
    pub fn resolved_posts_dir(&self) -> PathBuf {
        self.posts_dir
            .clone()
            .or_else(crate::config_paths::posts_dir)
            .unwrap_or_else(|| PathBuf::from("posts"))
    }
}
