//! Centralized configuration paths for postedit
//!
//! All config files live under:
//! - Unix/macOS: `~/.config/postedit/`
//! - Windows: `%APPDATA%\postedit\`
//!
//! This module is the single source of truth for config paths.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "postedit";

/// Log file name prefix; daily rotation appends `.YYYY-MM-DD`
pub const LOG_FILE_PREFIX: &str = "postedit.log";

/// Base config directory for postedit
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/postedit`
///   - Else: `~/.config/postedit`
///
/// Windows:
///   - `%APPDATA%\postedit`
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `~/.config/postedit/config.yaml`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// `~/.config/postedit/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// `~/.config/postedit/uploads/`, default target of the local uploader
pub fn uploads_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("uploads"))
}

/// `~/.config/postedit/posts/`, default target of the JSON post store
pub fn posts_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("posts"))
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Ensure the base config dir exists, returning it
pub fn ensure_config_dir() -> Result<PathBuf, String> {
    let dir = config_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Ensure logs dir exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let config = ensure_config_dir()?;
    let logs = config.join("logs");
    ensure_dir(&logs)?;
    Ok(logs)
}
