//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging
//! selection, cursor-restore and image workflow transitions.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=buffer=debug,message=debug` - scoped filtering
//! - `RUST_LOG=postedit::update=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/postedit/logs/postedit.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config_paths::LOG_FILE_PREFIX;
use crate::editable::Selection;
use crate::model::EditorSurface;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG and defaults to `warn`. File logging
/// writes to the config logs directory with daily rotation; if that directory
/// can't be created only the console layer is installed.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console goes to stderr so stdout stays clean for piped output
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of buffer state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferSnapshot {
    pub len_chars: usize,
    pub selection: Selection,
    pub revision: u64,
    pub pending_cursor: Option<usize>,
}

impl BufferSnapshot {
    pub fn from_surface(surface: &EditorSurface) -> Self {
        Self {
            len_chars: surface.buffer.len_chars(),
            selection: surface.buffer.selection(),
            revision: surface.revision,
            pending_cursor: surface.ui.pending_cursor,
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &BufferSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.revision != other.revision {
            changes.push(format!(
                "rev {} → {} ({} → {} chars)",
                self.revision, other.revision, self.len_chars, other.len_chars
            ));
        }
        if self.selection != other.selection {
            changes.push(format!(
                "selection [{},{}) → [{},{})",
                self.selection.start,
                self.selection.end,
                other.selection.start,
                other.selection.end
            ));
        }
        if self.pending_cursor != other.pending_cursor {
            match other.pending_cursor {
                Some(pos) => changes.push(format!("cursor restore pending at {}", pos)),
                None => changes.push("cursor restore cleared".to_string()),
            }
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
