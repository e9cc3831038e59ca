//! postedit - rich-text blog post editor core
//!
//! Text buffer, markup insertion, toolbar and image insertion for a blog
//! post editor, built on the Elm Architecture pattern: every change is a
//! [`Msg`] handled by [`update::update`], side effects come back as [`Cmd`]s
//! that a [`runtime::Runtime`] executes.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod image;
pub mod markup;
pub mod messages;
pub mod model;
pub mod post;
pub mod registry;
pub mod runtime;
pub mod toolbar;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EditorConfig;
pub use messages::Msg;
pub use model::EditorSurface;
pub use registry::EditorRegistry;
