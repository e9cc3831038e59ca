//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod app;
mod editor;
mod image;
mod prompt;
mod toolbar;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::EditorSurface;

#[cfg(debug_assertions)]
use crate::tracing::BufferSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use app::update_app;
pub use editor::update_editor;
pub use image::update_image;
pub use prompt::update_prompt;
pub use toolbar::update_toolbar;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut EditorSurface, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut EditorSurface, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Editor(m) => update_editor(model, m),
        Msg::Toolbar(action) => update_toolbar(model, action),
        Msg::Prompt(m) => update_prompt(model, m),
        Msg::Image(m) => update_image(model, m),
        Msg::App(m) => update_app(model, m),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after buffer state and logs diffs for debugging.
/// Ticks are not logged.
#[cfg(debug_assertions)]
fn update_traced(model: &mut EditorSurface, msg: Msg) -> Option<Cmd> {
    use crate::messages::AppMsg;

    let is_noisy = matches!(&msg, Msg::App(AppMsg::Tick));

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = BufferSnapshot::from_surface(model);

    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(model, msg);

    let after = BufferSnapshot::from_surface(model);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "buffer", %diff, "state changed");
    }

    model.assert_invariants(&msg_name);

    result
}

/// Get a display name for a message type
///
/// Example outputs:
/// - `Toolbar(bold)`
/// - `Prompt::Confirm`
/// - `Image::Completed { request: 3, .. }`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    use crate::messages::{EditorMsg, ImageMsg};

    match msg {
        // Content can be large, log only its length
        Msg::Editor(EditorMsg::Input { text, selection }) => format!(
            "Editor::Input {{ chars: {}, selection: {:?} }}",
            text.chars().count(),
            selection
        ),
        Msg::Editor(m) => format!("Editor::{:?}", m),
        Msg::Toolbar(action) => format!("Toolbar({})", action),
        Msg::Prompt(m) => format!("Prompt::{:?}", m),
        Msg::Image(ImageMsg::Completed { request, result }) => format!(
            "Image::Completed {{ request: {}, ok: {} }}",
            request,
            result.is_ok()
        ),
        Msg::Image(m) => format!("Image::{:?}", m),
        Msg::App(m) => format!("App::{:?}", m),
    }
}
