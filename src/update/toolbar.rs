//! Toolbar update handlers
//!
//! Runs a toolbar action against the buffer: capture the selection, build the
//! markup edit, commit it, then ask for the cursor to be placed once the new
//! content has been rendered.

use crate::commands::Cmd;
use crate::markup::MarkupOperation;
use crate::model::{EditorSurface, PromptState};
use crate::toolbar::{ActionPlan, ToolbarAction};

pub fn update_toolbar(model: &mut EditorSurface, action: ToolbarAction) -> Option<Cmd> {
    if model.ui.has_prompt() {
        tracing::debug!(%action, "prompt open, queueing toolbar action");
        model.queued_actions.push_back(action);
        return None;
    }

    run_action(model, action)
}

/// Run an action now, assuming no prompt is open
pub(super) fn run_action(model: &mut EditorSurface, action: ToolbarAction) -> Option<Cmd> {
    tracing::debug!(%action, selection = ?model.buffer.selection(), "toolbar action");

    match action.plan() {
        ActionPlan::Apply(op) => apply_markup(model, &op),
        ActionPlan::Prompt(kind) => {
            model
                .ui
                .open_prompt(PromptState::new(kind, model.buffer.selection()));
            Some(Cmd::Redraw)
        }
    }
}

/// Apply a markup operation to the buffer and schedule the cursor restore.
///
/// All-or-nothing: on a range error the buffer is left exactly as it was.
pub(super) fn apply_markup(model: &mut EditorSurface, op: &MarkupOperation) -> Option<Cmd> {
    match op.apply(&model.buffer) {
        Ok(edit) => {
            model.commit(edit.buffer);
            model.ui.pending_cursor = Some(edit.cursor);
            Some(Cmd::RestoreCursor {
                position: edit.cursor,
            })
        }
        Err(e) => {
            tracing::error!(error = %e, ?op, "markup edit rejected, buffer unchanged");
            None
        }
    }
}
