//! Prompt modal update handlers

use crate::commands::Cmd;
use crate::messages::PromptMsg;
use crate::model::EditorSurface;

use super::toolbar::{apply_markup, run_action};

pub fn update_prompt(model: &mut EditorSurface, msg: PromptMsg) -> Option<Cmd> {
    match msg {
        PromptMsg::SetInput(text) => {
            let prompt = model.ui.active_prompt.as_mut()?;
            prompt.input = text;
            Some(Cmd::Redraw)
        }

        PromptMsg::Confirm => {
            let prompt = model.ui.take_prompt()?;
            let cmd = match prompt.kind.operation(Some(&prompt.input)) {
                Some(op) => {
                    model
                        .buffer
                        .set_selection(prompt.selection.start, prompt.selection.end);
                    apply_markup(model, &op)
                }
                None => {
                    tracing::debug!(kind = ?prompt.kind, "empty prompt answer, nothing to do");
                    Some(Cmd::Redraw)
                }
            };
            Cmd::and(cmd, drain_queue(model))
        }

        PromptMsg::Cancel => {
            let prompt = model.ui.take_prompt()?;
            tracing::debug!(kind = ?prompt.kind, "prompt cancelled");
            Cmd::and(Some(Cmd::Redraw), drain_queue(model))
        }
    }
}

/// Replay actions queued while the prompt was open, stopping if one of them
/// opens another prompt
fn drain_queue(model: &mut EditorSurface) -> Option<Cmd> {
    let mut cmd = None;
    while !model.ui.has_prompt() {
        let Some(action) = model.queued_actions.pop_front() else {
            break;
        };
        cmd = Cmd::and(cmd, run_action(model, action));
    }
    cmd
}
