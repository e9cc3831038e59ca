//! Text-area update handlers

use crate::commands::Cmd;
use crate::messages::EditorMsg;
use crate::model::EditorSurface;

pub fn update_editor(model: &mut EditorSurface, msg: EditorMsg) -> Option<Cmd> {
    match msg {
        EditorMsg::Input { text, selection } => {
            if model.ui.has_prompt() {
                tracing::debug!("ignoring text input while a prompt is open");
                return None;
            }
            // The text area is the source of truth: take its content wholesale
            if text != model.buffer.content() {
                let mut buffer = model.buffer.clone();
                buffer.set_content(&text);
                model.commit(buffer);
            }
            model.buffer.set_selection(selection.start, selection.end);
            model.ui.focused = true;
            model.ui.pending_cursor = None;
            Some(Cmd::Redraw)
        }

        EditorMsg::SetSelection { start, end } => {
            model.buffer.set_selection(start, end);
            None
        }

        EditorMsg::RestoreCursor { position } => {
            // A newer edit (or typing) superseded this restore
            if model.ui.pending_cursor != Some(position) {
                tracing::trace!(position, "stale cursor restore ignored");
                return None;
            }
            model.ui.pending_cursor = None;
            model.ui.focused = true;
            model.buffer.set_cursor(position);
            Some(Cmd::Redraw)
        }

        EditorMsg::Blur => {
            model.ui.focused = false;
            None
        }
    }
}
