//! Application-level update handlers (saving, ticks)

use crate::commands::Cmd;
use crate::messages::AppMsg;
use crate::model::EditorSurface;
use crate::post::PostDraft;

pub fn update_app(model: &mut EditorSurface, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::SavePost { title, excerpt } => {
            if model.ui.is_saving {
                tracing::debug!("save already in progress");
                return None;
            }
            if title.trim().is_empty() {
                let duration = model.config.notice_duration();
                model.ui.notify("A title is required to save", duration);
                return Some(Cmd::Redraw);
            }

            // Content goes to the store exactly as the buffer holds it
            let draft = PostDraft::new(
                &title,
                model.buffer.content(),
                excerpt.as_deref(),
                model.config.excerpt_length,
            );
            model.ui.is_saving = true;
            tracing::debug!(slug = %draft.slug, revision = model.revision, "saving post");
            Some(Cmd::SavePost(draft))
        }

        AppMsg::SaveCompleted(result) => {
            model.ui.is_saving = false;
            let duration = model.config.notice_duration();
            match result {
                Ok(location) => {
                    model.ui.notify(format!("Saved to {}", location), duration);
                    model.ui.last_saved = Some(location);
                }
                Err(e) => {
                    tracing::warn!("Failed to save post: {}", e);
                    model.ui.notify(format!("Save failed: {}", e), duration);
                }
            }
            Some(Cmd::Redraw)
        }

        AppMsg::Tick => {
            if model.ui.expire_notice() {
                Some(Cmd::Redraw)
            } else {
                None
            }
        }
    }
}
