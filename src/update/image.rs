//! Image dialog update handlers
//!
//! Processes ImageMsg messages to drive the insertion workflow.

use crate::commands::Cmd;
use crate::image::{img_tag, Resolution};
use crate::markup::apply_block;
use crate::messages::ImageMsg;
use crate::model::EditorSurface;

pub fn update_image(model: &mut EditorSurface, msg: ImageMsg) -> Option<Cmd> {
    match msg {
        ImageMsg::OpenDialog => {
            if model.image.open() {
                tracing::debug!("image dialog opened");
            }
            Some(Cmd::Redraw)
        }

        ImageMsg::CloseDialog => {
            if let Some(request) = model.image.cancel() {
                tracing::info!(request, "image dialog closed with a request in flight");
            }
            Some(Cmd::Redraw)
        }

        ImageMsg::SetAltText(text) => {
            model.image.set_alt_text(text);
            Some(Cmd::Redraw)
        }

        ImageMsg::SetPrompt(text) => {
            model.image.set_prompt(text);
            Some(Cmd::Redraw)
        }

        ImageMsg::SubmitUpload(file) => match model.image.submit_upload(file) {
            Ok(job) => Some(Cmd::batch(vec![Cmd::Redraw, job.into()])),
            // The error stays on the workflow for inline display
            Err(_) => Some(Cmd::Redraw),
        },

        ImageMsg::SubmitGeneration => match model.image.submit_generation() {
            Ok(job) => Some(Cmd::batch(vec![Cmd::Redraw, job.into()])),
            Err(_) => Some(Cmd::Redraw),
        },

        ImageMsg::Completed { request, result } => {
            let buffer = &mut model.buffer;
            let mut cursor = None;
            let mut inserted = None;

            let resolution = model.image.resolve(request, result, |image| {
                match apply_block(buffer, &img_tag(image)) {
                    Ok(edit) => {
                        let at = buffer.selection_start();
                        inserted = Some((at, edit.buffer.len_chars() - buffer.len_chars()));
                        *buffer = edit.buffer;
                        cursor = Some(edit.cursor);
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "image insertion rejected, buffer unchanged");
                    }
                }
            });

            match resolution {
                Resolution::Inserted(_) => {
                    let position = cursor?;
                    // A prompt opened before the image landed still targets its text
                    if let (Some(prompt), Some((at, count))) =
                        (model.ui.active_prompt.as_mut(), inserted)
                    {
                        prompt.selection = prompt.selection.after_insert(at, count);
                    }
                    model.revision += 1;
                    model.ui.pending_cursor = Some(position);
                    Some(Cmd::batch(vec![
                        Cmd::Redraw,
                        Cmd::RestoreCursor { position },
                    ]))
                }
                Resolution::Failed(error) => {
                    let duration = model.config.notice_duration();
                    model.ui.notify(error.to_string(), duration);
                    Some(Cmd::Redraw)
                }
                Resolution::Discarded => None,
            }
        }

        ImageMsg::DismissError => {
            model.image.dismiss_error();
            model.ui.notice = None;
            Some(Cmd::Redraw)
        }
    }
}
