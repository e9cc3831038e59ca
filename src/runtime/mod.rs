//! Runtime - owns an editor surface and executes its commands
//!
//! Every model mutation happens here, on the caller's thread, one message at
//! a time. Collaborator calls run on helper threads and report back through
//! an mpsc channel; their results are applied on the next [`Runtime::tick`].
//! Cursor restores are deferred to the tick after the edit that requested
//! them, behind any collaborator results already waiting.

mod services;

use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use anyhow::{bail, Result};

use crate::commands::Cmd;
use crate::messages::{AppMsg, EditorMsg, ImageMsg, Msg};
use crate::model::EditorSurface;
use crate::update::update;

pub use services::Services;

pub struct Runtime {
    model: EditorSurface,
    services: Services,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
    /// Messages held back until the next tick
    deferred: VecDeque<Msg>,
    /// Helper threads that have not reported back yet
    in_flight: usize,
    timeout: Duration,
    redraw_requested: bool,
}

impl Runtime {
    pub fn new(model: EditorSurface, services: Services) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        let timeout = model.config.collaborator_timeout();
        Self {
            model,
            services,
            msg_tx,
            msg_rx,
            deferred: VecDeque::new(),
            in_flight: 0,
            timeout,
            redraw_requested: false,
        }
    }

    pub fn model(&self) -> &EditorSurface {
        &self.model
    }

    pub fn into_model(self) -> EditorSurface {
        self.model
    }

    /// Override the collaborator timeout taken from the surface's config
    pub fn set_collaborator_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Number of collaborator calls that have not reported back
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// True when nothing is running and nothing is waiting for a tick
    pub fn is_idle(&self) -> bool {
        self.in_flight == 0 && self.deferred.is_empty()
    }

    /// Whether any update since the last call asked for a re-render
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    /// Run a message through `update` and execute the resulting command
    pub fn dispatch(&mut self, msg: Msg) {
        if let Some(cmd) = update(&mut self.model, msg) {
            if cmd.needs_redraw() {
                self.redraw_requested = true;
            }
            self.process_cmd(cmd);
        }
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Redraw => {}
            Cmd::RestoreCursor { position } => {
                self.deferred
                    .push_back(Msg::Editor(EditorMsg::RestoreCursor { position }));
            }
            Cmd::UploadImage {
                request,
                file,
                path_hint,
            } => {
                let uploader = self.services.uploader.clone();
                tracing::info!(request, %path_hint, size = file.size(), "uploading image");
                self.spawn(move |timeout| {
                    let result = run_with_timeout(timeout, move || {
                        uploader.upload(&file, &path_hint).map_err(|e| format!("{:#}", e))
                    });
                    Msg::Image(ImageMsg::Completed { request, result })
                });
            }
            Cmd::GenerateImage { request, prompt } => {
                let generator = self.services.generator.clone();
                tracing::info!(request, "generating image");
                self.spawn(move |timeout| {
                    let result = run_with_timeout(timeout, move || {
                        generator.generate(&prompt).map_err(|e| format!("{:#}", e))
                    });
                    Msg::Image(ImageMsg::Completed { request, result })
                });
            }
            Cmd::SavePost(draft) => {
                let store = self.services.store.clone();
                self.spawn(move |timeout| {
                    let result = run_with_timeout(timeout, move || {
                        store.save(&draft).map_err(|e| format!("{:#}", e))
                    });
                    Msg::App(AppMsg::SaveCompleted(result))
                });
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
        }
    }

    /// Run `task` on a helper thread; its message comes back through the channel
    fn spawn<F>(&mut self, task: F)
    where
        F: FnOnce(Duration) -> Msg + Send + 'static,
    {
        let tx = self.msg_tx.clone();
        let timeout = self.timeout;
        self.in_flight += 1;
        std::thread::spawn(move || {
            let _ = tx.send(task(timeout));
        });
    }

    /// Apply finished collaborator results, then the messages deferred by the
    /// previous tick. Returns true if anything besides the tick itself ran.
    pub fn tick(&mut self) -> bool {
        let deferred = std::mem::take(&mut self.deferred);
        let mut processed = false;

        while let Ok(msg) = self.msg_rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            self.dispatch(msg);
            processed = true;
        }

        for msg in deferred {
            self.dispatch(msg);
            processed = true;
        }

        self.dispatch(Msg::App(AppMsg::Tick));
        processed
    }

    /// Tick until idle, blocking on collaborator results in between
    pub fn run_until_idle(&mut self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;

        loop {
            self.tick();
            if self.is_idle() {
                return Ok(());
            }
            if !self.deferred.is_empty() {
                continue;
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.msg_rx.recv_timeout(remaining) {
                Ok(msg) => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    self.dispatch(msg);
                }
                Err(RecvTimeoutError::Timeout) => {
                    bail!(
                        "timed out after {:?} waiting for {} background task(s)",
                        timeout,
                        self.in_flight
                    );
                }
                Err(RecvTimeoutError::Disconnected) => {
                    bail!("runtime message channel closed");
                }
            }
        }
    }
}

/// Run `f` on its own thread and give up after `timeout`
///
/// A call that outlives the timeout keeps running detached; its result is
/// dropped.
fn run_with_timeout<F>(timeout: Duration, f: F) -> Result<String, String>
where
    F: FnOnce() -> Result<String, String> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let _ = tx.send(f());
    });

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => {
            tracing::warn!(?timeout, "collaborator call timed out");
            Err(format!("timed out after {} s", timeout.as_secs_f32()))
        }
        Err(RecvTimeoutError::Disconnected) => Err("collaborator call panicked".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_with_timeout_returns_result() {
        let result = run_with_timeout(Duration::from_secs(5), || Ok("done".to_string()));
        assert_eq!(result, Ok("done".to_string()));
    }

    #[test]
    fn test_run_with_timeout_reports_timeout() {
        let result = run_with_timeout(Duration::from_millis(10), || {
            std::thread::sleep(Duration::from_millis(500));
            Ok("late".to_string())
        });
        assert!(result.unwrap_err().starts_with("timed out"));
    }

    #[test]
    fn test_run_with_timeout_reports_panic() {
        let result = run_with_timeout(Duration::from_secs(5), || panic!("boom"));
        assert_eq!(result, Err("collaborator call panicked".to_string()));
    }
}
