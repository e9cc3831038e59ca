//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use postedit::config::EditorConfig;
use postedit::image::{ImageFile, ImageGenerator, ImageUploader};
use postedit::messages::Msg;
use postedit::model::EditorSurface;
use postedit::post::{PostDraft, PostStore};
use postedit::runtime::{Runtime, Services};
use postedit::update::update;

/// Create a test surface with given text and selection
pub fn test_surface(text: &str, start: usize, end: usize) -> EditorSurface {
    let mut surface = EditorSurface::with_text(text);
    surface.buffer.set_selection(start, end);
    surface
}

/// Create a test surface with a collapsed cursor
pub fn test_surface_at(text: &str, cursor: usize) -> EditorSurface {
    test_surface(text, cursor, cursor)
}

/// Run a sequence of messages through `update`
pub fn apply_all(model: &mut EditorSurface, msgs: impl IntoIterator<Item = Msg>) {
    for msg in msgs {
        update(model, msg);
    }
}

/// A small PNG-typed file of `size` bytes
pub fn png_file(name: &str, size: usize) -> ImageFile {
    ImageFile::new(name, "image/png", vec![0u8; size])
}

// ========================================================================
// Fake collaborators
// ========================================================================

/// Uploader that records calls and answers with a fixed result
pub struct MockUploader {
    calls: AtomicUsize,
    hints: Mutex<Vec<String>>,
    response: Result<String, String>,
    delay: Duration,
}

impl MockUploader {
    pub fn succeeding(url: &str) -> Arc<Self> {
        Arc::new(Self::with_response(Ok(url.to_string())))
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self::with_response(Err(message.to_string())))
    }

    pub fn slow(url: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay,
            ..Self::with_response(Ok(url.to_string()))
        })
    }

    fn with_response(response: Result<String, String>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            hints: Mutex::new(Vec::new()),
            response,
            delay: Duration::ZERO,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn hints(&self) -> Vec<String> {
        self.hints.lock().unwrap().clone()
    }
}

impl ImageUploader for MockUploader {
    fn upload(&self, _file: &ImageFile, path_hint: &str) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.hints.lock().unwrap().push(path_hint.to_string());
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        self.response.clone().map_err(anyhow::Error::msg)
    }
}

/// Generator that records prompts and answers with a fixed result
pub struct MockGenerator {
    prompts: Mutex<Vec<String>>,
    response: Result<String, String>,
}

impl MockGenerator {
    pub fn succeeding(url: &str) -> Arc<Self> {
        Arc::new(Self {
            prompts: Mutex::new(Vec::new()),
            response: Ok(url.to_string()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            prompts: Mutex::new(Vec::new()),
            response: Err(message.to_string()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl ImageGenerator for MockGenerator {
    fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.response.clone().map_err(anyhow::Error::msg)
    }
}

/// Post store keeping saved drafts in memory
#[derive(Default)]
pub struct MemoryStore {
    saved: Mutex<Vec<PostDraft>>,
}

impl MemoryStore {
    pub fn saved(&self) -> Vec<PostDraft> {
        self.saved.lock().unwrap().clone()
    }
}

impl PostStore for MemoryStore {
    fn save(&self, post: &PostDraft) -> anyhow::Result<String> {
        self.saved.lock().unwrap().push(post.clone());
        Ok(format!("memory://{}", post.slug))
    }
}

/// Runtime over `text` with the given collaborators
pub fn test_runtime(
    text: &str,
    uploader: Arc<dyn ImageUploader>,
    generator: Arc<dyn ImageGenerator>,
    store: Arc<dyn PostStore>,
) -> Runtime {
    let surface = EditorSurface::new(text, EditorConfig::default());
    Runtime::new(surface, Services::new(uploader, generator, store))
}
