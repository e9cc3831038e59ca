//! Blog post hand-off to the content store
//!
//! The editor's markup is persisted verbatim; the store sees exactly the
//! string the buffer held when the user pressed save.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// A post as handed to the content store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
}

impl PostDraft {
    /// Build a draft, deriving the slug from the title and, when no excerpt
    /// is given, the excerpt from the content.
    pub fn new(title: &str, content: &str, excerpt: Option<&str>, excerpt_length: usize) -> Self {
        let excerpt = match excerpt.map(str::trim).filter(|e| !e.is_empty()) {
            Some(excerpt) => excerpt.to_string(),
            None => derive_excerpt(content, excerpt_length),
        };
        Self {
            title: title.trim().to_string(),
            slug: slugify(title),
            excerpt,
            content: content.to_string(),
        }
    }
}

/// Lowercase ASCII alphanumerics joined by single dashes
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Tags that end a word; inline tags such as `<strong>` join their text to
/// the surrounding words
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "br", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li", "img",
];

fn is_block_tag(tag: &str) -> bool {
    let name: String = tag
        .trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    BLOCK_TAGS.contains(&name.as_str())
}

/// Plain-text preview of markup: tags stripped, whitespace collapsed,
/// truncated to `max_chars` with a trailing `...`.
pub fn derive_excerpt(content: &str, max_chars: usize) -> String {
    let mut text = String::with_capacity(content.len());
    let mut tag: Option<String> = None;
    for ch in content.chars() {
        match ch {
            '<' if tag.is_none() => tag = Some(String::new()),
            '>' if tag.is_some() => {
                if tag.take().is_some_and(|name| is_block_tag(&name)) {
                    text.push(' ');
                }
            }
            _ => match tag.as_mut() {
                Some(name) => name.push(ch),
                None => text.push(ch),
            },
        }
    }

    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }

    let truncated: String = collapsed.chars().take(max_chars).collect();
    format!("{}...", truncated.trim_end())
}

/// Content store seam
pub trait PostStore: Send + Sync {
    /// Persist `post`, returning where it was stored
    fn save(&self, post: &PostDraft) -> Result<String>;
}

/// Store writing each post as `{slug}.json`
#[derive(Debug, Clone)]
pub struct JsonPostStore {
    dir: PathBuf,
}

impl JsonPostStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, post: &PostDraft) -> PathBuf {
        self.dir.join(format!("{}.json", post.slug))
    }

    pub fn load(path: &Path) -> Result<PostDraft> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read post {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse post {}", path.display()))
    }
}

impl PostStore for JsonPostStore {
    fn save(&self, post: &PostDraft) -> Result<String> {
        if post.slug.is_empty() {
            bail!("post title must contain at least one letter or digit");
        }

        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create posts directory {}", self.dir.display()))?;

        let path = self.path_for(post);
        let json = serde_json::to_string_pretty(post).context("Failed to serialize post")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write post to {}", path.display()))?;

        tracing::info!("Saved post '{}' to {}", post.title, path.display());
        Ok(path.display().to_string())
    }
}
