//! Editor registry - mounted editor surfaces keyed by container id
//!
//! A page can host several editors. Each one is mounted explicitly with
//! [`EditorRegistry::init`] and removed with [`EditorRegistry::teardown`];
//! there is no process-wide map.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use thiserror::Error;

use crate::commands::Cmd;
use crate::config::EditorConfig;
use crate::messages::Msg;
use crate::model::EditorSurface;
use crate::update::update;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("an editor is already mounted on '{0}'")]
    AlreadyMounted(String),
    #[error("no editor is mounted on '{0}'")]
    NotMounted(String),
}

/// Mounted editors, one per container
#[derive(Debug, Default)]
pub struct EditorRegistry {
    editors: HashMap<String, EditorSurface>,
    config: EditorConfig,
}

impl EditorRegistry {
    /// Create an empty registry; new surfaces get a copy of `config`
    pub fn new(config: EditorConfig) -> Self {
        Self {
            editors: HashMap::new(),
            config,
        }
    }

    /// Mount a surface on `container_id` with the given initial content
    pub fn init(
        &mut self,
        container_id: &str,
        initial_content: &str,
    ) -> Result<&mut EditorSurface, RegistryError> {
        match self.editors.entry(container_id.to_string()) {
            Entry::Occupied(_) => Err(RegistryError::AlreadyMounted(container_id.to_string())),
            Entry::Vacant(slot) => {
                tracing::debug!(container_id, "mounting editor");
                Ok(slot.insert(EditorSurface::new(initial_content, self.config.clone())))
            }
        }
    }

    /// Unmount and return the surface on `container_id`
    pub fn teardown(&mut self, container_id: &str) -> Option<EditorSurface> {
        let surface = self.editors.remove(container_id)?;
        if surface.image.in_flight().is_some() {
            tracing::info!(container_id, "tearing down editor with an image request in flight");
        }
        tracing::debug!(container_id, "editor unmounted");
        Some(surface)
    }

    pub fn get(&self, container_id: &str) -> Option<&EditorSurface> {
        self.editors.get(container_id)
    }

    pub fn get_mut(&mut self, container_id: &str) -> Option<&mut EditorSurface> {
        self.editors.get_mut(container_id)
    }

    pub fn contains(&self, container_id: &str) -> bool {
        self.editors.contains_key(container_id)
    }

    pub fn len(&self) -> usize {
        self.editors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.editors.is_empty()
    }

    /// Container ids of all mounted editors, sorted
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.editors.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Route a message to the editor mounted on `container_id`
    pub fn dispatch(&mut self, container_id: &str, msg: Msg) -> Result<Option<Cmd>, RegistryError> {
        let surface = self
            .editors
            .get_mut(container_id)
            .ok_or_else(|| RegistryError::NotMounted(container_id.to_string()))?;
        Ok(update(surface, msg))
    }
}
