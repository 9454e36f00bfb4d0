use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::domain::entities::query::SavedQuery;
use crate::usecase::ports::store::{QueryStore, StoreError};

/// Saved queries live in one JSON file under the user config directory.
pub struct JsonQueryStore {
    path: PathBuf,
}

impl JsonQueryStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn at_default_location() -> Result<Self> {
        Ok(Self::new(default_store_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub fn default_store_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("app", "querydesk", "QueryDesk")
        .ok_or_else(|| anyhow!("failed to resolve user config directory"))?;
    let config_dir = dirs.config_dir();
    fs::create_dir_all(config_dir)
        .with_context(|| format!("failed to create config dir {}", config_dir.display()))?;
    Ok(config_dir.join("saved_queries.json"))
}

impl QueryStore for JsonQueryStore {
    fn load(&self) -> Result<Vec<SavedQuery>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&self.path).map_err(|err| {
            StoreError::Message(format!("failed to read {}: {err}", self.path.display()))
        })?;
        serde_json::from_str(&text).map_err(|err| {
            StoreError::Message(format!("failed to parse {}: {err}", self.path.display()))
        })
    }

    fn save(&self, queries: &[SavedQuery]) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(queries)
            .map_err(|err| StoreError::Message(format!("failed to serialize queries: {err}")))?;
        fs::write(&self.path, text).map_err(|err| {
            StoreError::Message(format!("failed to write {}: {err}", self.path.display()))
        })
    }
}
