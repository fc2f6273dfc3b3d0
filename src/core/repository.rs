//! Model persistence
//!
//! The engine never touches storage itself; hosts load a model at session
//! start and save it after each swipe through a `PreferenceRepository`.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::core::updater::initialize_model;
use crate::types::{PreferenceError, PreferenceModel, Result};

pub trait PreferenceRepository: Send + Sync {
    /// Stored model for `user_id`, or a fresh one if none exists
    fn load(&self, user_id: &str) -> Result<PreferenceModel>;

    /// Store `model` under its own user id, replacing any previous state
    fn save(&self, model: &PreferenceModel) -> Result<()>;
}

/// Process-lifetime storage
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    models: RwLock<HashMap<String, PreferenceModel>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.models.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> PreferenceError {
    PreferenceError::Storage("repository lock poisoned".to_string())
}

impl PreferenceRepository for InMemoryRepository {
    fn load(&self, user_id: &str) -> Result<PreferenceModel> {
        let models = self.models.read().map_err(poisoned)?;
        Ok(models
            .get(user_id)
            .cloned()
            .unwrap_or_else(|| initialize_model(user_id)))
    }

    fn save(&self, model: &PreferenceModel) -> Result<()> {
        let mut models = self.models.write().map_err(poisoned)?;
        models.insert(model.user_id().to_string(), model.clone());
        Ok(())
    }
}

/// One pretty-printed JSON file per user under `dir`.
///
/// Files are named by the SHA-256 of the user id, so any opaque id maps
/// to a safe file name.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    dir: PathBuf,
}

impl JsonFileRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `user_id`'s model
    pub fn path_for(&self, user_id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", user_key(user_id)))
    }
}

/// Hex SHA-256 of the user id
pub fn user_key(user_id: &str) -> String {
    let digest = Sha256::digest(user_id.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

impl PreferenceRepository for JsonFileRepository {
    fn load(&self, user_id: &str) -> Result<PreferenceModel> {
        let path = self.path_for(user_id);
        if !path.exists() {
            debug!(user_id, "no stored model, starting fresh");
            return Ok(initialize_model(user_id));
        }

        let json = fs::read_to_string(&path)?;
        let model: PreferenceModel = serde_json::from_str(&json)?;
        if model.user_id() != user_id {
            return Err(PreferenceError::Storage(format!(
                "{} holds a model for a different user",
                path.display()
            )));
        }
        debug!(user_id, swipes = model.total_swipes(), "model loaded");
        Ok(model)
    }

    fn save(&self, model: &PreferenceModel) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(model.user_id());

        // Write to a sibling temp file, then rename over the target
        let temp_file = NamedTempFile::new_in(&self.dir)?;
        {
            let mut writer = BufWriter::new(temp_file.as_file());
            serde_json::to_writer_pretty(&mut writer, model)?;
            writer.flush()?;
        }
        temp_file
            .persist(&path)
            .map_err(|e| PreferenceError::Storage(e.to_string()))?;

        info!(user_id = model.user_id(), path = %path.display(), "model saved");
        Ok(())
    }
}
