//! JSON file storage.
//!
//! All persisted state (operation history, scan stats) lives in small JSON
//! files under the data directory. Writes go through a temp file and an
//! atomic rename so a crash mid-write never leaves a truncated file.

use crate::error::{PydoctorError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// A single JSON file holding one serializable value.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Create a store backed by the given file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored value, or `None` when the file doesn't exist yet.
    pub fn load<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| PydoctorError::StateParseError {
                path: self.path.clone(),
                message: e.to_string(),
            })
    }

    /// Save a value, replacing whatever the file held before.
    pub fn save<T: Serialize>(&self, value: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(value).map_err(|e| {
            PydoctorError::StateParseError {
                path: self.path.clone(),
                message: e.to_string(),
            }
        })?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
