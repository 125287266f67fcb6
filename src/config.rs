//! Settings loading.
//!
//! pydoctor keeps its configuration in an explicit [`Settings`] value that
//! is constructed once in `main` and passed by reference to everything
//! that needs it. Settings come from an optional YAML file at
//! `~/.pydoctor/config.yml`; missing file means defaults.

use crate::error::{PydoctorError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default bound on each probe subprocess, in seconds.
const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;

/// Resolved application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory holding persisted state (history, stats) and the config file.
    pub data_dir: PathBuf,

    /// Bound on each probe subprocess.
    pub probe_timeout: Duration,

    /// Explicit pyenv root, overriding `PYENV_ROOT` and the home default.
    pub pyenv_root: Option<PathBuf>,
}

/// On-disk shape of the settings file. Every field is optional; anything
/// absent falls back to the built-in default.
#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    data_dir: Option<PathBuf>,
    probe_timeout_secs: Option<u64>,
    pyenv_root: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            probe_timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
            pyenv_root: None,
        }
    }
}

impl Settings {
    /// Load settings from the default config file location.
    pub fn load() -> Result<Self> {
        let path = default_data_dir().join("config.yml");
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load settings from a specific YAML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let file: SettingsFile =
            serde_yaml::from_str(&content).map_err(|e| PydoctorError::ConfigParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let defaults = Self::default();
        Ok(Self {
            data_dir: file.data_dir.unwrap_or(defaults.data_dir),
            probe_timeout: file
                .probe_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.probe_timeout),
            pyenv_root: file.pyenv_root,
        })
    }

    /// Replace the data directory (used by tests and `--data-dir`).
    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        self.data_dir = dir.to_path_buf();
        self
    }

    /// Resolve the pyenv root: explicit setting, then `PYENV_ROOT`, then
    /// `~/.pyenv`.
    pub fn resolved_pyenv_root(&self) -> PathBuf {
        self.resolved_pyenv_root_with_env(|key| std::env::var(key))
    }

    /// Resolve the pyenv root with a custom env var lookup function.
    ///
    /// This allows testing without modifying actual environment variables.
    pub fn resolved_pyenv_root_with_env<F>(&self, env_fn: F) -> PathBuf
    where
        F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
    {
        if let Some(root) = &self.pyenv_root {
            return root.clone();
        }
        if let Ok(val) = env_fn("PYENV_ROOT") {
            if !val.is_empty() {
                return PathBuf::from(val);
            }
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/"))
            .join(".pyenv")
    }
}

/// Default data directory: `~/.pydoctor`.
fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".pydoctor")
}
