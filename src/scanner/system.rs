//! Installation discovery.
//!
//! [`SystemScanner`] owns one scan's worth of state. Each call to
//! [`SystemScanner::scan`] starts from empty: fixed system locations are
//! probed first, then the pyenv versions directory, and the optional
//! comprehensive pass appends deep-scan findings. Nothing in here returns
//! an error; a broken candidate degrades to an entry with
//! `version = "Error"` / `is_valid = false` and the scan moves on.
//!
//! The same real interpreter can show up once per strategy (a system path
//! and a pyenv shim pointing at the same binary). Entries are deliberately
//! not deduplicated: they are distinct on-disk entry points with separate
//! health.

use crate::config::Settings;
use crate::platform::OsFamily;
use crate::scanner::checks;
use crate::scanner::models::{Issue, Provider, PythonInstallation};
use crate::scanner::probe;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Well-known system locations for a Python 3 executable.
const SYSTEM_PYTHON_PATHS: &[&str] = &[
    "/usr/bin/python3",
    "/usr/local/bin/python3",
    "/opt/homebrew/bin/python3",
    "/bin/python3",
];

/// Discovers Python installations and classifies host issues.
pub struct SystemScanner {
    system_paths: Vec<PathBuf>,
    pyenv_root: PathBuf,
    probe_timeout: Duration,
    family: OsFamily,
    home: PathBuf,
    installations: Vec<PythonInstallation>,
    issues: Vec<Issue>,
}

impl SystemScanner {
    /// Create a scanner from resolved settings.
    pub fn new(settings: &Settings) -> Self {
        Self {
            system_paths: SYSTEM_PYTHON_PATHS.iter().map(PathBuf::from).collect(),
            pyenv_root: settings.resolved_pyenv_root(),
            probe_timeout: settings.probe_timeout,
            family: OsFamily::current(),
            home: dirs::home_dir().unwrap_or_else(|| PathBuf::from("/")),
            installations: Vec::new(),
            issues: Vec::new(),
        }
    }

    /// Replace the fixed system paths.
    ///
    /// This allows testing without depending on the host's real interpreters.
    pub fn with_system_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.system_paths = paths;
        self
    }

    /// Override the detected OS family.
    pub fn with_family(mut self, family: OsFamily) -> Self {
        self.family = family;
        self
    }

    /// Scan the host.
    ///
    /// Discovery always runs; the deep-scan checks only run when
    /// `comprehensive` is set. Returns the issues found, in check order
    /// (dependencies, permissions, sprawl). Installations are queryable
    /// via [`SystemScanner::installations`] and reflect only this scan.
    pub fn scan(&mut self, comprehensive: bool) -> Vec<Issue> {
        self.installations.clear();
        self.issues.clear();

        self.detect_system_pythons();
        self.detect_pyenv_installations();

        tracing::debug!(
            count = self.installations.len(),
            comprehensive,
            "discovery finished"
        );

        if comprehensive {
            let deep = checks::run(
                self.installations.len(),
                self.family,
                &self.home,
                self.probe_timeout,
            );
            self.issues.extend(deep);
        }

        self.issues.clone()
    }

    /// Installations found by the most recent scan, in discovery order.
    pub fn installations(&self) -> &[PythonInstallation] {
        &self.installations
    }

    fn detect_system_pythons(&mut self) {
        let candidates = self.system_paths.clone();
        for path in candidates {
            if path.exists() {
                let installation = self.probe_candidate(path, Provider::System, None);
                self.installations.push(installation);
            }
        }
    }

    fn detect_pyenv_installations(&mut self) {
        let versions_dir = self.pyenv_root.join("versions");
        if !versions_dir.is_dir() {
            return;
        }

        let entries = match fs::read_dir(&versions_dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!(dir = %versions_dir.display(), error = %e, "cannot list pyenv versions");
                return;
            }
        };

        for entry in entries.flatten() {
            let version_dir = entry.path();
            if !version_dir.is_dir() {
                continue;
            }
            let python = version_dir.join("bin").join("python");
            if python.exists() {
                // The directory name is the version pyenv installed.
                let version = version_dir
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "Unknown".to_string());
                let installation =
                    self.probe_candidate(python, Provider::Pyenv, Some(version));
                self.installations.push(installation);
            }
        }
    }

    /// Build an installation record for one candidate executable.
    ///
    /// The version comes from the candidate's own banner unless the caller
    /// already knows it (pyenv names its version directories).
    fn probe_candidate(
        &self,
        path: PathBuf,
        provider: Provider,
        known_version: Option<String>,
    ) -> PythonInstallation {
        let version = known_version
            .unwrap_or_else(|| probe::probe_version(&path, self.probe_timeout));
        let is_valid = probe::verify(&path, self.probe_timeout);
        PythonInstallation {
            path,
            version,
            provider,
            is_valid,
        }
    }
}
