//! Canonical scan result types.
//!
//! [`PythonInstallation`] and [`Issue`] are defined once here and consumed
//! everywhere (scanner, fix oracle, CLI output). An `Issue`'s `kind`
//! decides which keys its `details` map carries; the constructors below
//! are the only producers, and the fix oracle reads exactly the same keys:
//!
//! | kind                 | detail keys       |
//! |----------------------|-------------------|
//! | `missing_dependency` | `dependency_name` |
//! | `permission_error`   | `path`            |
//! | `version_conflict`   | `count`           |

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Discovery strategy that found an installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Found at one of the fixed system executable locations.
    System,
    /// Found under the pyenv versions directory.
    Pyenv,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::System => "system",
            Provider::Pyenv => "pyenv",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Python interpreter discovered during a scan.
///
/// Constructed once per candidate and never mutated; each scan starts from
/// an empty list, so these only describe the most recent pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PythonInstallation {
    /// Absolute path to the executable.
    pub path: PathBuf,

    /// Version string from `--version`, or "Unknown"/"Error" when the
    /// probe could not produce one.
    pub version: String,

    /// Which discovery strategy found this entry.
    pub provider: Provider,

    /// Whether the interpreter passed the self-test.
    pub is_valid: bool,
}

/// Issue urgency, ordered from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of issue categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingDependency,
    PermissionError,
    VersionConflict,
    Other,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::MissingDependency => "missing_dependency",
            IssueKind::PermissionError => "permission_error",
            IssueKind::VersionConflict => "version_conflict",
            IssueKind::Other => "other",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified finding about the host environment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    /// Human-readable summary.
    pub description: String,

    /// Category tag.
    #[serde(rename = "type")]
    pub kind: IssueKind,

    /// Urgency.
    pub severity: Severity,

    /// Kind-specific context; key set per kind is documented at module level.
    pub details: BTreeMap<String, serde_json::Value>,
}

impl Issue {
    /// A required command-line tool is absent.
    pub fn missing_dependency(tool: &str) -> Self {
        let mut details = BTreeMap::new();
        details.insert("dependency_name".to_string(), tool.into());
        Self {
            description: format!("Missing dependency: {}", tool),
            kind: IssueKind::MissingDependency,
            severity: Severity::Medium,
            details,
        }
    }

    /// A directory relevant to Python tooling is not writable.
    pub fn permission_denied(path: &Path) -> Self {
        let mut details = BTreeMap::new();
        details.insert(
            "path".to_string(),
            path.to_string_lossy().into_owned().into(),
        );
        Self {
            description: format!("Permission denied: {}", path.display()),
            kind: IssueKind::PermissionError,
            severity: Severity::High,
            details,
        }
    }

    /// More installations were discovered than the sprawl threshold allows.
    pub fn version_sprawl(count: usize) -> Self {
        let mut details = BTreeMap::new();
        details.insert("count".to_string(), count.into());
        Self {
            description: format!("Multiple Python installations detected ({})", count),
            kind: IssueKind::VersionConflict,
            severity: Severity::Low,
            details,
        }
    }
}
