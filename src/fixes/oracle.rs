//! Canned fix generation.
//!
//! The oracle maps an [`Issue`] to zero or more [`FixSuggestion`]s by
//! matching on the issue kind and reading the detail keys that kind is
//! documented to carry (see [`crate::scanner::models`]). Suggestions are
//! platform-aware: the same missing tool installs through Homebrew on
//! macOS and apt on Linux.

use crate::fixes::suggestion::{FixSuggestion, RiskLevel};
use crate::platform::OsFamily;
use crate::scanner::models::{Issue, IssueKind};

/// Generates remediation suggestions for scan issues.
pub struct FixOracle {
    family: OsFamily,
}

impl Default for FixOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl FixOracle {
    /// Create an oracle for the running host.
    pub fn new() -> Self {
        Self {
            family: OsFamily::current(),
        }
    }

    /// Create an oracle for a specific OS family.
    pub fn with_family(family: OsFamily) -> Self {
        Self { family }
    }

    /// Suggest fixes for one issue.
    pub fn suggest(&self, issue: &Issue) -> Vec<FixSuggestion> {
        match issue.kind {
            IssueKind::MissingDependency => self.dependency_fixes(issue),
            IssueKind::PermissionError => self.permission_fixes(issue),
            IssueKind::VersionConflict | IssueKind::Other => vec![Self::manual_investigation()],
        }
    }

    fn dependency_fixes(&self, issue: &Issue) -> Vec<FixSuggestion> {
        let Some(dep) = issue.details.get("dependency_name").and_then(|v| v.as_str()) else {
            return vec![Self::manual_investigation()];
        };

        match self.family {
            OsFamily::MacOs => vec![FixSuggestion {
                description: format!("Install {} using Homebrew", dep),
                command: vec!["brew".into(), "install".into(), dep.into()],
                explanation: format!("Installs the {} package using Homebrew", dep),
                risk_level: RiskLevel::Low,
                confidence: 0.9,
                safety_rating: 0.95,
            }],
            OsFamily::Linux => vec![FixSuggestion {
                description: format!("Install {} using apt", dep),
                command: vec![
                    "sudo".into(),
                    "apt".into(),
                    "install".into(),
                    "-y".into(),
                    dep.into(),
                ],
                explanation: format!("Installs the {} package using apt", dep),
                risk_level: RiskLevel::Medium,
                confidence: 0.85,
                safety_rating: 0.8,
            }],
            OsFamily::Other => Vec::new(),
        }
    }

    fn permission_fixes(&self, issue: &Issue) -> Vec<FixSuggestion> {
        let Some(path) = issue.details.get("path").and_then(|v| v.as_str()) else {
            return vec![Self::manual_investigation()];
        };

        vec![FixSuggestion {
            description: format!("Fix permissions for {}", path),
            command: vec!["chmod".into(), "755".into(), path.into()],
            explanation: "Sets standard owner-writable permissions on the directory".to_string(),
            risk_level: RiskLevel::Medium,
            confidence: 0.9,
            safety_rating: 0.9,
        }]
    }

    fn manual_investigation() -> FixSuggestion {
        FixSuggestion {
            description: "Manual investigation required".to_string(),
            command: vec!["echo".into(), "Please investigate manually".into()],
            explanation: "This issue has no automated fix".to_string(),
            risk_level: RiskLevel::Low,
            confidence: 0.5,
            safety_rating: 1.0,
        }
    }
}
