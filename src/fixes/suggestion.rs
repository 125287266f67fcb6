//! Remediation suggestion types.

use serde::Serialize;
use std::fmt;

/// How risky it is to apply a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        };
        f.write_str(s)
    }
}

/// A canned remediation command for a single issue.
#[derive(Debug, Clone, Serialize)]
pub struct FixSuggestion {
    /// What this fix does, in one line.
    pub description: String,

    /// The command as argv.
    pub command: Vec<String>,

    /// Why this command addresses the issue.
    pub explanation: String,

    /// Risk of applying the fix.
    pub risk_level: RiskLevel,

    /// How likely the fix resolves the issue, 0.0..=1.0.
    pub confidence: f64,

    /// How unlikely the fix breaks something else, 0.0..=1.0.
    pub safety_rating: f64,
}

impl FixSuggestion {
    /// The command as a single displayable shell line.
    pub fn shell_line(&self) -> String {
        self.command.join(" ")
    }
}
