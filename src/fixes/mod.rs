//! Remediation suggestions for scan issues.

pub mod oracle;
pub mod suggestion;

pub use oracle::FixOracle;
pub use suggestion::{FixSuggestion, RiskLevel};
