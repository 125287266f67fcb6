//! Operation history with rollback-command generation.
//!
//! Every remediation command pydoctor executes is recorded here, so the
//! user can review what changed and get the inverse command for the
//! package-manager operations that have one.

use crate::error::{PydoctorError, Result};
use crate::state::store::JsonStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One applied operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationRecord {
    /// Monotonically increasing id, starting at 1.
    pub id: u64,

    /// When the operation ran.
    pub timestamp: DateTime<Utc>,

    /// Operation category (e.g. "fix").
    pub kind: String,

    /// Human-readable summary.
    pub description: String,

    /// The executed command as argv.
    pub command: Vec<String>,

    /// Whether the command exited successfully.
    pub success: bool,
}

/// Persistent log of applied operations.
pub struct OperationHistory {
    store: JsonStore,
}

impl OperationHistory {
    /// Open the history file under the given data directory.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            store: JsonStore::new(data_dir.join("history.json")),
        }
    }

    /// Append an operation and return the stored record.
    pub fn record(
        &self,
        kind: &str,
        description: &str,
        command: Vec<String>,
        success: bool,
    ) -> Result<OperationRecord> {
        let mut records = self.all()?;
        let record = OperationRecord {
            id: records.last().map(|r| r.id + 1).unwrap_or(1),
            timestamp: Utc::now(),
            kind: kind.to_string(),
            description: description.to_string(),
            command,
            success,
        };
        records.push(record.clone());
        self.store.save(&records)?;
        Ok(record)
    }

    /// All recorded operations, oldest first.
    pub fn all(&self) -> Result<Vec<OperationRecord>> {
        Ok(self.store.load()?.unwrap_or_default())
    }

    /// The most recent `limit` operations, oldest first.
    pub fn recent(&self, limit: usize) -> Result<Vec<OperationRecord>> {
        let records = self.all()?;
        let skip = records.len().saturating_sub(limit);
        Ok(records.into_iter().skip(skip).collect())
    }

    /// Build the rollback command for a recorded operation.
    pub fn rollback_command(&self, id: u64) -> Result<Vec<String>> {
        let records = self.all()?;
        let record = records
            .iter()
            .find(|r| r.id == id)
            .ok_or(PydoctorError::UnknownOperation { id })?;
        Ok(generate_rollback(&record.command))
    }
}

/// Map a command to its inverse where one exists.
///
/// `pip install` and `brew install` have clean inverses. `chmod` would
/// need the original mode, which isn't recorded, so the user is pointed
/// at manual restoration. Everything else gets an explicit
/// no-automated-rollback marker rather than a guess.
fn generate_rollback(command: &[String]) -> Vec<String> {
    match command {
        [pip, install, rest @ ..] if pip == "pip" && install == "install" && !rest.is_empty() => {
            let mut cmd = vec!["pip".to_string(), "uninstall".to_string(), "-y".to_string()];
            cmd.extend(rest.iter().cloned());
            cmd
        }
        [brew, install, rest @ ..] if brew == "brew" && install == "install" && !rest.is_empty() => {
            let mut cmd = vec!["brew".to_string(), "uninstall".to_string()];
            cmd.extend(rest.iter().cloned());
            cmd
        }
        [chmod, _, targets @ ..] if chmod == "chmod" && !targets.is_empty() => {
            vec![
                "echo".to_string(),
                format!("Manual restoration needed for: {}", targets.join(" ")),
            ]
        }
        [] => vec!["echo".to_string(), "No rollback available".to_string()],
        _ => vec![
            "echo".to_string(),
            format!("No automated rollback for: {}", command.join(" ")),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cmd(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn record_assigns_sequential_ids() {
        let temp = TempDir::new().unwrap();
        let history = OperationHistory::new(temp.path());

        let first = history
            .record("fix", "install make", cmd(&["brew", "install", "make"]), true)
            .unwrap();
        let second = history
            .record("fix", "install gcc", cmd(&["brew", "install", "gcc"]), true)
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn history_persists_across_instances() {
        let temp = TempDir::new().unwrap();
        {
            let history = OperationHistory::new(temp.path());
            history
                .record("fix", "install git", cmd(&["brew", "install", "git"]), true)
                .unwrap();
        }

        let reopened = OperationHistory::new(temp.path());
        let records = reopened.all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "install git");
    }

    #[test]
    fn recent_returns_last_entries_in_order() {
        let temp = TempDir::new().unwrap();
        let history = OperationHistory::new(temp.path());
        for i in 0..5 {
            history
                .record("fix", &format!("op {}", i), cmd(&["echo", "x"]), true)
                .unwrap();
        }

        let recent = history.recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].description, "op 3");
        assert_eq!(recent[1].description, "op 4");
    }

    #[test]
    fn recent_with_large_limit_returns_everything() {
        let temp = TempDir::new().unwrap();
        let history = OperationHistory::new(temp.path());
        history
            .record("fix", "only op", cmd(&["echo", "x"]), true)
            .unwrap();

        assert_eq!(history.recent(100).unwrap().len(), 1);
    }

    #[test]
    fn pip_install_rolls_back_to_uninstall() {
        assert_eq!(
            generate_rollback(&cmd(&["pip", "install", "requests"])),
            cmd(&["pip", "uninstall", "-y", "requests"])
        );
    }

    #[test]
    fn brew_install_rolls_back_to_uninstall() {
        assert_eq!(
            generate_rollback(&cmd(&["brew", "install", "make"])),
            cmd(&["brew", "uninstall", "make"])
        );
    }

    #[test]
    fn chmod_needs_manual_restoration() {
        let rollback = generate_rollback(&cmd(&["chmod", "755", "/opt/py"]));
        assert_eq!(rollback[0], "echo");
        assert!(rollback[1].contains("Manual restoration"));
        assert!(rollback[1].contains("/opt/py"));
    }

    #[test]
    fn unknown_command_has_no_automated_rollback() {
        let rollback = generate_rollback(&cmd(&["systemctl", "restart", "foo"]));
        assert_eq!(rollback[0], "echo");
        assert!(rollback[1].contains("No automated rollback"));
    }

    #[test]
    fn empty_command_has_no_rollback() {
        let rollback = generate_rollback(&[]);
        assert!(rollback[1].contains("No rollback available"));
    }

    #[test]
    fn rollback_command_for_unknown_id_errors() {
        let temp = TempDir::new().unwrap();
        let history = OperationHistory::new(temp.path());

        let err = history.rollback_command(99).unwrap_err();
        assert!(matches!(err, PydoctorError::UnknownOperation { id: 99 }));
    }

    #[test]
    fn rollback_command_for_recorded_operation() {
        let temp = TempDir::new().unwrap();
        let history = OperationHistory::new(temp.path());
        let record = history
            .record("fix", "install make", cmd(&["pip", "install", "foo"]), true)
            .unwrap();

        let rollback = history.rollback_command(record.id).unwrap();
        assert_eq!(rollback, cmd(&["pip", "uninstall", "-y", "foo"]));
    }
}
