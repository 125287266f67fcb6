//! History command implementation.
//!
//! `pydoctor history` shows applied fixes and can print the rollback
//! command for any recorded operation.

use crate::cli::args::HistoryArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::state::{OperationHistory, OperationRecord};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Default number of entries shown.
const DEFAULT_LIMIT: usize = 10;

/// The history command implementation.
pub struct HistoryCommand {
    settings: Settings,
    args: HistoryArgs,
}

impl HistoryCommand {
    /// Create a new history command.
    pub fn new(settings: &Settings, args: HistoryArgs) -> Self {
        Self {
            settings: settings.clone(),
            args,
        }
    }

    /// Format a single operation line.
    fn format_record(record: &OperationRecord) -> String {
        format!(
            "#{} {} - {} ({})",
            record.id,
            record.timestamp.format("%Y-%m-%d %H:%M"),
            record.description,
            record.command.join(" ")
        )
    }
}

impl Command for HistoryCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let history = OperationHistory::new(&self.settings.data_dir);

        if let Some(id) = self.args.rollback {
            let rollback = history.rollback_command(id)?;
            ui.message(&format!("Rollback command: {}", rollback.join(" ")));
            return Ok(CommandResult::success());
        }

        let records = history.recent(self.args.limit.unwrap_or(DEFAULT_LIMIT))?;

        if self.args.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&records).unwrap_or_default()
            );
            return Ok(CommandResult::success());
        }

        if records.is_empty() {
            ui.message("No operations recorded yet.");
            return Ok(CommandResult::success());
        }

        ui.show_header("Operation History");
        for record in records.iter().rev() {
            let line = Self::format_record(record);
            if record.success {
                ui.success(&line);
            } else {
                ui.error(&line);
            }
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PydoctorError;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    fn history_command(temp: &TempDir, args: HistoryArgs) -> HistoryCommand {
        let settings = Settings::default().with_data_dir(temp.path());
        HistoryCommand::new(&settings, args)
    }

    fn seed_history(temp: &TempDir, count: usize) {
        let history = OperationHistory::new(temp.path());
        for i in 0..count {
            history
                .record(
                    "fix",
                    &format!("op {}", i),
                    vec!["pip".into(), "install".into(), format!("pkg{}", i)],
                    i % 2 == 0,
                )
                .unwrap();
        }
    }

    #[test]
    fn empty_history_says_so() {
        let temp = TempDir::new().unwrap();
        let cmd = history_command(&temp, HistoryArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("No operations recorded yet"));
    }

    #[test]
    fn recent_records_shown_newest_first() {
        let temp = TempDir::new().unwrap();
        seed_history(&temp, 3);
        let cmd = history_command(&temp, HistoryArgs::default());
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        // op 0 and op 2 succeeded, op 1 failed
        assert!(ui.successes()[0].contains("op 2"));
        assert!(ui.has_error("op 1"));
        assert_eq!(ui.headers(), &["Operation History"]);
    }

    #[test]
    fn limit_caps_the_listing() {
        let temp = TempDir::new().unwrap();
        seed_history(&temp, 5);
        let cmd = history_command(
            &temp,
            HistoryArgs {
                limit: Some(2),
                ..Default::default()
            },
        );
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        let shown = ui.successes().len() + ui.errors().len();
        assert_eq!(shown, 2);
    }

    #[test]
    fn rollback_prints_inverse_command() {
        let temp = TempDir::new().unwrap();
        seed_history(&temp, 1);
        let cmd = history_command(
            &temp,
            HistoryArgs {
                rollback: Some(1),
                ..Default::default()
            },
        );
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert!(ui.has_message("pip uninstall -y pkg0"));
    }

    #[test]
    fn rollback_unknown_id_errors() {
        let temp = TempDir::new().unwrap();
        let cmd = history_command(
            &temp,
            HistoryArgs {
                rollback: Some(7),
                ..Default::default()
            },
        );
        let mut ui = MockUI::new();

        let err = cmd.execute(&mut ui).unwrap_err();
        assert!(matches!(err, PydoctorError::UnknownOperation { id: 7 }));
    }

    #[test]
    fn format_record_includes_id_and_command() {
        let record = OperationRecord {
            id: 4,
            timestamp: chrono::Utc::now(),
            kind: "fix".to_string(),
            description: "install make".to_string(),
            command: vec!["brew".into(), "install".into(), "make".into()],
            success: true,
        };
        let line = HistoryCommand::format_record(&record);
        assert!(line.starts_with("#4"));
        assert!(line.contains("brew install make"));
    }
}
