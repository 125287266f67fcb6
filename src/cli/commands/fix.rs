//! Fix command implementation.
//!
//! `pydoctor fix` runs a comprehensive scan, asks the fix oracle for
//! suggestions, and either previews them (`--dry-run`), prints them (no
//! flags), or confirms and applies them one by one (`--interactive`).
//! Every applied command lands in the operation history so it can be
//! reviewed and rolled back later.

use crate::cli::args::FixArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::fixes::{FixOracle, FixSuggestion};
use crate::scanner::SystemScanner;
use crate::state::OperationHistory;
use crate::ui::UserInterface;
use std::process::Command as ProcessCommand;

use super::dispatcher::{Command, CommandResult};

/// The fix command implementation.
pub struct FixCommand {
    settings: Settings,
    args: FixArgs,
}

impl FixCommand {
    /// Create a new fix command.
    pub fn new(settings: &Settings, args: FixArgs) -> Self {
        Self {
            settings: settings.clone(),
            args,
        }
    }

    /// Run a suggestion's command, inheriting stdio so the user sees it.
    fn apply(suggestion: &FixSuggestion) -> bool {
        let Some((program, rest)) = suggestion.command.split_first() else {
            return false;
        };
        match ProcessCommand::new(program).args(rest).status() {
            Ok(status) => status.success(),
            Err(e) => {
                tracing::warn!(command = %suggestion.shell_line(), error = %e, "fix command failed to start");
                false
            }
        }
    }

    fn handle_suggestion(
        &self,
        ui: &mut dyn UserInterface,
        history: &OperationHistory,
        suggestion: &FixSuggestion,
    ) -> Result<()> {
        ui.message(&format!(
            "  {} ({} risk): {}",
            suggestion.description,
            suggestion.risk_level,
            suggestion.shell_line()
        ));

        if !self.args.interactive || self.args.dry_run {
            return Ok(());
        }

        let question = format!("Apply: {}?", suggestion.shell_line());
        if !ui.confirm(&question, false)? {
            return Ok(());
        }

        let succeeded = Self::apply(suggestion);
        history.record(
            "fix",
            &suggestion.description,
            suggestion.command.clone(),
            succeeded,
        )?;

        if succeeded {
            ui.success(&format!("Applied: {}", suggestion.description));
        } else {
            ui.error(&format!("Failed: {}", suggestion.shell_line()));
        }
        Ok(())
    }
}

impl Command for FixCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut scanner = SystemScanner::new(&self.settings);

        let mut spinner = ui.start_spinner("Scanning for issues...");
        let issues = scanner.scan(true);
        spinner.finish_success(&format!("Found {} issue(s)", issues.len()));

        if issues.is_empty() {
            ui.success("No issues found! Your environment is healthy.");
            return Ok(CommandResult::success());
        }

        let oracle = FixOracle::new();
        let history = OperationHistory::new(&self.settings.data_dir);

        for issue in &issues {
            let suggestions = oracle.suggest(issue);
            if suggestions.is_empty() {
                continue;
            }

            ui.message(&format!("\n[{}] {}", issue.severity, issue.description));
            for suggestion in &suggestions {
                self.handle_suggestion(ui, &history, suggestion)?;
            }
        }

        if self.args.dry_run {
            ui.message("\nDry run: nothing was executed.");
        } else if !self.args.interactive {
            ui.message("\nRun with --interactive to apply fixes.");
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixes::RiskLevel;
    use crate::state::OperationHistory;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    fn echo_suggestion() -> FixSuggestion {
        FixSuggestion {
            description: "Echo something".to_string(),
            command: vec!["echo".into(), "applied".into()],
            explanation: "Prints a line".to_string(),
            risk_level: RiskLevel::Low,
            confidence: 1.0,
            safety_rating: 1.0,
        }
    }

    fn fix_command(temp: &TempDir, args: FixArgs) -> FixCommand {
        let settings = Settings {
            pyenv_root: Some(temp.path().join("no-pyenv")),
            ..Settings::default()
        }
        .with_data_dir(&temp.path().join("data"));
        FixCommand::new(&settings, args)
    }

    #[test]
    fn dry_run_never_prompts_or_records() {
        let temp = TempDir::new().unwrap();
        let cmd = fix_command(
            &temp,
            FixArgs {
                dry_run: true,
                interactive: true,
            },
        );
        let history = OperationHistory::new(&temp.path().join("data"));
        let mut ui = MockUI::new();

        cmd.handle_suggestion(&mut ui, &history, &echo_suggestion())
            .unwrap();

        assert!(ui.confirms_shown().is_empty());
        assert!(history.all().unwrap().is_empty());
        assert!(ui.has_message("Echo something"));
    }

    #[test]
    fn declined_confirmation_records_nothing() {
        let temp = TempDir::new().unwrap();
        let cmd = fix_command(
            &temp,
            FixArgs {
                dry_run: false,
                interactive: true,
            },
        );
        let history = OperationHistory::new(&temp.path().join("data"));
        let mut ui = MockUI::new();
        ui.queue_confirm_answers(vec![false]);

        cmd.handle_suggestion(&mut ui, &history, &echo_suggestion())
            .unwrap();

        assert_eq!(ui.confirms_shown().len(), 1);
        assert!(history.all().unwrap().is_empty());
    }

    #[test]
    fn accepted_fix_is_executed_and_recorded() {
        let temp = TempDir::new().unwrap();
        let cmd = fix_command(
            &temp,
            FixArgs {
                dry_run: false,
                interactive: true,
            },
        );
        let history = OperationHistory::new(&temp.path().join("data"));
        let mut ui = MockUI::new();
        ui.queue_confirm_answers(vec![true]);

        cmd.handle_suggestion(&mut ui, &history, &echo_suggestion())
            .unwrap();

        let records = history.all().unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].success);
        assert_eq!(records[0].kind, "fix");
        assert!(ui.has_success("Applied"));
    }

    #[test]
    fn failing_fix_is_recorded_as_unsuccessful() {
        let temp = TempDir::new().unwrap();
        let cmd = fix_command(
            &temp,
            FixArgs {
                dry_run: false,
                interactive: true,
            },
        );
        let history = OperationHistory::new(&temp.path().join("data"));
        let mut ui = MockUI::new();
        ui.queue_confirm_answers(vec![true]);

        let bad = FixSuggestion {
            command: vec!["/nonexistent/fixer".into()],
            ..echo_suggestion()
        };
        cmd.handle_suggestion(&mut ui, &history, &bad).unwrap();

        let records = history.all().unwrap();
        assert_eq!(records.len(), 1);
        assert!(!records[0].success);
        assert!(ui.has_error("Failed"));
    }

    #[test]
    fn apply_empty_command_fails_cleanly() {
        let suggestion = FixSuggestion {
            command: Vec::new(),
            ..echo_suggestion()
        };
        assert!(!FixCommand::apply(&suggestion));
    }
}
