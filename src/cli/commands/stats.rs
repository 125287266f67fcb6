//! Stats command implementation.

use crate::cli::args::StatsArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::state::StatsTracker;
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The stats command implementation.
pub struct StatsCommand {
    settings: Settings,
    args: StatsArgs,
}

impl StatsCommand {
    /// Create a new stats command.
    pub fn new(settings: &Settings, args: StatsArgs) -> Self {
        Self {
            settings: settings.clone(),
            args,
        }
    }
}

impl Command for StatsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let stats = StatsTracker::new(&self.settings.data_dir).load()?;

        if self.args.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&stats).unwrap_or_default()
            );
            return Ok(CommandResult::success());
        }

        ui.show_header("Scan Statistics");

        let mut table = Table::new(vec!["Metric", "Value"]);
        table.add_row(vec![
            "Scans performed".to_string(),
            stats.scans_performed.to_string(),
        ]);
        table.add_row(vec![
            "Issues found".to_string(),
            stats.issues_found.to_string(),
        ]);
        table.add_row(vec![
            "Last scan".to_string(),
            stats
                .last_scan
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "never".to_string()),
        ]);
        ui.message(&table.render());

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    #[test]
    fn fresh_stats_show_zero_and_never() {
        let temp = TempDir::new().unwrap();
        let settings = Settings::default().with_data_dir(temp.path());
        let cmd = StatsCommand::new(&settings, StatsArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("never"));
        assert_eq!(ui.headers(), &["Scan Statistics"]);
    }

    #[test]
    fn recorded_scans_appear_in_table() {
        let temp = TempDir::new().unwrap();
        StatsTracker::new(temp.path()).record_scan(3).unwrap();

        let settings = Settings::default().with_data_dir(temp.path());
        let cmd = StatsCommand::new(&settings, StatsArgs::default());
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert!(ui.has_message("Scans performed"));
        assert!(ui.messages().iter().any(|m| m.contains('3')));
    }
}
