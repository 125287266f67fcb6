//! Scan command implementation.
//!
//! `pydoctor scan` discovers Python installations, optionally runs the
//! deep scan, shows the results, and records the scan in the stats file.

use crate::cli::args::ScanArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::scanner::models::{Issue, PythonInstallation, Severity};
use crate::scanner::SystemScanner;
use crate::state::StatsTracker;
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The scan command implementation.
pub struct ScanCommand {
    settings: Settings,
    args: ScanArgs,
}

impl ScanCommand {
    /// Create a new scan command.
    pub fn new(settings: &Settings, args: ScanArgs) -> Self {
        Self {
            settings: settings.clone(),
            args,
        }
    }

    fn show_installations(ui: &mut dyn UserInterface, installations: &[PythonInstallation]) {
        if installations.is_empty() {
            ui.warning("No Python installations found");
            return;
        }

        let mut table = Table::new(vec!["Path", "Version", "Provider", "Status"]);
        for install in installations {
            table.add_row(vec![
                install.path.display().to_string(),
                install.version.clone(),
                install.provider.to_string(),
                if install.is_valid { "ok" } else { "broken" }.to_string(),
            ]);
        }
        ui.message(&table.render());
    }

    fn show_issues(ui: &mut dyn UserInterface, issues: &[Issue], comprehensive: bool) {
        if issues.is_empty() {
            if comprehensive {
                ui.success("No issues found");
            }
            return;
        }

        ui.message("");
        for issue in issues {
            let line = format!("[{}] {}", issue.severity, issue.description);
            match issue.severity {
                Severity::Low => ui.message(&line),
                Severity::Medium => ui.warning(&line),
                Severity::High | Severity::Critical => ui.error(&line),
            }
        }
    }
}

impl Command for ScanCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut scanner = SystemScanner::new(&self.settings);

        let mut spinner = ui.start_spinner("Scanning environment...");
        let issues = scanner.scan(self.args.full);
        let installations = scanner.installations();
        spinner.finish_success(&format!(
            "Found {} Python installation(s)",
            installations.len()
        ));

        // A failed stats write shouldn't fail the scan the user asked for.
        let tracker = StatsTracker::new(&self.settings.data_dir);
        if let Err(e) = tracker.record_scan(issues.len() as u64) {
            tracing::warn!(error = %e, "could not record scan stats");
        }

        if self.args.json {
            let doc = serde_json::json!({
                "installations": installations,
                "issues": issues,
                "summary": {
                    "total_installations": installations.len(),
                    "total_issues": issues.len(),
                },
            });
            println!("{}", serde_json::to_string_pretty(&doc).unwrap_or_default());
            return Ok(CommandResult::success());
        }

        Self::show_installations(ui, installations);
        Self::show_issues(ui, &issues, self.args.full);

        Ok(CommandResult::success())
    }
}
