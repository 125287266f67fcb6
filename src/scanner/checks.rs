//! Deep-scan checks.
//!
//! The comprehensive pass runs three independent checks, each appending
//! zero or more [`Issue`]s: missing build tools, unwritable directories,
//! and installation sprawl. They run in that order, and none of them can
//! fail the scan.

use crate::platform::{self, OsFamily};
use crate::scanner::models::Issue;
use crate::scanner::probe;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Number of installations above which sprawl is reported.
const SPRAWL_THRESHOLD: usize = 3;

/// Run every deep-scan check in order and collect the findings.
pub fn run(
    installation_count: usize,
    family: OsFamily,
    home: &Path,
    probe_timeout: Duration,
) -> Vec<Issue> {
    let mut issues = check_dependencies(family, probe_timeout);
    issues.extend(check_permissions(family, home));
    issues.extend(check_version_sprawl(installation_count));
    issues
}

/// Check the platform's expected build tools for presence on PATH.
pub fn check_dependencies(family: OsFamily, probe_timeout: Duration) -> Vec<Issue> {
    check_dependencies_with(family, |tool| probe::command_exists(tool, probe_timeout))
}

/// Dependency check with a custom presence function.
///
/// This allows testing without depending on the tools installed on the host.
pub fn check_dependencies_with<F>(family: OsFamily, exists: F) -> Vec<Issue>
where
    F: Fn(&str) -> bool,
{
    family
        .expected_build_tools()
        .into_iter()
        .filter(|tool| !exists(tool))
        .map(Issue::missing_dependency)
        .collect()
}

/// Check the platform's Python-relevant directories for writability.
///
/// Skipped when running as root: root can write anywhere, so a marker-file
/// probe would hide the permission problems a regular user hits.
pub fn check_permissions(family: OsFamily, home: &Path) -> Vec<Issue> {
    if platform::is_elevated() {
        tracing::debug!("running as root, skipping permission checks");
        return Vec::new();
    }
    check_directories(&family.writable_dirs(home))
}

/// Probe each existing directory with a create-then-remove marker file.
///
/// Only a permission fault becomes an Issue. Any other fault (disk full,
/// read-only filesystem, a race on the marker) is logged and dropped:
/// this is a best-effort side probe, and reporting e.g. ENOSPC as a
/// permission finding would be wrong.
pub fn check_directories(dirs: &[PathBuf]) -> Vec<Issue> {
    let mut issues = Vec::new();
    for dir in dirs {
        if !dir.exists() {
            continue;
        }
        match try_write_marker(dir) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                issues.push(Issue::permission_denied(dir));
            }
            Err(e) => {
                tracing::debug!(dir = %dir.display(), error = %e, "writability probe failed");
            }
        }
    }
    issues
}

fn try_write_marker(dir: &Path) -> io::Result<()> {
    let marker = dir.join(".pydoctor_write_test");
    fs::write(&marker, b"")?;
    fs::remove_file(&marker)?;
    Ok(())
}

/// Advisory sprawl heuristic: more than [`SPRAWL_THRESHOLD`] discovered
/// installations yields a single low-severity finding.
pub fn check_version_sprawl(installation_count: usize) -> Option<Issue> {
    if installation_count > SPRAWL_THRESHOLD {
        Some(Issue::version_sprawl(installation_count))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::models::{IssueKind, Severity};
    use tempfile::TempDir;

    #[test]
    fn all_tools_present_yields_no_issues() {
        let issues = check_dependencies_with(OsFamily::Linux, |_| true);
        assert!(issues.is_empty());
    }

    #[test]
    fn missing_tool_yields_medium_issue_with_name() {
        let issues = check_dependencies_with(OsFamily::Linux, |tool| tool != "make");

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::MissingDependency);
        assert_eq!(issues[0].severity, Severity::Medium);
        assert_eq!(issues[0].details["dependency_name"], "make");
    }

    #[test]
    fn macos_reports_missing_brew() {
        let issues = check_dependencies_with(OsFamily::MacOs, |tool| tool != "brew");

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].details["dependency_name"], "brew");
    }

    #[test]
    fn every_missing_tool_gets_its_own_issue() {
        let issues = check_dependencies_with(OsFamily::Linux, |_| false);
        // make, gcc, git, apt-get
        assert_eq!(issues.len(), 4);
    }

    #[test]
    fn writable_directory_yields_no_issue() {
        let temp = TempDir::new().unwrap();
        let issues = check_directories(&[temp.path().to_path_buf()]);
        assert!(issues.is_empty());
    }

    #[test]
    fn missing_directory_is_skipped() {
        let issues = check_directories(&[PathBuf::from("/nonexistent/site-packages")]);
        assert!(issues.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn readonly_directory_yields_permission_issue() {
        use std::os::unix::fs::PermissionsExt;

        if crate::platform::is_elevated() {
            // Root writes anywhere; the probe cannot fail here.
            return;
        }

        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("locked");
        fs::create_dir(&dir).unwrap();
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o555)).unwrap();

        let issues = check_directories(&[dir.clone()]);

        fs::set_permissions(&dir, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::PermissionError);
        assert_eq!(issues[0].severity, Severity::High);
        assert_eq!(issues[0].details["path"], dir.to_string_lossy().as_ref());
    }

    #[test]
    fn sprawl_below_threshold_is_quiet() {
        assert!(check_version_sprawl(0).is_none());
        assert!(check_version_sprawl(3).is_none());
    }

    #[test]
    fn sprawl_above_threshold_reports_count() {
        let issue = check_version_sprawl(4).unwrap();
        assert_eq!(issue.kind, IssueKind::VersionConflict);
        assert_eq!(issue.severity, Severity::Low);
        assert_eq!(issue.details["count"], 4);
    }

    #[test]
    fn run_orders_dependency_issues_before_sprawl() {
        // With a fake home and no real tools missing we can't force a
        // dependency issue here, but the sprawl issue must come last.
        let temp = TempDir::new().unwrap();
        let issues = run(10, OsFamily::Other, temp.path(), Duration::from_secs(1));

        let last = issues.last().expect("sprawl issue expected");
        assert_eq!(last.kind, IssueKind::VersionConflict);
    }
}
