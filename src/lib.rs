//! pydoctor - Diagnose and repair local Python installations.
//!
//! pydoctor inventories the Python interpreters reachable on a host,
//! flags configuration issues (missing build tools, permission problems,
//! version sprawl), and offers canned remediation commands.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings loading
//! - [`error`] - Error types and result aliases
//! - [`fixes`] - Remediation suggestions for scan issues
//! - [`platform`] - OS family detection
//! - [`scanner`] - Installation discovery and issue classification
//! - [`state`] - Operation history and scan statistics
//! - [`ui`] - Terminal output, spinners, and tables
//!
//! # Example
//!
//! ```no_run
//! use pydoctor::config::Settings;
//! use pydoctor::scanner::SystemScanner;
//!
//! let settings = Settings::default();
//! let mut scanner = SystemScanner::new(&settings);
//! let issues = scanner.scan(true);
//! for installation in scanner.installations() {
//!     println!("{} ({})", installation.path.display(), installation.provider);
//! }
//! println!("{} issue(s)", issues.len());
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod fixes;
pub mod platform;
pub mod scanner;
pub mod state;
pub mod ui;

pub use error::{PydoctorError, Result};
