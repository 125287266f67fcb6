//! Error types for pydoctor operations.
//!
//! This module defines [`PydoctorError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `PydoctorError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `PydoctorError::Other`) for unexpected errors
//! - Probe failures inside the scanner never surface here: the scanner
//!   degrades them to "Unknown"/"Error" values locally (see
//!   [`crate::scanner::probe`])

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pydoctor operations.
#[derive(Debug, Error)]
pub enum PydoctorError {
    /// Failed to parse the settings file.
    #[error("Failed to parse settings at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Failed to parse a persisted state file (history, stats).
    #[error("Failed to parse state at {path}: {message}")]
    StateParseError { path: PathBuf, message: String },

    /// A remediation command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// Referenced operation does not exist in history.
    #[error("Unknown operation id: {id}")]
    UnknownOperation { id: u64 },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for pydoctor operations.
pub type Result<T> = std::result::Result<T, PydoctorError>;
