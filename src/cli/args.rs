//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pydoctor - Diagnose and repair local Python installations.
#[derive(Debug, Parser)]
#[command(name = "pydoctor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the data directory (overrides ~/.pydoctor)
    #[arg(long, global = true, env = "PYDOCTOR_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan for Python installations and issues (default if no command specified)
    Scan(ScanArgs),

    /// Suggest and optionally apply fixes for detected issues
    Fix(FixArgs),

    /// Show applied-fix history
    History(HistoryArgs),

    /// Show scan statistics
    Stats(StatsArgs),
}

/// Arguments for the `scan` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ScanArgs {
    /// Run the comprehensive deep scan (dependency, permission, sprawl checks)
    #[arg(long)]
    pub full: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `fix` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct FixArgs {
    /// Preview fix commands without executing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Confirm and apply each suggested fix
    #[arg(short, long)]
    pub interactive: bool,
}

/// Arguments for the `history` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct HistoryArgs {
    /// Number of entries to show
    #[arg(long)]
    pub limit: Option<usize>,

    /// Print the rollback command for an operation id
    #[arg(long, value_name = "ID")]
    pub rollback: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `stats` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
