//! Command-line interface parsing
//!
//! This module defines the clap command tree for launchtrack: one subcommand
//! per resource collection plus `stats`, with shared cache/output options and
//! per-launch filter flags.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::filter::LaunchFilter;

/// Track SpaceX launches, rockets, and launchpads from your terminal
#[derive(Parser, Debug)]
#[command(name = "launchtrack")]
#[command(about = "SpaceX launches, rockets, and launchpads, cached locally")]
#[command(version)]
pub struct Cli {
    /// Re-fetch from the API even if a fresh cache entry exists
    #[arg(long, global = true)]
    pub refresh: bool,

    /// Directory for cached API responses
    #[arg(long, value_name = "DIR", default_value = ".cache", global = true)]
    pub cache_dir: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long, value_name = "FILE", global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List launches, optionally filtered
    Launches(LaunchArgs),
    /// List rockets
    Rockets,
    /// List launchpads
    Launchpads,
    /// Aggregate launch statistics
    Stats,
}

/// Filter flags for the `launches` subcommand
#[derive(Args, Debug, Default)]
pub struct LaunchArgs {
    /// Only launches flown on this rocket id
    #[arg(long, value_name = "ID")]
    pub rocket: Option<String>,

    /// Only launches flown from this launchpad id
    #[arg(long, value_name = "ID")]
    pub launchpad: Option<String>,

    /// Only launches with this outcome (true/false)
    #[arg(long, value_name = "BOOL")]
    pub success: Option<bool>,

    /// Only upcoming (true) or historical (false) launches
    #[arg(long, value_name = "BOOL")]
    pub upcoming: Option<bool>,

    /// Only launches on or after this date (YYYY-MM-DD, on date_utc)
    #[arg(long, value_name = "DATE")]
    pub after: Option<NaiveDate>,

    /// Only launches on or before this date (YYYY-MM-DD, on date_utc)
    #[arg(long, value_name = "DATE")]
    pub before: Option<NaiveDate>,

    /// Show at most this many launches
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,
}

impl From<&LaunchArgs> for LaunchFilter {
    fn from(args: &LaunchArgs) -> Self {
        LaunchFilter {
            rocket: args.rocket.clone(),
            launchpad: args.launchpad.clone(),
            success: args.success,
            upcoming: args.upcoming,
            after: args.after,
            before: args.before,
        }
    }
}
