//! Output rendering for CLI commands
//!
//! Turns record lists and statistics into console tables, JSON, or CSV.

mod export;
mod table;

pub use export::{launchpads_csv, launches_csv, rockets_csv, to_json, ExportError};
pub use table::{launches_table, launchpads_table, rockets_table, stats_tables};
