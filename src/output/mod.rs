mod cli;
mod json;

pub use cli::{format_score, print_catalog, print_cli_entries, print_cli_report, severity_label};
pub use json::{print_json_entries, print_json_report};

use crate::model::{RatedEntry, RatingReport};
use anyhow::Result;

/// Output format for ratings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table format
    Table,
    /// JSON format for programmatic use
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use 'table' or 'json'", s)),
        }
    }
}

/// Prints individually scored vectors (the `score` command).
pub fn print_entries(entries: &[RatedEntry], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_cli_entries(entries),
        OutputFormat::Json => print_json_entries(entries),
    }
}

pub fn print_report(report: &RatingReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_cli_report(report),
        OutputFormat::Json => print_json_report(report),
    }
}
