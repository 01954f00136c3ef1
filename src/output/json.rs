use crate::model::{RatedEntry, RatingReport};
use anyhow::Result;

pub fn print_json_entries(entries: &[RatedEntry]) -> Result<()> {
    let json = serde_json::to_string_pretty(entries)?;
    println!("{}", json);
    Ok(())
}

pub fn print_json_report(report: &RatingReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{}", json);
    Ok(())
}
