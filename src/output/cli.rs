use crate::model::{RatedEntry, RatingReport, Severity};
use crate::scorer::{MetricCode, Weight};
use anyhow::Result;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "Line")]
    line: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Vector")]
    vector: String,
    #[tabled(rename = "Label")]
    label: String,
}

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Renders a score to one decimal, or `-` when unrated.
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(s) => format!("{:.1}", s),
        None => "-".to_string(),
    }
}

/// Uppercase severity, or `Not Rated`.
pub fn severity_label(severity: Option<Severity>) -> String {
    match severity {
        Some(s) => s.label(),
        None => "Not Rated".to_string(),
    }
}

fn format_severity(severity: Option<Severity>) -> String {
    let label = severity_label(severity);
    match severity {
        Some(Severity::Critical) => format!("\x1b[31m{}\x1b[0m", label),
        Some(Severity::High) => format!("\x1b[91m{}\x1b[0m", label),
        Some(Severity::Medium) => format!("\x1b[33m{}\x1b[0m", label),
        Some(Severity::Low) => format!("\x1b[32m{}\x1b[0m", label),
        Some(Severity::None) | None => label,
    }
}

fn entry_row(entry: &RatedEntry) -> EntryRow {
    let vector = match (&entry.vector, &entry.error) {
        (Some(v), _) => v.clone(),
        (None, Some(_)) => format!("{} (invalid)", truncate(&entry.input, 50)),
        (None, None) => format!("{} (incomplete)", truncate(&entry.input, 50)),
    };

    EntryRow {
        line: entry.line.to_string(),
        score: format_score(entry.score),
        severity: format_severity(entry.severity),
        vector,
        label: entry
            .label
            .as_deref()
            .map(|l| truncate(l, 40))
            .unwrap_or_else(|| "-".to_string()),
    }
}

pub fn print_cli_entries(entries: &[RatedEntry]) -> Result<()> {
    for entry in entries {
        if let Some(err) = &entry.error {
            eprintln!("Error: {}", err);
            continue;
        }

        println!("Score:    {}", format_score(entry.score));
        println!("Severity: {}", format_severity(entry.severity));
        match &entry.vector {
            Some(v) => println!("Vector:   {}", v),
            None => println!("Vector:   {} (incomplete)", entry.input),
        }
        println!();
    }
    Ok(())
}

pub fn print_cli_report(report: &RatingReport) -> Result<()> {
    println!();
    println!(
        "Rated at: {}",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();

    if report.entries.is_empty() {
        println!("No vectors found.");
        return Ok(());
    }

    let mut entries: Vec<&RatedEntry> = report.entries.iter().collect();
    // Highest score first; unrated and invalid lines last.
    entries.sort_by(|a, b| {
        b.score
            .unwrap_or(-1.0)
            .total_cmp(&a.score.unwrap_or(-1.0))
            .then(a.line.cmp(&b.line))
    });

    let rows: Vec<EntryRow> = entries.into_iter().map(entry_row).collect();
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);

    println!();
    print_summary(report);

    Ok(())
}

fn print_summary(report: &RatingReport) {
    let b = &report.breakdown;

    println!("Summary:");
    println!("  Total vectors: {}", report.entries.len());
    if b.is_empty() {
        println!("  No findings yet");
    } else {
        println!(
            "  Findings: {} critical, {} high, {} medium, {} low",
            b.critical, b.high, b.medium, b.low
        );
    }

    let unrated = report.unrated_count();
    if unrated > 0 {
        println!("  Incomplete vectors: {}", unrated);
    }
    let errors = report.error_count();
    if errors > 0 {
        println!("  Invalid vectors: {}", errors);
    }
}

/// Lists every metric and its values (the `metrics` command).
pub fn print_catalog() {
    let rows: Vec<MetricRow> = MetricCode::ALL
        .iter()
        .flat_map(|metric| {
            let def = metric.definition();
            def.values.iter().map(move |v| MetricRow {
                metric: format!("{} ({})", def.name, metric),
                value: v.code.to_string(),
                name: v.name.to_string(),
                weight: format_weight(&v.weight),
                description: v.description.to_string(),
            })
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);
}

fn format_weight(weight: &Weight) -> String {
    match weight {
        Weight::Scalar(w) => format!("{}", w),
        Weight::Privilege { unchanged, changed } => {
            format!("{} (S:U) / {} (S:C)", unchanged, changed)
        }
        Weight::Scope(_) => "-".to_string(),
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(Some(9.8)), "9.8");
        assert_eq!(format_score(Some(10.0)), "10.0");
        assert_eq!(format_score(Some(0.0)), "0.0");
        assert_eq!(format_score(None), "-");
    }

    #[test]
    fn test_severity_label() {
        assert_eq!(severity_label(Some(Severity::Critical)), "CRITICAL");
        assert_eq!(severity_label(Some(Severity::None)), "NONE");
        assert_eq!(severity_label(None), "Not Rated");
    }

    #[test]
    fn test_format_weight() {
        assert_eq!(format_weight(&Weight::Scalar(0.85)), "0.85");
        assert_eq!(
            format_weight(&Weight::Privilege {
                unchanged: 0.62,
                changed: 0.68
            }),
            "0.62 (S:U) / 0.68 (S:C)"
        );
        assert_eq!(format_weight(&Weight::Scope(true)), "-");
    }

    #[test]
    fn test_entry_row_marks_invalid_and_incomplete() {
        let mut entry = RatedEntry {
            line: 2,
            label: Some("IDOR on /api/users".to_string()),
            input: "CVSS:3.1/AV:N".to_string(),
            score: None,
            severity: None,
            vector: None,
            error: None,
        };
        let row = entry_row(&entry);
        assert_eq!(row.vector, "CVSS:3.1/AV:N (incomplete)");
        assert_eq!(row.score, "-");
        assert_eq!(row.severity, "Not Rated");

        entry.error = Some("bad".to_string());
        assert_eq!(entry_row(&entry).vector, "CVSS:3.1/AV:N (invalid)");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer label", 10), "a much ...");
    }
}
