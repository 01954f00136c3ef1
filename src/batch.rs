//! Rating many vectors at once.
//!
//! Input is line oriented: the first token of each line is a vector and the
//! rest of the line, if any, is a free-form label such as a writeup title.
//! Blank lines and `#` comments are skipped.
//!
//! ```text
//! # project findings
//! CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H  SQL injection in login
//! CVSS:3.1/AV:N/AC:L/PR:N/UI:R/S:C/C:L/I:L/A:N  Reflected XSS
//! ```

use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::config::IgnoreConfig;
use crate::model::{RatedEntry, RatingReport};
use crate::scorer::{is_valid_vector, CvssCalculator};

/// A non-empty, non-comment input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchLine<'a> {
    pub line: usize,
    pub vector: &'a str,
    pub label: Option<&'a str>,
}

pub fn parse_lines(input: &str) -> Vec<BatchLine<'_>> {
    input
        .lines()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                return None;
            }

            let (vector, label) = match trimmed.split_once(char::is_whitespace) {
                Some((vector, rest)) => {
                    let rest = rest.trim();
                    (vector, (!rest.is_empty()).then_some(rest))
                }
                None => (trimmed, None),
            };

            Some(BatchLine {
                line: idx + 1,
                vector,
                label,
            })
        })
        .collect()
}

/// Scores a single line with its own calculator.
pub fn rate_line(line: &BatchLine<'_>) -> RatedEntry {
    let mut calc = CvssCalculator::new();
    let mut entry = RatedEntry {
        line: line.line,
        label: line.label.map(str::to_string),
        input: line.vector.to_string(),
        score: None,
        severity: None,
        vector: None,
        error: None,
    };

    match calc.parse_vector(line.vector) {
        Ok(_) => {
            let rating = calc.data();
            if !rating.is_rated() {
                debug!(line = line.line, "incomplete vector");
            } else if !is_valid_vector(line.vector) {
                debug!(line = line.line, "vector scored but is not canonical");
            }
            entry.score = rating.score;
            entry.severity = rating.severity;
            entry.vector = rating.vector;
        }
        Err(e) => {
            debug!(line = line.line, error = %e, "unparseable vector");
            entry.error = Some(e.to_string());
        }
    }

    entry
}

/// Rates every line of `input`, skipping vectors matched by `ignore`.
pub fn rate_document(input: &str, ignore: &IgnoreConfig) -> RatingReport {
    let entries = parse_lines(input)
        .iter()
        .filter(|line| {
            let ignored = ignore.should_ignore_vector(line.vector);
            if ignored {
                debug!(line = line.line, vector = line.vector, "vector ignored by config");
            }
            !ignored
        })
        .map(rate_line)
        .collect();

    RatingReport::new(entries)
}

/// Reads batch input from `path`, or from stdin for `-` or no path.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => fs::read_to_string(p)
            .with_context(|| format!("Failed to read {}", p.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}
