use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Severity;
use crate::scorer::Selection;

/// Point-in-time view of a calculator.
///
/// `severity` and `vector` are only present when every metric is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rating {
    pub score: Option<f64>,
    pub severity: Option<Severity>,
    pub vector: Option<String>,
    pub metrics: Selection,
}

impl Rating {
    pub fn is_rated(&self) -> bool {
        self.score.is_some()
    }
}

/// Finding counts per severity bucket.
///
/// Buckets follow the project dashboard: anything below 4.0, including 0.0
/// and unrated findings, counts as low.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityBreakdown {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityBreakdown {
    pub fn from_scores<I>(scores: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let mut breakdown = Self::default();
        for score in scores {
            breakdown.record(score.unwrap_or(0.0));
        }
        breakdown
    }

    pub fn record(&mut self, score: f64) {
        if score >= 9.0 {
            self.critical += 1;
        } else if score >= 7.0 {
            self.high += 1;
        } else if score >= 4.0 {
            self.medium += 1;
        } else {
            self.low += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// One line of batch input after scoring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatedEntry {
    /// 1-based line number in the input.
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub input: String,
    pub score: Option<f64>,
    pub severity: Option<Severity>,
    pub vector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RatedEntry {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RatingReport {
    pub generated_at: DateTime<Utc>,
    pub entries: Vec<RatedEntry>,
    pub breakdown: SeverityBreakdown,
}

impl RatingReport {
    /// Builds a report; the breakdown skips entries that failed to parse.
    pub fn new(entries: Vec<RatedEntry>) -> Self {
        let breakdown = SeverityBreakdown::from_scores(
            entries.iter().filter(|e| !e.is_error()).map(|e| e.score),
        );
        Self {
            generated_at: Utc::now(),
            entries,
            breakdown,
        }
    }

    pub fn highest_severity(&self) -> Option<Severity> {
        self.entries.iter().filter_map(|e| e.severity).max()
    }

    pub fn error_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_error()).count()
    }

    pub fn unrated_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| !e.is_error() && e.score.is_none())
            .count()
    }
}
