use serde::{Deserialize, Serialize};

/// Qualitative CVSS severity rating.
///
/// Ordered from least to most severe, so ratings can be compared against a
/// `--fail-on` threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[serde(rename = "None", alias = "none")]
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Maps a base score onto its rating.
    ///
    /// Thresholds belong to the higher bucket: 4.0 is medium, 7.0 is high
    /// and 9.0 is critical.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s == 0.0 => Severity::None,
            s if s < 4.0 => Severity::Low,
            s if s < 7.0 => Severity::Medium,
            s if s < 9.0 => Severity::High,
            _ => Severity::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "None",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Severity::None),
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(format!(
                "Unknown severity: {}. Use 'none', 'low', 'medium', 'high', or 'critical'",
                s
            )),
        }
    }
}

/// Whether `score` is a usable CVSS base score.
pub fn is_valid_score(score: f64) -> bool {
    score.is_finite() && (0.0..=10.0).contains(&score)
}
