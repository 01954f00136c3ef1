//! Static CVSS 3.1 base metric catalog.
//!
//! Every metric and every value it can take lives in one immutable table.
//! Nothing outside this table is a valid code.

use serde::{Deserialize, Serialize};

/// The eight CVSS 3.1 base metrics, in vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricCode {
    AV,
    AC,
    PR,
    UI,
    S,
    C,
    I,
    A,
}

impl MetricCode {
    /// All metrics in the order they appear in a vector string.
    pub const ALL: [MetricCode; 8] = [
        MetricCode::AV,
        MetricCode::AC,
        MetricCode::PR,
        MetricCode::UI,
        MetricCode::S,
        MetricCode::C,
        MetricCode::I,
        MetricCode::A,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricCode::AV => "AV",
            MetricCode::AC => "AC",
            MetricCode::PR => "PR",
            MetricCode::UI => "UI",
            MetricCode::S => "S",
            MetricCode::C => "C",
            MetricCode::I => "I",
            MetricCode::A => "A",
        }
    }

    /// Looks up a metric by its vector abbreviation. Matching is exact.
    pub fn from_code(code: &str) -> Option<Self> {
        MetricCode::ALL.into_iter().find(|m| m.as_str() == code)
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }

    pub fn definition(&self) -> &'static MetricDefinition {
        &CATALOG[self.index()]
    }
}

impl std::fmt::Display for MetricCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Numeric contribution of a metric value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Weight {
    Scalar(f64),
    /// Privileges Required weighs differently depending on Scope.
    Privilege { unchanged: f64, changed: f64 },
    /// Scope only selects a formula branch.
    Scope(bool),
}

impl Weight {
    /// Resolves the arithmetic weight. `None` for Scope.
    pub fn resolve(&self, scope_changed: bool) -> Option<f64> {
        match *self {
            Weight::Scalar(w) => Some(w),
            Weight::Privilege { unchanged, changed } => {
                Some(if scope_changed { changed } else { unchanged })
            }
            Weight::Scope(_) => None,
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct MetricValue {
    pub code: &'static str,
    pub name: &'static str,
    pub weight: Weight,
    pub description: &'static str,
}

#[derive(Debug)]
pub struct MetricDefinition {
    pub code: MetricCode,
    pub name: &'static str,
    pub values: &'static [MetricValue],
}

impl MetricDefinition {
    pub fn value(&self, code: &str) -> Option<&'static MetricValue> {
        self.values.iter().find(|v| v.code == code)
    }
}

const fn scalar(
    code: &'static str,
    name: &'static str,
    weight: f64,
    description: &'static str,
) -> MetricValue {
    MetricValue {
        code,
        name,
        weight: Weight::Scalar(weight),
        description,
    }
}

/// Indexed by `MetricCode as usize`.
pub static CATALOG: [MetricDefinition; 8] = [
    MetricDefinition {
        code: MetricCode::AV,
        name: "Attack Vector",
        values: &[
            scalar("N", "Network", 0.85, "Exploitable remotely"),
            scalar("A", "Adjacent", 0.62, "Local network access required"),
            scalar("L", "Local", 0.55, "Local access required"),
            scalar("P", "Physical", 0.2, "Physical access required"),
        ],
    },
    MetricDefinition {
        code: MetricCode::AC,
        name: "Attack Complexity",
        values: &[
            scalar("L", "Low", 0.77, "No special conditions"),
            scalar("H", "High", 0.44, "Special conditions required"),
        ],
    },
    MetricDefinition {
        code: MetricCode::PR,
        name: "Privileges Required",
        values: &[
            MetricValue {
                code: "N",
                name: "None",
                weight: Weight::Privilege {
                    unchanged: 0.85,
                    changed: 0.85,
                },
                description: "No privileges needed",
            },
            MetricValue {
                code: "L",
                name: "Low",
                weight: Weight::Privilege {
                    unchanged: 0.62,
                    changed: 0.68,
                },
                description: "Basic user privileges",
            },
            MetricValue {
                code: "H",
                name: "High",
                weight: Weight::Privilege {
                    unchanged: 0.27,
                    changed: 0.50,
                },
                description: "Admin privileges required",
            },
        ],
    },
    MetricDefinition {
        code: MetricCode::UI,
        name: "User Interaction",
        values: &[
            scalar("N", "None", 0.85, "No user interaction needed"),
            scalar("R", "Required", 0.62, "User must take action"),
        ],
    },
    MetricDefinition {
        code: MetricCode::S,
        name: "Scope",
        values: &[
            MetricValue {
                code: "U",
                name: "Unchanged",
                weight: Weight::Scope(false),
                description: "Impacts only vulnerable component",
            },
            MetricValue {
                code: "C",
                name: "Changed",
                weight: Weight::Scope(true),
                description: "Impacts beyond vulnerable component",
            },
        ],
    },
    MetricDefinition {
        code: MetricCode::C,
        name: "Confidentiality",
        values: &[
            scalar("N", "None", 0.0, "No information disclosure"),
            scalar("L", "Low", 0.22, "Limited information disclosure"),
            scalar("H", "High", 0.56, "Total information disclosure"),
        ],
    },
    MetricDefinition {
        code: MetricCode::I,
        name: "Integrity",
        values: &[
            scalar("N", "None", 0.0, "No integrity impact"),
            scalar("L", "Low", 0.22, "Limited modification possible"),
            scalar("H", "High", 0.56, "Total compromise possible"),
        ],
    },
    MetricDefinition {
        code: MetricCode::A,
        name: "Availability",
        values: &[
            scalar("N", "None", 0.0, "No availability impact"),
            scalar("L", "Low", 0.22, "Reduced performance"),
            scalar("H", "High", 0.56, "Total shutdown possible"),
        ],
    },
];
