use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use super::catalog::{MetricCode, MetricValue, Weight};
use super::vector::{self, VectorError, VECTOR_PREFIX};
use crate::model::{Rating, Severity};

/// One selected value (or nothing) per base metric.
///
/// Serializes as a map from metric code to value code, with `null` for
/// unset metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Selection {
    values: [Option<&'static MetricValue>; 8],
}

impl Selection {
    pub fn get(&self, metric: MetricCode) -> Option<&'static MetricValue> {
        self.values[metric.index()]
    }

    /// The selected value code, if any.
    pub fn code(&self, metric: MetricCode) -> Option<&'static str> {
        self.get(metric).map(|v| v.code)
    }

    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    fn set(&mut self, metric: MetricCode, value: &'static MetricValue) {
        self.values[metric.index()] = Some(value);
    }
}

impl Serialize for Selection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(MetricCode::ALL.len()))?;
        for metric in MetricCode::ALL {
            map.serialize_entry(metric.as_str(), &self.code(metric))?;
        }
        map.end()
    }
}

/// Interactive CVSS 3.1 base score calculator.
///
/// Metrics are set one at a time; unknown codes are ignored rather than
/// rejected so that UI callers can forward raw button values. A score is
/// only produced once all eight metrics are set.
///
/// # Example
///
/// ```
/// use cvscore::CvssCalculator;
///
/// let mut calc = CvssCalculator::new();
/// let score = calc.parse_vector("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H")?;
/// assert_eq!(score, Some(9.8));
/// # Ok::<(), cvscore::VectorError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CvssCalculator {
    selection: Selection,
}

impl CvssCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects `value` for `metric`. Unknown metric or value codes are a
    /// no-op.
    pub fn set_metric(&mut self, metric: &str, value: &str) {
        let Some(code) = MetricCode::from_code(metric) else {
            debug!(metric, value, "ignoring unknown CVSS metric");
            return;
        };

        match code.definition().value(value) {
            Some(selected) => self.selection.set(code, selected),
            None => debug!(metric, value, "ignoring unknown CVSS metric value"),
        }
    }

    /// Computes the base score, rounded up to one decimal place.
    ///
    /// Returns `None` while any metric is unset.
    pub fn calculate_score(&self) -> Option<f64> {
        let scope_changed = match self.selection.get(MetricCode::S)?.weight {
            Weight::Scope(changed) => changed,
            _ => return None,
        };
        let weight = |metric: MetricCode| -> Option<f64> {
            self.selection.get(metric)?.weight.resolve(scope_changed)
        };

        let av = weight(MetricCode::AV)?;
        let ac = weight(MetricCode::AC)?;
        let pr = weight(MetricCode::PR)?;
        let ui = weight(MetricCode::UI)?;
        let c = weight(MetricCode::C)?;
        let i = weight(MetricCode::I)?;
        let a = weight(MetricCode::A)?;

        let isc_base = 1.0 - ((1.0 - c) * (1.0 - i) * (1.0 - a));

        let impact = if scope_changed {
            7.52 * (isc_base - 0.029) - 3.25 * (isc_base - 0.02).powf(15.0)
        } else {
            6.42 * isc_base
        };

        let exploitability = 8.22 * av * ac * pr * ui;

        let base_score = if impact <= 0.0 {
            0.0
        } else if scope_changed {
            (1.08 * (impact + exploitability)).min(10.0)
        } else {
            (impact + exploitability).min(10.0)
        };

        // CVSS rounds up, never to nearest.
        Some((base_score * 10.0).ceil() / 10.0)
    }

    pub fn severity(score: f64) -> Severity {
        Severity::from_score(score)
    }

    /// Renders the current selection as a vector string.
    ///
    /// Unset metrics render as `null`; check [`calculate_score`] first if a
    /// well-formed vector is required.
    ///
    /// [`calculate_score`]: CvssCalculator::calculate_score
    pub fn vector(&self) -> String {
        let mut out = String::from(VECTOR_PREFIX);
        for metric in MetricCode::ALL {
            out.push('/');
            out.push_str(metric.as_str());
            out.push(':');
            out.push_str(self.selection.code(metric).unwrap_or("null"));
        }
        out
    }

    /// Applies every `metric:value` segment of `vector` and returns the
    /// resulting score.
    ///
    /// Only a bad version prefix is an error. Unknown segments are skipped,
    /// so a partial vector can still yield `Ok(None)`.
    pub fn parse_vector(&mut self, vector: &str) -> Result<Option<f64>, VectorError> {
        let segments = vector::segments(vector)?;
        debug!(vector, segments = segments.len(), "parsing CVSS vector");

        for (metric, value) in segments {
            self.set_metric(metric, value);
        }

        Ok(self.calculate_score())
    }

    pub fn reset(&mut self) {
        self.selection = Selection::default();
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Snapshot of score, severity, vector and the selected metrics.
    pub fn data(&self) -> Rating {
        let score = self.calculate_score();
        Rating {
            score,
            severity: score.map(Severity::from_score),
            vector: score.map(|_| self.vector()),
            metrics: self.selection,
        }
    }
}
