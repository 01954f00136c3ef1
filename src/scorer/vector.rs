//! CVSS vector string encoding.
//!
//! Vectors look like `CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H`. Only the
//! version prefix is checked strictly; segments are handed back as raw
//! `(metric, value)` pairs for the calculator to accept or ignore.

use super::catalog::MetricCode;

/// Version label written on every rendered vector.
pub const VECTOR_PREFIX: &str = "CVSS:3.1";

const ACCEPTED_VERSION: &str = "CVSS:3.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VectorError {
    #[error("Invalid CVSS vector format: {input:?} (expected a CVSS:3.x prefix)")]
    InvalidFormat { input: String },
}

/// Checks the `CVSS:3.<digit>` prefix and returns the segments after it.
///
/// A segment without a `:` yields an empty value, which no metric accepts.
pub fn segments(vector: &str) -> Result<Vec<(&str, &str)>, VectorError> {
    let mut parts = vector.split('/');
    let version = parts.next().unwrap_or_default();

    if !has_supported_version(version) {
        return Err(VectorError::InvalidFormat {
            input: vector.to_string(),
        });
    }

    Ok(parts
        .map(|segment| {
            let mut kv = segment.split(':');
            let metric = kv.next().unwrap_or_default();
            let value = kv.next().unwrap_or_default();
            (metric, value)
        })
        .collect())
}

fn has_supported_version(version: &str) -> bool {
    version
        .strip_prefix(ACCEPTED_VERSION)
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_digit())
}

/// Strict check for a complete, canonical vector.
///
/// Unlike [`segments`], this requires version 3.0 or 3.1, all eight metrics
/// in vector order with catalog values, and nothing after `A`.
pub fn is_valid_vector(vector: &str) -> bool {
    let mut parts = vector.split('/');
    if !matches!(parts.next(), Some("CVSS:3.0" | "CVSS:3.1")) {
        return false;
    }

    for metric in MetricCode::ALL {
        let Some((code, value)) = parts.next().and_then(|s| s.split_once(':')) else {
            return false;
        };
        if code != metric.as_str() || metric.definition().value(value).is_none() {
            return false;
        }
    }

    parts.next().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_in_order() {
        let segs = segments("CVSS:3.1/AV:N/AC:L").unwrap();
        assert_eq!(segs, vec![("AV", "N"), ("AC", "L")]);
    }

    #[test]
    fn test_accepts_version_3_0() {
        let segs = segments("CVSS:3.0/S:C").unwrap();
        assert_eq!(segs, vec![("S", "C")]);
    }

    #[test]
    fn test_prefix_only() {
        assert!(segments("CVSS:3.1").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_bad_prefix() {
        for input in ["not-a-vector", "", "CVSS:2.0/AV:N", "CVSS:3./AV:N", "AV:N/CVSS:3.1"] {
            assert_eq!(
                segments(input),
                Err(VectorError::InvalidFormat {
                    input: input.to_string()
                }),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_is_valid_vector_accepts_canonical() {
        assert!(is_valid_vector("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H"));
        assert!(is_valid_vector("CVSS:3.0/AV:P/AC:H/PR:L/UI:R/S:C/C:N/I:L/A:N"));
    }

    #[test]
    fn test_is_valid_vector_rejects_loose_forms() {
        let rejected = [
            // reordered
            "CVSS:3.1/AC:L/AV:N/PR:N/UI:N/S:U/C:H/I:H/A:H",
            // partial
            "CVSS:3.1/AV:N/AC:L/PR:N",
            // unsupported minor version
            "CVSS:3.2/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H",
            // trailing segment
            "CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H/E:P",
            "CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H/",
            // unknown value
            "CVSS:3.1/AV:X/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H",
            "CVSS:3.1/AV:N:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H",
            "CVSS:3.1/AV:null/AC:null/PR:null/UI:null/S:null/C:null/I:null/A:null",
            "",
        ];
        for input in rejected {
            assert!(!is_valid_vector(input), "{input} should be rejected");
        }
    }

    #[test]
    fn test_malformed_segments_are_passed_through() {
        let segs = segments("CVSS:3.1/AV/:N/AC:L:extra").unwrap();
        assert_eq!(segs, vec![("AV", ""), ("", "N"), ("AC", "L")]);
    }
}
