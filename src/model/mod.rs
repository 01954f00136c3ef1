//! Core data types for ratings and rating reports.
//!
//! - [`Severity`] - Qualitative rating derived from a base score
//! - [`Rating`] - Snapshot of a calculator: score, severity, vector, metrics
//! - [`RatedEntry`] - One scored line of a batch input
//! - [`RatingReport`] - Batch results with a severity breakdown
//!
//! # Example
//!
//! ```
//! use cvscore::{CvssCalculator, Severity};
//!
//! let mut calc = CvssCalculator::new();
//! calc.parse_vector("CVSS:3.1/AV:L/AC:L/PR:L/UI:N/S:U/C:H/I:H/A:H").unwrap();
//!
//! let rating = calc.data();
//! assert_eq!(rating.score, Some(7.8));
//! assert_eq!(rating.severity, Some(Severity::High));
//! ```

mod rating;
mod severity;

pub use rating::*;
pub use severity::*;
