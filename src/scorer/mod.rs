//! CVSS 3.1 base score calculation.
//!
//! The [`catalog`] holds the fixed metric definitions and weights,
//! [`CvssCalculator`] holds one selection and scores it, and [`vector`]
//! handles the `CVSS:3.x/...` string form.

pub mod catalog;
mod calculator;
pub mod vector;

pub use calculator::{CvssCalculator, Selection};
pub use catalog::{MetricCode, MetricDefinition, MetricValue, Weight, CATALOG};
pub use vector::{is_valid_vector, VectorError};
