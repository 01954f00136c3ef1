pub mod batch;
pub mod config;
pub mod model;
pub mod output;
pub mod scorer;

pub use config::Config;
pub use model::{is_valid_score, Rating, RatedEntry, RatingReport, Severity, SeverityBreakdown};
pub use scorer::{is_valid_vector, CvssCalculator, MetricCode, Selection, VectorError};
