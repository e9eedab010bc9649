//! Error types for the metrics engine

use thiserror::Error;

/// Errors that can occur while scoring, validating, or ingesting metrics
#[derive(Debug, Error)]
pub enum EngineError {
    /// A reference range with equal bounds makes the percentile undefined.
    /// Raised explicitly rather than mapped to 0/50/100; contained per-entry
    /// at the aggregation boundary.
    #[error("Degenerate reference range: min and max are both {0}")]
    DegenerateRange(f64),

    #[error("Metric value must be non-negative, got {0}")]
    NegativeValue(f64),

    #[error("Player age {0} is outside the supported range 12-20")]
    AgeOutOfRange(u8),

    #[error("Capture request contains no metric values")]
    EmptyCapture,

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Date parse error: {0}")]
    DateParse(String),
}
