//! Metrix Engine - scoring and aggregation for athlete performance metrics
//!
//! The engine takes an individual's raw measurement history and the
//! administrator-supplied reference ranges, and derives everything the
//! presentation layer shows: percentile standings against the reference
//! population for the player's age, per-metric-type time series, and the
//! latest value per metric type.
//!
//! All computation is pure and stateless: callers supply immutable
//! snapshots of records and ranges, and every invocation is independent
//! and safe to run concurrently. Fetching that data is the record
//! store's job, not the engine's.

pub mod capture;
pub mod error;
pub mod evaluate;
pub mod history;
pub mod ingest;
pub mod profile;
pub mod ranges;
pub mod report;
pub mod scorer;
pub mod selector;
pub mod series;
pub mod store;
pub mod types;

pub use error::EngineError;
pub use evaluate::evaluate;
pub use ranges::ReferenceRangeStore;
pub use report::{PlayerReport, ReportEncoder};
pub use scorer::percentile;
pub use selector::latest_by_type;
pub use series::build_series;

// Core data shapes
pub use types::{
    CapturedBy, EvaluationEntry, HistoricalEvent, MetricRecord, MetricSeries, MetricType,
    ReferenceRange,
};

/// Engine version embedded in every report payload
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for report payloads
pub const PRODUCER_NAME: &str = "metrix-engine";
