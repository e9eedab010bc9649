//! Core types for the metrics engine
//!
//! This module owns the shared metric-type vocabulary and the data shapes
//! that flow through each stage: captured records, reference ranges,
//! denormalized history events, and the derived evaluation/series outputs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Youngest supported player age
pub const MIN_PLAYER_AGE: u8 = 12;
/// Oldest supported player age
pub const MAX_PLAYER_AGE: u8 = 20;

/// Sentinel rendered for points with no capture date
pub const UNKNOWN_DATE: &str = "N/A";

/// A fixed category of measurement with an associated unit and
/// directionality. Single owned vocabulary: every component that needs
/// display strings or the `reverse` flag consumes this enum.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    #[serde(rename = "changeup")]
    ChangeupVelo,
    #[serde(rename = "curve")]
    CurveballVelo,
    #[serde(rename = "cvelo")]
    CatcherVelo,
    #[serde(rename = "exitvelo")]
    ExitVelo,
    #[serde(rename = "fbvelo")]
    FastballVelo,
    #[serde(rename = "ifvelo")]
    InfieldVelo,
    #[serde(rename = "ofvelo")]
    OutfieldVelo,
    #[serde(rename = "poptime")]
    PopTime,
    #[serde(rename = "sixty")]
    Sixty,
    #[serde(rename = "slider")]
    SliderVelo,
}

impl MetricType {
    /// Every known metric type, in code order. Variant order above matches
    /// so that derived `Ord` agrees with lexicographic code order.
    pub const ALL: [MetricType; 10] = [
        MetricType::ChangeupVelo,
        MetricType::CurveballVelo,
        MetricType::CatcherVelo,
        MetricType::ExitVelo,
        MetricType::FastballVelo,
        MetricType::InfieldVelo,
        MetricType::OutfieldVelo,
        MetricType::PopTime,
        MetricType::Sixty,
        MetricType::SliderVelo,
    ];

    /// Stable wire code for this metric type
    pub fn code(&self) -> &'static str {
        match self {
            MetricType::ChangeupVelo => "changeup",
            MetricType::CurveballVelo => "curve",
            MetricType::CatcherVelo => "cvelo",
            MetricType::ExitVelo => "exitvelo",
            MetricType::FastballVelo => "fbvelo",
            MetricType::InfieldVelo => "ifvelo",
            MetricType::OutfieldVelo => "ofvelo",
            MetricType::PopTime => "poptime",
            MetricType::Sixty => "sixty",
            MetricType::SliderVelo => "slider",
        }
    }

    /// Human-readable name for headings and chart titles
    pub fn display(&self) -> &'static str {
        match self {
            MetricType::ChangeupVelo => "Changeup Velocity",
            MetricType::CurveballVelo => "Curveball Velocity",
            MetricType::CatcherVelo => "Catcher Velocity",
            MetricType::ExitVelo => "Exit Velocity",
            MetricType::FastballVelo => "Fastball Velocity",
            MetricType::InfieldVelo => "Infield Velocity",
            MetricType::OutfieldVelo => "Outfield Velocity",
            MetricType::PopTime => "Pop Time",
            MetricType::Sixty => "60 Yard Dash",
            MetricType::SliderVelo => "Slider Velocity",
        }
    }

    /// Measurement unit
    pub fn unit(&self) -> &'static str {
        match self {
            MetricType::Sixty | MetricType::PopTime => "seconds",
            _ => "mph",
        }
    }

    /// Directionality flag for the presentation layer: time-based metrics
    /// improve downward. A static property of the type, passed through
    /// unchanged by the engine.
    pub fn lower_is_better(&self) -> bool {
        matches!(self, MetricType::Sixty | MetricType::PopTime)
    }
}

/// Who captured a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapturedBy {
    PerfectGame,
    PlayerMetrix,
    PrepBaseball,
    SelfCaptured,
}

impl CapturedBy {
    pub fn display(&self) -> &'static str {
        match self {
            CapturedBy::PerfectGame => "Perfect Game",
            CapturedBy::PlayerMetrix => "Player Metrix",
            CapturedBy::PrepBaseball => "Prep Baseball",
            CapturedBy::SelfCaptured => "Self Captured",
        }
    }
}

/// One captured measurement. Created on submission, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Record identifier
    pub id: Uuid,
    /// What was measured
    pub metric_type: MetricType,
    /// Measured value; validated non-negative at creation
    pub value: f64,
    /// Player age when captured, within 12-20 when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    /// Date the measurement was taken, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_on: Option<NaiveDate>,
    /// Capture source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_by: Option<CapturedBy>,
    /// Free-form notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Owning player/account; None means anonymous submission
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    /// When the record entered the system
    pub created_at: DateTime<Utc>,
}

/// Administrator-supplied comparison population for one (metric type, age)
/// pair. Read-only to the engine; min <= average <= max is expected but an
/// inverted range is an upstream data-quality problem, not an engine error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRange {
    pub metric_type: MetricType,
    pub age: u8,
    pub min: f64,
    pub max: f64,
    pub average: f64,
}

/// Denormalized per-event snapshot from the bulk history feed. One event
/// yields one `MetricRecord` per non-null metric field when normalized.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoricalEvent {
    pub player_id: u64,
    pub event_id: u64,
    pub event_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grad_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_age: Option<u8>,

    // Body attributes; kept for context, not normalized into records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_in: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_lb: Option<u32>,

    // Performance metric fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub if_velo: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub of_velo: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c_velo: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_velo: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_fb: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pop_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sixty_yard: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changeup: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slider: Option<f64>,
}

/// One row of an evaluation report: the player's latest value for a metric
/// type compared against the reference population. Computed fresh per
/// request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationEntry {
    pub metric_type: MetricType,
    pub display: String,
    pub unit: String,
    pub current_value: f64,
    pub age: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
    /// Clamped, truncated percentile in 0-100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentile: Option<u8>,
    /// Whether comparison data existed and a percentile was computed
    pub has_data: bool,
    /// Diagnostic: the reference range had min == max and was unusable
    #[serde(default)]
    pub degenerate_range: bool,
}

/// Parallel-array time series for one metric type, shaped for direct
/// consumption by a charting layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricSeries {
    /// ISO dates, or the "N/A" sentinel when the capture date is unknown
    pub dates: Vec<String>,
    pub values: Vec<f64>,
    /// Two-line point labels: [date, capture-source description]
    pub labels: Vec<[String; 2]>,
    pub display: String,
    pub unit: String,
    /// Lower-is-better directionality flag, passed through for the chart
    pub reverse: bool,
    pub has_data: bool,
}

impl MetricSeries {
    /// Empty series for a metric type, ready to accumulate points
    pub fn empty(metric_type: MetricType) -> Self {
        Self {
            dates: Vec::new(),
            values: Vec::new(),
            labels: Vec::new(),
            display: metric_type.display().to_string(),
            unit: metric_type.unit().to_string(),
            reverse: metric_type.lower_is_better(),
            has_data: false,
        }
    }
}

/// Validate a player age against the supported band
pub fn validate_age(age: u8) -> Result<u8, crate::error::EngineError> {
    if (MIN_PLAYER_AGE..=MAX_PLAYER_AGE).contains(&age) {
        Ok(age)
    } else {
        Err(crate::error::EngineError::AgeOutOfRange(age))
    }
}

/// Validate a measurement value (non-negative)
pub fn validate_value(value: f64) -> Result<f64, crate::error::EngineError> {
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(crate::error::EngineError::NegativeValue(value))
    }
}
