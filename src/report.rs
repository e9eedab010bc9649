//! Report encoding
//!
//! Assembles the serializable payload handed to the presentation layer:
//! per-type time series plus the evaluation entries, wrapped with
//! producer metadata. Reports are computed fresh per request and never
//! cached.

use crate::error::EngineError;
use crate::evaluate::evaluate;
use crate::ranges::ReferenceRangeStore;
use crate::series::build_series;
use crate::types::{EvaluationEntry, MetricRecord, MetricSeries, MetricType};
use crate::{ENGINE_VERSION, PRODUCER_NAME};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Current report schema version
pub const REPORT_VERSION: &str = "1.0.0";

/// Report producer metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Complete presentation payload for one player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerReport {
    pub report_version: String,
    pub producer: ReportProducer,
    pub generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    /// Age the evaluation section was scored against
    pub age: u8,
    pub total_records: usize,
    /// One chart-ready series per metric type, keyed by code
    pub series: BTreeMap<MetricType, MetricSeries>,
    /// Latest-by-type standings against the reference population
    pub evaluations: Vec<EvaluationEntry>,
}

/// Assembles player reports with a stable producer instance id
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create an encoder with a fresh instance id
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance id
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    /// Build the full report for one player's history
    pub fn encode(
        &self,
        records: &[MetricRecord],
        age: u8,
        ranges: &ReferenceRangeStore,
        owner_id: Option<String>,
        generated_at: DateTime<Utc>,
    ) -> PlayerReport {
        PlayerReport {
            report_version: REPORT_VERSION.to_string(),
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: ENGINE_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            generated_at: generated_at.to_rfc3339(),
            owner_id,
            age,
            total_records: records.len(),
            series: build_series(records),
            evaluations: evaluate(records, age, ranges),
        }
    }

    /// Build the report and serialize it to pretty JSON
    pub fn encode_to_json(
        &self,
        records: &[MetricRecord],
        age: u8,
        ranges: &ReferenceRangeStore,
        owner_id: Option<String>,
        generated_at: DateTime<Utc>,
    ) -> Result<String, EngineError> {
        let report = self.encode(records, age, ranges, owner_id, generated_at);
        serde_json::to_string_pretty(&report).map_err(EngineError::Json)
    }
}
