//! Batch metric capture
//!
//! A capture request bundles one session's worth of measurements: a
//! value per metric type the player chose to fill in, sharing one
//! age/date/source/notes context. Expansion produces one validated
//! record per value; a single-metric submission is just the one-entry
//! case.

use crate::error::EngineError;
use crate::types::{validate_age, validate_value, CapturedBy, MetricRecord, MetricType};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// One capture session: shared context plus the metric values provided
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureRequest {
    pub age: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_by: Option<CapturedBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Values keyed by metric type; absent types were left blank
    pub values: BTreeMap<MetricType, f64>,
}

impl CaptureRequest {
    /// Expand into one record per provided value.
    ///
    /// Validates the shared age and every value up front: any failure
    /// rejects the whole request, so a batch never partially persists.
    /// An empty request is rejected with [`EngineError::EmptyCapture`].
    pub fn expand(
        &self,
        owner_id: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Vec<MetricRecord>, EngineError> {
        if self.values.is_empty() {
            return Err(EngineError::EmptyCapture);
        }
        validate_age(self.age)?;
        for value in self.values.values() {
            validate_value(*value)?;
        }

        let records = self
            .values
            .iter()
            .map(|(&metric_type, &value)| MetricRecord {
                id: Uuid::new_v4(),
                metric_type,
                value,
                age: Some(self.age),
                captured_on: self.captured_on,
                captured_by: self.captured_by,
                notes: self.notes.clone(),
                owner_id: owner_id.clone(),
                created_at: now,
            })
            .collect();

        Ok(records)
    }
}
