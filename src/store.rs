//! Record store collaborator
//!
//! The engine itself performs no I/O; a record store hands it immutable
//! snapshots. This module defines the store contract and an in-memory
//! reference implementation used by tests and the CLI.

use crate::error::EngineError;
use crate::types::{
    validate_age, validate_value, CapturedBy, HistoricalEvent, MetricRecord, MetricType,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default page size for history listings
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// A metric submission before validation and id/timestamp assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecord {
    pub metric_type: MetricType,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_by: Option<CapturedBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}

/// Filters for history event listings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryFilter {
    /// Substring match over player id, event id, and grad year
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<u64>,
}

impl HistoryFilter {
    fn matches(&self, event: &HistoricalEvent) -> bool {
        if let Some(player_id) = self.player_id {
            if event.player_id != player_id {
                return false;
            }
        }
        if let Some(event_id) = self.event_id {
            if event.event_id != event_id {
                return false;
            }
        }
        if let Some(query) = &self.query {
            let grad = event.grad_year.map(|y| y.to_string()).unwrap_or_default();
            let hit = event.player_id.to_string().contains(query)
                || event.event_id.to_string().contains(query)
                || (!grad.is_empty() && grad.contains(query));
            if !hit {
                return false;
            }
        }
        true
    }
}

/// One page of history events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number
    pub page: usize,
    pub page_size: usize,
    /// Total matching items across all pages
    pub total: usize,
}

/// External store contract: fetch and create complete before the engine
/// is invoked, so every engine call sees an immutable snapshot.
pub trait RecordStore {
    /// All records owned by one player, unordered
    fn find_by_owner(&self, owner_id: &str) -> Vec<MetricRecord>;

    /// Filtered, paginated history events, most recent event first
    fn find_events(
        &self,
        filter: &HistoryFilter,
        page: usize,
        page_size: usize,
    ) -> Page<HistoricalEvent>;

    /// Validate and persist one record
    fn create(&mut self, draft: NewRecord) -> Result<MetricRecord, EngineError>;
}

/// In-memory reference store
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    records: Vec<MetricRecord>,
    events: Vec<HistoricalEvent>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_record(&mut self, record: MetricRecord) {
        self.records.push(record);
    }

    /// Load a batch of history events (e.g., from the CSV feed)
    pub fn load_events(&mut self, events: impl IntoIterator<Item = HistoricalEvent>) {
        self.events.extend(events);
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn find_by_owner(&self, owner_id: &str) -> Vec<MetricRecord> {
        self.records
            .iter()
            .filter(|r| r.owner_id.as_deref() == Some(owner_id))
            .cloned()
            .collect()
    }

    fn find_events(
        &self,
        filter: &HistoryFilter,
        page: usize,
        page_size: usize,
    ) -> Page<HistoricalEvent> {
        let mut matching: Vec<&HistoricalEvent> =
            self.events.iter().filter(|e| filter.matches(e)).collect();
        // Most recent event first, then player id for a stable listing
        matching.sort_by(|a, b| {
            b.event_date
                .cmp(&a.event_date)
                .then(a.player_id.cmp(&b.player_id))
        });

        let total = matching.len();
        let page = page.max(1);
        let start = (page - 1).saturating_mul(page_size);
        let items = matching
            .into_iter()
            .skip(start)
            .take(page_size)
            .cloned()
            .collect();

        Page {
            items,
            page,
            page_size,
            total,
        }
    }

    fn create(&mut self, draft: NewRecord) -> Result<MetricRecord, EngineError> {
        validate_value(draft.value)?;
        if let Some(age) = draft.age {
            validate_age(age)?;
        }

        let record = MetricRecord {
            id: Uuid::new_v4(),
            metric_type: draft.metric_type,
            value: draft.value,
            age: draft.age,
            captured_on: draft.captured_on,
            captured_by: draft.captured_by,
            notes: draft.notes,
            owner_id: draft.owner_id,
            created_at: Utc::now(),
        };
        self.records.push(record.clone());
        Ok(record)
    }
}
