//! Reference range store
//!
//! In-memory lookup table mapping (metric type, age) to the
//! administrator-supplied comparison population. Populated by a bulk
//! process outside the engine; read-only through [`ReferenceRangeStore::lookup`].

use crate::types::{MetricType, ReferenceRange};
use std::collections::HashMap;

/// Lookup table for reference ranges, keyed by (metric type, player age).
///
/// Exact-match only: no interpolation between adjacent ages and no
/// fallback to a default age. A miss is a normal outcome meaning "no
/// comparison available", never an error.
#[derive(Debug, Clone, Default)]
pub struct ReferenceRangeStore {
    ranges: HashMap<(MetricType, u8), ReferenceRange>,
}

impl ReferenceRangeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk-load from a list of ranges. A later row for the same
    /// (metric type, age) key replaces the earlier one, mirroring an
    /// administrative re-load against a unique key.
    pub fn from_ranges(ranges: impl IntoIterator<Item = ReferenceRange>) -> Self {
        let mut store = Self::new();
        for range in ranges {
            store.insert(range);
        }
        store
    }

    /// Insert or replace the range for its (metric type, age) key
    pub fn insert(&mut self, range: ReferenceRange) {
        self.ranges.insert((range.metric_type, range.age), range);
    }

    /// Exact-match lookup. `None` means no administrator-entered range
    /// exists for this combination.
    pub fn lookup(&self, metric_type: MetricType, age: u8) -> Option<&ReferenceRange> {
        self.ranges.get(&(metric_type, age))
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Load a store from a JSON array of ranges
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let ranges: Vec<ReferenceRange> = serde_json::from_str(json)?;
        Ok(Self::from_ranges(ranges))
    }

    /// Serialize the store to a JSON array of ranges, in key order
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut ranges: Vec<&ReferenceRange> = self.ranges.values().collect();
        ranges.sort_by_key(|r| (r.metric_type, r.age));
        serde_json::to_string(&ranges)
    }
}
