//! Evaluation aggregation
//!
//! Composes latest-by-type selection, reference range lookup, and
//! percentile scoring into a per-metric-type report of where a player's
//! current standing sits against the reference population.

use crate::error::EngineError;
use crate::ranges::ReferenceRangeStore;
use crate::scorer::percentile;
use crate::selector::latest_by_type;
use crate::types::{EvaluationEntry, MetricRecord};

/// Evaluate a player's full metric history against the reference ranges
/// for one age.
///
/// Produces one entry per metric type present in the latest-by-type
/// mapping, ordered by metric-type code. A missing range is a normal
/// outcome surfaced as `has_data = false`. A degenerate range (min ==
/// max) poisons only its own entry, flagged via `degenerate_range`;
/// aggregation of the remaining types continues, so the function itself
/// never fails.
pub fn evaluate(
    records: &[MetricRecord],
    age: u8,
    ranges: &ReferenceRangeStore,
) -> Vec<EvaluationEntry> {
    let latest = latest_by_type(records);

    latest
        .values()
        .map(|record| evaluate_one(record, age, ranges))
        .collect()
}

fn evaluate_one(
    record: &MetricRecord,
    age: u8,
    ranges: &ReferenceRangeStore,
) -> EvaluationEntry {
    let mut entry = EvaluationEntry {
        metric_type: record.metric_type,
        display: record.metric_type.display().to_string(),
        unit: record.metric_type.unit().to_string(),
        current_value: record.value,
        age,
        captured_on: record.captured_on,
        min: None,
        max: None,
        average: None,
        percentile: None,
        has_data: false,
        degenerate_range: false,
    };

    let Some(range) = ranges.lookup(record.metric_type, age) else {
        return entry;
    };

    match percentile(range.min, range.max, record.value) {
        Ok(pct) => {
            entry.min = Some(range.min);
            entry.max = Some(range.max);
            entry.average = Some(range.average);
            entry.percentile = Some(pct);
            entry.has_data = true;
        }
        Err(EngineError::DegenerateRange(_)) => {
            entry.degenerate_range = true;
        }
        // The scorer only fails on degeneracy; nothing else to downgrade.
        Err(_) => {}
    }

    entry
}
