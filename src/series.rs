//! Time series building
//!
//! Groups an individual's metric history by type into parallel
//! date/value/label arrays for the charting layer. The engine does not
//! re-sort: point order follows input order, so callers wanting
//! chronological charts pre-sort by capture date.

use crate::types::{MetricRecord, MetricSeries, MetricType, UNKNOWN_DATE};
use std::collections::BTreeMap;

/// Build one series per metric type from the full record set.
///
/// Every known metric type gets a seeded series, so types with no
/// records come back as empty parallel arrays with `has_data = false`
/// rather than being absent or an error.
pub fn build_series(records: &[MetricRecord]) -> BTreeMap<MetricType, MetricSeries> {
    let mut series: BTreeMap<MetricType, MetricSeries> = MetricType::ALL
        .iter()
        .map(|&mt| (mt, MetricSeries::empty(mt)))
        .collect();

    for record in records {
        let entry = series
            .entry(record.metric_type)
            .or_insert_with(|| MetricSeries::empty(record.metric_type));
        let date = record
            .captured_on
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| UNKNOWN_DATE.to_string());
        let source = record
            .captured_by
            .map(|c| c.display().to_string())
            .unwrap_or_else(|| UNKNOWN_DATE.to_string());

        entry.dates.push(date.clone());
        entry.values.push(record.value);
        entry.labels.push([date, source]);
        entry.has_data = true;
    }

    series
}
