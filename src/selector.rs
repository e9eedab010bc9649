//! Latest-by-type selection
//!
//! Reduces an individual's metric history to the single most recent
//! record per metric type, the "current standing" view.

use crate::types::{MetricRecord, MetricType};
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Select the most recent record per metric type.
///
/// Recency order: `captured_on` descending with a missing date sorting
/// older than any present date, then `created_at` descending to break
/// ties. Records tied on both keys resolve to the one earliest in input
/// order (the sort is stable), keeping the result deterministic and
/// idempotent for any input. Dateless records still participate through
/// the `created_at` tiebreak; they are never dropped.
pub fn latest_by_type(records: &[MetricRecord]) -> BTreeMap<MetricType, MetricRecord> {
    let mut ordered: Vec<&MetricRecord> = records.iter().collect();
    // Stable sort: most recent first, input order preserved on full ties.
    ordered.sort_by_key(|r| Reverse((r.captured_on, r.created_at)));

    let mut latest = BTreeMap::new();
    for record in ordered {
        latest
            .entry(record.metric_type)
            .or_insert_with(|| record.clone());
    }
    latest
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn make_record(
        metric_type: MetricType,
        value: f64,
        captured_on: Option<(i32, u32, u32)>,
        created_hour: u32,
    ) -> MetricRecord {
        MetricRecord {
            id: Uuid::new_v4(),
            metric_type,
            value,
            age: Some(15),
            captured_on: captured_on.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap()),
            captured_by: None,
            notes: None,
            owner_id: Some("player-1".to_string()),
            created_at: Utc.with_ymd_and_hms(2024, 7, 1, created_hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_most_recent_wins() {
        let records = vec![
            make_record(MetricType::FastballVelo, 80.0, Some((2024, 1, 1)), 0),
            make_record(MetricType::FastballVelo, 85.0, Some((2024, 6, 1)), 0),
        ];

        let latest = latest_by_type(&records);
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[&MetricType::FastballVelo].value, 85.0);
    }

    #[test]
    fn test_one_entry_per_type() {
        let records = vec![
            make_record(MetricType::Sixty, 7.2, Some((2024, 3, 1)), 0),
            make_record(MetricType::ExitVelo, 88.0, Some((2024, 2, 1)), 0),
            make_record(MetricType::Sixty, 7.0, Some((2024, 5, 1)), 0),
        ];

        let latest = latest_by_type(&records);
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[&MetricType::Sixty].value, 7.0);
        assert_eq!(latest[&MetricType::ExitVelo].value, 88.0);
    }

    #[test]
    fn test_missing_date_sorts_older() {
        let records = vec![
            make_record(MetricType::ExitVelo, 92.0, None, 23),
            make_record(MetricType::ExitVelo, 89.0, Some((2020, 1, 1)), 0),
        ];

        // Any present date beats a missing one regardless of created_at
        let latest = latest_by_type(&records);
        assert_eq!(latest[&MetricType::ExitVelo].value, 89.0);
    }

    #[test]
    fn test_created_at_breaks_date_ties() {
        let records = vec![
            make_record(MetricType::Sixty, 7.3, None, 8),
            make_record(MetricType::Sixty, 7.1, None, 12),
        ];

        let latest = latest_by_type(&records);
        assert_eq!(latest[&MetricType::Sixty].value, 7.1);
    }

    #[test]
    fn test_full_tie_resolves_to_input_order() {
        let first = make_record(MetricType::PopTime, 2.1, Some((2024, 4, 1)), 9);
        let mut second = first.clone();
        second.id = Uuid::new_v4();
        second.value = 2.3;

        let latest = latest_by_type(&[first.clone(), second]);
        assert_eq!(latest[&MetricType::PopTime].id, first.id);
    }

    #[test]
    fn test_idempotent() {
        let records = vec![
            make_record(MetricType::FastballVelo, 80.0, Some((2024, 1, 1)), 3),
            make_record(MetricType::FastballVelo, 85.0, None, 5),
            make_record(MetricType::Sixty, 7.4, Some((2024, 1, 1)), 3),
        ];

        let a = latest_by_type(&records);
        let b = latest_by_type(&records);
        let ids_a: Vec<Uuid> = a.values().map(|r| r.id).collect();
        let ids_b: Vec<Uuid> = b.values().map(|r| r.id).collect();
        assert_eq!(ids_a, ids_b);
    }

    #[test]
    fn test_empty_input() {
        assert!(latest_by_type(&[]).is_empty());
    }
}
