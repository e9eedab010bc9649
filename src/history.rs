//! History event normalization
//!
//! The bulk history feed delivers wide per-event snapshots with one
//! column per metric. Normalization flattens each event into the
//! canonical one-record-per-measurement shape the rest of the engine
//! operates on.

use crate::types::{
    HistoricalEvent, MetricRecord, MetricType, MAX_PLAYER_AGE, MIN_PLAYER_AGE,
};
use chrono::Datelike;
use uuid::Uuid;

/// Assumed graduation age when deriving a player age from grad year
const GRADUATION_AGE: i32 = 18;

impl HistoricalEvent {
    /// Metric fields present on this event, in vocabulary order
    fn metric_values(&self) -> impl Iterator<Item = (MetricType, f64)> + '_ {
        [
            (MetricType::ChangeupVelo, self.changeup),
            (MetricType::CurveballVelo, self.curve),
            (MetricType::CatcherVelo, self.c_velo),
            (MetricType::ExitVelo, self.exit_velo),
            (MetricType::FastballVelo, self.max_fb),
            (MetricType::InfieldVelo, self.if_velo),
            (MetricType::OutfieldVelo, self.of_velo),
            (MetricType::PopTime, self.pop_time),
            (MetricType::Sixty, self.sixty_yard),
            (MetricType::SliderVelo, self.slider),
        ]
        .into_iter()
        .filter_map(|(mt, v)| v.map(|v| (mt, v)))
    }

    /// Player age for this event: the recorded age when present,
    /// otherwise derived from graduation year assuming graduation at 18
    /// in the calendar year of the event. Ages outside the supported
    /// 12-20 band come back as `None`.
    pub fn resolved_age(&self) -> Option<u8> {
        let age = match self.player_age {
            Some(age) => i32::from(age),
            None => {
                let grad_year = self.grad_year?;
                GRADUATION_AGE - (grad_year - self.event_date.year())
            }
        };
        (i32::from(MIN_PLAYER_AGE)..=i32::from(MAX_PLAYER_AGE))
            .contains(&age)
            .then_some(age as u8)
    }

    /// Flatten into one `MetricRecord` per non-null metric field.
    ///
    /// Each record carries the shared player and event-date context:
    /// player id as owner, event date as both capture date and creation
    /// timestamp. Height and weight are body attributes, not performance
    /// metrics, and stay on the event. An event with no resolvable age
    /// still normalizes; its records just cannot be scored against an
    /// age-keyed reference range.
    pub fn normalize(&self) -> Vec<MetricRecord> {
        let age = self.resolved_age();
        self.metric_values()
            .map(|(metric_type, value)| MetricRecord {
                id: Uuid::new_v4(),
                metric_type,
                value,
                age,
                captured_on: Some(self.event_date.date_naive()),
                captured_by: None,
                notes: None,
                owner_id: Some(self.player_id.to_string()),
                created_at: self.event_date,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn make_event() -> HistoricalEvent {
        HistoricalEvent {
            player_id: 40312,
            event_id: 881,
            event_date: Utc.with_ymd_and_hms(2023, 7, 15, 14, 30, 0).unwrap(),
            grad_year: Some(2026),
            player_age: None,
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_one_record_per_field() {
        let event = HistoricalEvent {
            max_fb: Some(84.0),
            exit_velo: Some(92.0),
            sixty_yard: Some(7.05),
            ..make_event()
        };

        let records = event.normalize();
        assert_eq!(records.len(), 3);

        for record in &records {
            assert_eq!(record.owner_id.as_deref(), Some("40312"));
            assert_eq!(
                record.captured_on,
                Some(event.event_date.date_naive())
            );
            assert_eq!(record.created_at, event.event_date);
        }

        let fb = records
            .iter()
            .find(|r| r.metric_type == MetricType::FastballVelo)
            .unwrap();
        assert_eq!(fb.value, 84.0);
        let sixty = records
            .iter()
            .find(|r| r.metric_type == MetricType::Sixty)
            .unwrap();
        assert_eq!(sixty.value, 7.05);
    }

    #[test]
    fn test_normalize_empty_event() {
        assert!(make_event().normalize().is_empty());
    }

    #[test]
    fn test_height_weight_not_normalized() {
        let event = HistoricalEvent {
            height_in: Some(72),
            weight_lb: Some(180),
            pop_time: Some(2.1),
            ..make_event()
        };

        let records = event.normalize();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].metric_type, MetricType::PopTime);
    }

    #[test]
    fn test_age_from_grad_year() {
        // Event in 2023, graduating 2026: 18 - 3 = 15
        assert_eq!(make_event().resolved_age(), Some(15));
    }

    #[test]
    fn test_recorded_age_wins_over_grad_year() {
        let event = HistoricalEvent {
            player_age: Some(16),
            ..make_event()
        };
        assert_eq!(event.resolved_age(), Some(16));
    }

    #[test]
    fn test_age_outside_band_resolves_none() {
        let event = HistoricalEvent {
            grad_year: Some(2035), // would be age 6
            ..make_event()
        };
        assert_eq!(event.resolved_age(), None);

        let no_age = HistoricalEvent {
            grad_year: None,
            ..make_event()
        };
        assert_eq!(no_age.resolved_age(), None);
    }
}
