//! Bulk history CSV ingestion
//!
//! Reads the merged showcase export (`merge.csv` shape) into
//! [`HistoricalEvent`]s. The feed is messy: numeric columns may be blank
//! or carry float formatting, dates appear with and without a time
//! component. Parsing is tolerant per field; rows missing a usable
//! event date or player/event id are skipped and counted rather than
//! failing the import.

use crate::error::EngineError;
use crate::types::HistoricalEvent;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;

/// Outcome counters for one import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStats {
    pub imported: usize,
    pub skipped: usize,
}

/// Read history events from CSV.
///
/// Returns the parsed events alongside imported/skipped counts. Only a
/// malformed CSV stream itself is an error; bad rows are skipped.
pub fn read_history_csv<R: Read>(
    reader: R,
) -> Result<(Vec<HistoricalEvent>, ImportStats), EngineError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut events = Vec::new();
    let mut stats = ImportStats::default();

    for row in csv_reader.records() {
        let row = row?;
        let fields: HashMap<&str, &str> = headers.iter().zip(row.iter()).collect();

        match parse_row(&fields) {
            Some(event) => {
                events.push(event);
                stats.imported += 1;
            }
            None => stats.skipped += 1,
        }
    }

    Ok((events, stats))
}

fn parse_row(fields: &HashMap<&str, &str>) -> Option<HistoricalEvent> {
    let event_date = parse_event_date(fields.get("events.date").copied().unwrap_or(""))?;
    let player_id = parse_int(fields.get("player_id").copied())? as u64;
    let event_id = parse_int(fields.get("event_id").copied())? as u64;

    Some(HistoricalEvent {
        player_id,
        event_id,
        event_date,
        grad_year: parse_int(fields.get("players.gradYear").copied()).map(|y| y as i32),
        player_age: parse_int(fields.get("playerage").copied())
            .and_then(|a| u8::try_from(a).ok()),
        height_in: parse_int(fields.get("height").copied()).and_then(|v| u32::try_from(v).ok()),
        weight_lb: parse_int(fields.get("weight").copied()).and_then(|v| u32::try_from(v).ok()),
        if_velo: parse_decimal(fields.get("ifVelo").copied()),
        of_velo: parse_decimal(fields.get("ofVelo").copied()),
        c_velo: parse_decimal(fields.get("cVelo").copied()),
        exit_velo: parse_decimal(fields.get("exitVelo").copied()),
        max_fb: parse_decimal(fields.get("maxFB").copied()),
        pop_time: parse_decimal(fields.get("popTime").copied()),
        sixty_yard: parse_decimal(fields.get("sixtyyard").copied()),
        changeup: parse_decimal(fields.get("changeUp").copied()),
        curve: parse_decimal(fields.get("curve").copied()),
        slider: parse_decimal(fields.get("slider").copied()),
    })
}

/// Event dates arrive as "6/14/2023 9:30" or "6/14/2023"
fn parse_event_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%m/%d/%Y %H:%M") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%m/%d/%Y")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Integers in the feed sometimes carry float formatting ("85.0")
fn parse_int(raw: Option<&str>) -> Option<i64> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().map(|v| v as i64)
}

fn parse_decimal(raw: Option<&str>) -> Option<f64> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEADER: &str = "player_id,event_id,events.date,players.gradYear,playerage,height,weight,ifVelo,ofVelo,cVelo,exitVelo,maxFB,popTime,sixtyyard,changeUp,curve,slider";

    fn ingest(rows: &[&str]) -> (Vec<HistoricalEvent>, ImportStats) {
        let csv = format!("{HEADER}\n{}", rows.join("\n"));
        read_history_csv(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_full_row() {
        let (events, stats) = ingest(&[
            "40312,881,6/14/2023 9:30,2026,15,72,180,78,82,,92,84.0,2.15,7.05,71,68,74",
        ]);

        assert_eq!(stats, ImportStats { imported: 1, skipped: 0 });
        let event = &events[0];
        assert_eq!(event.player_id, 40312);
        assert_eq!(event.event_id, 881);
        assert_eq!(event.grad_year, Some(2026));
        assert_eq!(event.player_age, Some(15));
        assert_eq!(event.height_in, Some(72));
        assert_eq!(event.max_fb, Some(84.0));
        assert_eq!(event.c_velo, None); // blank column
        assert_eq!(event.pop_time, Some(2.15));
        assert_eq!(event.event_date.format("%Y-%m-%d %H:%M").to_string(), "2023-06-14 09:30");
    }

    #[test]
    fn test_date_without_time_component() {
        let (events, stats) =
            ingest(&["1,2,6/14/2023,,,,,,,,,,,,,,"]);
        assert_eq!(stats.imported, 1);
        assert_eq!(
            events[0].event_date.format("%Y-%m-%d").to_string(),
            "2023-06-14"
        );
    }

    #[test]
    fn test_bad_rows_skipped_and_counted() {
        let (events, stats) = ingest(&[
            "1,2,not-a-date,,,,,,,,,,,,,,",
            ",2,6/14/2023,,,,,,,,,,,,,,",
            "3,4,7/01/2023,,,,,,,,,,,,,,",
        ]);

        assert_eq!(stats, ImportStats { imported: 1, skipped: 2 });
        assert_eq!(events[0].player_id, 3);
    }

    #[test]
    fn test_int_with_float_formatting() {
        let (events, _) = ingest(&["5.0,6.0,6/14/2023,2026.0,,,,,,,,,,,,,"]);
        assert_eq!(events[0].player_id, 5);
        assert_eq!(events[0].grad_year, Some(2026));
    }

    #[test]
    fn test_empty_file() {
        let (events, stats) = read_history_csv(format!("{HEADER}\n").as_bytes()).unwrap();
        assert!(events.is_empty());
        assert_eq!(stats, ImportStats::default());
    }
}
