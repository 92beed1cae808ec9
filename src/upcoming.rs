//! Drops occurrences that are already over.
//!
//! Offset-less date-times and bare dates are interpreted in the timezone of
//! the listing's location. Anything that cannot be parsed stays visible.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tracing::debug;

use crate::dates::has_time_component;
use crate::grouping::{rebuild, sort_by_display_date};
use crate::timezone::offset_for;
use crate::types::{GroupedEvent, RawEventRecord};

fn parse_with_offset(token: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(token)
        .or_else(|_| DateTime::parse_from_str(token, "%Y-%m-%dT%H:%M%:z"))
        .ok()
}

fn parse_naive(token: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(token, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(token, "%Y-%m-%dT%H:%M"))
        .ok()
}

fn token_is_upcoming(token: &str, location: &str, now: DateTime<Utc>) -> bool {
    if has_time_component(token) {
        if let Some(at) = parse_with_offset(token) {
            return at >= now;
        }
        let Some(local) = parse_naive(token) else {
            return true;
        };
        let offset = offset_for(token, location);
        return match offset.from_local_datetime(&local).single() {
            Some(at) => at >= now,
            None => true,
        };
    }

    let Ok(day) = NaiveDate::parse_from_str(token, "%Y-%m-%d") else {
        return true;
    };
    let offset = offset_for(token, location);
    day >= now.with_timezone(&offset).date_naive()
}

/// True unless every date in the occurrence is already in the past at `now`.
/// A range ("first last") is upcoming while its last day is.
pub fn is_upcoming_occurrence(occurrence: &str, location: &str, now: DateTime<Utc>) -> bool {
    let mut tokens = occurrence.split_whitespace().peekable();
    if tokens.peek().is_none() {
        return true;
    }
    tokens.any(|token| token_is_upcoming(token, location, now))
}

pub fn is_upcoming_record(record: &RawEventRecord, now: DateTime<Utc>) -> bool {
    let location = record.locations.join(", ");
    is_upcoming_occurrence(&record.occurrence(), &location, now)
}

/// Keep only records that are still upcoming, rebuilding display fields for
/// clusters that lost records and dropping clusters left empty.
pub fn filter_upcoming(
    clusters: Vec<GroupedEvent>,
    now: DateTime<Utc>,
    min_common_name_chars: usize,
) -> Vec<GroupedEvent> {
    let mut kept: Vec<GroupedEvent> = Vec::with_capacity(clusters.len());

    for cluster in clusters {
        let remaining: Vec<RawEventRecord> = cluster
            .source_events
            .iter()
            .filter(|r| is_upcoming_record(r, now))
            .cloned()
            .collect();

        if remaining.len() == cluster.source_events.len() {
            kept.push(cluster);
            continue;
        }

        match rebuild(&cluster, &remaining, min_common_name_chars) {
            Some(rebuilt) => {
                debug!(
                    "Cluster {} trimmed to {} upcoming records",
                    rebuilt.id,
                    rebuilt.source_events.len()
                );
                kept.push(rebuilt);
            }
            None => debug!("Cluster {} is entirely past", cluster.id),
        }
    }

    sort_by_display_date(&mut kept);
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::group_events;

    fn now() -> DateTime<Utc> {
        // 2026-03-01 12:00 in Tokyo
        Utc.with_ymd_and_hms(2026, 3, 1, 3, 0, 0).unwrap()
    }

    #[test]
    fn test_timed_occurrences() {
        assert!(is_upcoming_occurrence("2026-03-01T19:00:00+09:00", "", now()));
        assert!(!is_upcoming_occurrence("2026-03-01T11:00:00+09:00", "", now()));
        // Offset-less times use the location's zone
        assert!(!is_upcoming_occurrence("2026-03-01T11:00:00", "Tokyo", now()));
        assert!(is_upcoming_occurrence("2026-02-28T23:00:00", "New York, NY", now()));
    }

    #[test]
    fn test_bare_dates_compare_by_day() {
        assert!(is_upcoming_occurrence("2026-03-01", "Tokyo", now()));
        assert!(!is_upcoming_occurrence("2026-02-28", "Tokyo", now()));
        // Still Feb 28 in Los Angeles
        assert!(is_upcoming_occurrence("2026-02-28", "Los Angeles, CA", now()));
    }

    #[test]
    fn test_ranges_and_garbage() {
        assert!(is_upcoming_occurrence("2026-02-01 2026-03-05", "", now()));
        assert!(!is_upcoming_occurrence("2026-02-01 2026-02-05", "", now()));
        assert!(is_upcoming_occurrence("TBA", "", now()));
        assert!(is_upcoming_occurrence("", "", now()));
    }

    fn record(id: &str, date: &str) -> RawEventRecord {
        RawEventRecord {
            id: id.to_string(),
            event_names: vec!["Show".to_string()],
            performers: Vec::new(),
            venues: vec!["Hall".to_string()],
            locations: vec!["Tokyo".to_string()],
            dates: vec![date.to_string()],
            times: Vec::new(),
            url: format!("https://example.com/{}", id),
            tickets: Vec::new(),
            image: None,
        }
    }

    #[test]
    fn test_filter_rebuilds_partial_clusters() {
        let clusters = group_events(&[
            record("old", "2026-02-28"),
            record("today", "2026-03-01"),
            record("gone", "2026-01-10"),
        ]);
        assert_eq!(clusters.len(), 2);

        let filtered = filter_upcoming(clusters, now(), 2);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "old");
        assert_eq!(filtered[0].source_events.len(), 1);
        assert_eq!(filtered[0].display_dates, vec!["2026-03-01"]);
    }
}
