//! Date handling for records and clusters.
//!
//! Dates arrive as `YYYY-MM-DD` strings, date-times as `YYYY-MM-DDTHH:MM:SS`
//! with or without a `±HH:MM` offset. Anything unparseable falls back to a
//! sentinel so the record stays visible instead of being dropped.

use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::constants::{FAR_FUTURE_DATE, FAR_PAST_DATE};
use crate::types::{GroupedEvent, RawEventRecord};

/// Parse the calendar date at the front of an ISO date or date-time string
pub fn parse_date_prefix(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let prefix = value.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

fn sentinel(value: &str, fallback: NaiveDate) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap_or(fallback)
}

pub fn far_future() -> NaiveDate {
    sentinel(FAR_FUTURE_DATE, NaiveDate::MAX)
}

pub fn far_past() -> NaiveDate {
    sentinel(FAR_PAST_DATE, NaiveDate::MIN)
}

/// Earliest parseable date, or the far-future sentinel
pub fn start_date(dates: &[String]) -> NaiveDate {
    dates
        .iter()
        .filter_map(|d| parse_date_prefix(d))
        .min()
        .unwrap_or_else(far_future)
}

/// Latest parseable date, or the far-past sentinel
pub fn end_date(dates: &[String]) -> NaiveDate {
    dates
        .iter()
        .filter_map(|d| parse_date_prefix(d))
        .max()
        .unwrap_or_else(far_past)
}

pub fn has_time_component(occurrence: &str) -> bool {
    occurrence.contains('T')
}

/// Wall-clock part of a date-time string (everything after the `T`)
pub fn time_part(occurrence: &str) -> Option<&str> {
    occurrence
        .split_once('T')
        .map(|(_, time)| time)
        .filter(|t| !t.is_empty())
}

/// Build the occurrence string a record contributes to its cluster.
///
/// Single day with a start time: `2026-02-16T19:00:00+09:00`.
/// Single day without time: `2026-02-16`.
/// Range: first and last date separated by a space.
pub fn occurrence_for(record: &RawEventRecord) -> String {
    let first = record.dates.first().map(|d| d.trim()).unwrap_or_default();

    if record.is_multi_day() {
        let last = record.dates.last().map(|d| d.trim()).unwrap_or_default();
        return format!("{} {}", first, last);
    }

    if has_time_component(first) {
        return first.to_string();
    }

    match record.start_time() {
        Some(time) => format!("{}T{}", first, time),
        None => first.to_string(),
    }
}

/// Drop bare dates that are already covered by a time-qualified sibling,
/// then sort ascending.
pub fn filter_redundant_dates<I, S>(occurrences: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let all: BTreeSet<String> = occurrences
        .into_iter()
        .map(|o| o.as_ref().trim().to_string())
        .filter(|o| !o.is_empty())
        .collect();

    let timed_days: BTreeSet<&str> = all
        .iter()
        .filter(|o| has_time_component(o))
        .filter_map(|o| o.get(..10))
        .collect();

    all.iter()
        .filter(|o| {
            if has_time_component(o) {
                return true;
            }
            let mut tokens = o.split_whitespace().peekable();
            if tokens.peek().is_none() {
                return true;
            }
            !tokens.all(|t| t.get(..10).is_some_and(|day| timed_days.contains(day)))
        })
        .cloned()
        .collect()
}

/// The base record's start time, else the first time-qualified occurrence
/// on the base record's start date.
pub fn representative_time(event: &GroupedEvent) -> Option<String> {
    let base = event.base_record()?;

    if let Some(time) = base.start_time() {
        return Some(time.to_string());
    }

    let base_day = base.start_date();
    event
        .occurrences
        .iter()
        .filter(|o| has_time_component(o))
        .find(|o| parse_date_prefix(o) == Some(base_day))
        .and_then(|o| time_part(o))
        .map(str::to_string)
}
