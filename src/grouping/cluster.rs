use chrono::NaiveDate;
use std::collections::BTreeSet;

use super::matcher::{is_match, RecordKeys, MatchKeys};
use crate::types::{push_unique, GroupedEvent, RawEventRecord};

/// An empty event carrying the given representative id
pub(crate) fn empty_event(id: &str, latest_date: NaiveDate) -> GroupedEvent {
    GroupedEvent {
        id: id.to_string(),
        event_names: Vec::new(),
        performers: Vec::new(),
        venues: Vec::new(),
        locations: Vec::new(),
        occurrences: BTreeSet::new(),
        latest_date,
        source_events: Vec::new(),
        display_names: Vec::new(),
        display_performers: Vec::new(),
        display_dates: Vec::new(),
        time: None,
    }
}

/// Union one record's fields into an event. Returns true when the event's
/// latest start date moved forward.
pub(crate) fn accumulate(event: &mut GroupedEvent, record: &RawEventRecord) -> bool {
    if let Some(name) = record.full_name() {
        push_unique(&mut event.event_names, &name);
    }
    for performer in &record.performers {
        push_unique(&mut event.performers, performer);
    }
    for venue in &record.venues {
        push_unique(&mut event.venues, venue);
    }
    for location in &record.locations {
        push_unique(&mut event.locations, location);
    }

    let occurrence = record.occurrence();
    if !occurrence.trim().is_empty() {
        event.occurrences.insert(occurrence);
    }
    event.source_events.push(record.clone());

    let start = record.start_date();
    if start > event.latest_date {
        event.latest_date = start;
        true
    } else {
        false
    }
}

/// A live cluster: the event being built plus its matching state
#[derive(Debug, Clone)]
pub(crate) struct Cluster {
    pub event: GroupedEvent,
    span_start: NaiveDate,
    span_end: NaiveDate,
    keys: MatchKeys,
    has_range: bool,
}

impl Cluster {
    pub fn seed(record: &RawEventRecord, keys: RecordKeys) -> Self {
        let mut event = empty_event(&record.id, keys.start);
        accumulate(&mut event, record);
        Self {
            event,
            span_start: keys.start,
            span_end: keys.end,
            keys: keys.keys,
            has_range: record.is_multi_day(),
        }
    }

    pub fn matches(&self, record: &RecordKeys, adjacency_days: i64) -> bool {
        is_match(self.span_start, self.span_end, &self.keys, record, adjacency_days)
    }

    /// Merge a matched record in. Returns true when `latest_date` advanced.
    pub fn absorb(&mut self, record: &RawEventRecord, keys: &RecordKeys) -> bool {
        self.span_start = self.span_start.min(keys.start);
        self.span_end = self.span_end.max(keys.end);
        self.keys.extend(&keys.keys);
        self.has_range |= record.is_multi_day();
        accumulate(&mut self.event, record)
    }

    pub fn latest_date(&self) -> NaiveDate {
        self.event.latest_date
    }

    pub fn has_range(&self) -> bool {
        self.has_range
    }

    pub fn into_event(self) -> GroupedEvent {
        self.event
    }
}
