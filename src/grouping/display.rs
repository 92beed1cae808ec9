//! Display fields for finished clusters.

use std::cmp::Ordering;

use super::cluster::{accumulate, empty_event};
use crate::dates::{filter_redundant_dates, representative_time};
use crate::merge::{merge_event_names_with_min, merge_performers};
use crate::types::{GroupedEvent, RawEventRecord};

/// Derive `display_names`, `display_performers`, `display_dates` and `time`
pub fn finalize(event: &mut GroupedEvent, min_common_name_chars: usize) {
    event.display_names = merge_event_names_with_min(&event.event_names, min_common_name_chars);
    event.display_performers = merge_performers(&event.performers);
    event.display_dates = filter_redundant_dates(&event.occurrences);
    event.time = representative_time(event);
}

/// Rebuild a cluster from a subset of its records, keeping its id.
/// `None` when no records remain.
pub fn rebuild(
    event: &GroupedEvent,
    records: &[RawEventRecord],
    min_common_name_chars: usize,
) -> Option<GroupedEvent> {
    let first = records.first()?;
    let mut rebuilt = empty_event(&event.id, first.start_date());
    for record in records {
        accumulate(&mut rebuilt, record);
    }
    finalize(&mut rebuilt, min_common_name_chars);
    Some(rebuilt)
}

fn by_first_display_date(a: &GroupedEvent, b: &GroupedEvent) -> Ordering {
    match (a.first_display_date(), b.first_display_date()) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort by first display date; clusters without one go last
pub fn sort_by_display_date(events: &mut [GroupedEvent]) {
    events.sort_by(by_first_display_date);
}
