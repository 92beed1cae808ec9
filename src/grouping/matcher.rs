//! Match predicate shared by both passes.
//!
//! Every field comparison is done on precomputed keys so a cluster never has
//! to re-normalize its accumulated text for each incoming record.

use chrono::{Duration, NaiveDate};

use crate::constants::MAX_WINDOW_DAYS;
use crate::text::normalize::keys_similar;
use crate::text::{get_event_base_name, normalize_event_name, normalize_location, normalize_venue, similarity_key};
use crate::types::{push_unique, RawEventRecord};

/// Comparison keys for one record or the union over a cluster's records
#[derive(Debug, Clone, Default)]
pub(crate) struct MatchKeys {
    /// Canonical locations, compared for exact equality
    pub locations: Vec<String>,
    /// Venue similarity keys
    pub venues: Vec<String>,
    /// Normalized headline names
    pub base_names: Vec<String>,
    /// Similarity keys of headline names and performers
    pub identity: Vec<String>,
}

impl MatchKeys {
    pub fn for_record(record: &RawEventRecord) -> Self {
        let mut keys = MatchKeys::default();

        for location in &record.locations {
            push_unique(&mut keys.locations, &normalize_location(location));
        }
        for venue in &record.venues {
            push_unique(&mut keys.venues, &similarity_key(&normalize_venue(venue)));
        }
        if let Some(full_name) = record.full_name() {
            let base = get_event_base_name(&full_name);
            push_unique(&mut keys.base_names, &normalize_event_name(base));
            push_unique(&mut keys.identity, &similarity_key(base));
        }
        for performer in &record.performers {
            push_unique(&mut keys.identity, &similarity_key(performer));
        }

        keys
    }

    pub fn extend(&mut self, other: &MatchKeys) {
        for (into, from) in [
            (&mut self.locations, &other.locations),
            (&mut self.venues, &other.venues),
            (&mut self.base_names, &other.base_names),
            (&mut self.identity, &other.identity),
        ] {
            for key in from {
                push_unique(into, key);
            }
        }
    }

    fn has_identity(&self) -> bool {
        !self.base_names.is_empty() || !self.identity.is_empty()
    }
}

/// A record prepared for matching
#[derive(Debug, Clone)]
pub(crate) struct RecordKeys {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub keys: MatchKeys,
}

impl RecordKeys {
    pub fn new(record: &RawEventRecord) -> Self {
        Self {
            start: record.start_date(),
            end: record.end_date(),
            keys: MatchKeys::for_record(record),
        }
    }
}

fn locations_agree(cluster: &MatchKeys, record: &MatchKeys) -> bool {
    if cluster.locations.is_empty() || record.locations.is_empty() {
        return true;
    }
    record
        .locations
        .iter()
        .any(|l| cluster.locations.contains(l))
}

fn venues_agree(cluster: &MatchKeys, record: &MatchKeys) -> bool {
    if cluster.venues.is_empty() || record.venues.is_empty() {
        return true;
    }
    record
        .venues
        .iter()
        .any(|r| cluster.venues.iter().any(|c| keys_similar(c, r)))
}

/// Same headliner, or either side's name/performer is similar to the other's
/// name/performer. Sources disagree on which field holds the artist.
fn identity_agrees(cluster: &MatchKeys, record: &MatchKeys) -> bool {
    if !cluster.has_identity() || !record.has_identity() {
        return true;
    }
    if record
        .base_names
        .iter()
        .any(|n| cluster.base_names.contains(n))
    {
        return true;
    }
    record
        .identity
        .iter()
        .any(|r| cluster.identity.iter().any(|c| keys_similar(c, r)))
}

/// Overlapping, nested, or within `adjacency_days` of each other
fn dates_agree(
    span_start: NaiveDate,
    span_end: NaiveDate,
    record: &RecordKeys,
    adjacency_days: i64,
) -> bool {
    let tolerance = Duration::days(adjacency_days.clamp(0, MAX_WINDOW_DAYS));
    let widened_end = span_end.checked_add_signed(tolerance).unwrap_or(span_end);
    let widened_start = span_start.checked_sub_signed(tolerance).unwrap_or(span_start);
    record.start <= widened_end && record.end >= widened_start
}

pub(crate) fn is_match(
    span_start: NaiveDate,
    span_end: NaiveDate,
    cluster: &MatchKeys,
    record: &RecordKeys,
    adjacency_days: i64,
) -> bool {
    locations_agree(cluster, &record.keys)
        && venues_agree(cluster, &record.keys)
        && identity_agrees(cluster, &record.keys)
        && dates_agree(span_start, span_end, record, adjacency_days)
}
