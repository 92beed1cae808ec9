//! Input preparation ahead of grouping: cleaning, URL de-duplication, and
//! the ordering the recency scan relies on.

use std::collections::HashSet;
use tracing::{debug, warn};

use crate::text::sanitize_record;
use crate::types::RawEventRecord;

/// Outcome of cleaning a batch of raw records
#[derive(Debug, Default)]
pub struct PreparedRecords {
    pub records: Vec<RawEventRecord>,
    pub rejected: usize,
    pub duplicates: usize,
}

/// Clean every record, skipping the ones that end up without dates
pub fn sanitize_all(records: &[RawEventRecord]) -> (Vec<RawEventRecord>, usize) {
    let mut cleaned = Vec::with_capacity(records.len());
    let mut rejected = 0;
    for record in records {
        match sanitize_record(record) {
            Ok(r) => cleaned.push(r),
            Err(e) => {
                warn!("Skipping record: {}", e);
                rejected += 1;
            }
        }
    }
    (cleaned, rejected)
}

/// Keep the first record seen for each URL
pub fn dedupe_by_url(records: Vec<RawEventRecord>) -> (Vec<RawEventRecord>, usize) {
    let mut seen: HashSet<String> = HashSet::new();
    let before = records.len();
    let kept: Vec<RawEventRecord> = records
        .into_iter()
        .filter(|r| {
            let url = r.url.trim();
            url.is_empty() || seen.insert(url.to_string())
        })
        .collect();
    let dropped = before - kept.len();
    if dropped > 0 {
        debug!("Dropped {} records with duplicate URLs", dropped);
    }
    (kept, dropped)
}

fn first_or_empty(values: &[String]) -> &str {
    values.first().map(String::as_str).unwrap_or_default()
}

/// Stable sort by (first date, first time, first event name, source domain)
pub fn sort_records(records: &mut [RawEventRecord]) {
    records.sort_by(|a, b| {
        first_or_empty(&a.dates)
            .cmp(first_or_empty(&b.dates))
            .then_with(|| first_or_empty(&a.times).cmp(first_or_empty(&b.times)))
            .then_with(|| first_or_empty(&a.event_names).cmp(first_or_empty(&b.event_names)))
            .then_with(|| a.source_domain().cmp(b.source_domain()))
    });
}

/// sanitize, dedupe, sort
pub fn prepare(records: &[RawEventRecord]) -> PreparedRecords {
    let (cleaned, rejected) = sanitize_all(records);
    let (mut records, duplicates) = dedupe_by_url(cleaned);
    sort_records(&mut records);
    PreparedRecords {
        records,
        rejected,
        duplicates,
    }
}
