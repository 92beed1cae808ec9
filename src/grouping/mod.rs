//! Record linkage: folds a stream of raw listings into clusters, one per
//! real-world occurrence.
//!
//! Records are processed strictly in order. Each one is first tested against
//! recently touched clusters (pass 1), stopping as soon as a cluster's latest
//! date is too far from the record's start. Records that miss are then tested
//! against every cluster holding a multi-day record (pass 2), since a festival
//! pass can match listings weeks away from its latest date. A record that
//! still matches nothing starts a new cluster.
//!
//! The first eligible cluster in scan order wins. There is no best-match
//! scoring, so a record plausibly matching two clusters (two tours sharing a
//! venue on overlapping dates) lands in whichever is scanned first.

mod cluster;
pub mod display;
mod matcher;

use std::collections::BTreeSet;
use std::time::Instant;
use tracing::{debug, info};

use crate::config::GroupingConfig;
use crate::dates::far_future;
use crate::observability::metrics;
use crate::types::{GroupedEvent, RawEventRecord};
use cluster::Cluster;
use matcher::RecordKeys;

pub use display::{finalize, rebuild, sort_by_display_date};

/// Index of a cluster in creation order
pub type ClusterId = usize;

/// Where a record ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionDecision {
    MatchedRecent(ClusterId),
    MatchedRange(ClusterId),
    NewCluster(ClusterId),
}

impl ResolutionDecision {
    pub fn cluster_id(&self) -> ClusterId {
        match self {
            ResolutionDecision::MatchedRecent(id)
            | ResolutionDecision::MatchedRange(id)
            | ResolutionDecision::NewCluster(id) => *id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupingStats {
    pub records: usize,
    pub clusters: usize,
    pub recent_matches: usize,
    pub range_matches: usize,
}

/// Incremental clustering state. Feed records with [`EventGrouper::push`],
/// then call [`EventGrouper::finish`] once.
pub struct EventGrouper {
    config: GroupingConfig,
    clusters: Vec<Cluster>,
    /// Cluster ids, most recently advanced last
    recency: Vec<ClusterId>,
    range_clusters: BTreeSet<ClusterId>,
    stats: GroupingStats,
}

impl EventGrouper {
    pub fn new(config: GroupingConfig) -> Self {
        Self {
            config,
            clusters: Vec::new(),
            recency: Vec::new(),
            range_clusters: BTreeSet::new(),
            stats: GroupingStats::default(),
        }
    }

    pub fn stats(&self) -> &GroupingStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn push(&mut self, record: &RawEventRecord) -> ResolutionDecision {
        let keys = RecordKeys::new(record);
        self.stats.records += 1;

        let decision = if let Some(id) = self.scan_recent(&keys) {
            self.absorb(id, record, &keys);
            self.stats.recent_matches += 1;
            ResolutionDecision::MatchedRecent(id)
        } else if let Some(id) = self.scan_ranges(&keys) {
            self.absorb(id, record, &keys);
            self.stats.range_matches += 1;
            ResolutionDecision::MatchedRange(id)
        } else {
            ResolutionDecision::NewCluster(self.create(record, keys))
        };

        debug!("Record {} -> {:?}", record.id, decision);
        decision
    }

    fn scan_recent(&self, keys: &RecordKeys) -> Option<ClusterId> {
        let undated = far_future();
        for &id in self.recency.iter().rev() {
            let cluster = &self.clusters[id];
            // Clusters seeded by undated records never match; step over them
            if cluster.latest_date() == undated {
                continue;
            }
            let distance = (cluster.latest_date() - keys.start).num_days().abs();
            if distance > self.config.recency_window_days {
                break;
            }
            if cluster.matches(keys, self.config.adjacency_days) {
                return Some(id);
            }
        }
        None
    }

    fn scan_ranges(&self, keys: &RecordKeys) -> Option<ClusterId> {
        self.range_clusters
            .iter()
            .copied()
            .find(|&id| self.clusters[id].matches(keys, self.config.adjacency_days))
    }

    fn absorb(&mut self, id: ClusterId, record: &RawEventRecord, keys: &RecordKeys) {
        let cluster = &mut self.clusters[id];
        let advanced = cluster.absorb(record, keys);
        if cluster.has_range() {
            self.range_clusters.insert(id);
        }
        if advanced {
            if let Some(pos) = self.recency.iter().position(|&c| c == id) {
                self.recency.remove(pos);
            }
            self.recency.push(id);
        }
    }

    fn create(&mut self, record: &RawEventRecord, keys: RecordKeys) -> ClusterId {
        let id = self.clusters.len();
        let cluster = Cluster::seed(record, keys);
        if cluster.has_range() {
            self.range_clusters.insert(id);
        }
        self.clusters.push(cluster);
        self.recency.push(id);
        self.stats.clusters += 1;
        id
    }

    /// Derive display fields and return clusters sorted by first display date
    pub fn finish(self) -> Vec<GroupedEvent> {
        let min_chars = self.config.min_common_name_chars;
        let mut events: Vec<GroupedEvent> = self
            .clusters
            .into_iter()
            .map(|cluster| {
                let mut event = cluster.into_event();
                finalize(&mut event, min_chars);
                event
            })
            .collect();
        sort_by_display_date(&mut events);
        events
    }
}

/// Group records with the default configuration
pub fn group_events(records: &[RawEventRecord]) -> Vec<GroupedEvent> {
    group_events_with(records, &GroupingConfig::default())
}

pub fn group_events_with(records: &[RawEventRecord], config: &GroupingConfig) -> Vec<GroupedEvent> {
    let started = Instant::now();
    let mut grouper = EventGrouper::new(config.clone());
    for record in records {
        grouper.push(record);
    }

    let stats = grouper.stats().clone();
    let events = grouper.finish();

    metrics::grouping::records_processed(stats.records as u64);
    metrics::grouping::clusters_created(stats.clusters as u64);
    metrics::grouping::recent_matches(stats.recent_matches as u64);
    metrics::grouping::range_matches(stats.range_matches as u64);
    metrics::grouping::duration(started.elapsed().as_secs_f64());

    info!(
        "Grouped {} records into {} clusters ({} recent matches, {} range matches)",
        stats.records, stats.clusters, stats.recent_matches, stats.range_matches
    );
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str, venue: &str, dates: &[&str]) -> RawEventRecord {
        RawEventRecord {
            id: id.to_string(),
            event_names: vec![name.to_string()],
            performers: Vec::new(),
            venues: vec![venue.to_string()],
            locations: Vec::new(),
            dates: dates.iter().map(|d| d.to_string()).collect(),
            times: Vec::new(),
            url: format!("https://example.com/{}", id),
            tickets: Vec::new(),
            image: None,
        }
    }

    #[test]
    fn test_case_variants_merge() {
        let mut grouper = EventGrouper::new(GroupingConfig::default());
        let a = grouper.push(&record("a", "Artist Live", "Zepp Tokyo", &["2026-02-16"]));
        let b = grouper.push(&record("b", "ARTIST LIVE", "zepp tokyo", &["2026-02-16"]));
        assert_eq!(a, ResolutionDecision::NewCluster(0));
        assert_eq!(b, ResolutionDecision::MatchedRecent(0));

        let events = grouper.finish();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].display_names, vec!["Artist Live"]);
    }

    #[test]
    fn test_range_cluster_matches_via_second_pass() {
        let mut grouper = EventGrouper::new(GroupingConfig::default());
        grouper.push(&record("fest", "Festival", "Umishiba Park", &["2026-07-25", "2026-08-23"]));
        let day = grouper.push(&record("day", "Festival", "Umishiba Park", &["2026-08-01"]));
        assert_eq!(day, ResolutionDecision::MatchedRange(0));
        assert_eq!(grouper.stats().range_matches, 1);
    }

    #[test]
    fn test_recency_window_stops_scan() {
        let mut grouper = EventGrouper::new(GroupingConfig::default());
        grouper.push(&record("a", "Show", "Hall", &["2026-05-01"]));
        grouper.push(&record("b", "Other", "Arena", &["2026-05-10"]));
        // Same show two days later is outside adjacency anyway, and the scan
        // stops at the 05-10 cluster before reaching it.
        let c = grouper.push(&record("c", "Show", "Hall", &["2026-05-03"]));
        assert_eq!(c, ResolutionDecision::NewCluster(2));
    }

    #[test]
    fn test_undated_cluster_does_not_end_scan() {
        let mut grouper = EventGrouper::new(GroupingConfig::default());
        grouper.push(&record("a", "Show", "Hall", &["2026-05-01"]));
        grouper.push(&record("b", "Other", "Arena", &["TBA"]));
        let c = grouper.push(&record("c", "Show", "Hall", &["2026-05-01"]));
        assert_eq!(c, ResolutionDecision::MatchedRecent(0));
        assert_eq!(grouper.finish().len(), 2);
    }

    #[test]
    fn test_touched_cluster_moves_to_front() {
        let mut grouper = EventGrouper::new(GroupingConfig::default());
        grouper.push(&record("a", "Show", "Hall", &["2026-05-01"]));
        grouper.push(&record("b", "Other", "Arena", &["2026-05-01"]));
        grouper.push(&record("c", "Show", "Hall", &["2026-05-02"]));
        assert_eq!(grouper.recency, vec![1, 0]);
    }

    #[test]
    fn test_first_eligible_cluster_wins() {
        let mut grouper = EventGrouper::new(GroupingConfig::default());
        grouper.push(&record("a", "Show", "Hall A", &["2026-05-01"]));
        grouper.push(&record("b", "Show", "Hall B", &["2026-05-01"]));
        // No venue on the third record, so both clusters are eligible
        let mut third = record("c", "Show", "", &["2026-05-01"]);
        third.venues.clear();
        assert_eq!(grouper.push(&third), ResolutionDecision::MatchedRecent(1));
    }

    #[test]
    fn test_group_events_sorts_output() {
        let events = group_events(&[
            record("late", "Late Show", "Hall", &["2026-06-01"]),
            record("early", "Early Show", "Arena", &["2026-05-01"]),
        ]);
        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late"]);
    }
}
