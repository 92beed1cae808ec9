use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::constants::NAME_SEPARATOR;
use crate::dates;

/// One raw listing scraped from a single source. Never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEventRecord {
    pub id: String,
    /// Headline first; later entries are subtitle/qualifier segments
    #[serde(default)]
    pub event_names: Vec<String>,
    #[serde(default)]
    pub performers: Vec<String>,
    #[serde(default)]
    pub venues: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    /// One entry for a single day, two or more for a contiguous range
    pub dates: Vec<String>,
    /// Start time and optional end time
    #[serde(default)]
    pub times: Vec<String>,
    pub url: String,
    #[serde(default)]
    pub tickets: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl RawEventRecord {
    /// Event names joined with the qualifier separator, or `None` when the record has no name
    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .event_names
            .iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(NAME_SEPARATOR))
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        dates::start_date(&self.dates)
    }

    pub fn end_date(&self) -> NaiveDate {
        dates::end_date(&self.dates)
    }

    pub fn is_multi_day(&self) -> bool {
        self.dates.len() >= 2
    }

    pub fn start_time(&self) -> Option<&str> {
        self.times
            .first()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
    }

    /// The ISO date(-time) string this record contributes to its cluster
    pub fn occurrence(&self) -> String {
        dates::occurrence_for(self)
    }

    /// Host part of the record URL, used as a tie-breaker when ordering input
    pub fn source_domain(&self) -> &str {
        let without_scheme = self
            .url
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.url);
        without_scheme
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default()
    }
}

/// A cluster of records believed to describe the same real-world occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedEvent {
    /// Id of the first record merged into this cluster
    pub id: String,
    pub event_names: Vec<String>,
    pub performers: Vec<String>,
    pub venues: Vec<String>,
    pub locations: Vec<String>,
    pub occurrences: BTreeSet<String>,
    /// Latest start date seen, bounds the recency scan
    pub latest_date: NaiveDate,
    pub source_events: Vec<RawEventRecord>,

    // Display fields, derived once the stream is finished
    #[serde(default)]
    pub display_names: Vec<String>,
    #[serde(default)]
    pub display_performers: Vec<String>,
    #[serde(default)]
    pub display_dates: Vec<String>,
    #[serde(default)]
    pub time: Option<String>,
}

impl GroupedEvent {
    /// The record whose id the cluster carries
    pub fn base_record(&self) -> Option<&RawEventRecord> {
        self.source_events.first()
    }

    pub fn first_display_date(&self) -> Option<&str> {
        self.display_dates.first().map(String::as_str)
    }
}

/// Insert into an insertion-ordered set
pub(crate) fn push_unique(set: &mut Vec<String>, value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() || set.iter().any(|v| v == value) {
        return false;
    }
    set.push(value.to_string());
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(names: &[&str], dates: &[&str], url: &str) -> RawEventRecord {
        RawEventRecord {
            id: "r1".to_string(),
            event_names: names.iter().map(|s| s.to_string()).collect(),
            performers: Vec::new(),
            venues: Vec::new(),
            locations: Vec::new(),
            dates: dates.iter().map(|s| s.to_string()).collect(),
            times: Vec::new(),
            url: url.to_string(),
            tickets: Vec::new(),
            image: None,
        }
    }

    #[test]
    fn test_full_name_joins_qualifiers() {
        let r = record(&["Headliner", " Asia Tour "], &["2026-03-01"], "https://a.example/1");
        assert_eq!(r.full_name().as_deref(), Some("Headliner||Asia Tour"));

        let unnamed = record(&[" "], &["2026-03-01"], "https://a.example/1");
        assert_eq!(unnamed.full_name(), None);
    }

    #[test]
    fn test_source_domain() {
        let r = record(&["X"], &["2026-03-01"], "https://eplus.jp/sf/detail/123?x=1");
        assert_eq!(r.source_domain(), "eplus.jp");

        let bare = record(&["X"], &["2026-03-01"], "t.pia.jp/abc");
        assert_eq!(bare.source_domain(), "t.pia.jp");
    }

    #[test]
    fn test_push_unique_skips_duplicates_and_blanks() {
        let mut set = Vec::new();
        assert!(push_unique(&mut set, "Zepp Tokyo"));
        assert!(!push_unique(&mut set, "Zepp Tokyo "));
        assert!(!push_unique(&mut set, "  "));
        assert!(push_unique(&mut set, "zepp tokyo"));
        assert_eq!(set, vec!["Zepp Tokyo", "zepp tokyo"]);
    }

    #[test]
    fn test_record_deserializes_with_defaults() {
        let json = serde_json::json!({
            "id": "abc",
            "dates": ["2026-07-25", "2026-08-23"],
            "url": "https://example.com/fest"
        });
        let r: RawEventRecord = serde_json::from_value(json).unwrap();
        assert!(r.is_multi_day());
        assert!(r.event_names.is_empty());
        assert_eq!(r.image, None);
    }
}
