//! Maps free-text locations to a UTC offset for "is this still upcoming" checks.
//!
//! Listings are overwhelmingly Japanese, so an empty or Japanese location short
//! circuits to `+09:00`. Everything else goes through a small embedded city
//! gazetteer; the winning IANA zone is evaluated at the listing's own date so
//! DST is respected. The resolver never fails: anything it cannot place is
//! reported as a warning and treated as Japan.

pub mod gazetteer;

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::constants::{JAPAN_OFFSET_SECONDS, JAPAN_TIMEZONE};
use crate::observability::metrics;
use crate::text::prefectures::mentions_prefecture;
use gazetteer::City;

const COUNTRY_MATCH_BONUS: f64 = 20.0;
const PROVINCE_MATCH_BONUS: f64 = 10.0;

const JAPAN_MARKERS: [&str; 3] = ["JAPAN", "JPN", "JP"];

pub fn japan_offset() -> FixedOffset {
    FixedOffset::east_opt(JAPAN_OFFSET_SECONDS).unwrap_or_else(|| Offset::fix(&chrono::Utc))
}

fn words_upper(location: &str) -> Vec<String> {
    location
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_uppercase)
        .collect()
}

/// Empty, explicitly Japanese, or naming a Japanese prefecture
pub fn is_japanese_location(location: &str) -> bool {
    let trimmed = location.trim();
    if trimmed.is_empty() || trimmed.contains("日本") {
        return true;
    }
    if words_upper(trimmed)
        .iter()
        .any(|w| JAPAN_MARKERS.contains(&w.as_str()))
    {
        return true;
    }
    mentions_prefecture(trimmed)
}

fn score(city: &City, location_upper: &str, words: &[String], tokens: &[String]) -> f64 {
    let mut score = f64::from(city.population.max(1)).log10();

    let country_named = location_upper.contains(&city.country.to_uppercase())
        || words.iter().any(|w| {
            let code = gazetteer::resolve_country_alias(w);
            code == city.iso2 || code == city.iso3
        });
    if country_named {
        score += COUNTRY_MATCH_BONUS;
    }

    if !city.province.is_empty() {
        let province = city.province.to_lowercase();
        let province_named = tokens.iter().any(|t| {
            t.to_lowercase() == province
                || gazetteer::province_for_code(&t.to_uppercase())
                    .is_some_and(|p| p.eq_ignore_ascii_case(city.province))
        });
        if province_named {
            score += PROVINCE_MATCH_BONUS;
        }
    }

    score
}

/// Best gazetteer match for a non-Japanese location, if any token names a known city
pub fn best_zone(location: &str) -> Option<&'static str> {
    let tokens: Vec<String> = location
        .split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    let words = words_upper(location);
    let location_upper = location.to_uppercase();

    let mut best: Option<(&'static City, f64)> = None;
    for token in &tokens {
        for &city in gazetteer::lookup(token) {
            let s = score(city, &location_upper, &words, &tokens);
            if best.map_or(true, |(_, best_score)| s > best_score) {
                best = Some((city, s));
            }
        }
    }
    best.map(|(city, _)| city.zone)
}

/// IANA zone name for a location; Japan when nothing better is known
pub fn resolve_timezone(location: &str) -> &'static str {
    if is_japanese_location(location) {
        return JAPAN_TIMEZONE;
    }
    best_zone(location).unwrap_or(JAPAN_TIMEZONE)
}

fn parse_local(date_time: &str) -> Option<NaiveDateTime> {
    let value = date_time.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()
        .or_else(|| {
            // Bare dates are evaluated at noon, clear of midnight DST transitions
            NaiveDate::parse_from_str(value.get(..10)?, "%Y-%m-%d")
                .ok()?
                .and_hms_opt(12, 0, 0)
        })
}

fn offset_in_zone(zone: &str, local: &NaiveDateTime) -> Option<FixedOffset> {
    let tz: Tz = zone.parse().ok()?;
    let resolved = tz
        .from_local_datetime(local)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(local));
    Some(resolved.offset().fix())
}

fn fallback(date_time: &str, location: &str, reason: &str) -> FixedOffset {
    warn!(
        "Timezone fallback to Japan for '{}' at '{}': {}",
        location, date_time, reason
    );
    metrics::timezone::fallback();
    japan_offset()
}

/// UTC offset in effect at `date_time` (offset-less ISO date or date-time) for `location`
pub fn offset_for(date_time: &str, location: &str) -> FixedOffset {
    if is_japanese_location(location) {
        return japan_offset();
    }

    let Some(zone) = best_zone(location) else {
        return fallback(date_time, location, "no gazetteer match");
    };
    let Some(local) = parse_local(date_time) else {
        return fallback(date_time, location, "unparseable date");
    };

    match offset_in_zone(zone, &local) {
        Some(offset) => {
            debug!("Resolved '{}' to {} ({})", location, zone, offset);
            offset
        }
        None => fallback(date_time, location, "unknown zone"),
    }
}

/// Offset formatted as `±HH:MM`
pub fn resolve_offset(date_time: &str, location: &str) -> String {
    offset_for(date_time, location).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_japanese_locations_short_circuit() {
        assert_eq!(resolve_offset("2026-07-01T19:00:00", ""), "+09:00");
        assert_eq!(resolve_offset("2026-07-01T19:00:00", "Tokyo, Japan"), "+09:00");
        assert_eq!(resolve_offset("2026-07-01T19:00:00", "大阪府"), "+09:00");
        assert_eq!(resolve_offset("2026-07-01", "Fukuoka"), "+09:00");
        assert_eq!(resolve_timezone("Sapporo, JP"), "Asia/Tokyo");
    }

    #[test]
    fn test_dst_is_respected() {
        assert_eq!(resolve_offset("2026-07-01T20:00:00", "London, UK"), "+01:00");
        assert_eq!(resolve_offset("2026-01-15T20:00:00", "London, UK"), "+00:00");
        assert_eq!(resolve_offset("2026-07-01", "New York, NY"), "-04:00");
    }

    #[test]
    fn test_country_and_province_break_ties() {
        assert_eq!(best_zone("London, Ontario, Canada"), Some("America/Toronto"));
        assert_eq!(best_zone("London"), Some("Europe/London"));
        assert_eq!(best_zone("Portland, ME"), Some("America/New_York"));
        assert_eq!(best_zone("Portland, OR"), Some("America/Los_Angeles"));
        assert_eq!(best_zone("Perth, Scotland, UK"), Some("Europe/London"));
        assert_eq!(best_zone("Perth"), Some("Australia/Perth"));
    }

    #[test]
    fn test_country_alias() {
        assert_eq!(resolve_timezone("Seoul, Korea"), "Asia/Seoul");
        assert_eq!(resolve_timezone("Dubai, UAE"), "Asia/Dubai");
    }

    #[test]
    fn test_unknown_location_falls_back_to_japan() {
        assert_eq!(resolve_offset("2026-07-01T19:00:00", "Atlantis"), "+09:00");
        assert_eq!(resolve_offset("not a date", "Seoul"), "+09:00");
    }
}
