use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use super::prefectures::prefecture_key;
use crate::constants::NAME_SEPARATOR;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

static VENUE_COUNTRY_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[,\s]*japan\s*$").expect("valid regex"));

static LOCATION_COUNTRY_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[,、\s]*(japan|日本)\s*$").expect("valid regex"));

static LOCATION_ADMIN_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s-]*(prefecture|city|ward)$").expect("valid regex"));

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Lowercase, drop a trailing "Japan", collapse whitespace
pub fn normalize_venue(venue: &str) -> String {
    let lowered = venue.to_lowercase();
    let stripped = VENUE_COUNTRY_SUFFIX.replace(&lowered, "");
    collapse_whitespace(&stripped)
}

/// Lowercase and unify the quote variants sources use interchangeably
pub fn normalize_event_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| match c {
            '‘' | '’' | '‚' | '‛' | '′' | '＇' => '\'',
            '“' | '”' | '„' | '‟' | '″' | '«' | '»' | '＂' => '"',
            other => other,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Reduce a place name to a comparable key: country suffix and administrative
/// suffixes removed, prefecture spellings folded to one romanized form.
pub fn normalize_location(location: &str) -> String {
    let without_country = LOCATION_COUNTRY_SUFFIX.replace(location.trim(), "");
    let lowered = collapse_whitespace(&without_country.to_lowercase());
    let without_admin = LOCATION_ADMIN_SUFFIX.replace(&lowered, "");
    let key = without_admin.trim();

    match prefecture_key(key) {
        Some(prefecture) => prefecture.to_string(),
        None => key.to_string(),
    }
}

/// Compatibility-normalize and keep only letters and numbers
pub fn strip_symbols(text: &str) -> String {
    text.nfkc().filter(|c| c.is_alphanumeric()).collect()
}

/// Comparison key used by [`are_strings_similar`]
pub fn similarity_key(text: &str) -> String {
    strip_symbols(text).to_lowercase()
}

/// Containment test over precomputed similarity keys. Empty keys never match.
pub fn keys_similar(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(b) || b.contains(a)
}

/// True when, ignoring case and symbols, one string contains the other
pub fn are_strings_similar(a: &str, b: &str) -> bool {
    keys_similar(&similarity_key(a), &similarity_key(b))
}

/// Headline portion of an event name, before any qualifier separator
pub fn get_event_base_name(name: &str) -> &str {
    match name.find(NAME_SEPARATOR) {
        Some(idx) => name[..idx].trim(),
        None => name.trim(),
    }
}

/// Replace qualifier separators with spaces for display
pub fn clean_separators(name: &str) -> String {
    collapse_whitespace(&name.replace(NAME_SEPARATOR, " "))
}
