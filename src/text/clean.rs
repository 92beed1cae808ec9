use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use unicode_normalization::UnicodeNormalization;

use crate::error::{GrouperError, Result};
use crate::types::RawEventRecord;

static NUMERIC_ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&#(?:x([0-9a-fA-F]+)|([0-9]+));").expect("valid regex"));

const HIDDEN_CHARS: [char; 4] = ['\u{200b}', '\u{feff}', '\u{200e}', '\u{200f}'];

fn unescape_entities(text: &str) -> String {
    let named = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&nbsp;", "\u{a0}");

    let decoded = NUMERIC_ENTITY.replace_all(&named, |caps: &Captures| {
        let code = match (caps.get(1), caps.get(2)) {
            (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
            (None, Some(dec)) => dec.as_str().parse::<u32>().ok(),
            _ => None,
        };
        code.and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });

    // Ampersand last so "&amp;lt;" stays literal "&lt;"
    decoded.replace("&amp;", "&")
}

/// Clean scraped text: decode HTML entities, NFKC-normalize, drop hidden
/// characters and non-breaking spaces. Returns `None` for blank input.
pub fn clean_text(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }

    let unescaped = unescape_entities(text);
    let normalized: String = unescaped
        .nfkc()
        .filter(|c| !HIDDEN_CHARS.contains(c))
        .map(|c| if c == '\u{a0}' { ' ' } else { c })
        .collect();

    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Clean every entry and de-duplicate, preserving first-seen order
pub fn clean_list(values: &[String]) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(values.len());
    for value in values.iter().filter_map(|v| clean_text(v)) {
        if !cleaned.contains(&value) {
            cleaned.push(value);
        }
    }
    cleaned
}

/// Produce a cleaned copy of a record ready for grouping.
///
/// Fails only when the record has no usable dates, since every downstream
/// stage relies on at least one.
pub fn sanitize_record(record: &RawEventRecord) -> Result<RawEventRecord> {
    let dates = clean_list(&record.dates);
    if dates.is_empty() {
        return Err(GrouperError::InvalidRecord {
            id: record.id.clone(),
            reason: "no dates".to_string(),
        });
    }

    Ok(RawEventRecord {
        id: record.id.trim().to_string(),
        event_names: clean_list(&record.event_names),
        performers: clean_list(&record.performers),
        venues: clean_list(&record.venues),
        locations: clean_list(&record.locations),
        dates,
        times: clean_list(&record.times),
        url: record.url.trim().to_string(),
        tickets: clean_list(&record.tickets),
        image: record.image.as_deref().and_then(clean_text),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_entities_and_hidden_chars() {
        assert_eq!(clean_text("Rock &amp; Roll").as_deref(), Some("Rock & Roll"));
        assert_eq!(clean_text("&#039;Live&#x27;").as_deref(), Some("'Live'"));
        assert_eq!(clean_text("\u{200b}Zepp\u{a0}Tokyo\u{feff} ").as_deref(), Some("Zepp Tokyo"));
        assert_eq!(clean_text("&amp;lt;").as_deref(), Some("&lt;"));
    }

    #[test]
    fn test_clean_text_nfkc() {
        assert_eq!(clean_text("ＺＥＰＰ　ＴＯＫＹＯ").as_deref(), Some("ZEPP TOKYO"));
    }

    #[test]
    fn test_clean_text_blank() {
        assert_eq!(clean_text(""), None);
        assert_eq!(clean_text(" \u{200b} "), None);
        assert_eq!(clean_text("&nbsp;"), None);
    }

    #[test]
    fn test_sanitize_record_dedupes_and_rejects_dateless() {
        let record = RawEventRecord {
            id: " r1 ".to_string(),
            event_names: vec!["Show".to_string(), "Show ".to_string(), "".to_string()],
            performers: vec!["A".to_string()],
            venues: Vec::new(),
            locations: Vec::new(),
            dates: vec!["2026-01-01".to_string(), "2026-01-01".to_string()],
            times: Vec::new(),
            url: "https://example.com/1".to_string(),
            tickets: Vec::new(),
            image: Some("  ".to_string()),
        };

        let cleaned = sanitize_record(&record).unwrap();
        assert_eq!(cleaned.id, "r1");
        assert_eq!(cleaned.event_names, vec!["Show"]);
        assert_eq!(cleaned.dates, vec!["2026-01-01"]);
        assert_eq!(cleaned.image, None);

        let dateless = RawEventRecord {
            dates: vec![" ".to_string()],
            ..record
        };
        assert!(matches!(
            sanitize_record(&dateless),
            Err(GrouperError::InvalidRecord { .. })
        ));
    }
}
