//! Event-name merging.
//!
//! A finished cluster usually carries several spellings of the same show:
//! per-day rows ("Show (Day 1)", "Show (Day 2)"), stylized and all-caps
//! copies, or names with and without a tour subtitle. This module reduces them
//! to the label a reader should see, usually a single string.

use super::resolve_case_variants;
use crate::constants::{BRACKET_PAIRS, COLLABORATION_MARKER};
use crate::text::{clean_separators, normalize_event_name, similarity_key};

/// Shortest common substring accepted as a merged name
pub const DEFAULT_MIN_COMMON_CHARS: usize = 2;

/// Merge event-name variants into canonical display name(s)
pub fn merge_event_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    merge_event_names_with_min(names, DEFAULT_MIN_COMMON_CHARS)
}

pub fn merge_event_names_with_min<S: AsRef<str>>(names: &[S], min_common_chars: usize) -> Vec<String> {
    let cleaned: Vec<String> = names
        .iter()
        .map(|n| clean_separators(n.as_ref()))
        .collect();
    let variants = resolve_case_variants(&cleaned, normalize_event_name);

    if variants.len() <= 1 {
        return variants;
    }

    let chars: Vec<Vec<char>> = variants.iter().map(|v| v.chars().collect()).collect();
    let folded: Vec<Vec<char>> = chars.iter().map(|c| fold_case(c)).collect();
    let common = folded
        .iter()
        .skip(1)
        .fold(folded[0].clone(), |acc, next| longest_common_substring(&acc, next));
    // The folded match is a slice of the first variant; display its original spelling
    let refined: String = match find_subslice(&folded[0], &common) {
        Some(pos) => {
            let (start, end) = refine_brackets(&common, &folded);
            let span = &chars[0][pos + start..pos + end];
            let (inner_start, inner_end) = balanced_span(span);
            span[inner_start..inner_end].iter().collect()
        }
        None => String::new(),
    };
    let refined = refined.trim_matches(is_dangling).to_string();

    if refined.chars().count() < min_common_chars {
        return match find_superset(&variants) {
            Some(superset) => vec![superset],
            None => variants,
        };
    }

    if let Some(collab) = find_collaboration(&refined, &variants) {
        return vec![collab];
    }

    vec![refined]
}

/// Per-char lowercase that keeps indices aligned with the original text
fn fold_case(text: &[char]) -> Vec<char> {
    text.iter()
        .map(|&c| {
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(l), None) => l,
                _ => c,
            }
        })
        .collect()
}

/// Classic dynamic-programming longest common substring over chars.
/// Ties resolve to the earliest position in `a`.
fn longest_common_substring(a: &[char], b: &[char]) -> Vec<char> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut cur = vec![0usize; b.len() + 1];
    let (mut best_len, mut best_end) = (0usize, 0usize);

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            if a[i - 1] == b[j - 1] {
                cur[j] = prev[j - 1] + 1;
                if cur[j] > best_len {
                    best_len = cur[j];
                    best_end = i;
                }
            } else {
                cur[j] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    a[best_end - best_len..best_end].to_vec()
}

fn closer_for(c: char) -> Option<char> {
    BRACKET_PAIRS
        .iter()
        .find(|(open, _)| *open == c)
        .map(|(_, close)| *close)
}

fn opener_for(c: char) -> Option<char> {
    BRACKET_PAIRS
        .iter()
        .find(|(_, close)| *close == c)
        .map(|(open, _)| *open)
}

fn is_dangling(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | '–' | '—' | ':' | '/' | '|' | '~' | '～' | '・' | ',' | '、')
}

/// Closers still owed by brackets opened in `text`, innermost last
fn unclosed_openers(text: &[char]) -> Vec<char> {
    let mut owed = Vec::new();
    for &c in text {
        if let Some(close) = closer_for(c) {
            owed.push(close);
        } else if opener_for(c).is_some() && owed.last() == Some(&c) {
            owed.pop();
        }
    }
    owed
}

/// Openers still owed by brackets closed in `text` (read right to left), innermost last
fn unmatched_closers(text: &[char]) -> Vec<char> {
    let mut owed = Vec::new();
    for &c in text.iter().rev() {
        if let Some(open) = opener_for(c) {
            owed.push(open);
        } else if closer_for(c).is_some() && owed.last() == Some(&c) {
            owed.pop();
        }
    }
    owed
}

fn find_subslice(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// First index of `common` that lies after every bracket carried in from the left
fn left_cut(common: &[char], mut carried: Vec<char>) -> usize {
    let mut nested = Vec::new();
    let mut cut = 0;
    for (i, &c) in common.iter().enumerate() {
        if carried.is_empty() {
            break;
        }
        if let Some(close) = closer_for(c) {
            nested.push(close);
        } else if opener_for(c).is_some() {
            if nested.last() == Some(&c) {
                nested.pop();
            } else if carried.last() == Some(&c) {
                carried.pop();
                cut = i + 1;
            }
        }
    }
    cut
}

/// Exclusive end index of `common` that lies before every bracket left open toward the right
fn right_cut(common: &[char], mut carried: Vec<char>) -> usize {
    let mut nested = Vec::new();
    let mut cut = common.len();
    for (i, &c) in common.iter().enumerate().rev() {
        if carried.is_empty() {
            break;
        }
        if let Some(open) = opener_for(c) {
            nested.push(open);
        } else if closer_for(c).is_some() {
            if nested.last() == Some(&c) {
                nested.pop();
            } else if carried.last() == Some(&c) {
                carried.pop();
                cut = i;
            }
        }
    }
    cut
}

/// Shrink the common substring so it neither starts inside a bracket opened to
/// its left nor ends inside a bracket closed to its right, in any variant.
/// Returns the kept `start..end` range of `common`.
fn refine_brackets(common: &[char], variants: &[Vec<char>]) -> (usize, usize) {
    let mut start = 0;
    let mut end = common.len();

    for variant in variants {
        let Some(pos) = find_subslice(variant, common) else {
            continue;
        };
        let left = &variant[..pos];
        let right = &variant[pos + common.len()..];

        start = start.max(left_cut(common, unclosed_openers(left)));
        end = end.min(right_cut(common, unmatched_closers(right)));
    }

    (start, end.max(start))
}

/// Range of `text` with no bracket left unbalanced: starts after any stray
/// closer and ends before the first opener that is never closed.
fn balanced_span(text: &[char]) -> (usize, usize) {
    let mut start = 0;
    let mut open: Vec<(usize, char)> = Vec::new();
    for (i, &c) in text.iter().enumerate() {
        if let Some(close) = closer_for(c) {
            open.push((i, close));
        } else if opener_for(c).is_some() {
            if open.last().map(|(_, close)| *close) == Some(c) {
                open.pop();
            } else if open.is_empty() {
                start = i + 1;
            }
        }
    }
    let end = open.first().map_or(text.len(), |(i, _)| *i);
    (start, end.max(start))
}

/// A variant whose key contains every other variant's key
fn find_superset(variants: &[String]) -> Option<String> {
    let keys: Vec<String> = variants.iter().map(|v| similarity_key(v)).collect();
    variants
        .iter()
        .zip(&keys)
        .find(|(_, key)| !key.is_empty() && keys.iter().all(|other| key.contains(other.as_str())))
        .map(|(variant, _)| variant.clone())
}

/// The longest variant that continues the common prefix with a collaboration marker.
/// The prefix comparison ignores case.
fn find_collaboration(common: &str, variants: &[String]) -> Option<String> {
    let common = fold_case(&common.chars().collect::<Vec<_>>());
    variants
        .iter()
        .filter(|v| {
            let chars: Vec<char> = v.chars().collect();
            fold_case(&chars).starts_with(&common)
                && chars[common.len()..]
                    .iter()
                    .collect::<String>()
                    .trim_start()
                    .starts_with(COLLABORATION_MARKER)
        })
        .max_by_key(|v| v.chars().count())
        .map(|v| v.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_single_name_passes_through() {
        assert_eq!(merge_event_names(&["Show"]), vec!["Show"]);
    }

    #[test]
    fn test_separator_cleanup() {
        assert_eq!(merge_event_names(&["Show||Asia Tour"]), vec!["Show Asia Tour"]);
    }

    #[test]
    fn test_case_variants_collapse() {
        assert_eq!(merge_event_names(&["ARTIST LIVE", "Artist Live"]), vec!["Artist Live"]);
    }

    #[test]
    fn test_day_suffixes_do_not_leave_open_bracket() {
        let merged = merge_event_names(&["Show (Day 1)", "Show (Day 2)"]);
        assert_eq!(merged, vec!["Show"]);
        assert!(!merged[0].ends_with('('));
    }

    #[test]
    fn test_full_width_brackets() {
        let merged = merge_event_names(&["ツアー【東京公演】", "ツアー【大阪公演】"]);
        assert_eq!(merged, vec!["ツアー"]);
    }

    #[test]
    fn test_start_inside_bracket_is_trimmed() {
        // Common text "Night) Special Tour" starts inside a bracket opened on the left
        let merged = merge_event_names(&["A (Late Night) Special Tour", "B (Early Night) Special Tour"]);
        assert_eq!(merged, vec!["Special Tour"]);
    }

    #[test]
    fn test_superset_variant_wins_when_no_common_text() {
        let merged = merge_event_names(&["A", "A Live 2026"]);
        assert_eq!(merged, vec!["A Live 2026"]);
    }

    #[test]
    fn test_unrelated_names_kept_separately() {
        let merged = merge_event_names(&["Alpha", "Zulu"]);
        assert_eq!(merged, vec!["Alpha", "Zulu"]);
    }

    #[test]
    fn test_collaboration_variant_preferred() {
        let merged = merge_event_names(&["Artist A × Artist B", "Artist A Live"]);
        assert_eq!(merged, vec!["Artist A × Artist B"]);
    }

    #[test]
    fn test_common_text_ignores_case_across_lengths() {
        assert_eq!(merge_event_names(&["Artist Live", "artist live tour"]), vec!["Artist Live"]);
        assert_eq!(merge_event_names(&["Live", "live tour", "LIVE"]), vec!["Live"]);
        assert_eq!(merge_event_names(&["Band Japan Tour 2026", "BAND"]), vec!["Band"]);
    }

    #[test]
    fn test_collaboration_prefix_ignores_case() {
        let merged = merge_event_names(&["ARTIST A × Artist B", "artist a live"]);
        assert_eq!(merged, vec!["ARTIST A × Artist B"]);
    }

    #[test]
    fn test_opener_inside_common_text_is_dropped() {
        let merged = merge_event_names(&["A (x) B [y", "A (x) B [z"]);
        assert_eq!(merged, vec!["A (x) B"]);
    }

    #[test]
    fn test_balanced_span() {
        assert_eq!(balanced_span(&chars("A (x) B [")), (0, 8));
        assert_eq!(balanced_span(&chars("x) B")), (2, 4));
        assert_eq!(balanced_span(&chars("(a [b] c")), (0, 0));
        assert_eq!(balanced_span(&chars("a (b) c")), (0, 7));
    }

    #[test]
    fn test_fold_case_keeps_length() {
        assert_eq!(fold_case(&chars("İstanbul LIVE")).len(), chars("İstanbul LIVE").len());
        assert_eq!(fold_case(&chars("ZePP")), chars("zepp"));
    }

    #[test]
    fn test_longest_common_substring() {
        assert_eq!(
            longest_common_substring(&chars("Show (Day 1)"), &chars("Show (Day 2)")),
            chars("Show (Day ")
        );
        assert!(longest_common_substring(&chars("abc"), &chars("xyz")).is_empty());
    }

    #[test]
    fn test_bracket_bookkeeping() {
        assert_eq!(unclosed_openers(&chars("a (b [c] d")), vec![')']);
        assert_eq!(unmatched_closers(&chars("1) x]")), vec!['[', '(']);
    }
}
