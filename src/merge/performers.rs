use super::resolve_case_variants;
use crate::text::similarity_key;

/// Keep only maximal performer strings: anything whose symbol-stripped form is
/// contained in a longer kept entry is dropped. Result is ordered longest first.
pub fn merge_performers<S: AsRef<str>>(performers: &[S]) -> Vec<String> {
    let mut candidates = resolve_case_variants(performers, |p| p.to_lowercase());
    candidates.sort_by_key(|p| std::cmp::Reverse(p.chars().count()));

    let mut kept: Vec<(String, String)> = Vec::new();
    for candidate in candidates {
        // All-symbol names have no stripped form; compare them as written
        let key = match similarity_key(&candidate) {
            key if key.is_empty() => candidate.to_lowercase(),
            key => key,
        };
        if kept.iter().any(|(_, kept_key)| kept_key.contains(key.as_str())) {
            continue;
        }
        kept.push((candidate, key));
    }

    kept.into_iter().map(|(performer, _)| performer).collect()
}
