// Display-field merging for finished clusters

pub mod names;
pub mod performers;

pub use names::{merge_event_names, merge_event_names_with_min};
pub use performers::merge_performers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Casing {
    Lower,
    Mixed,
    Upper,
}

fn casing(text: &str) -> Casing {
    let has_upper = text.chars().any(char::is_uppercase);
    let has_lower = text.chars().any(char::is_lowercase);
    match (has_upper, has_lower) {
        (false, _) => Casing::Lower,
        (true, true) => Casing::Mixed,
        (true, false) => Casing::Upper,
    }
}

/// Collapse variants that share a key into one representative each.
///
/// Within a group an all-lowercase stylization wins, then mixed case, then the
/// first spelling seen, so an all-caps duplicate never overwrites a stylized
/// name. Groups keep first-seen order.
pub(crate) fn resolve_case_variants<S, F>(values: &[S], key: F) -> Vec<String>
where
    S: AsRef<str>,
    F: Fn(&str) -> String,
{
    let mut groups: Vec<(String, Vec<&str>)> = Vec::new();

    for value in values.iter().map(|v| v.as_ref().trim()) {
        if value.is_empty() {
            continue;
        }
        let k = key(value);
        match groups.iter_mut().find(|(existing, _)| *existing == k) {
            Some((_, members)) => members.push(value),
            None => groups.push((k, vec![value])),
        }
    }

    groups
        .into_iter()
        .filter_map(|(_, members)| {
            members
                .iter()
                .find(|m| casing(m) == Casing::Lower)
                .or_else(|| members.iter().find(|m| casing(m) == Casing::Mixed))
                .or_else(|| members.first())
                .map(|m| m.to_string())
        })
        .collect()
}
