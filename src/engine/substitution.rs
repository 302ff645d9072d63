use crate::engine::EvidenceStore;
use std::cmp::Ordering;

/// Replace every resolved evidence variable in `raw` with its value.
///
/// Keys are tried longest first (then highest suffix first) so `#E10` is never
/// read as `#E1` followed by `0`. A key only matches when the next character is
/// not an ASCII digit. The scan is a single left-to-right pass: substituted
/// values are copied verbatim and never rescanned.
pub fn substitute(raw: &str, evidence: &EvidenceStore) -> String {
    if evidence.is_empty() {
        return raw.to_string();
    }

    let keys = ordered_keys(evidence);
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(ch) = rest.chars().next() {
        let matched = keys.iter().find(|key| {
            rest.strip_prefix(**key)
                .is_some_and(|tail| !tail.starts_with(|c: char| c.is_ascii_digit()))
        });

        if let Some(key) = matched {
            out.push_str(evidence.get(key).unwrap_or_default());
            rest = &rest[key.len()..];
        } else {
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }

    out
}

/// Evidence keys in substitution priority order.
pub fn ordered_keys(evidence: &EvidenceStore) -> Vec<&str> {
    let mut keys: Vec<&str> = evidence.keys().collect();
    keys.sort_by(|a, b| compare_priority(a, b));
    keys
}

fn compare_priority(a: &str, b: &str) -> Ordering {
    b.len()
        .cmp(&a.len())
        .then_with(|| numeric_suffix(b).cmp(&numeric_suffix(a)))
        .then_with(|| b.cmp(a))
}

fn numeric_suffix(key: &str) -> Option<u64> {
    let digits_start = key
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    key[digits_start..].parse().ok()
}
