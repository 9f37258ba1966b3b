//! Deletion-candidate classification.
//!
//! Pure functions over ref lines: matching against an area's rules, splitting the
//! marked set into unsafe (still unmerged) and safe entries, and the rounded
//! percentages used in reports. Nothing here performs I/O, so classifying the same
//! input twice always yields the same partition.

use crate::core::refs::RefLine;
use regex::Regex;
use std::collections::HashSet;

/// Return every line matching at least one of `rules`.
///
/// `rules` must belong to a single area; [`crate::core::rules::RuleSet::for_area`]
/// only ever hands out one area's list. The result is deduplicated by exact line
/// equality and keeps the first-appearance order of `lines`.
pub fn match_rules(lines: &[RefLine], rules: &[Regex]) -> Vec<RefLine> {
    if rules.is_empty() {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut matched = Vec::new();
    for line in lines {
        if rules.iter().any(|rule| rule.is_match(line.as_str())) && seen.insert(line.as_str()) {
            matched.push(line.clone());
        }
    }
    matched
}

/// Split `delete_set` into `(unsafe, safe)`.
///
/// An entry is unsafe when its full text contains the leading-whitespace-trimmed text
/// of any unmerged entry. This is plain substring containment: `origin/feat/x` also
/// flags `refs/remotes/origin/feat/x-2`. Both outputs keep `delete_set` order.
pub fn partition_unmerged(
    delete_set: &[RefLine],
    unmerged_set: &[RefLine],
) -> (Vec<RefLine>, Vec<RefLine>) {
    let unmerged: Vec<&str> = unmerged_set
        .iter()
        .map(|line| line.as_str().trim_start())
        .collect();

    delete_set.iter().cloned().partition(|line| {
        unmerged
            .iter()
            .any(|needle| line.as_str().contains(*needle))
    })
}

/// `part / total` as a percentage rounded to three decimals (halves to even), `None`
/// when `total` is 0.
pub fn percentage(part: usize, total: usize) -> Option<f64> {
    if total == 0 {
        return None;
    }
    let raw = part as f64 / total as f64 * 100.0;
    Some((raw * 1000.0).round_ties_even() / 1000.0)
}
