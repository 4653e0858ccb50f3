//! Deterministic ordering helpers.
//!
//! These utilities enforce the stable ordering guarantees the mapper report
//! and `task.yaml` rely on. All ordering here is semantic and intentional,
//! ensuring identical inputs always produce identical outputs.

use std::collections::HashSet;

/// Sort identifiers lexicographically and drop duplicates.
///
/// This is the canonical order of expanded identifiers and must not change
/// without a report schema version bump.
pub fn sort_unique(ids: &mut Vec<String>) {
    ids.sort();
    ids.dedup();
}

/// Keep the first occurrence of every identifier, preserving input order.
pub fn dedup_first_occurrence<I>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    ids.into_iter()
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

/// Leading slice of `ids` plus whether anything was cut off.
pub fn preview(ids: &[String], limit: usize) -> (Vec<String>, bool) {
    let shown = ids.iter().take(limit).cloned().collect();
    (shown, ids.len() > limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn sort_unique_orders_and_dedups() {
        let mut v = ids(&["ak47", "awp", "ak47", "m4a1", "awp"]);
        sort_unique(&mut v);
        assert_eq!(v, ids(&["ak47", "awp", "m4a1"]));
    }

    #[test]
    fn sort_unique_is_deterministic_across_runs() {
        let make = || ids(&["zeta", "alpha", "mid", "alpha"]);

        let mut first = make();
        let mut second = make();
        second.reverse();

        sort_unique(&mut first);
        sort_unique(&mut second);

        assert_eq!(first, second);
    }

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        let out = dedup_first_occurrence(ids(&["c", "a", "c", "b", "a"]));
        assert_eq!(out, ids(&["c", "a", "b"]));
    }

    #[test]
    fn preview_flags_truncation_only_past_limit() {
        let all: Vec<String> = (0..12).map(|i| format!("id{i:02}")).collect();

        let (shown, truncated) = preview(&all, 10);
        assert_eq!(shown.len(), 10);
        assert_eq!(shown[0], "id00");
        assert!(truncated);

        let (shown, truncated) = preview(&all[..10], 10);
        assert_eq!(shown.len(), 10);
        assert!(!truncated);
    }
}
