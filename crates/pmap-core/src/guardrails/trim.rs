//! Deterministic trim strategies.
//!
//! A trim never introduces an identifier that was not in the expanded set.
//! Which identifiers survive depends only on the expanded set and the
//! profile, never on evaluation order.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{MapperError, Result};
use crate::profile::ProfileDocument;
use crate::util::deterministic::dedup_first_occurrence;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrimMethod {
    PriorityItemIds,
    PriorityGroups,
}

impl TrimMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrimMethod::PriorityItemIds => "priority_item_ids",
            TrimMethod::PriorityGroups => "priority_groups",
        }
    }

    /// Resolve the configured method. Unknown or missing methods are an
    /// operator error, never a silent fallback to the untrimmed set.
    pub fn from_config(method: Option<&str>) -> Result<Self> {
        match method {
            Some("priority_item_ids") => Ok(TrimMethod::PriorityItemIds),
            Some("priority_groups") => Ok(TrimMethod::PriorityGroups),
            Some(other) => Err(MapperError::Configuration(format!(
                "Unknown trim method configured: {other}"
            ))),
            None => Err(MapperError::Configuration(
                "Trim requested but no deterministic trim method configured".into(),
            )),
        }
    }
}

/// Trim `item_ids` (the sorted expanded set) with the profile's method.
pub fn trim_item_ids(
    item_ids: &[String],
    profile: &ProfileDocument,
) -> Result<(Vec<String>, TrimMethod)> {
    let trim_cfg = &profile.guardrails.trim;
    let method = TrimMethod::from_config(trim_cfg.method.as_deref())?;

    let trimmed = match method {
        TrimMethod::PriorityItemIds => by_priority_list(item_ids, &trim_cfg.priority_item_ids),
        TrimMethod::PriorityGroups => by_priority_groups(item_ids, profile),
    };

    log::debug!(
        "trim {}: {} -> {} identifiers",
        method.as_str(),
        item_ids.len(),
        trimmed.len()
    );

    Ok((trimmed, method))
}

/// Priority list filtered to the expanded set, in priority order.
fn by_priority_list(item_ids: &[String], priority: &[String]) -> Vec<String> {
    let expanded: HashSet<&String> = item_ids.iter().collect();
    dedup_first_occurrence(
        priority
            .iter()
            .filter(|id| expanded.contains(id))
            .cloned(),
    )
}

/// Walk the configured groups in order, collecting expanded identifiers by
/// first occurrence.
///
/// Group categories are looked up but not applied as a filter: every
/// configured group admits the whole expanded set.
fn by_priority_groups(item_ids: &[String], profile: &ProfileDocument) -> Vec<String> {
    let trim_cfg = &profile.guardrails.trim;
    let mut out: Vec<String> = Vec::new();
    let mut seen: HashSet<&String> = HashSet::new();

    for group_name in &trim_cfg.priority_groups {
        if let Some(group) = profile.groups.get(group_name) {
            log::debug!(
                "priority group {group_name}: categories {:?} not applied as filter",
                group.categories
            );
        }
        for item_id in item_ids {
            if seen.insert(item_id) {
                out.push(item_id.clone());
            }
        }
    }

    out
}
