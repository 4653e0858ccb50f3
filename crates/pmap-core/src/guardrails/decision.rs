//! Limit evaluation.
//!
//! Policy, in order:
//!
//!   - identifiers > max_item_ids           -> exceeded `max_item_ids`
//!   - else request_units > max_request_units -> exceeded `max_request_units`
//!   - else                                  -> within limits
//!
//! Exactly one policy is reported even when both limits are exceeded.

use serde::{Deserialize, Serialize};

use crate::error::{MapperError, Result};
use crate::profile::model::GuardrailConfig;
use crate::resolve::ResolutionCounts;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardrailPolicy {
    MaxItemIds,
    MaxRequestUnits,
}

impl GuardrailPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuardrailPolicy::MaxItemIds => "max_item_ids",
            GuardrailPolicy::MaxRequestUnits => "max_request_units",
        }
    }

    /// Human-readable reason recorded in the report.
    pub fn reason(&self) -> String {
        format!("Exceeded profile {}", self.as_str())
    }
}

impl std::fmt::Display for GuardrailPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardrailDecision {
    Within,
    Exceeded(GuardrailPolicy),
}

/// Remedy declared by the profile for an exceeded limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnExceed {
    Deny,
    Trim,
}

impl OnExceed {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            "deny" => Ok(OnExceed::Deny),
            "trim" => Ok(OnExceed::Trim),
            other => Err(MapperError::Configuration(format!(
                "Unsupported on_exceed policy: {other}"
            ))),
        }
    }
}

/// Scale recorded in the report's `before` / `after` blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardrailSnapshot {
    pub item_ids: usize,
    pub request_units: usize,
}

impl From<&ResolutionCounts> for GuardrailSnapshot {
    fn from(counts: &ResolutionCounts) -> Self {
        Self {
            item_ids: counts.identifiers,
            request_units: counts.request_units,
        }
    }
}

/// Compare `counts` against the configured limits.
///
/// A limit that is absent never fires. Negative limits fire for any count.
pub fn check_exceeded(counts: &ResolutionCounts, cfg: &GuardrailConfig) -> GuardrailDecision {
    if exceeds(counts.identifiers, cfg.max_item_ids) {
        return GuardrailDecision::Exceeded(GuardrailPolicy::MaxItemIds);
    }
    if exceeds(counts.request_units, cfg.max_request_units) {
        return GuardrailDecision::Exceeded(GuardrailPolicy::MaxRequestUnits);
    }
    GuardrailDecision::Within
}

fn exceeds(value: usize, limit: Option<i64>) -> bool {
    match limit {
        None => false,
        Some(limit) if limit < 0 => true,
        Some(limit) => u64::try_from(value).unwrap_or(u64::MAX) > limit as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(max_item_ids: Option<i64>, max_request_units: Option<i64>) -> GuardrailConfig {
        GuardrailConfig {
            max_item_ids,
            max_request_units,
            ..Default::default()
        }
    }

    #[test]
    fn unconfigured_limits_never_fire() {
        let counts = ResolutionCounts::new(10_000, 50, 5);
        assert_eq!(check_exceeded(&counts, &cfg(None, None)), GuardrailDecision::Within);
    }

    #[test]
    fn limits_are_inclusive() {
        let counts = ResolutionCounts::new(3, 2, 1);
        assert_eq!(
            check_exceeded(&counts, &cfg(Some(3), Some(6))),
            GuardrailDecision::Within
        );
        assert_eq!(
            check_exceeded(&counts, &cfg(Some(3), Some(5))),
            GuardrailDecision::Exceeded(GuardrailPolicy::MaxRequestUnits)
        );
    }

    #[test]
    fn item_ids_wins_when_both_exceeded() {
        let counts = ResolutionCounts::new(30, 4, 2);
        assert_eq!(
            check_exceeded(&counts, &cfg(Some(10), Some(10))),
            GuardrailDecision::Exceeded(GuardrailPolicy::MaxItemIds)
        );
    }

    #[test]
    fn negative_limit_always_fires() {
        let counts = ResolutionCounts::new(0, 0, 0);
        assert_eq!(
            check_exceeded(&counts, &cfg(Some(-1), None)),
            GuardrailDecision::Exceeded(GuardrailPolicy::MaxItemIds)
        );
    }

    #[test]
    fn on_exceed_parsing() {
        assert_eq!(OnExceed::parse("deny").unwrap(), OnExceed::Deny);
        assert_eq!(OnExceed::parse("trim").unwrap(), OnExceed::Trim);
        let err = OnExceed::parse("shrug").unwrap_err();
        assert!(matches!(err, MapperError::Configuration(_)));
        assert_eq!(err.to_string(), "Unsupported on_exceed policy: shrug");
    }

    #[test]
    fn policy_reason_and_wire_name() {
        assert_eq!(
            GuardrailPolicy::MaxRequestUnits.reason(),
            "Exceeded profile max_request_units"
        );
        assert_eq!(
            serde_json::to_string(&GuardrailPolicy::MaxItemIds).unwrap(),
            "\"max_item_ids\""
        );
    }
}
