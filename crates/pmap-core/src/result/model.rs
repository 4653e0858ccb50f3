use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::guardrails::decision::{GuardrailPolicy, GuardrailSnapshot};
use crate::guardrails::trim::TrimMethod;
use crate::profile::ProfileInfo;
use crate::resolve::ResolutionCounts;
use crate::task::TaskDocument;

/// Advisory attached to every trimmed result unless the engine supplies one.
pub const DEFAULT_TRIM_WARNING: &str = "Request trimmed deterministically by profile guardrails";

/// Remediation sent back with every denial.
pub const DENIED_MESSAGE: &str = "Request is too broad. Narrow categories / tiers / locations.";

/// Outcome status as written to the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Trimmed,
    Denied,
    Error,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "ok",
            Status::Trimmed => "trimmed",
            Status::Denied => "denied",
            Status::Error => "error",
        }
    }

    /// Process exit code for this status.
    ///
    /// - ok, trimmed -> 0 (a declarative document exists)
    /// - denied      -> 1
    /// - error       -> 2
    pub fn exit_code(&self) -> i32 {
        match self {
            Status::Ok | Status::Trimmed => 0,
            Status::Denied => 1,
            Status::Error => 2,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cheap, human-facing digest of the intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputSummary {
    Catalog {
        #[serde(default)]
        lookback_hours: Option<Value>,
        keywords_count: usize,
        sources: Vec<Option<String>>,
    },
    Stream {
        messages_count: usize,
    },
    Empty {},
}

impl InputSummary {
    pub fn from_intent(intent: &Value) -> Self {
        let keywords_count = intent
            .get("keywords")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);

        let sources = intent
            .get("sources")
            .and_then(Value::as_array)
            .map(|list| {
                list.iter()
                    .filter(|s| s.is_object())
                    .map(|s| s.get("type").and_then(Value::as_str).map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        InputSummary::Catalog {
            lookback_hours: intent.get("lookback_hours").cloned(),
            keywords_count,
            sources,
        }
    }
}

/// Diagnostic view of the resolved identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionInfo {
    pub counts: ResolutionCounts,
    #[serde(rename = "item_ids_preview")]
    pub preview: Vec<String>,
    #[serde(rename = "item_ids_preview_truncated")]
    pub preview_truncated: bool,
}

/// A profile-resolved request with its declarative document.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileResolution {
    pub input_summary: InputSummary,
    pub profile: ProfileInfo,
    pub resolution: ResolutionInfo,
    pub task: TaskDocument,
    pub task_path: String,
    pub report_path: String,
}

/// Accepted free-text intent. No declarative document exists.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamPreview {
    pub input_summary: InputSummary,
    pub profile: ProfileInfo,
    pub preview: String,
    /// Markdown rendering of the preview.
    pub summary_md: String,
    pub report_path: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OkResult {
    Profile(ProfileResolution),
    Stream(StreamPreview),
}

/// A resolution shrunk to fit the profile's limits.
#[derive(Debug, Clone, PartialEq)]
pub struct TrimmedResolution {
    /// Counts, preview and task describe the trimmed set.
    pub resolved: ProfileResolution,
    pub policy: GuardrailPolicy,
    pub reason: String,
    pub method: TrimMethod,
    pub before: GuardrailSnapshot,
    pub after: GuardrailSnapshot,
    pub warning: String,
}

/// A correctly functioning refusal.
#[derive(Debug, Clone, PartialEq)]
pub struct DeniedRequest {
    pub input_summary: InputSummary,
    pub profile: ProfileInfo,
    pub policy: GuardrailPolicy,
    pub reason: String,
    pub before: GuardrailSnapshot,
    pub report_path: String,
    pub message: String,
}

/// Terminal failure of the mapper itself.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedRun {
    pub input_summary: InputSummary,
    /// Present when the failure happened after the profile loaded.
    pub profile: Option<ProfileInfo>,
    pub report_path: String,
    pub message: String,
}

/// Canonical result of one mapper run.
///
/// Each variant carries exactly the payload meaningful to its state; only
/// `Ok(OkResult::Profile)` and `Trimmed` can hold a declarative document.
#[derive(Debug, Clone, PartialEq)]
pub enum MapperResult {
    Ok(OkResult),
    Trimmed(TrimmedResolution),
    Denied(DeniedRequest),
    Error(FailedRun),
}

impl MapperResult {
    pub fn error(
        profile: Option<ProfileInfo>,
        report_path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        MapperResult::Error(FailedRun {
            input_summary: InputSummary::Empty {},
            profile,
            report_path: report_path.into(),
            message: message.into(),
        })
    }

    pub fn status(&self) -> Status {
        match self {
            MapperResult::Ok(_) => Status::Ok,
            MapperResult::Trimmed(_) => Status::Trimmed,
            MapperResult::Denied(_) => Status::Denied,
            MapperResult::Error(_) => Status::Error,
        }
    }

    /// The declarative document, for outcomes that permit a fetch.
    pub fn task(&self) -> Option<&TaskDocument> {
        self.resolution().map(|r| &r.task)
    }

    pub fn resolution(&self) -> Option<&ProfileResolution> {
        match self {
            MapperResult::Ok(OkResult::Profile(resolved)) => Some(resolved),
            MapperResult::Trimmed(trimmed) => Some(&trimmed.resolved),
            MapperResult::Ok(OkResult::Stream(_))
            | MapperResult::Denied(_)
            | MapperResult::Error(_) => None,
        }
    }

    pub fn profile(&self) -> Option<&ProfileInfo> {
        match self {
            MapperResult::Ok(OkResult::Profile(r)) => Some(&r.profile),
            MapperResult::Ok(OkResult::Stream(s)) => Some(&s.profile),
            MapperResult::Trimmed(t) => Some(&t.resolved.profile),
            MapperResult::Denied(d) => Some(&d.profile),
            MapperResult::Error(e) => e.profile.as_ref(),
        }
    }

    pub fn report_path(&self) -> &str {
        match self {
            MapperResult::Ok(OkResult::Profile(r)) => &r.report_path,
            MapperResult::Ok(OkResult::Stream(s)) => &s.report_path,
            MapperResult::Trimmed(t) => &t.resolved.report_path,
            MapperResult::Denied(d) => &d.report_path,
            MapperResult::Error(e) => &e.report_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Status::Trimmed).unwrap(), "\"trimmed\"");
        assert_eq!(Status::Denied.to_string(), "denied");
    }

    #[test]
    fn exit_codes_by_status() {
        assert_eq!(Status::Ok.exit_code(), 0);
        assert_eq!(Status::Trimmed.exit_code(), 0);
        assert_eq!(Status::Denied.exit_code(), 1);
        assert_eq!(Status::Error.exit_code(), 2);
    }

    #[test]
    fn input_summary_digests_intent() {
        let summary = InputSummary::from_intent(&json!({
            "lookback_hours": 12,
            "keywords": ["a", "b", "c"],
            "sources": [{"type": "telegram"}, "junk", {"type": "api"}, {"kind": "x"}]
        }));

        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({
                "lookback_hours": 12,
                "keywords_count": 3,
                "sources": ["telegram", "api", null]
            })
        );
    }

    #[test]
    fn summary_variants_serialize_flat() {
        assert_eq!(
            serde_json::to_value(InputSummary::Stream { messages_count: 2 }).unwrap(),
            json!({"messages_count": 2})
        );
        assert_eq!(
            serde_json::to_value(InputSummary::Empty {}).unwrap(),
            json!({})
        );
    }

    #[test]
    fn error_result_has_no_task() {
        let result = MapperResult::error(None, "out/mapper_report.json", "boom");
        assert_eq!(result.status(), Status::Error);
        assert!(result.task().is_none());
        assert!(result.profile().is_none());
        assert_eq!(result.report_path(), "out/mapper_report.json");
    }
}
