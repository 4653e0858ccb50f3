use serde::{Deserialize, Serialize};

use crate::SCHEMA_VERSION;
use crate::guardrails::decision::{GuardrailPolicy, GuardrailSnapshot};
use crate::guardrails::trim::TrimMethod;
use crate::profile::ProfileInfo;
use crate::result::{InputSummary, ResolutionInfo, Status};

/// Top-level mapper report (`mapper_report.json`).
///
/// This struct is the stable JSON contract read by fetchers and renderers.
/// It must remain deterministic for identical inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub schema_version: u32,
    pub status: Status,
    pub input_summary: InputSummary,
    pub profile: Option<ProfileInfo>,
    pub outputs: OutputsInfo,
    pub warnings: Vec<String>,
    pub errors: Vec<ReportError>,

    /// Present only for `ok` / `trimmed` profile resolutions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<ResolutionInfo>,

    /// Present only when a guardrail fired.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guardrails: Option<GuardrailInfo>,
}

impl Report {
    /// Skeleton shared by every status; callers fill in the rest.
    pub fn new(
        status: Status,
        input_summary: InputSummary,
        profile: Option<ProfileInfo>,
        outputs: OutputsInfo,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            status,
            input_summary,
            profile,
            outputs,
            warnings: vec![],
            errors: vec![],
            resolution: None,
            guardrails: None,
        }
    }
}

/// Where the run's artifacts were written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputsInfo {
    /// `None` whenever the fetcher must not run.
    pub generated_task_path: Option<String>,
    pub report_path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    MapperDenied,
    MapperInternalError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportError {
    pub code: ErrorCode,
    pub message: String,
}

/// Guardrail block of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardrailInfo {
    pub applied: bool,
    pub policy: GuardrailPolicy,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<TrimMethod>,
    pub before: GuardrailSnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<GuardrailSnapshot>,
}
