//! Guardrail engine: the single place where a request is accepted,
//! trimmed or denied.
//!
//! Responsibilities:
//! - expand selectors into diagnostic identifiers
//! - compute scale (`request_units`)
//! - apply the profile's limits and remedy
//! - build the declarative document for accepted and trimmed requests
//!
//! Identifiers are diagnostic only and are never written to `task.yaml`.

use serde_json::Value;

use crate::catalog::Catalog;
use crate::config::MapperConfig;
use crate::error::{MapperError, Result};
use crate::guardrails::decision::{
    GuardrailDecision, GuardrailPolicy, GuardrailSnapshot, OnExceed, check_exceeded,
};
use crate::guardrails::trim::trim_item_ids;
use crate::profile::LoadedProfile;
use crate::resolve::expand::{expand_item_ids, param_len};
use crate::resolve::ResolutionCounts;
use crate::result::model::{
    DENIED_MESSAGE, DEFAULT_TRIM_WARNING, DeniedRequest, InputSummary, MapperResult, OkResult,
    ProfileResolution, ResolutionInfo, TrimmedResolution,
};
use crate::task::build_task;
use crate::util::deterministic::preview;

/// Evaluate a normalized intent against its profile and catalog.
///
/// Returns `Ok`, `Trimmed` or `Denied`. Errors are reserved for broken
/// invariants and misconfigured profiles; a refusal is never an error.
pub fn apply_guardrails(
    normalized: &Value,
    profile: &LoadedProfile,
    catalog: &Catalog,
    config: &MapperConfig,
) -> Result<MapperResult> {
    let input_summary = InputSummary::from_intent(normalized);
    let api_src = extract_api_source(normalized)?;

    let item_ids = expand_item_ids(api_src, catalog)?;
    let counts_before = ResolutionCounts::new(
        item_ids.len(),
        param_len(api_src, "locations")?,
        param_len(api_src, "qualities")?,
    );

    let guardrails = &profile.document.guardrails;
    let decision = check_exceeded(&counts_before, guardrails);

    log::info!(
        "resolved {} identifiers, {} request units: {:?}",
        counts_before.identifiers,
        counts_before.request_units,
        decision
    );

    let report_path = config.report_path().display().to_string();

    let policy = match decision {
        GuardrailDecision::Within => {
            let resolved = resolve(
                normalized,
                profile,
                config,
                input_summary,
                counts_before,
                &item_ids,
            )?;
            return Ok(MapperResult::Ok(OkResult::Profile(resolved)));
        }
        GuardrailDecision::Exceeded(policy) => policy,
    };

    // The remedy is only interpreted once a limit has fired.
    match OnExceed::parse(&guardrails.on_exceed)? {
        OnExceed::Deny => Ok(MapperResult::Denied(DeniedRequest {
            input_summary,
            profile: profile.info.clone(),
            policy,
            reason: policy.reason(),
            before: GuardrailSnapshot::from(&counts_before),
            report_path,
            message: DENIED_MESSAGE.to_string(),
        })),
        OnExceed::Trim => {
            trim(normalized, profile, config, input_summary, policy, counts_before, &item_ids)
        }
    }
}

fn trim(
    normalized: &Value,
    profile: &LoadedProfile,
    config: &MapperConfig,
    input_summary: InputSummary,
    policy: GuardrailPolicy,
    counts_before: ResolutionCounts,
    item_ids: &[String],
) -> Result<MapperResult> {
    let (trimmed_ids, method) = trim_item_ids(item_ids, &profile.document)?;
    let counts_after = counts_before.with_identifiers(trimmed_ids.len());

    let resolved = resolve(
        normalized,
        profile,
        config,
        input_summary,
        counts_after,
        &trimmed_ids,
    )?;

    Ok(MapperResult::Trimmed(TrimmedResolution {
        resolved,
        policy,
        reason: policy.reason(),
        method,
        before: GuardrailSnapshot::from(&counts_before),
        after: GuardrailSnapshot::from(&counts_after),
        warning: DEFAULT_TRIM_WARNING.to_string(),
    }))
}

fn resolve(
    normalized: &Value,
    profile: &LoadedProfile,
    config: &MapperConfig,
    input_summary: InputSummary,
    counts: ResolutionCounts,
    item_ids: &[String],
) -> Result<ProfileResolution> {
    let (shown, truncated) = preview(item_ids, config.preview_limit);

    Ok(ProfileResolution {
        input_summary,
        profile: profile.info.clone(),
        resolution: ResolutionInfo {
            counts,
            preview: shown,
            preview_truncated: truncated,
        },
        task: build_task(normalized, &profile.document)?,
        task_path: config.task_path().display().to_string(),
        report_path: config.report_path().display().to_string(),
    })
}

/// First `type: api` source of the normalized intent.
pub fn extract_api_source(normalized: &Value) -> Result<&Value> {
    normalized
        .get("sources")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .find(|src| src.get("type").and_then(Value::as_str) == Some("api"))
        .ok_or_else(|| MapperError::Guardrail("No API source found in normalized input".into()))
}
