//! End-to-end mapper run.
//!
//! Errors from any stage are caught exactly once here and turned into an
//! `Error` result. Writing the report is the only failure surfaced to the
//! caller.

use anyhow::Result as AnyResult;
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::catalog::load_catalog;
use crate::config::MapperConfig;
use crate::error::{MapperError, Result};
use crate::guardrails::apply_guardrails;
use crate::io::{read_input, remove_stale, write_json, write_text, write_yaml};
use crate::normalize::normalize_input;
use crate::profile::{ProfileInfo, load_profile};
use crate::report::{Report, SummaryView, build_report, render_summary};
use crate::result::model::{MapperResult, OkResult};
use crate::stream::run_stream_mapper;

const DEFAULT_INTENT_TYPE: &str = "catalog";

/// What a run produced on disk.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report: Report,
    pub report_path: PathBuf,
    /// Written only when the outcome permits a fetch.
    pub task_path: Option<PathBuf>,
    pub summary_path: Option<PathBuf>,
}

/// Run the mapper on the intent at `input_path` and persist its artifacts.
pub fn run(input_path: &Path, config: &MapperConfig) -> AnyResult<RunOutcome> {
    let result = map_intent(input_path, config);
    let report = build_report(&result);

    let report_path = config.report_path();
    write_json(&report_path, &report)?;

    let task_path = match result.task() {
        Some(task) => {
            let path = config.task_path();
            write_yaml(&path, task)?;
            Some(path)
        }
        None => {
            clear_stale(&config.task_path())?;
            None
        }
    };

    let summary = match &result {
        MapperResult::Ok(OkResult::Stream(stream)) => Some(stream.summary_md.clone()),
        MapperResult::Denied(_) | MapperResult::Error(_) => {
            Some(render_summary(&SummaryView::from(&report)))
        }
        MapperResult::Ok(OkResult::Profile(_)) | MapperResult::Trimmed(_) => None,
    };
    let summary_path = match summary {
        Some(text) => {
            let path = config.summary_path();
            write_text(&path, &text)?;
            Some(path)
        }
        None => {
            clear_stale(&config.summary_path())?;
            None
        }
    };

    log::info!("mapper finished: {}", report.status);

    Ok(RunOutcome {
        report,
        report_path,
        task_path,
        summary_path,
    })
}

/// Artifacts of an earlier run must not outlive an outcome that writes none.
fn clear_stale(path: &Path) -> AnyResult<()> {
    if remove_stale(path)? {
        log::info!("removed stale {}", path.display());
    }
    Ok(())
}

/// Read the intent at `input_path` and map it. Never fails.
pub fn map_intent(input_path: &Path, config: &MapperConfig) -> MapperResult {
    match read_input(input_path) {
        Ok(intent) => map_intent_document(&intent, config),
        Err(err) => failed(err, None, config),
    }
}

/// Map an already-parsed intent document. Never fails.
pub fn map_intent_document(intent: &Value, config: &MapperConfig) -> MapperResult {
    let intent_type = match intent.get("intent_type") {
        None | Some(Value::Null) => DEFAULT_INTENT_TYPE.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    match intent_type.as_str() {
        "stream" => run_stream_mapper(intent, config),
        "catalog" => {
            let mut loaded: Option<ProfileInfo> = None;
            match map_catalog_intent(intent, config, &mut loaded) {
                Ok(result) => result,
                Err(err) => failed(err, loaded, config),
            }
        }
        _ => failed(MapperError::UnknownIntentType(intent_type), None, config),
    }
}

fn map_catalog_intent(
    intent: &Value,
    config: &MapperConfig,
    loaded: &mut Option<ProfileInfo>,
) -> Result<MapperResult> {
    let profile = load_profile(intent, &config.profiles_dir)?;
    *loaded = Some(profile.info.clone());

    let normalized = normalize_input(intent, &profile)?;
    let catalog = load_catalog(&profile)?;

    apply_guardrails(&normalized, &profile, &catalog, config)
}

fn failed(err: MapperError, profile: Option<ProfileInfo>, config: &MapperConfig) -> MapperResult {
    log::warn!("mapper error ({}): {err}", err.kind());
    MapperResult::error(
        profile,
        config.report_path().display().to_string(),
        err.to_string(),
    )
}
