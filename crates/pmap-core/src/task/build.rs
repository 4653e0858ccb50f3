use serde_json::Value;

use crate::error::{MapperError, Result};
use crate::profile::ProfileDocument;
use crate::task::model::{ApiItems, ApiTaskBlock, TaskDocument, TaskSource};

/// Build the declarative `task.yaml` v1 from a normalized intent.
///
/// - `telegram` / `web` sources pass through unchanged
/// - the `api` source is rewritten to the profile's provider/dataset/server
///   plus the human selectors (locations, categories, tiers, qualities)
/// - other source types are dropped
/// - top-level `limits` is carried when present
///
/// Expanded identifiers are deliberately absent: the fetcher (or a re-run of
/// this engine) reconstructs them from the selectors.
pub fn build_task(normalized: &Value, profile: &ProfileDocument) -> Result<TaskDocument> {
    let lookback_hours = required(normalized, "lookback_hours")?;
    let keywords = required(normalized, "keywords")?;

    let mut task = TaskDocument::new(lookback_hours, keywords);

    let sources = normalized
        .get("sources")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for src in sources {
        match src.get("type").and_then(Value::as_str) {
            Some("telegram" | "web") => task.sources.push(TaskSource::Passthrough(src.clone())),
            Some("api") => task.sources.push(TaskSource::Api(api_block(src, profile))),
            _ => {}
        }
    }

    task.limits = normalized.get("limits").cloned();

    Ok(task)
}

fn api_block(src: &Value, profile: &ProfileDocument) -> ApiTaskBlock {
    let param = |key: &str| src.get("params").and_then(|p| p.get(key)).cloned();

    let items = ApiItems {
        categories: param("categories"),
        tiers: param("tiers"),
        qualities: param("qualities"),
    };

    ApiTaskBlock {
        kind: "api".to_string(),
        provider: profile.api.provider.clone(),
        dataset: profile.api.dataset.clone(),
        server: profile.api.server.clone(),
        locations: param("locations"),
        items: (!items.is_empty()).then_some(items),
    }
}

fn required(normalized: &Value, key: &str) -> Result<Value> {
    normalized
        .get(key)
        .cloned()
        .ok_or_else(|| MapperError::Input(format!("Normalized input missing required field: {key}")))
}
