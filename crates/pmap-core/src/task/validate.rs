//! Strict gate for `task.yaml` v1.
//!
//! Contract:
//!
//! ```text
//! version: "v1"                  required
//! lookback_hours: int            required, 1..=8760
//! keywords: [str]                required, non-empty, unique
//! sources: [source]              required, non-empty
//! limits:
//!   max_items: int               optional block, 1..=10000
//! ```
//!
//! Source types: `telegram {channels, limit_per_channel?}`, `web {sites}`,
//! `api {provider, dataset, server?, locations?, items?}`.
//!
//! The gate performs no network calls and no defaulting. Unknown fields are
//! rejected. The first violation stops validation.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::TASK_VERSION;

/// A single contract violation, addressed by a JSON-path-like `path`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub path: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<Value>,
}

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("TASK_YAML_INVALID")]
pub struct TaskValidationError {
    pub errors: Vec<ValidationIssue>,
}

impl TaskValidationError {
    fn new(path: impl Into<String>, kind: &str) -> Self {
        Self::with(path, kind, None, None)
    }

    fn with(
        path: impl Into<String>,
        kind: &str,
        expected: Option<Value>,
        actual: Option<Value>,
    ) -> Self {
        Self {
            errors: vec![ValidationIssue {
                path: path.into(),
                kind: kind.to_string(),
                expected,
                actual,
            }],
        }
    }

    fn type_mismatch(path: impl Into<String>, expected: &str, actual: &Value) -> Self {
        Self::with(
            path,
            "type",
            Some(json!(expected)),
            Some(json!(type_name(actual))),
        )
    }
}

type Result<T> = std::result::Result<T, TaskValidationError>;

static NULL: Value = Value::Null;

/// Validate `cfg` and return a normalized copy with trimmed strings.
pub fn validate_task(cfg: &Value) -> Result<Value> {
    let root = require_object("$", cfg)?;

    reject_unknown_fields(
        "",
        root,
        &["version", "lookback_hours", "keywords", "sources", "limits"],
    )?;

    for key in ["version", "lookback_hours", "keywords", "sources"] {
        if !root.contains_key(key) {
            return Err(TaskValidationError::new(key, "missing_field"));
        }
    }

    let version = &root["version"];
    if version.as_str() != Some(TASK_VERSION) {
        return Err(TaskValidationError::with(
            "version",
            "version_not_supported",
            Some(json!(TASK_VERSION)),
            Some(version.clone()),
        ));
    }

    let lookback_hours = require_int_range("lookback_hours", &root["lookback_hours"], 1, 8760)?;
    let keywords = require_unique_strings("keywords", &root["keywords"])?;

    let sources = require_array("sources", &root["sources"])?;
    if sources.is_empty() {
        return Err(TaskValidationError::new("sources", "empty"));
    }

    let mut normalized_sources = Vec::with_capacity(sources.len());
    for (idx, src) in sources.iter().enumerate() {
        let base = format!("sources[{idx}]");
        let src = require_object(&base, src)?;

        let Some(kind) = src.get("type") else {
            return Err(TaskValidationError::new(format!("{base}.type"), "missing_field"));
        };
        let normalized = match require_non_empty_str(&format!("{base}.type"), kind)?.as_str() {
            "telegram" => validate_telegram(&base, src)?,
            "web" => validate_web(&base, src)?,
            "api" => validate_api(&base, src)?,
            _ => {
                return Err(TaskValidationError::with(
                    format!("{base}.type"),
                    "enum",
                    Some(json!("telegram|web|api")),
                    Some(kind.clone()),
                ));
            }
        };
        normalized_sources.push(normalized);
    }

    let mut out = Map::new();
    out.insert("version".into(), json!(TASK_VERSION));
    out.insert("lookback_hours".into(), json!(lookback_hours));
    out.insert("keywords".into(), json!(keywords));
    out.insert("sources".into(), Value::Array(normalized_sources));

    if let Some(limits) = root.get("limits") {
        let limits = require_object("limits", limits)?;
        reject_unknown_fields("limits", limits, &["max_items"])?;
        let Some(max_items) = limits.get("max_items") else {
            return Err(TaskValidationError::new("limits.max_items", "missing_field"));
        };
        let max_items = require_int_range("limits.max_items", max_items, 1, 10_000)?;
        out.insert("limits".into(), json!({ "max_items": max_items }));
    }

    Ok(Value::Object(out))
}

fn validate_telegram(base: &str, src: &Map<String, Value>) -> Result<Value> {
    reject_unknown_fields(base, src, &["type", "channels", "limit_per_channel"])?;

    let channels = require_unique_strings(
        &format!("{base}.channels"),
        field(src, "channels"),
    )?;

    let mut out = json!({ "type": "telegram", "channels": channels });
    if let Some(limit) = src.get("limit_per_channel") {
        let limit = require_int_range(&format!("{base}.limit_per_channel"), limit, 10, 1000)?;
        out["limit_per_channel"] = json!(limit);
    }
    Ok(out)
}

fn validate_web(base: &str, src: &Map<String, Value>) -> Result<Value> {
    reject_unknown_fields(base, src, &["type", "sites"])?;

    let sites = require_unique_strings(
        &format!("{base}.sites"),
        field(src, "sites"),
    )?;
    Ok(json!({ "type": "web", "sites": sites }))
}

fn validate_api(base: &str, src: &Map<String, Value>) -> Result<Value> {
    reject_unknown_fields(
        base,
        src,
        &["type", "provider", "dataset", "server", "items", "locations"],
    )?;

    let mut out = json!({
        "type": "api",
        "provider": require_non_empty_str(&format!("{base}.provider"), field(src, "provider"))?,
        "dataset": require_non_empty_str(&format!("{base}.dataset"), field(src, "dataset"))?,
    });

    if let Some(server) = src.get("server") {
        out["server"] = json!(require_non_empty_str(&format!("{base}.server"), server)?);
    }
    if let Some(locations) = src.get("locations") {
        out["locations"] = json!(require_unique_strings(&format!("{base}.locations"), locations)?);
    }
    if let Some(items) = src.get("items") {
        out["items"] = validate_api_items(&format!("{base}.items"), items)?;
    }
    Ok(out)
}

fn validate_api_items(base: &str, items: &Value) -> Result<Value> {
    let items = require_object(base, items)?;
    reject_unknown_fields(base, items, &["categories", "tiers", "qualities"])?;

    let mut out = Map::new();
    if let Some(categories) = items.get("categories") {
        out.insert(
            "categories".into(),
            json!(require_unique_strings(&format!("{base}.categories"), categories)?),
        );
    }
    if let Some(tiers) = items.get("tiers") {
        out.insert(
            "tiers".into(),
            json!(require_unique_ints(&format!("{base}.tiers"), tiers, 4, 8)?),
        );
    }
    if let Some(qualities) = items.get("qualities") {
        out.insert(
            "qualities".into(),
            json!(require_unique_ints(&format!("{base}.qualities"), qualities, 1, 5)?),
        );
    }
    Ok(Value::Object(out))
}

/// Missing fields validate as `null`.
fn field<'a>(obj: &'a Map<String, Value>, key: &str) -> &'a Value {
    obj.get(key).unwrap_or(&NULL)
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_i64() || n.is_u64() => "int",
        Value::Number(_) => "float",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

fn require_object<'a>(path: &str, v: &'a Value) -> Result<&'a Map<String, Value>> {
    v.as_object()
        .ok_or_else(|| TaskValidationError::type_mismatch(path, "dict", v))
}

fn require_array<'a>(path: &str, v: &'a Value) -> Result<&'a Vec<Value>> {
    v.as_array()
        .ok_or_else(|| TaskValidationError::type_mismatch(path, "list", v))
}

fn require_non_empty_str(path: &str, v: &Value) -> Result<String> {
    let s = v
        .as_str()
        .ok_or_else(|| TaskValidationError::type_mismatch(path, "str", v))?
        .trim();
    if s.is_empty() {
        return Err(TaskValidationError::new(path, "empty"));
    }
    Ok(s.to_string())
}

fn require_int_range(path: &str, v: &Value, lo: i64, hi: i64) -> Result<i64> {
    let n = v
        .as_i64()
        .ok_or_else(|| TaskValidationError::type_mismatch(path, "int", v))?;
    if !(lo..=hi).contains(&n) {
        return Err(TaskValidationError::with(
            path,
            "range",
            Some(json!(format!("{lo}..{hi}"))),
            Some(json!(n)),
        ));
    }
    Ok(n)
}

fn require_unique_strings(path: &str, v: &Value) -> Result<Vec<String>> {
    let arr = require_array(path, v)?;
    if arr.is_empty() {
        return Err(TaskValidationError::new(path, "empty"));
    }

    let out = arr
        .iter()
        .enumerate()
        .map(|(i, item)| require_non_empty_str(&format!("{path}[{i}]"), item))
        .collect::<Result<Vec<_>>>()?;

    let unique: HashSet<&String> = out.iter().collect();
    if unique.len() != out.len() {
        return Err(TaskValidationError::new(path, "duplicate"));
    }
    Ok(out)
}

fn require_unique_ints(path: &str, v: &Value, lo: i64, hi: i64) -> Result<Vec<i64>> {
    let arr = require_array(path, v)?;
    if arr.is_empty() {
        return Err(TaskValidationError::new(path, "empty"));
    }

    let out = arr
        .iter()
        .enumerate()
        .map(|(i, item)| require_int_range(&format!("{path}[{i}]"), item, lo, hi))
        .collect::<Result<Vec<_>>>()?;

    let unique: HashSet<i64> = out.iter().copied().collect();
    if unique.len() != out.len() {
        return Err(TaskValidationError::new(path, "duplicate"));
    }
    Ok(out)
}

fn reject_unknown_fields(path: &str, obj: &Map<String, Value>, allowed: &[&str]) -> Result<()> {
    match obj.keys().find(|k| !allowed.contains(&k.as_str())) {
        Some(key) if path.is_empty() => Err(TaskValidationError::new(key.as_str(), "unknown_field")),
        Some(key) => Err(TaskValidationError::new(format!("{path}.{key}"), "unknown_field")),
        None => Ok(()),
    }
}
