use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::config::profile_path;
use crate::error::{MapperError, Result};
use crate::profile::hash::content_hash;
use crate::profile::model::{LoadedProfile, ProfileDocument, ProfileInfo};

/// Load the profile named by the intent's API source.
///
/// Steps:
/// 1. Find the profile name in the intent's `sources`.
/// 2. Read `<profiles_dir>/<name>.yaml` once.
/// 3. Hash the raw bytes (never the parsed structure).
/// 4. Check minimal structure; guardrail semantics are left to evaluation.
///
/// Nothing is cached: each call re-reads and re-hashes the policy.
pub fn load_profile(intent: &Value, profiles_dir: &Path) -> Result<LoadedProfile> {
    let profile_name = extract_profile_name(intent)?;
    let path = profile_path(profiles_dir, &profile_name);

    if !path.exists() {
        return Err(MapperError::ProfileLoad(format!(
            "Profile not found: {profile_name}"
        )));
    }
    if !path.is_file() {
        return Err(MapperError::ProfileLoad(format!(
            "Profile path is not a file: {}",
            path.display()
        )));
    }

    let bytes = fs::read(&path).map_err(|e| {
        MapperError::ProfileLoad(format!("Failed to read profile {}: {e}", path.display()))
    })?;

    let raw: serde_yaml::Value = serde_yaml::from_slice(&bytes)
        .map_err(|e| MapperError::ProfileLoad(format!("Failed to parse profile YAML: {e}")))?;

    if !raw.is_mapping() {
        return Err(MapperError::ProfileLoad(
            "Profile file must contain a YAML mapping".into(),
        ));
    }

    validate_minimal(&raw)?;

    let document: ProfileDocument = serde_yaml::from_value(raw)
        .map_err(|e| MapperError::ProfileLoad(format!("Invalid profile document: {e}")))?;

    let info = ProfileInfo {
        name: document.name.clone(),
        version: document.version,
        hash: content_hash(&bytes),
    };

    log::info!(
        "loaded profile {} v{} ({}) from {}",
        info.name,
        info.version,
        info.hash,
        path.display()
    );

    Ok(LoadedProfile {
        document,
        info,
        path,
    })
}

/// Profile name carried by the intent's API source(s).
///
/// The first API source must name a profile. Later API sources may repeat
/// that name or omit it; naming a different profile is a conflict.
pub fn extract_profile_name(intent: &Value) -> Result<String> {
    let sources = intent
        .get("sources")
        .and_then(Value::as_array)
        .ok_or_else(|| MapperError::ProfileLoad("human_input.sources must be a list".into()))?;

    let mut api_sources = sources
        .iter()
        .filter(|src| src.get("type").and_then(Value::as_str) == Some("api"));

    let first = api_sources.next().ok_or_else(|| {
        MapperError::ProfileLoad("No API source with 'profile' found in input".into())
    })?;

    let name = first
        .get("profile")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            MapperError::ProfileLoad("API source must include non-empty 'profile'".into())
        })?;

    for other in api_sources {
        if let Some(other_name) = other.get("profile").and_then(Value::as_str).map(str::trim) {
            if !other_name.is_empty() && other_name != name {
                return Err(MapperError::ProfileLoad(format!(
                    "Conflicting profiles in input: '{name}' and '{other_name}'"
                )));
            }
        }
    }

    Ok(name.to_string())
}

/// Presence and type checks for the fields every profile needs.
fn validate_minimal(raw: &serde_yaml::Value) -> Result<()> {
    let name = required(raw, "name")?;
    if !name.is_string() {
        return Err(wrong_type("name", "str"));
    }

    let version = required(raw, "version")?;
    let version = version.as_i64().ok_or_else(|| wrong_type("version", "int"))?;

    let api = required(raw, "api")?;
    if !api.is_mapping() {
        return Err(wrong_type("api", "dict"));
    }

    let catalog = required(raw, "catalog")?;
    if !catalog.is_mapping() {
        return Err(wrong_type("catalog", "dict"));
    }

    for key in ["provider", "dataset"] {
        let ok = api
            .get(key)
            .and_then(serde_yaml::Value::as_str)
            .is_some_and(|s| !s.trim().is_empty());
        if !ok {
            return Err(MapperError::ProfileLoad(format!(
                "profile.api.{key} must be a non-empty string"
            )));
        }
    }

    if !catalog.get("path").is_some_and(serde_yaml::Value::is_string) {
        return Err(MapperError::ProfileLoad(
            "profile.catalog.path must be a string".into(),
        ));
    }

    if version <= 0 {
        return Err(MapperError::ProfileLoad(
            "profile.version must be positive integer".into(),
        ));
    }

    Ok(())
}

fn required<'a>(raw: &'a serde_yaml::Value, key: &str) -> Result<&'a serde_yaml::Value> {
    raw.get(key)
        .ok_or_else(|| MapperError::ProfileLoad(format!("Profile missing required field: {key}")))
}

fn wrong_type(key: &str, expected: &str) -> MapperError {
    MapperError::ProfileLoad(format!("Profile field '{key}' must be {expected}"))
}
