//! Canonical copy of a human intent document.
//!
//! Responsibilities:
//! - deep-copy the input (the caller's value is never touched)
//! - trim every string, at any depth
//! - rewrite API source locations through the profile's alias table
//!
//! Non-responsibilities:
//! - scale validation and guardrails (`guardrails`)
//! - identifier resolution (`resolve`)
//! - rejecting unknown fields

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{MapperError, Result};
use crate::profile::LoadedProfile;

/// Normalize `intent` using the rules of `profile`.
///
/// Output is a pure function of `(intent, profile)`.
pub fn normalize_input(intent: &Value, profile: &LoadedProfile) -> Result<Value> {
    if !intent.is_object() {
        return Err(MapperError::Normalization(
            "human_input must be an object".into(),
        ));
    }

    let mut normalized = intent.clone();
    trim_strings(&mut normalized);
    normalize_api_locations(
        &mut normalized,
        &profile.document.normalization.location_aliases,
    );

    Ok(normalized)
}

fn trim_strings(value: &mut Value) {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.len() != s.len() {
                *s = trimmed.to_string();
            }
        }
        Value::Array(items) => items.iter_mut().for_each(trim_strings),
        Value::Object(map) => map.values_mut().for_each(trim_strings),
        _ => {}
    }
}

fn normalize_api_locations(normalized: &mut Value, aliases: &BTreeMap<String, String>) {
    if aliases.is_empty() {
        return;
    }

    let Some(sources) = normalized.get_mut("sources").and_then(Value::as_array_mut) else {
        return;
    };

    for src in sources {
        if src.get("type").and_then(Value::as_str) != Some("api") {
            continue;
        }
        let Some(locations) = src
            .get_mut("params")
            .and_then(|p| p.get_mut("locations"))
        else {
            continue;
        };
        let Some(list) = locations.as_array() else {
            continue;
        };

        // Non-string locations are dropped.
        let resolved: Vec<Value> = list
            .iter()
            .filter_map(Value::as_str)
            .map(|loc| {
                let canonical = aliases
                    .get(&loc.to_lowercase())
                    .map_or(loc, String::as_str);
                Value::String(canonical.to_string())
            })
            .collect();

        *locations = Value::Array(resolved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::model::{
        ApiDescriptor, CatalogLocator, NormalizationRules, ProfileDocument, ProfileInfo,
    };
    use serde_json::json;
    use std::path::PathBuf;

    fn profile_with_aliases(aliases: &[(&str, &str)]) -> LoadedProfile {
        LoadedProfile {
            document: ProfileDocument {
                name: "market".into(),
                version: 1,
                api: ApiDescriptor {
                    provider: "steam".into(),
                    dataset: "prices".into(),
                    server: None,
                },
                catalog: CatalogLocator {
                    path: "catalog.json".into(),
                },
                normalization: NormalizationRules {
                    location_aliases: aliases
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                },
                guardrails: Default::default(),
                groups: Default::default(),
            },
            info: ProfileInfo {
                name: "market".into(),
                version: 1,
                hash: "sha1:00".into(),
            },
            path: PathBuf::from("profiles/market.yaml"),
        }
    }

    fn sample() -> Value {
        json!({
            "lookback_hours": 24,
            "keywords": ["  rifle ", "knife"],
            "sources": [
                {"type": "web", "sites": [" https://example.org "], "params": {"locations": ["AMS"]}},
                {
                    "type": "api",
                    "profile": " market ",
                    "params": {
                        "locations": [" AMS", "Berlin", 7, "Unknown City"],
                        "categories": ["weapons "]
                    }
                }
            ]
        })
    }

    #[test]
    fn trims_every_string_recursively() {
        let out = normalize_input(&sample(), &profile_with_aliases(&[])).unwrap();
        assert_eq!(out["keywords"], json!(["rifle", "knife"]));
        assert_eq!(out["sources"][0]["sites"], json!(["https://example.org"]));
        assert_eq!(out["sources"][1]["profile"], "market");
        assert_eq!(out["sources"][1]["params"]["categories"], json!(["weapons"]));
    }

    #[test]
    fn resolves_aliases_only_in_api_sources() {
        let profile = profile_with_aliases(&[("ams", "Amsterdam"), ("berlin", "Berlin")]);
        let out = normalize_input(&sample(), &profile).unwrap();

        assert_eq!(
            out["sources"][1]["params"]["locations"],
            json!(["Amsterdam", "Berlin", "Unknown City"])
        );
        // web source untouched apart from trimming
        assert_eq!(out["sources"][0]["params"]["locations"], json!(["AMS"]));
    }

    #[test]
    fn input_is_never_mutated() {
        let input = sample();
        let before = input.clone();
        let _ = normalize_input(&input, &profile_with_aliases(&[("ams", "Amsterdam")])).unwrap();
        assert_eq!(input, before);
    }

    #[test]
    fn normalization_is_idempotent_and_deterministic() {
        let profile = profile_with_aliases(&[("ams", "Amsterdam"), ("amsterdam", "Amsterdam")]);
        let once = normalize_input(&sample(), &profile).unwrap();
        let twice = normalize_input(&once, &profile).unwrap();
        assert_eq!(once, twice);

        let again = normalize_input(&sample(), &profile).unwrap();
        assert_eq!(
            serde_json::to_vec(&once).unwrap(),
            serde_json::to_vec(&again).unwrap()
        );
    }

    #[test]
    fn non_object_input_is_rejected() {
        let err = normalize_input(&json!(["a"]), &profile_with_aliases(&[])).unwrap_err();
        assert!(matches!(err, MapperError::Normalization(_)));
    }
}
