use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

/// Policy document as stored in `profiles/<name>.yaml`.
///
/// This is the serializable half of a profile. Runtime metadata (hash,
/// resolved path) lives on [`LoadedProfile`] and can never leak into a
/// document produced from this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDocument {
    pub name: String,
    pub version: u64,
    pub api: ApiDescriptor,
    pub catalog: CatalogLocator,

    #[serde(default)]
    pub normalization: NormalizationRules,

    #[serde(default)]
    pub guardrails: GuardrailConfig,

    /// Named collections used by the `priority_groups` trim method.
    #[serde(default)]
    pub groups: BTreeMap<String, ProfileGroup>,
}

/// External API shape copied into the declarative document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiDescriptor {
    pub provider: String,
    pub dataset: String,
    /// Non-string values count as "no default server".
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub server: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogLocator {
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizationRules {
    /// Lower-cased location name -> canonical location name.
    #[serde(default)]
    pub location_aliases: BTreeMap<String, String>,
}

/// Scale limits and the remedy applied when one is exceeded.
///
/// Only shape is checked when the profile loads. Limits that are not
/// integers count as unconfigured; `on_exceed` and the trim method are
/// interpreted by the guardrail engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardrailConfig {
    #[serde(
        default,
        deserialize_with = "integer_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_item_ids: Option<i64>,

    #[serde(
        default,
        deserialize_with = "integer_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_request_units: Option<i64>,

    #[serde(default = "default_on_exceed")]
    pub on_exceed: String,

    #[serde(default)]
    pub trim: TrimConfig,
}

impl Default for GuardrailConfig {
    fn default() -> Self {
        Self {
            max_item_ids: None,
            max_request_units: None,
            on_exceed: default_on_exceed(),
            trim: TrimConfig::default(),
        }
    }
}

fn default_on_exceed() -> String {
    "deny".to_string()
}

fn integer_or_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| v.as_i64()))
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| v.as_str().map(str::to_string)))
}

/// String entries of a list; other entries, or a non-list, are ignored.
fn strings_only<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    let list = match raw {
        Some(serde_yaml::Value::Sequence(list)) => list,
        _ => return Ok(Vec::new()),
    };
    Ok(list
        .into_iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrimConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    #[serde(default, deserialize_with = "strings_only")]
    pub priority_item_ids: Vec<String>,

    #[serde(default, deserialize_with = "strings_only")]
    pub priority_groups: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileGroup {
    #[serde(default, deserialize_with = "strings_only")]
    pub categories: Vec<String>,
}

/// Report-facing profile identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileInfo {
    pub name: String,
    pub version: u64,
    /// `sha1:<hex>` of the policy bytes, empty for synthetic profiles.
    pub hash: String,
}

impl ProfileInfo {
    /// Identity reported for free-text stream intents.
    pub fn stream() -> Self {
        Self {
            name: "stream".to_string(),
            version: 1,
            hash: String::new(),
        }
    }
}

/// A profile as loaded for one run.
#[derive(Debug, Clone)]
pub struct LoadedProfile {
    pub document: ProfileDocument,
    pub info: ProfileInfo,
    /// Path the policy bytes were read from.
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
name: market
version: 3
api:
  provider: steam
  dataset: prices
  server: eu-1
catalog:
  path: data/catalog.json
normalization:
  location_aliases:
    ams: Amsterdam
guardrails:
  max_item_ids: 50
  max_request_units: "lots"
  on_exceed: trim
  trim:
    method: priority_groups
    priority_groups: [core]
groups:
  core:
    categories: [weapons]
"#;

    #[test]
    fn parses_complete_profile() {
        let doc: ProfileDocument = serde_yaml::from_str(FULL).unwrap();
        assert_eq!(doc.name, "market");
        assert_eq!(doc.api.server.as_deref(), Some("eu-1"));
        assert_eq!(
            doc.normalization.location_aliases.get("ams").map(String::as_str),
            Some("Amsterdam")
        );
        assert_eq!(doc.guardrails.max_item_ids, Some(50));
        assert_eq!(doc.groups["core"].categories, vec!["weapons"]);
    }

    #[test]
    fn non_integer_limit_counts_as_unconfigured() {
        let doc: ProfileDocument = serde_yaml::from_str(FULL).unwrap();
        assert_eq!(doc.guardrails.max_request_units, None);
    }

    #[test]
    fn guardrails_default_to_deny_without_limits() {
        let doc: ProfileDocument = serde_yaml::from_str(
            "name: p\nversion: 1\napi: {provider: a, dataset: b}\ncatalog: {path: c.json}\n",
        )
        .unwrap();
        assert_eq!(doc.guardrails, GuardrailConfig::default());
        assert_eq!(doc.guardrails.on_exceed, "deny");
        assert!(doc.groups.is_empty());
    }

    #[test]
    fn non_string_entries_do_not_fail_the_load() {
        let doc: ProfileDocument = serde_yaml::from_str(
            r#"
name: p
version: 1
api: {provider: a, dataset: b, server: 7}
catalog: {path: c.json}
guardrails:
  on_exceed: trim
  trim:
    method: priority_item_ids
    priority_item_ids: [itemA, 42, null, itemB]
    priority_groups: core
groups:
  core:
    categories: [weapons, {nested: 1}]
"#,
        )
        .unwrap();

        assert_eq!(doc.api.server, None);
        assert_eq!(doc.guardrails.trim.priority_item_ids, vec!["itemA", "itemB"]);
        assert!(doc.guardrails.trim.priority_groups.is_empty());
        assert_eq!(doc.groups["core"].categories, vec!["weapons"]);
    }

    #[test]
    fn stream_identity_has_no_hash() {
        let info = ProfileInfo::stream();
        assert_eq!(info.name, "stream");
        assert_eq!(info.version, 1);
        assert!(info.hash.is_empty());
    }
}
