use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::TASK_VERSION;

/// Declarative follow-on document (`task.yaml` v1) handed to the fetcher.
///
/// Field order is the serialized order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDocument {
    pub version: String,
    pub lookback_hours: Value,
    pub keywords: Value,
    pub sources: Vec<TaskSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<Value>,
}

impl TaskDocument {
    pub fn new(lookback_hours: Value, keywords: Value) -> Self {
        Self {
            version: TASK_VERSION.to_string(),
            lookback_hours,
            keywords,
            sources: Vec::new(),
            limits: None,
        }
    }

    pub fn api_block(&self) -> Option<&ApiTaskBlock> {
        self.sources.iter().find_map(|s| match s {
            TaskSource::Api(block) => Some(block),
            TaskSource::Passthrough(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskSource {
    Api(ApiTaskBlock),
    /// `telegram` / `web` blocks, copied verbatim from the normalized intent.
    Passthrough(Value),
}

/// Profile-resolved API source. Carries selectors, never identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiTaskBlock {
    #[serde(rename = "type")]
    pub kind: String,
    pub provider: String,
    pub dataset: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<ApiItems>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiItems {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiers: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualities: Option<Value>,
}

impl ApiItems {
    pub fn is_empty(&self) -> bool {
        self.categories.is_none() && self.tiers.is_none() && self.qualities.is_none()
    }
}
