pub mod catalog;
pub mod config;
pub mod error;
pub mod guardrails;
pub mod io;
pub mod normalize;
pub mod pipeline;
pub mod profile;
pub mod report;
pub mod resolve;
pub mod result;
pub mod stream;
pub mod task;
pub mod util;

pub use pipeline::{RunOutcome, map_intent, map_intent_document, run};

/// Layout version of `mapper_report.json`.
/// This must be bumped only when the report shape changes semantically.
pub const SCHEMA_VERSION: u32 = 1;

/// Version tag of the declarative `task.yaml` contract.
pub const TASK_VERSION: &str = "v1";
