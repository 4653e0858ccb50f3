pub mod decision;
pub mod eval;
pub mod trim;

pub use decision::{GuardrailDecision, GuardrailPolicy, OnExceed, check_exceeded};
pub use eval::apply_guardrails;
pub use trim::{TrimMethod, trim_item_ids};
