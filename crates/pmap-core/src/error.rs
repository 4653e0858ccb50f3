use thiserror::Error;

pub type Result<T> = std::result::Result<T, MapperError>;

/// Failures that abort a mapping run.
///
/// Every variant ends up as an `error` report. A guardrail refusal is not an
/// error; it is the `denied` outcome of [`crate::result::MapperResult`].
#[derive(Error, Debug)]
pub enum MapperError {
    /// The intent document is missing, unreadable or structurally invalid.
    #[error("{0}")]
    Input(String),

    #[error("{0}")]
    ProfileLoad(String),

    #[error("{0}")]
    CatalogLoad(String),

    #[error("{0}")]
    Normalization(String),

    /// An internal invariant of guardrail evaluation did not hold.
    #[error("{0}")]
    Guardrail(String),

    /// The profile asks for a guardrail remedy that does not exist.
    #[error("{0}")]
    Configuration(String),

    #[error("Unknown intent_type: {0}")]
    UnknownIntentType(String),
}

impl MapperError {
    /// Short stable label used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            MapperError::Input(_) => "input",
            MapperError::ProfileLoad(_) => "profile_load",
            MapperError::CatalogLoad(_) => "catalog_load",
            MapperError::Normalization(_) => "normalization",
            MapperError::Guardrail(_) => "guardrail",
            MapperError::Configuration(_) => "configuration",
            MapperError::UnknownIntentType(_) => "unknown_intent_type",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_bare_message() {
        let err = MapperError::CatalogLoad("Catalog file not found: x.json".into());
        assert_eq!(err.to_string(), "Catalog file not found: x.json");
        assert_eq!(err.kind(), "catalog_load");
    }

    #[test]
    fn unknown_intent_type_names_the_value() {
        let err = MapperError::UnknownIntentType("batch".into());
        assert_eq!(err.to_string(), "Unknown intent_type: batch");
    }
}
