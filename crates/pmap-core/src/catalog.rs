//! Local catalog of addressable entities.
//!
//! The catalog is a JSON object whose `items` member maps identifiers to
//! classification metadata:
//!
//! ```json
//! { "items": { "ak47": { "category": "weapons", "tier": 4 } } }
//! ```
//!
//! Loading checks the container only. Entries are never validated here;
//! consumers skip what they cannot use.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{MapperError, Result};
use crate::profile::LoadedProfile;

/// A fully loaded, read-only catalog document.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    path: PathBuf,
    root: Map<String, Value>,
}

impl Catalog {
    /// Wrap an already parsed document. The root must be an object.
    pub fn from_value(path: impl Into<PathBuf>, value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self {
                path: path.into(),
                root,
            }),
            _ => Err(MapperError::CatalogLoad(
                "Catalog root must be a JSON object".into(),
            )),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The identifier -> metadata mapping, if the document has one.
    pub fn items(&self) -> Option<&Map<String, Value>> {
        self.root.get("items").and_then(Value::as_object)
    }
}

/// Load the catalog referenced by `profile.catalog.path`.
pub fn load_catalog(profile: &LoadedProfile) -> Result<Catalog> {
    let path_value = profile.document.catalog.path.trim();
    if path_value.is_empty() {
        return Err(MapperError::CatalogLoad(
            "profile.catalog.path must be a non-empty string".into(),
        ));
    }

    let catalog = load_catalog_file(Path::new(path_value))?;
    log::info!(
        "loaded catalog {} ({} items)",
        catalog.path.display(),
        catalog.items().map_or(0, Map::len)
    );
    Ok(catalog)
}

/// Read and parse a catalog file. No partial loads: any failure is fatal.
pub fn load_catalog_file(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        return Err(MapperError::CatalogLoad(format!(
            "Catalog file not found: {}",
            path.display()
        )));
    }
    if !path.is_file() {
        return Err(MapperError::CatalogLoad(format!(
            "Catalog path is not a file: {}",
            path.display()
        )));
    }

    let text = fs::read_to_string(path)
        .map_err(|e| MapperError::CatalogLoad(format!("Failed to load catalog JSON: {e}")))?;
    let value: Value = serde_json::from_str(&text)
        .map_err(|e| MapperError::CatalogLoad(format!("Failed to load catalog JSON: {e}")))?;

    Catalog::from_value(path, value)
}
