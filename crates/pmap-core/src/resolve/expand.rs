//! Diagnostic expansion of classification filters into identifiers.
//!
//! Expansion only estimates scale. The resulting identifiers feed the
//! guardrails and the report preview; they are never written into the
//! declarative document.

use serde_json::{Map, Value};

use crate::catalog::Catalog;
use crate::error::{MapperError, Result};
use crate::util::deterministic::sort_unique;

/// The `params` object of an API source, if present.
pub fn api_params(api_source: &Value) -> Option<&Map<String, Value>> {
    api_source.get("params").and_then(Value::as_object)
}

/// Selector list `params[key]`. Absent or null means "not given"; any
/// other non-list value is rejected instead of widening the request.
pub fn selector_list<'a>(api_source: &'a Value, key: &str) -> Result<&'a [Value]> {
    let none: &'a [Value] = &[];
    match api_params(api_source).and_then(|p| p.get(key)) {
        None | Some(Value::Null) => Ok(none),
        Some(Value::Array(list)) => Ok(list.as_slice()),
        Some(_) => Err(MapperError::Input(format!("params.{key} must be a list"))),
    }
}

/// Number of entries in the list `params[key]`.
pub fn param_len(api_source: &Value, key: &str) -> Result<usize> {
    selector_list(api_source, key).map(<[Value]>::len)
}

/// Expand `params.categories` / `params.tiers` against the catalog.
///
/// An entry qualifies iff its `category` is in the category filter and its
/// `tier` is in the tier filter; an empty filter does not constrain that
/// axis. Entries that are not objects are skipped.
///
/// Output is sorted and free of duplicates, and depends only on
/// `(catalog, filters)`.
pub fn expand_item_ids(api_source: &Value, catalog: &Catalog) -> Result<Vec<String>> {
    let items = catalog
        .items()
        .ok_or_else(|| MapperError::Guardrail("Catalog missing 'items' mapping".into()))?;

    let categories = selector_list(api_source, "categories")?;
    let tiers = selector_list(api_source, "tiers")?;

    let mut out: Vec<String> = items
        .iter()
        .filter_map(|(item_id, meta)| {
            let meta = meta.as_object()?;
            let qualifies = matches(categories, meta.get("category"))
                && matches(tiers, meta.get("tier"));
            qualifies.then(|| item_id.clone())
        })
        .collect();

    sort_unique(&mut out);
    Ok(out)
}

fn matches(filter: &[Value], attribute: Option<&Value>) -> bool {
    filter.is_empty() || attribute.is_some_and(|a| filter.contains(a))
}
