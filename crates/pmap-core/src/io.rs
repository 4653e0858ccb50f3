//! Filesystem boundary: reading the intent, persisting artifacts.

use anyhow::{Context, Result as AnyResult};
use serde::Serialize;
use serde_json::Value;
use std::{fs, path::Path};

use crate::error::{MapperError, Result};

/// Read an intent document. The root must be a JSON object.
pub fn read_input(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(MapperError::Input(format!(
            "intent document not found: {}",
            path.display()
        )));
    }

    let raw = fs::read_to_string(path).map_err(|e| {
        MapperError::Input(format!("Failed to read intent document: {e}"))
    })?;

    let value: Value = serde_json::from_str(&raw).map_err(|e| {
        MapperError::Input(format!("Failed to read intent document: {e}"))
    })?;

    if !value.is_object() {
        return Err(MapperError::Input(
            "intent document root must be an object".into(),
        ));
    }

    Ok(value)
}

/// Pretty JSON with a trailing newline.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> AnyResult<()> {
    let mut text = serde_json::to_string_pretty(value).context("serialize JSON")?;
    text.push('\n');
    write_text(path, &text)
}

pub fn write_yaml<T: Serialize>(path: &Path, value: &T) -> AnyResult<()> {
    let text = serde_yaml::to_string(value).context("serialize YAML")?;
    write_text(path, &text)
}

pub fn write_text(path: &Path, text: &str) -> AnyResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output directory {}", parent.display()))?;
    }
    fs::write(path, text).with_context(|| format!("write {}", path.display()))
}

/// Remove `path` if it exists.
pub fn remove_stale(path: &Path) -> AnyResult<bool> {
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_file(path).with_context(|| format!("remove stale {}", path.display()))?;
    Ok(true)
}
