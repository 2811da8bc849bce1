// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Loading and saving configuration documents on disk.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::document::{prepare_for_save, standard_document};
use crate::error::{ConfigError, ConfigResult};
use crate::format::ConfigFormat;

/// Loads a document, falling back to the standard document.
///
/// A missing file or blank content yields [`standard_document`]. A `null`
/// document yields an empty mapping.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidDocument`] if the content cannot be parsed
/// and [`ConfigError::Io`] on other read failures.
pub fn load_document(path: impl AsRef<Path>) -> ConfigResult<Value> {
    let path = path.as_ref();

    match read_document(path) {
        Ok(Some(document)) => Ok(document),
        Ok(None) => {
            debug!(path = %path.display(), "Configuration file is empty, using standard document");
            Ok(standard_document())
        }
        Err(ConfigError::FileNotFound { .. }) => {
            debug!(path = %path.display(), "Configuration file not found, using standard document");
            Ok(standard_document())
        }
        Err(e) => Err(e),
    }
}

/// Reads and parses a document without any fallback.
///
/// Returns `Ok(None)` for blank content and an empty mapping for a `null`
/// document.
///
/// # Errors
///
/// Returns [`ConfigError::FileNotFound`] if the file does not exist.
pub fn read_document(path: impl AsRef<Path>) -> ConfigResult<Option<Value>> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ConfigError::file_not_found(path),
        _ => ConfigError::io(path, e),
    })?;

    let parsed = ConfigFormat::from_path(path)
        .parse(&content)
        .map_err(|e| ConfigError::invalid_document(path, e.to_string()))?;

    Ok(parsed.map(|document| match document {
        Value::Null => Value::Object(Map::new()),
        other => other,
    }))
}

/// Persists a document in canonical form and returns what was written.
///
/// The document goes through [`prepare_for_save`], so the `devices` alias
/// is always rewritten in sync with `entities`.
pub fn save_document(path: impl AsRef<Path>, document: &Value) -> ConfigResult<Value> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path);

    let saved = Value::Object(prepare_for_save(document));
    let serialized = format.serialize(&saved)?;

    std::fs::write(path, serialized).map_err(|e| ConfigError::io(path, e))?;
    info!(path = %path.display(), format = %format, "Saved configuration document");

    Ok(saved)
}
