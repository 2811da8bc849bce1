// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Synchronization of the `entities` list with its legacy `devices` alias.
//!
//! `devices` must always equal `entities` with the presentation-only keys
//! removed from each element. [`synchronize`] repairs a document in memory;
//! [`sync_file`] applies it to a stored document and rewrites the file only
//! when something changed, in the format it was read in.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::document::{sanitize_legacy_entry, DEVICES_KEY, ENTITIES_KEY};
use crate::error::{ConfigError, ConfigResult};
use crate::format::ConfigFormat;

/// Result of [`synchronize`].
#[derive(Debug, Clone, PartialEq)]
pub struct SyncOutcome {
    /// Whether the document was modified.
    pub updated: bool,
    /// The (possibly modified) document.
    pub document: Value,
}

impl SyncOutcome {
    fn unchanged(document: Value) -> Self {
        Self {
            updated: false,
            document,
        }
    }
}

/// Brings `devices` in line with `entities`.
///
/// - A missing `entities` list is created from the mapping elements of
///   `devices`.
/// - A missing or stale `devices` list is recomputed from the mapping
///   elements of `entities`.
///
/// Non-mapping documents are returned unchanged.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use s7cfg_config::alias::synchronize;
///
/// let outcome = synchronize(json!({"entities": [{"name": "Light", "friendly_name": "X"}]}));
/// assert!(outcome.updated);
/// assert_eq!(outcome.document["devices"], json!([{"name": "Light"}]));
///
/// assert!(!synchronize(outcome.document).updated);
/// ```
pub fn synchronize(mut document: Value) -> SyncOutcome {
    let Some(map) = document.as_object_mut() else {
        return SyncOutcome::unchanged(document);
    };

    let mut updated = false;

    if !map.get(ENTITIES_KEY).is_some_and(Value::is_array) {
        let entities = mapping_elements(map.get(DEVICES_KEY));
        map.insert(ENTITIES_KEY.to_string(), Value::Array(entities));
        updated = true;
    }

    let expected: Vec<Value> = mapping_elements(map.get(ENTITIES_KEY))
        .iter()
        .map(sanitize_legacy_entry)
        .collect();

    let in_sync = map
        .get(DEVICES_KEY)
        .and_then(Value::as_array)
        .is_some_and(|devices| *devices == expected);

    if !in_sync {
        map.insert(DEVICES_KEY.to_string(), Value::Array(expected));
        updated = true;
    }

    SyncOutcome { updated, document }
}

fn mapping_elements(list: Option<&Value>) -> Vec<Value> {
    list.and_then(Value::as_array)
        .map(|items| items.iter().filter(|item| item.is_object()).cloned().collect())
        .unwrap_or_default()
}

/// Synchronizes the aliases of a stored document.
///
/// Returns `Ok(true)` if the file was rewritten. A missing file, blank or
/// unparseable content, and a non-mapping document all yield `Ok(false)`
/// without touching the file. Only other I/O failures are errors.
pub fn sync_file(path: impl AsRef<Path>) -> ConfigResult<bool> {
    let path = path.as_ref();

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No configuration file to synchronize");
            return Ok(false);
        }
        Err(e) => return Err(ConfigError::io(path, e)),
    };

    let format = ConfigFormat::from_path(path);
    let document = match format.parse(&content) {
        Ok(Some(document)) if document.is_object() => document,
        Ok(_) => return Ok(false),
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                error_type = e.error_type(),
                "Unable to parse configuration file"
            );
            return Ok(false);
        }
    };

    let outcome = synchronize(document);
    if !outcome.updated {
        debug!(path = %path.display(), "Entity aliases already in sync");
        return Ok(false);
    }

    let serialized = format.serialize(&outcome.document)?;
    std::fs::write(path, serialized).map_err(|e| ConfigError::io(path, e))?;

    info!(path = %path.display(), format = %format, "Synchronized entity aliases");
    Ok(true)
}
