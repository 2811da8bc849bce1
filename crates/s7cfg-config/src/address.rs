// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! PLC address discovery on entity attributes.
//!
//! # Classification
//!
//! A value "looks like" an S7 address when its trimmed text matches one of
//! two patterns:
//!
//! | Pattern                               | Examples                 |
//! |---------------------------------------|--------------------------|
//! | area letters + optional number, comma, type letters + offset | `DB1,X0.0`, `DB2,REAL0` |
//! | area letters + optional number + optional `.bit` suffix       | `M0.1`, `I5`, `Q0.7`    |
//!
//! This is a heuristic, not a grammar. Short all-letter words such as `ON`
//! also match the second pattern; such misclassification is accepted.
//!
//! # Collection
//!
//! Every attribute except `name`, `type`, `friendly_name` and `topic` is
//! inspected. A direct address string yields a `plc` record; a mapping
//! yields one record per address found under `plc` and `set_plc`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use s7cfg_core::{AddressRecord, AddressRole};

use crate::document::{display_name, entity_source, Entity, Mapping};

/// Entity keys that never hold addresses.
pub const RESERVED_ATTRIBUTE_KEYS: [&str; 4] = ["name", "type", "friendly_name", "topic"];

static ADDRESS_PATTERNS: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(r"^[A-Za-z]{1,4}[0-9]*,[A-Za-z]+[0-9.,]*$")
            .expect("Failed to compile area/type address pattern"),
        Regex::new(r"^[A-Za-z]{1,4}[0-9]*(?:\.[0-9]+.*)?$")
            .expect("Failed to compile bit address pattern"),
    ]
});

// =============================================================================
// Classifier
// =============================================================================

/// Returns `true` if `text` looks like a PLC address.
///
/// # Examples
///
/// ```
/// use s7cfg_config::address::looks_like_address;
///
/// assert!(looks_like_address("DB1,X0.0"));
/// assert!(looks_like_address(" M0.1 "));
/// assert!(!looks_like_address("Living room"));
/// assert!(!looks_like_address(""));
/// ```
pub fn looks_like_address(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && ADDRESS_PATTERNS.iter().any(|re| re.is_match(trimmed))
}

/// Returns `true` if `value` is a string that looks like a PLC address.
pub fn is_plc_address(value: &Value) -> bool {
    value.as_str().is_some_and(looks_like_address)
}

// =============================================================================
// AttributeValue
// =============================================================================

/// Tagged view of an entity attribute value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttributeValue<'a> {
    /// A direct address string (untrimmed).
    Address(&'a str),
    /// A mapping with read and/or write addresses.
    Roles {
        /// Read address.
        plc: Option<&'a str>,
        /// Write-only address.
        set_plc: Option<&'a str>,
    },
    /// Anything else.
    Opaque(&'a Value),
}

impl<'a> AttributeValue<'a> {
    /// Classifies an attribute value.
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::String(s) if looks_like_address(s) => AttributeValue::Address(s),
            Value::Object(map) => {
                let role = |key: &str| {
                    map.get(key)
                        .and_then(Value::as_str)
                        .filter(|s| looks_like_address(s))
                };
                match (role("plc"), role("set_plc")) {
                    (None, None) => AttributeValue::Opaque(value),
                    (plc, set_plc) => AttributeValue::Roles { plc, set_plc },
                }
            }
            other => AttributeValue::Opaque(other),
        }
    }

    /// Returns the addresses carried by this value, trimmed, with their role.
    pub fn addresses(&self) -> Vec<(AddressRole, &'a str)> {
        match *self {
            AttributeValue::Address(address) => vec![(AddressRole::Plc, address.trim())],
            AttributeValue::Roles { plc, set_plc } => plc
                .map(|a| (AddressRole::Plc, a.trim()))
                .into_iter()
                .chain(set_plc.map(|a| (AddressRole::SetPlc, a.trim())))
                .collect(),
            AttributeValue::Opaque(_) => Vec::new(),
        }
    }
}

// =============================================================================
// Collector
// =============================================================================

/// Collects every PLC address of a raw document.
///
/// The entity list is `entities` if it is a list, else `devices`. Entity
/// positions used for placeholder names count every list element, including
/// ones that are skipped because they are not mappings.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use s7cfg_config::address::collect_addresses;
///
/// let doc = json!({
///     "entities": [{
///         "name": "Light",
///         "state": "DB3,X0.0",
///         "brightness": {"plc": "DB3,BYTE1", "set_plc": "DB3,BYTE1"}
///     }]
/// });
///
/// let records = collect_addresses(&doc);
/// assert_eq!(records.len(), 3);
/// assert_eq!(records[2].role.as_str(), "set_plc");
/// ```
pub fn collect_addresses(document: &Value) -> Vec<AddressRecord> {
    let Some(list) = document.as_object().and_then(entity_source) else {
        return Vec::new();
    };

    collect_from(
        list.iter()
            .enumerate()
            .filter_map(|(index, entry)| entry.as_object().map(|entity| (index, entity))),
    )
}

/// Collects every PLC address of already-normalized entities.
pub fn collect_entity_addresses(entities: &[Entity]) -> Vec<AddressRecord> {
    collect_from(
        entities
            .iter()
            .enumerate()
            .map(|(index, entity)| (index, entity.as_mapping())),
    )
}

fn collect_from<'a>(entities: impl Iterator<Item = (usize, &'a Mapping)>) -> Vec<AddressRecord> {
    let mut records = Vec::new();

    for (index, entity) in entities {
        let entity_name = display_name(entity, index);

        for (key, value) in entity {
            if RESERVED_ATTRIBUTE_KEYS.contains(&key.as_str()) {
                continue;
            }
            for (role, address) in AttributeValue::classify(value).addresses() {
                records.push(AddressRecord::new(&entity_name, key, role, address));
            }
        }
    }

    records
}
