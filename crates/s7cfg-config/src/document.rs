// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration document normalization.
//!
//! A stored document may use the legacy `devices` list or the current
//! `entities` list. Normalization turns either shape into a
//! [`NormalizedConfig`] with four sections:
//!
//! - `plc` - connection parameters
//! - `mqtt` - messaging parameters, opaque here
//! - `entities` - the single source of truth for the entity list
//! - `extras` - every other top-level key, round-tripped unchanged
//!
//! For persistence, [`prepare_for_save`] emits `entities` together with a
//! derived `devices` mirror that drops the presentation-only keys, so
//! older readers keep working.
//!
//! Both directions are total: malformed sections become empty defaults.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// An ordered key/value mapping.
pub type Mapping = Map<String, Value>;

/// Top-level key of the connection section.
pub const PLC_KEY: &str = "plc";

/// Top-level key of the messaging section.
pub const MQTT_KEY: &str = "mqtt";

/// Top-level key of the current entity list.
pub const ENTITIES_KEY: &str = "entities";

/// Top-level key of the legacy entity list.
pub const DEVICES_KEY: &str = "devices";

/// Presentation-only entity keys, absent from the legacy `devices` mirror.
pub const LEGACY_IGNORED_KEYS: [&str; 2] = ["friendly_name", "topic"];

const SECTION_KEYS: [&str; 4] = [PLC_KEY, MQTT_KEY, ENTITIES_KEY, DEVICES_KEY];

// =============================================================================
// Entity
// =============================================================================

/// A named logical I/O point.
///
/// Entities are open attribute bags. Besides `name`, `type`,
/// `friendly_name` and `topic`, every attribute holds either an address
/// string or a mapping with `plc`/`set_plc` addresses.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entity(Mapping);

impl Entity {
    /// Wraps an attribute mapping.
    pub fn new(attributes: Mapping) -> Self {
        Self(attributes)
    }

    /// Returns the raw `name` value, if it is a string.
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// Returns the `type` value, if it is a string.
    pub fn entity_type(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    /// Returns the display name: the trimmed `name`, or `Entity N` for the
    /// 0-based `index` when no usable name exists.
    pub fn display_name(&self, index: usize) -> String {
        display_name(&self.0, index)
    }

    /// Returns an attribute value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the underlying mapping.
    pub fn as_mapping(&self) -> &Mapping {
        &self.0
    }

    /// Consumes the entity and returns the underlying mapping.
    pub fn into_mapping(self) -> Mapping {
        self.0
    }

    /// Returns the legacy `devices` form of this entity.
    pub fn to_legacy(&self) -> Entity {
        Entity(strip_presentation_keys(&self.0))
    }
}

impl From<Mapping> for Entity {
    fn from(attributes: Mapping) -> Self {
        Self(attributes)
    }
}

pub(crate) fn display_name(entity: &Mapping, index: usize) -> String {
    match entity.get("name").and_then(Value::as_str).map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("Entity {}", index + 1),
    }
}

pub(crate) fn strip_presentation_keys(entity: &Mapping) -> Mapping {
    entity
        .iter()
        .filter(|(key, _)| !LEGACY_IGNORED_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

// =============================================================================
// NormalizedConfig
// =============================================================================

/// Canonical in-memory shape of a configuration document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedConfig {
    /// Connection parameters.
    #[serde(default)]
    pub plc: Mapping,

    /// Messaging parameters.
    #[serde(default)]
    pub mqtt: Mapping,

    /// Entity list.
    #[serde(default)]
    pub entities: Vec<Entity>,

    /// Unrecognised top-level keys.
    #[serde(default)]
    pub extras: Mapping,
}

impl NormalizedConfig {
    /// Returns the normalized document as a JSON value.
    pub fn to_value(&self) -> Value {
        json!({
            PLC_KEY: self.plc,
            MQTT_KEY: self.mqtt,
            ENTITIES_KEY: self.entities,
            "extras": self.extras,
        })
    }
}

/// Normalizes a document of either schema.
///
/// Non-mapping input is treated as empty. `entities` is preferred over
/// `devices` whenever it is a list; non-mapping list elements are dropped.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use s7cfg_config::document::normalize;
///
/// let legacy = json!({
///     "plc": {"host": "10.0.0.1"},
///     "devices": [{"name": "Legacy", "state": "DB1,X0.0"}],
///     "log_level": "debug"
/// });
///
/// let normalized = normalize(&legacy);
/// assert_eq!(normalized.entities.len(), 1);
/// assert_eq!(normalized.extras["log_level"], "debug");
/// assert!(normalized.mqtt.is_empty());
/// ```
pub fn normalize(document: &Value) -> NormalizedConfig {
    let Some(source) = document.as_object() else {
        return NormalizedConfig::default();
    };

    let entities = entity_source(source)
        .map(|list| {
            list.iter()
                .filter_map(Value::as_object)
                .cloned()
                .map(Entity::new)
                .collect()
        })
        .unwrap_or_default();

    let extras = source
        .iter()
        .filter(|(key, _)| !SECTION_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    NormalizedConfig {
        plc: section(source, PLC_KEY),
        mqtt: section(source, MQTT_KEY),
        entities,
        extras,
    }
}

/// Returns the entity list of a raw document: `entities` if it is a list,
/// else `devices` if it is a list.
pub(crate) fn entity_source(source: &Mapping) -> Option<&Vec<Value>> {
    source
        .get(ENTITIES_KEY)
        .and_then(Value::as_array)
        .or_else(|| source.get(DEVICES_KEY).and_then(Value::as_array))
}

fn section(source: &Mapping, key: &str) -> Mapping {
    source
        .get(key)
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

/// Returns a copy of `entity` without the presentation-only keys.
///
/// Non-mapping values are returned unchanged.
pub fn sanitize_legacy_entry(entity: &Value) -> Value {
    match entity.as_object() {
        Some(mapping) => Value::Object(strip_presentation_keys(mapping)),
        None => entity.clone(),
    }
}

/// Builds the document to persist.
///
/// `plc` and `mqtt` are emitted only when non-empty. `entities` and the
/// derived `devices` mirror are emitted whenever the source carried either
/// list, even an empty one, so an intentional clear is persisted. Extras
/// are merged last and never replace a canonical section.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use s7cfg_config::document::prepare_for_save;
///
/// let saved = prepare_for_save(&json!({
///     "entities": [{"name": "Light", "friendly_name": "Living room", "state": "DB3,X0.0"}]
/// }));
///
/// assert_eq!(saved["entities"][0]["friendly_name"], "Living room");
/// assert_eq!(saved["devices"], json!([{"name": "Light", "state": "DB3,X0.0"}]));
/// assert!(!saved.contains_key("plc"));
/// ```
pub fn prepare_for_save(document: &Value) -> Mapping {
    let normalized = normalize(document);
    let mut output = Mapping::new();

    if !normalized.plc.is_empty() {
        output.insert(PLC_KEY.to_string(), Value::Object(normalized.plc));
    }
    if !normalized.mqtt.is_empty() {
        output.insert(MQTT_KEY.to_string(), Value::Object(normalized.mqtt));
    }

    let had_list = document.as_object().is_some_and(|source| {
        source.get(ENTITIES_KEY).is_some_and(Value::is_array)
            || source.get(DEVICES_KEY).is_some_and(Value::is_array)
    });

    if had_list || !normalized.entities.is_empty() {
        let devices: Vec<Value> = normalized
            .entities
            .iter()
            .map(|entity| Value::Object(entity.to_legacy().into_mapping()))
            .collect();
        let entities: Vec<Value> = normalized
            .entities
            .into_iter()
            .map(|entity| Value::Object(entity.into_mapping()))
            .collect();

        output.insert(ENTITIES_KEY.to_string(), Value::Array(entities));
        output.insert(DEVICES_KEY.to_string(), Value::Array(devices));
    }

    for (key, value) in normalized.extras {
        output.entry(key).or_insert(value);
    }

    output
}

// =============================================================================
// Standard Document
// =============================================================================

/// Returns the built-in starter document.
///
/// Served when no configuration file exists yet. Every call returns a
/// fresh copy.
pub fn standard_document() -> Value {
    let entities = json!([
        {
            "name": "Wohnzimmer Licht",
            "type": "light",
            "friendly_name": "Wohnzimmer Licht",
            "state": "DB56,X150.0",
            "brightness": {
                "plc": "DB56,BYTE151",
                "set_plc": "DB56,BYTE151"
            }
        },
        {
            "name": "Wohnzimmer Temperatur",
            "type": "sensor",
            "friendly_name": "Wohnzimmer Temperatur",
            "unit_of_measurement": "°C",
            "device_class": "temperature",
            "state": "DB60,REAL0"
        },
        {
            "name": "Wohnzimmer Steckdose",
            "type": "switch",
            "friendly_name": "Wohnzimmer Steckdose",
            "state": {
                "plc": "DB10,X0.0",
                "set_plc": "DB10,X0.0"
            }
        }
    ]);

    let devices: Vec<Value> = entities
        .as_array()
        .map(|list| list.iter().map(sanitize_legacy_entry).collect())
        .unwrap_or_default();

    json!({
        "plc": {
            "host": "192.168.0.1",
            "port": 102,
            "rack": 0,
            "slot": 2,
            "timeout": 5000,
            "localTSAP": "0x4C00",
            "remoteTSAP": "0x1100"
        },
        "mqtt": {
            "host": "mqtt://homeassistant.local",
            "user": "homeassistant",
            "password": "homeassistant",
            "clientId": "mqtt-s7-connector",
            "keepalive": 60,
            "rejectUnauthorized": true
        },
        "entities": entities,
        "devices": devices
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_non_mapping() {
        assert_eq!(normalize(&json!(null)), NormalizedConfig::default());
        assert_eq!(normalize(&json!([1, 2])), NormalizedConfig::default());
        assert_eq!(normalize(&json!("plc")), NormalizedConfig::default());
    }

    #[test]
    fn test_normalize_migrates_devices() {
        let legacy = json!({
            "plc": {"host": "10.0.0.1"},
            "devices": [{"name": "Legacy", "type": "sensor", "state": "DB1,X0.0"}]
        });
        let normalized = normalize(&legacy);
        assert_eq!(
            serde_json::to_value(&normalized.entities).unwrap(),
            legacy["devices"]
        );
        assert!(normalized.extras.is_empty());
    }

    #[test]
    fn test_normalize_prefers_entities_even_when_empty() {
        let doc = json!({
            "entities": [],
            "devices": [{"name": "Stale"}]
        });
        assert!(normalize(&doc).entities.is_empty());
    }

    #[test]
    fn test_normalize_drops_malformed_sections() {
        let doc = json!({
            "plc": "192.168.0.1",
            "mqtt": [1],
            "entities": [{"name": "A"}, "garbage", 7, null]
        });
        let normalized = normalize(&doc);
        assert!(normalized.plc.is_empty());
        assert!(normalized.mqtt.is_empty());
        assert_eq!(normalized.entities.len(), 1);
        assert!(normalized.extras.is_empty());
    }

    #[test]
    fn test_normalize_keeps_extras_order() {
        let doc = json!({"zeta": 1, "plc": {}, "alpha": {"nested": true}});
        let keys: Vec<_> = normalize(&doc).extras.keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_to_value_shape() {
        let value = normalize(&json!({"entities": [{"name": "A"}]})).to_value();
        assert_eq!(
            value,
            json!({"plc": {}, "mqtt": {}, "entities": [{"name": "A"}], "extras": {}})
        );
    }

    #[test]
    fn test_sanitize_legacy_entry() {
        let entity = json!({"name": "L", "friendly_name": "F", "topic": "t", "state": "M0.1"});
        assert_eq!(
            sanitize_legacy_entry(&entity),
            json!({"name": "L", "state": "M0.1"})
        );
        assert_eq!(sanitize_legacy_entry(&json!("raw")), json!("raw"));
    }

    #[test]
    fn test_prepare_for_save_keeps_alias_in_sync() {
        let data = json!({
            "mqtt": {"host": "mqtt://demo.local"},
            "entities": [{"name": "Demo Switch", "type": "switch", "state": "DB5,X0.0"}]
        });
        let saved = prepare_for_save(&data);
        assert_eq!(saved["devices"], saved["entities"]);
        assert!(saved.contains_key("mqtt"));
    }

    #[test]
    fn test_prepare_for_save_persists_cleared_list() {
        let saved = prepare_for_save(&json!({"devices": []}));
        assert_eq!(saved["entities"], json!([]));
        assert_eq!(saved["devices"], json!([]));
    }

    #[test]
    fn test_prepare_for_save_omits_list_when_absent() {
        let saved = prepare_for_save(&json!({"plc": {"host": "a"}}));
        assert!(!saved.contains_key("entities"));
        assert!(!saved.contains_key("devices"));
    }

    #[test]
    fn test_prepare_for_save_orders_extras_last() {
        let saved = prepare_for_save(&json!({
            "options": {"retain": true},
            "plc": {"host": "a"},
            "entities": []
        }));
        let keys: Vec<_> = saved.keys().cloned().collect();
        assert_eq!(keys, vec!["plc", "entities", "devices", "options"]);
    }

    #[test]
    fn test_normalize_after_save_is_stable() {
        let doc = json!({
            "plc": {"host": "10.0.0.1"},
            "devices": [{"name": "Pump", "friendly_name": "Pump 1", "state": "DB1,X0.0"}],
            "extra": [1, 2, 3]
        });
        let saved = Value::Object(prepare_for_save(&doc));
        let resaved = Value::Object(prepare_for_save(&saved));

        assert_eq!(saved, resaved);
        let once = normalize(&saved);
        assert_eq!(once, normalize(&resaved));
        assert_eq!(once.extras["extra"], json!([1, 2, 3]));
        assert_eq!(once.entities[0].get("friendly_name"), Some(&json!("Pump 1")));
    }

    #[test]
    fn test_entity_accessors() {
        let entity: Entity = json!({"name": "  Pump ", "type": "switch"})
            .as_object()
            .cloned()
            .unwrap()
            .into();
        assert_eq!(entity.display_name(0), "Pump");
        assert_eq!(entity.entity_type(), Some("switch"));
        assert_eq!(Entity::default().display_name(4), "Entity 5");
    }

    #[test]
    fn test_standard_document_is_synchronized() {
        let doc = standard_document();
        let saved = prepare_for_save(&doc);
        assert_eq!(Value::Object(saved), doc);
    }
}
