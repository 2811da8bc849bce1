// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Fixtures
//!
//! Sample configuration documents shared by the integration suites.

use serde_json::{json, Value};

/// A current-style document with one entity per address shape.
///
/// Yields four address records: `Lamp.state`, `Lamp.brightness` (read
/// and write) and `Boiler.temperature`.
pub fn entity_document() -> Value {
    json!({
        "plc": {
            "host": "10.0.0.5",
            "port": "102",
            "rack": 0,
            "slot": 1,
            "tsap_id": "0x4C00, 0x1100"
        },
        "mqtt": {"host": "mqtt://broker.local"},
        "entities": [
            {
                "name": "Lamp",
                "type": "light",
                "friendly_name": "Kitchen lamp",
                "state": "DB3,X0.0",
                "brightness": {"plc": "DB3,BYTE1", "set_plc": "DB3,BYTE1"}
            },
            {
                "name": "Boiler",
                "type": "sensor",
                "topic": "boiler/temperature",
                "temperature": "DB5,REAL4",
                "unit_of_measurement": "°C"
            }
        ]
    })
}

/// A document that only has the legacy `devices` list.
pub fn legacy_document() -> Value {
    json!({
        "plc": {"host": "192.168.1.20"},
        "devices": [
            {"name": "Pump", "type": "switch", "state": "DB1,X2.0"},
            {"type": "sensor", "state": "DB1,INT4"}
        ]
    })
}

/// Legacy YAML configuration whose `devices` alias is out of date.
pub const STALE_YAML: &str = "\
plc:
  host: 10.0.0.5
entities:
- name: Lamp
  type: light
  friendly_name: Kitchen lamp
  state: DB3,X0.0
devices: []
";

/// JSON configuration without a `devices` alias.
pub const MISSING_ALIAS_JSON: &str = r#"{
  "plc": {"host": "10.0.0.5"},
  "entities": [
    {"name": "Lamp", "type": "light", "topic": "lamp", "state": "DB3,X0.0"}
  ]
}"#;
