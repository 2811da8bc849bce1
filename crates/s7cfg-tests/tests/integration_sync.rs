// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Alias Synchronization Integration Tests
//!
//! Exercises `sync_file` against real files in both formats.

use serde_json::{json, Value};

use s7cfg_config::{sync_file, ConfigFormat};
use s7cfg_tests::common::{temp_test_dir, write_file, MISSING_ALIAS_JSON, STALE_YAML};

fn reload(path: &std::path::Path) -> Value {
    let content = std::fs::read_to_string(path).unwrap();
    ConfigFormat::from_path(path).parse(&content).unwrap().unwrap()
}

#[test]
fn test_sync_stale_yaml() {
    let dir = temp_test_dir("s7cfg-sync");
    let path = write_file(dir.path(), "config.yaml", STALE_YAML);

    assert!(sync_file(&path).unwrap());

    let document = reload(&path);
    assert_eq!(
        document["devices"],
        json!([{"name": "Lamp", "type": "light", "state": "DB3,X0.0"}])
    );
    assert_eq!(document["entities"][0]["friendly_name"], "Kitchen lamp");
}

#[test]
fn test_sync_missing_alias_json() {
    let dir = temp_test_dir("s7cfg-sync");
    let path = write_file(dir.path(), "options.json", MISSING_ALIAS_JSON);

    assert!(sync_file(&path).unwrap());

    let written = std::fs::read_to_string(&path).unwrap();
    let document: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(
        document["devices"],
        json!([{"name": "Lamp", "type": "light", "state": "DB3,X0.0"}])
    );
    assert_eq!(document["entities"][0]["topic"], "lamp");
}

#[test]
fn test_sync_is_idempotent() {
    let dir = temp_test_dir("s7cfg-sync");
    let path = write_file(dir.path(), "config.yml", STALE_YAML);

    assert!(sync_file(&path).unwrap());
    let first = std::fs::read(&path).unwrap();

    assert!(!sync_file(&path).unwrap());
    assert_eq!(std::fs::read(&path).unwrap(), first);
}

#[test]
fn test_sync_keeps_hand_formatted_files_untouched() {
    let dir = temp_test_dir("s7cfg-sync");

    let compact = r#"{"entities":[{"name":"Lamp","topic":"lamp","state":"DB3,X0.0"}],"devices":[{"name":"Lamp","state":"DB3,X0.0"}]}"#;
    let json_path = write_file(dir.path(), "options.json", compact);

    let indented = "\
# maintained by hand
entities:
    -   name: Lamp
        friendly_name: Kitchen lamp
        state: \"DB3,X0.0\"
devices:
    - {name: Lamp, state: 'DB3,X0.0'}
";
    let yaml_path = write_file(dir.path(), "config.yaml", indented);

    assert!(!sync_file(&json_path).unwrap());
    assert!(!sync_file(&yaml_path).unwrap());

    assert_eq!(std::fs::read_to_string(&json_path).unwrap(), compact);
    assert_eq!(std::fs::read_to_string(&yaml_path).unwrap(), indented);
}

#[test]
fn test_sync_legacy_only_file() {
    let dir = temp_test_dir("s7cfg-sync");
    let path = write_file(
        dir.path(),
        "options.json",
        r#"{"devices": [{"name": "Pump", "state": "DB1,X2.0"}, 5]}"#,
    );

    assert!(sync_file(&path).unwrap());

    let document = reload(&path);
    assert_eq!(document["entities"], json!([{"name": "Pump", "state": "DB1,X2.0"}]));
    assert_eq!(document["devices"], document["entities"]);
}

#[test]
fn test_sync_leaves_unusable_files_alone() {
    let dir = temp_test_dir("s7cfg-sync");

    assert!(!sync_file(dir.path().join("absent.yaml")).unwrap());

    let broken = write_file(dir.path(), "broken.json", "{not json");
    assert!(!sync_file(&broken).unwrap());
    assert_eq!(std::fs::read_to_string(&broken).unwrap(), "{not json");

    let list = write_file(dir.path(), "list.yaml", "- a\n- b\n");
    assert!(!sync_file(&list).unwrap());
    assert_eq!(std::fs::read_to_string(&list).unwrap(), "- a\n- b\n");
}
