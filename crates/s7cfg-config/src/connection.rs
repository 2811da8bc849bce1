// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Sanitization of the raw `plc` section into a [`ConnectionDescriptor`].
//!
//! Sanitization fails closed: without a non-blank `host` there is no
//! descriptor and no connection attempt. Every other field degrades to its
//! default instead of failing.
//!
//! # TSAP Shapes
//!
//! Explicit `localTSAP`/`remoteTSAP` keys win. Missing values are filled
//! from a combined `tsap_id` field, which may be:
//!
//! ```yaml
//! tsap_id: {local: "4c00", remote: "0x1100"}   # or client/server
//! tsap_id: ["0x4C00", "0x1100"]
//! tsap_id: "0x4C00,0x1100"                      # also ; / or whitespace
//! tsap_id: "0x1100"                             # remote only
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use s7cfg_core::{ConnectionDescriptor, Tsap, DEFAULT_PORT, DEFAULT_RACK, DEFAULT_SLOT};

static TSAP_DELIMITER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,;\s/]+").expect("Failed to compile TSAP delimiter pattern"));

/// Sanitizes a raw `plc` section.
///
/// Returns `None` when `raw` is not a mapping or has no usable host.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use s7cfg_config::connection::sanitize_connection;
///
/// assert!(sanitize_connection(&json!({"host": "  "})).is_none());
///
/// let descriptor = sanitize_connection(&json!({"host": "10.0.0.5", "port": "102"})).unwrap();
/// assert_eq!(descriptor.port, 102);
/// assert_eq!(descriptor.slot, 2);
/// ```
pub fn sanitize_connection(raw: &Value) -> Option<ConnectionDescriptor> {
    let config = raw.as_object()?;

    let host = config.get("host").and_then(Value::as_str).map(str::trim)?;
    if host.is_empty() {
        return None;
    }

    let mut descriptor = ConnectionDescriptor::new(host)
        .with_port(parse_numeric(config.get("port")).unwrap_or(DEFAULT_PORT))
        .with_rack(parse_numeric(config.get("rack")).unwrap_or(DEFAULT_RACK))
        .with_slot(parse_numeric(config.get("slot")).unwrap_or(DEFAULT_SLOT));

    descriptor.local_tsap = config.get("localTSAP").and_then(normalize_tsap);
    descriptor.remote_tsap = config.get("remoteTSAP").and_then(normalize_tsap);

    if let Some(tsap_id) = config.get("tsap_id") {
        let (local, remote) = split_tsap_id(tsap_id);
        if descriptor.local_tsap.is_none() {
            descriptor.local_tsap = local;
        }
        if descriptor.remote_tsap.is_none() {
            descriptor.remote_tsap = remote;
        }
    }

    descriptor.debug = config.get("debug").and_then(Value::as_bool);
    descriptor.timeout = config.get("timeout").and_then(|v| parse_numeric(Some(v)));
    descriptor.do_not_optimize = config.get("doNotOptimize").and_then(Value::as_bool);

    Some(descriptor)
}

/// Normalizes a single TSAP value.
///
/// Numbers and recognised strings become `0xHHHH`; unrecognised strings
/// are kept verbatim. Blank strings and other shapes yield `None`.
pub fn normalize_tsap(value: &Value) -> Option<Tsap> {
    match value {
        Value::Number(n) => Some(
            n.as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .map(Tsap::Numeric)
                .unwrap_or_else(|| Tsap::Verbatim(n.to_string())),
        ),
        Value::String(s) => Tsap::parse_str(s),
        _ => None,
    }
}

/// Splits a combined `tsap_id` into `(local, remote)`.
fn split_tsap_id(tsap_id: &Value) -> (Option<Tsap>, Option<Tsap>) {
    match tsap_id {
        Value::Object(map) => {
            let local = non_null(map.get("local")).or_else(|| map.get("client"));
            let remote = non_null(map.get("remote")).or_else(|| map.get("server"));
            (
                local.and_then(normalize_tsap),
                remote.and_then(normalize_tsap),
            )
        }
        Value::Array(items) => (
            items.first().and_then(normalize_tsap),
            items.get(1).and_then(normalize_tsap),
        ),
        Value::String(s) if TSAP_DELIMITER.is_match(s.trim()) => {
            let mut parts = TSAP_DELIMITER
                .split(s.trim())
                .filter(|part| !part.is_empty());
            (
                parts.next().and_then(Tsap::parse_str),
                parts.next().and_then(Tsap::parse_str),
            )
        }
        other => (None, normalize_tsap(other)),
    }
}

fn non_null(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Parses an integer field given as a number or numeric string.
///
/// Non-integral, negative or out-of-range values yield `None` so the
/// caller's default applies.
fn parse_numeric<T: TryFrom<u64>>(value: Option<&Value>) -> Option<T> {
    let number = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    if !number.is_finite() || number < 0.0 || number.fract() != 0.0 || number > u64::MAX as f64 {
        return None;
    }
    T::try_from(number as u64).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_host() {
        assert!(sanitize_connection(&json!(null)).is_none());
        assert!(sanitize_connection(&json!({})).is_none());
        assert!(sanitize_connection(&json!({"host": ""})).is_none());
        assert!(sanitize_connection(&json!({"host": 10})).is_none());
    }

    #[test]
    fn test_defaults_and_string_numbers() {
        let descriptor = sanitize_connection(&json!({"host": " 10.0.0.5 ", "port": "102"})).unwrap();
        assert_eq!(descriptor, ConnectionDescriptor::new("10.0.0.5"));
    }

    #[test]
    fn test_unparseable_numbers_fall_back() {
        let descriptor = sanitize_connection(&json!({
            "host": "plc",
            "port": "abc",
            "rack": -1,
            "slot": 1.5
        }))
        .unwrap();
        assert_eq!(descriptor.port, DEFAULT_PORT);
        assert_eq!(descriptor.rack, DEFAULT_RACK);
        assert_eq!(descriptor.slot, DEFAULT_SLOT);
    }

    #[test]
    fn test_optional_flags() {
        let descriptor = sanitize_connection(&json!({
            "host": "plc",
            "debug": true,
            "timeout": "1500",
            "doNotOptimize": "yes"
        }))
        .unwrap();
        assert_eq!(descriptor.debug, Some(true));
        assert_eq!(descriptor.timeout, Some(1500));
        assert_eq!(descriptor.do_not_optimize, None);
    }

    #[test]
    fn test_tsap_id_mapping() {
        let descriptor = sanitize_connection(&json!({
            "host": "192.168.0.50",
            "port": "102",
            "tsap_id": {"local": "4c00", "remote": "0x1100"}
        }))
        .unwrap();
        assert_eq!(descriptor.local_tsap.unwrap().to_string(), "0x4C00");
        assert_eq!(descriptor.remote_tsap.unwrap().to_string(), "0x1100");
        assert_eq!(descriptor.port, 102);
    }

    #[test]
    fn test_tsap_id_client_server() {
        let descriptor = sanitize_connection(&json!({
            "host": "plc",
            "tsap_id": {"client": 256, "server": "200"}
        }))
        .unwrap();
        assert_eq!(descriptor.local_tsap, Some(Tsap::Numeric(0x0100)));
        assert_eq!(descriptor.remote_tsap, Some(Tsap::Numeric(0x0200)));
    }

    #[test]
    fn test_tsap_id_delimited_string() {
        for raw in ["0x4C00,0x1100", "0x4C00; 0x1100", "4C00 1100", "0x4C00/0x1100"] {
            let descriptor = sanitize_connection(&json!({"host": "logo.local", "tsap_id": raw})).unwrap();
            assert_eq!(descriptor.local_tsap, Some(Tsap::Numeric(0x4C00)), "{raw}");
            assert_eq!(descriptor.remote_tsap, Some(Tsap::Numeric(0x1100)), "{raw}");
        }
    }

    #[test]
    fn test_tsap_id_array_and_single() {
        let descriptor = sanitize_connection(&json!({"host": "plc", "tsap_id": ["1000", 4096]})).unwrap();
        assert_eq!(descriptor.local_tsap, Some(Tsap::Numeric(0x1000)));
        assert_eq!(descriptor.remote_tsap, Some(Tsap::Numeric(0x1000)));

        let descriptor = sanitize_connection(&json!({"host": "plc", "tsap_id": "0x0300"})).unwrap();
        assert_eq!(descriptor.local_tsap, None);
        assert_eq!(descriptor.remote_tsap, Some(Tsap::Numeric(0x0300)));
    }

    #[test]
    fn test_explicit_tsap_wins() {
        let descriptor = sanitize_connection(&json!({
            "host": "plc",
            "localTSAP": "0x0100",
            "tsap_id": "0x4C00,0x1100"
        }))
        .unwrap();
        assert_eq!(descriptor.local_tsap, Some(Tsap::Numeric(0x0100)));
        assert_eq!(descriptor.remote_tsap, Some(Tsap::Numeric(0x1100)));
    }

    #[test]
    fn test_unparseable_tsap_kept_verbatim() {
        let descriptor = sanitize_connection(&json!({"host": "plc", "remoteTSAP": "PG-slot"})).unwrap();
        assert_eq!(descriptor.remote_tsap, Some(Tsap::Verbatim("PG-slot".to_string())));
    }
}
