// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Core data types.
//!
//! Address records are produced fresh on every configuration scan and are
//! never persisted. Values read from a controller arrive as [`PlcValue`] and
//! are only ever shown to a user, so the type focuses on rendering.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// AddressRole
// =============================================================================

/// What an address is used for on its entity attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressRole {
    /// Read address, also used for writing unless a `set_plc` exists.
    Plc,
    /// Dedicated write-only address.
    SetPlc,
}

impl AddressRole {
    /// Returns the configuration key for this role.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressRole::Plc => "plc",
            AddressRole::SetPlc => "set_plc",
        }
    }
}

impl fmt::Display for AddressRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// AddressRecord
// =============================================================================

/// A PLC address discovered on an entity attribute.
///
/// # Examples
///
/// ```
/// use s7cfg_core::types::{AddressRecord, AddressRole};
///
/// let record = AddressRecord::new("Light", "brightness", AddressRole::SetPlc, "DB3,BYTE1");
/// assert_eq!(record.to_string(), "Light.brightness[set_plc] = DB3,BYTE1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    /// Display name of the owning entity.
    pub entity: String,
    /// Attribute key on the entity.
    pub attribute: String,
    /// Read or write role.
    pub role: AddressRole,
    /// Trimmed address string.
    pub address: String,
}

impl AddressRecord {
    /// Creates a new address record.
    pub fn new(
        entity: impl Into<String>,
        attribute: impl Into<String>,
        role: AddressRole,
        address: impl Into<String>,
    ) -> Self {
        Self {
            entity: entity.into(),
            attribute: attribute.into(),
            role,
            address: address.into(),
        }
    }
}

impl fmt::Display for AddressRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}[{}] = {}",
            self.entity, self.attribute, self.role, self.address
        )
    }
}

// =============================================================================
// PlcValue
// =============================================================================

/// A value read from a controller (or produced by the simulator).
///
/// # Examples
///
/// ```
/// use s7cfg_core::types::PlcValue;
///
/// let value = PlcValue::Array(vec![PlcValue::Int(1), PlcValue::Bool(false)]);
/// assert_eq!(value.to_display_string(), "1, false");
/// assert_eq!(PlcValue::Null.to_display_string(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum PlcValue {
    /// Boolean value
    Bool(bool),

    /// Signed integer
    Int(i64),

    /// Floating point
    Float(f64),

    /// UTF-8 string
    String(String),

    /// Raw bytes
    Bytes(Vec<u8>),

    /// Array of values
    Array(Vec<PlcValue>),

    /// Key-value structure
    Struct(Vec<(String, PlcValue)>),

    /// Null/undefined value
    Null,
}

impl PlcValue {
    /// Returns the type name of this value.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        match self {
            PlcValue::Bool(_) => "bool",
            PlcValue::Int(_) => "int",
            PlcValue::Float(_) => "float",
            PlcValue::String(_) => "string",
            PlcValue::Bytes(_) => "bytes",
            PlcValue::Array(_) => "array",
            PlcValue::Struct(_) => "struct",
            PlcValue::Null => "null",
        }
    }

    /// Returns `true` if this is a null value.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, PlcValue::Null)
    }

    /// Renders the value for display in a scan result.
    ///
    /// - bytes become a lowercase hex string
    /// - arrays are rendered element-wise and joined with `", "`
    /// - null becomes the empty string
    /// - structures are serialized as JSON, falling back to [`fmt::Display`]
    pub fn to_display_string(&self) -> String {
        match self {
            PlcValue::Bytes(bytes) => hex::encode(bytes),
            PlcValue::Array(items) => items
                .iter()
                .map(PlcValue::to_display_string)
                .collect::<Vec<_>>()
                .join(", "),
            PlcValue::Null => String::new(),
            PlcValue::Struct(_) => {
                serde_json::to_string(&self.to_json()).unwrap_or_else(|_| self.to_string())
            }
            other => other.to_string(),
        }
    }

    /// Converts this value to a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            PlcValue::Bool(v) => Json::Bool(*v),
            PlcValue::Int(v) => Json::from(*v),
            PlcValue::Float(v) => serde_json::Number::from_f64(*v)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            PlcValue::String(v) => Json::String(v.clone()),
            PlcValue::Bytes(v) => Json::String(hex::encode(v)),
            PlcValue::Array(items) => Json::Array(items.iter().map(PlcValue::to_json).collect()),
            PlcValue::Struct(fields) => Json::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            PlcValue::Null => Json::Null,
        }
    }
}

impl fmt::Display for PlcValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlcValue::Bool(v) => write!(f, "{}", v),
            PlcValue::Int(v) => write!(f, "{}", v),
            PlcValue::Float(v) => write!(f, "{}", v),
            PlcValue::String(v) => f.write_str(v),
            PlcValue::Bytes(v) => f.write_str(&hex::encode(v)),
            PlcValue::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            PlcValue::Struct(fields) => {
                f.write_str("{")?;
                for (i, (key, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
            PlcValue::Null => Ok(()),
        }
    }
}

impl From<bool> for PlcValue {
    fn from(v: bool) -> Self {
        PlcValue::Bool(v)
    }
}

impl From<i64> for PlcValue {
    fn from(v: i64) -> Self {
        PlcValue::Int(v)
    }
}

impl From<f64> for PlcValue {
    fn from(v: f64) -> Self {
        PlcValue::Float(v)
    }
}

impl From<&str> for PlcValue {
    fn from(v: &str) -> Self {
        PlcValue::String(v.to_string())
    }
}

impl From<String> for PlcValue {
    fn from(v: String) -> Self {
        PlcValue::String(v)
    }
}

impl From<Vec<u8>> for PlcValue {
    fn from(v: Vec<u8>) -> Self {
        PlcValue::Bytes(v)
    }
}
