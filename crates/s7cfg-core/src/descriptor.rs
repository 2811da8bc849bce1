// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Sanitized connection parameters for an S7 controller.
//!
//! A [`ConnectionDescriptor`] only exists when the raw `plc` section named a
//! usable host. Its absence is a meaningful state of its own: no connection
//! is attempted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default ISO-on-TCP port.
pub const DEFAULT_PORT: u16 = 102;

/// Default rack number.
pub const DEFAULT_RACK: u16 = 0;

/// Default slot number.
pub const DEFAULT_SLOT: u16 = 2;

// =============================================================================
// Tsap
// =============================================================================

/// A transport service access point identifier.
///
/// Recognised values are kept numerically and rendered as `0xHHHH`
/// (uppercase, at least four hex digits). Anything unrecognised is kept
/// verbatim rather than dropped.
///
/// # Examples
///
/// ```
/// use s7cfg_core::descriptor::Tsap;
///
/// assert_eq!(Tsap::parse_str("4c00").unwrap().to_string(), "0x4C00");
/// assert_eq!(Tsap::parse_str("0x100").unwrap().to_string(), "0x0100");
/// assert_eq!(Tsap::parse_str("19456").unwrap().to_string(), "0x4C00");
/// assert_eq!(Tsap::parse_str("pg").unwrap(), Tsap::Verbatim("pg".to_string()));
/// assert!(Tsap::parse_str("  ").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tsap {
    /// A numeric TSAP.
    Numeric(u32),
    /// An unrecognised value, kept as given.
    Verbatim(String),
}

impl Tsap {
    /// Creates a numeric TSAP.
    #[inline]
    pub fn numeric(value: u32) -> Self {
        Tsap::Numeric(value)
    }

    /// Parses a textual TSAP.
    ///
    /// Accepted in order: `0x` followed by one to four hex digits, one to
    /// four bare hex digits, then any decimal or `0x`-prefixed integer.
    /// Returns `None` for blank input.
    pub fn parse_str(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        let prefixed = strip_hex_prefix(trimmed);
        if let Some(digits) = prefixed {
            if is_short_hex(digits) {
                return u32::from_str_radix(digits, 16).ok().map(Tsap::Numeric);
            }
        }
        if is_short_hex(trimmed) {
            return u32::from_str_radix(trimmed, 16).ok().map(Tsap::Numeric);
        }

        let numeric = match prefixed {
            Some(digits) => u32::from_str_radix(digits, 16).ok(),
            None => trimmed.parse::<u32>().ok(),
        };

        Some(numeric.map(Tsap::Numeric).unwrap_or_else(|| Tsap::Verbatim(trimmed.to_string())))
    }

    /// Returns the numeric value, if this TSAP was recognised.
    pub fn value(&self) -> Option<u32> {
        match self {
            Tsap::Numeric(v) => Some(*v),
            Tsap::Verbatim(_) => None,
        }
    }
}

fn strip_hex_prefix(s: &str) -> Option<&str> {
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))
}

fn is_short_hex(s: &str) -> bool {
    (1..=4).contains(&s.len()) && s.chars().all(|c| c.is_ascii_hexdigit())
}

impl fmt::Display for Tsap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tsap::Numeric(v) => write!(f, "0x{:04X}", v),
            Tsap::Verbatim(s) => f.write_str(s),
        }
    }
}

impl From<String> for Tsap {
    fn from(s: String) -> Self {
        Tsap::parse_str(&s).unwrap_or(Tsap::Verbatim(s))
    }
}

impl From<Tsap> for String {
    fn from(tsap: Tsap) -> Self {
        tsap.to_string()
    }
}

// =============================================================================
// ConnectionDescriptor
// =============================================================================

/// Everything needed to open a connection to a controller.
///
/// # Examples
///
/// ```
/// use s7cfg_core::descriptor::{ConnectionDescriptor, Tsap};
///
/// let descriptor = ConnectionDescriptor::new("10.0.0.5")
///     .with_slot(1)
///     .with_tsaps(Some(Tsap::numeric(0x4C00)), Some(Tsap::numeric(0x1100)));
///
/// let json = serde_json::to_value(&descriptor).unwrap();
/// assert_eq!(json["localTSAP"], "0x4C00");
/// assert_eq!(descriptor.endpoint(), "10.0.0.5:102");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDescriptor {
    /// Controller host name or IP address.
    pub host: String,

    /// TCP port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Rack number.
    #[serde(default)]
    pub rack: u16,

    /// Slot number.
    #[serde(default = "default_slot")]
    pub slot: u16,

    /// Local TSAP.
    #[serde(rename = "localTSAP", default, skip_serializing_if = "Option::is_none")]
    pub local_tsap: Option<Tsap>,

    /// Remote TSAP.
    #[serde(rename = "remoteTSAP", default, skip_serializing_if = "Option::is_none")]
    pub remote_tsap: Option<Tsap>,

    /// Transport debug output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,

    /// Transport-level timeout in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Disables read request optimisation in the transport.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub do_not_optimize: Option<bool>,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_slot() -> u16 {
    DEFAULT_SLOT
}

impl ConnectionDescriptor {
    /// Creates a descriptor with default port, rack and slot.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            rack: DEFAULT_RACK,
            slot: DEFAULT_SLOT,
            local_tsap: None,
            remote_tsap: None,
            debug: None,
            timeout: None,
            do_not_optimize: None,
        }
    }

    /// Sets the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the rack.
    pub fn with_rack(mut self, rack: u16) -> Self {
        self.rack = rack;
        self
    }

    /// Sets the slot.
    pub fn with_slot(mut self, slot: u16) -> Self {
        self.slot = slot;
        self
    }

    /// Sets both TSAPs.
    pub fn with_tsaps(mut self, local: Option<Tsap>, remote: Option<Tsap>) -> Self {
        self.local_tsap = local;
        self.remote_tsap = remote;
        self
    }

    /// Returns `host:port`.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
