// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Probe result model.
//!
//! A [`ProbeResult`] is produced once per scan and never stored. Every
//! address of the scan appears in it exactly once, in scan order, with a
//! [`ScanStatus`] and a rendered value.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use s7cfg_core::{AddressRecord, AddressRole, ConnectionDescriptor};

// =============================================================================
// Messages
// =============================================================================

pub(crate) const MSG_PENDING: &str = "Query in progress...";
pub(crate) const MSG_NO_CONNECTION: &str = "No PLC connection configuration found.";
pub(crate) const MSG_ADDRESS_NO_CONNECTION: &str = "No PLC connection configured.";
pub(crate) const MSG_NO_ADDRESSES: &str = "No PLC addresses found in the configuration.";
pub(crate) const MSG_TIMEOUT: &str = "PLC query timed out.";
pub(crate) const MSG_CONNECT_FAILED: &str = "Connection to the PLC failed.";
pub(crate) const MSG_ADDRESS_CONNECT_FAILED: &str = "Connection error.";
pub(crate) const MSG_NO_TRANSPORT: &str = "No PLC transport available.";
pub(crate) const MSG_UNREADABLE: &str = "Address could not be read.";
pub(crate) const MSG_PARTIAL: &str = "Read errors on individual addresses.";
pub(crate) const MSG_OK: &str = "OK";
pub(crate) const MSG_READ_PARTIAL: &str = "PLC data read, some addresses reported errors.";
pub(crate) const MSG_READ_OK: &str = "PLC data read successfully.";
pub(crate) const MSG_SIMULATED: &str = "Simulated value";
pub(crate) const MSG_TEST_NO_ADDRESSES: &str = "Test mode active: no PLC addresses configured.";
pub(crate) const MSG_TEST_ACTIVE: &str = "Test mode active: values are simulated.";

// =============================================================================
// ScanStatus
// =============================================================================

/// Outcome for a single address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    /// Not finished yet.
    Pending,
    /// Read successfully.
    Ok,
    /// Read, but the session reported failures for other addresses.
    Warning,
    /// Not read.
    Error,
    /// Not attempted.
    Skipped,
}

impl ScanStatus {
    /// Returns the status name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanStatus::Pending => "pending",
            ScanStatus::Ok => "ok",
            ScanStatus::Warning => "warning",
            ScanStatus::Error => "error",
            ScanStatus::Skipped => "skipped",
        }
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// AddressStatus
// =============================================================================

/// Scan outcome of one address record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressStatus {
    /// Display name of the owning entity.
    pub entity: String,
    /// Attribute key on the entity.
    pub attribute: String,
    /// Read or write role.
    pub role: AddressRole,
    /// Address string.
    pub address: String,
    /// Outcome.
    pub status: ScanStatus,
    /// Human-readable detail.
    pub message: String,
    /// Rendered value, empty if none was read.
    pub value: String,
}

impl AddressStatus {
    /// Creates a pending status for a record.
    pub fn pending(record: &AddressRecord) -> Self {
        Self {
            entity: record.entity.clone(),
            attribute: record.attribute.clone(),
            role: record.role,
            address: record.address.clone(),
            status: ScanStatus::Pending,
            message: MSG_PENDING.to_string(),
            value: String::new(),
        }
    }

    /// Sets the outcome and message, clearing the value.
    pub fn finish(mut self, status: ScanStatus, message: impl Into<String>) -> Self {
        self.status = status;
        self.message = message.into();
        self.value.clear();
        self
    }

    /// Sets the rendered value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }
}

// =============================================================================
// ConnectionInfo
// =============================================================================

/// How a scan talked to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// A real transport was used.
    Live,
    /// Values were simulated.
    Test,
}

/// Identity of the simulated controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Profile name.
    pub name: String,
    /// CPU model.
    pub model: String,
    /// Firmware version.
    pub firmware: String,
    /// Serial number.
    pub serial: String,
}

/// Connection metadata reported with a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionInfo {
    /// Connection parameters used.
    #[serde(flatten)]
    pub descriptor: ConnectionDescriptor,

    /// Simulated controller identity, only in test mode.
    #[serde(flatten, default, skip_serializing_if = "Option::is_none")]
    pub device: Option<DeviceInfo>,

    /// Live or simulated.
    pub mode: ScanMode,

    /// `true` for simulated scans.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub simulated: bool,

    /// When the scan finished.
    #[serde(rename = "lastScan")]
    pub last_scan: DateTime<Utc>,
}

impl ConnectionInfo {
    /// Creates live connection info reporting host, port, rack and slot.
    pub fn live(descriptor: &ConnectionDescriptor) -> Self {
        Self {
            descriptor: ConnectionDescriptor::new(descriptor.host.clone())
                .with_port(descriptor.port)
                .with_rack(descriptor.rack)
                .with_slot(descriptor.slot),
            device: None,
            mode: ScanMode::Live,
            simulated: false,
            last_scan: Utc::now(),
        }
    }

    /// Creates simulated connection info.
    pub fn simulated(descriptor: ConnectionDescriptor, device: DeviceInfo) -> Self {
        Self {
            descriptor,
            device: Some(device),
            mode: ScanMode::Test,
            simulated: true,
            last_scan: Utc::now(),
        }
    }
}

// =============================================================================
// ProbeResult
// =============================================================================

/// Per-status tallies of a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanCounts {
    /// Number of addresses.
    pub total: usize,
    /// Addresses read successfully.
    pub ok: usize,
    /// Addresses read with session warnings.
    pub warning: usize,
    /// Addresses that failed.
    pub error: usize,
    /// Addresses not attempted.
    pub skipped: usize,
}

/// Result of one probe.
///
/// # Examples
///
/// ```
/// use s7cfg_core::{AddressRecord, AddressRole};
/// use s7cfg_probe::ProbeResult;
///
/// let records = vec![AddressRecord::new("Light", "state", AddressRole::Plc, "DB3,X0.0")];
/// let result = ProbeResult::no_connection(&records);
///
/// assert!(!result.connected);
/// assert_eq!(result.counts().skipped, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    /// Whether a connection was established.
    pub connected: bool,
    /// Session-level summary.
    pub message: String,
    /// Connection metadata, absent when no descriptor exists.
    pub connection: Option<ConnectionInfo>,
    /// One entry per scanned address, in scan order.
    pub addresses: Vec<AddressStatus>,
}

impl ProbeResult {
    /// Result for a scan without a connection descriptor.
    pub fn no_connection(addresses: &[AddressRecord]) -> Self {
        Self {
            connected: false,
            message: MSG_NO_CONNECTION.to_string(),
            connection: None,
            addresses: addresses
                .iter()
                .map(|record| {
                    AddressStatus::pending(record).finish(ScanStatus::Skipped, MSG_ADDRESS_NO_CONNECTION)
                })
                .collect(),
        }
    }

    /// Result for a scan with a descriptor but nothing to read.
    pub fn no_addresses(descriptor: &ConnectionDescriptor) -> Self {
        Self {
            connected: false,
            message: MSG_NO_ADDRESSES.to_string(),
            connection: Some(ConnectionInfo::live(descriptor)),
            addresses: Vec::new(),
        }
    }

    /// Result where every address failed with the same message.
    pub(crate) fn failed(
        descriptor: &ConnectionDescriptor,
        addresses: &[AddressRecord],
        message: impl Into<String>,
        address_message: &str,
    ) -> Self {
        Self {
            connected: false,
            message: message.into(),
            connection: Some(ConnectionInfo::live(descriptor)),
            addresses: addresses
                .iter()
                .map(|record| AddressStatus::pending(record).finish(ScanStatus::Error, address_message))
                .collect(),
        }
    }

    /// Tallies the per-address statuses.
    pub fn counts(&self) -> ScanCounts {
        self.addresses.iter().fold(
            ScanCounts {
                total: self.addresses.len(),
                ..ScanCounts::default()
            },
            |mut counts, entry| {
                match entry.status {
                    ScanStatus::Ok => counts.ok += 1,
                    ScanStatus::Warning => counts.warning += 1,
                    ScanStatus::Error => counts.error += 1,
                    ScanStatus::Skipped => counts.skipped += 1,
                    ScanStatus::Pending => {}
                }
                counts
            },
        )
    }

    /// Returns `true` if every address was read without problems.
    pub fn is_all_ok(&self) -> bool {
        self.addresses.iter().all(|entry| entry.status == ScanStatus::Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<AddressRecord> {
        vec![
            AddressRecord::new("Light", "state", AddressRole::Plc, "DB3,X0.0"),
            AddressRecord::new("Light", "brightness", AddressRole::SetPlc, "DB3,BYTE1"),
        ]
    }

    #[test]
    fn test_no_connection() {
        let result = ProbeResult::no_connection(&records());
        assert!(!result.connected);
        assert!(result.connection.is_none());
        assert!(result
            .addresses
            .iter()
            .all(|entry| entry.status == ScanStatus::Skipped && entry.value.is_empty()));
    }

    #[test]
    fn test_no_addresses_reports_connection() {
        let result = ProbeResult::no_addresses(&ConnectionDescriptor::new("10.0.0.5"));
        assert!(!result.connected);
        assert!(result.addresses.is_empty());
        assert_eq!(result.connection.unwrap().mode, ScanMode::Live);
    }

    #[test]
    fn test_counts() {
        let mut result = ProbeResult::failed(
            &ConnectionDescriptor::new("plc"),
            &records(),
            MSG_TIMEOUT,
            MSG_TIMEOUT,
        );
        result.addresses[0].status = ScanStatus::Ok;
        result.addresses.push(AddressStatus::pending(&records()[0]));

        assert_eq!(
            result.counts(),
            ScanCounts {
                total: 3,
                ok: 1,
                warning: 0,
                error: 1,
                skipped: 0
            }
        );
        assert!(!result.is_all_ok());
    }

    #[test]
    fn test_serialized_shape() {
        let descriptor = ConnectionDescriptor::new("plc").with_slot(1);
        let result = ProbeResult::failed(&descriptor, &records()[..1], MSG_TIMEOUT, MSG_TIMEOUT);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["connection"]["host"], "plc");
        assert_eq!(json["connection"]["slot"], 1);
        assert_eq!(json["connection"]["mode"], "live");
        assert!(json["connection"]["lastScan"].is_string());
        assert!(json["connection"].get("simulated").is_none());
        assert_eq!(json["addresses"][0]["status"], "error");
        assert_eq!(json["addresses"][0]["role"], "plc");
    }
}
