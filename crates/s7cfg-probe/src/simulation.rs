// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Deterministic value simulation for test mode.
//!
//! Values depend only on the address text and `cycle + index`, so a given
//! scan is reproducible and consecutive scans visibly change.
//!
//! | Address contains            | Value                              |
//! |-----------------------------|------------------------------------|
//! | `REAL`                      | float around 22 +/- 8 (sine)       |
//! | `DINT`                      | `(offset * 97) % 10000`            |
//! | `INT`                       | `(offset * 23) % 2000`             |
//! | `WORD`                      | `(offset * 41) % 65535`            |
//! | `BYTE`                      | `(offset * 13) % 255`              |
//! | `X` or ends in `.<digits>`  | `offset` is even                   |
//! | `CHAR` or `STRING`          | `Demo-1` .. `Demo-10`              |
//! | anything else               | `(offset * 7) % 1000`              |

use s7cfg_core::{AddressRecord, ConnectionDescriptor, PlcValue};

use crate::result::{
    AddressStatus, ConnectionInfo, ProbeResult, ScanStatus, MSG_SIMULATED, MSG_TEST_ACTIVE,
    MSG_TEST_NO_ADDRESSES,
};
use crate::test_mode::SimulationProfile;

/// Derives the simulated value of an address.
///
/// # Examples
///
/// ```
/// use s7cfg_core::PlcValue;
/// use s7cfg_probe::simulation::simulate_value;
///
/// assert_eq!(simulate_value("DB1,INT2", 0, 1), PlcValue::Int(23));
/// assert_eq!(simulate_value("M0.1", 1, 1), PlcValue::Bool(true));
/// assert_eq!(simulate_value("", 0, 1), PlcValue::Null);
/// ```
pub fn simulate_value(address: &str, index: usize, cycle: u32) -> PlcValue {
    if address.is_empty() {
        return PlcValue::Null;
    }
    let normalized = address.trim().to_uppercase();

    let offset = u64::from(cycle) + index as u64;
    let scaled = |factor: u64, modulus: u64| PlcValue::Int(((offset * factor) % modulus) as i64);

    if normalized.contains("REAL") {
        let degrees = (offset % 360) as f64;
        let value = 22.0 + degrees.to_radians().sin() * 8.0;
        return PlcValue::Float((value * 100.0).round() / 100.0);
    }
    if normalized.contains("DINT") {
        return scaled(97, 10_000);
    }
    if normalized.contains("INT") {
        return scaled(23, 2_000);
    }
    if normalized.contains("WORD") {
        return scaled(41, 65_535);
    }
    if normalized.contains("BYTE") {
        return scaled(13, 255);
    }
    if normalized.contains('X') || has_bit_suffix(&normalized) {
        return PlcValue::Bool(offset % 2 == 0);
    }
    if normalized.contains("CHAR") || normalized.contains("STRING") {
        return PlcValue::String(format!("Demo-{}", offset % 10 + 1));
    }
    scaled(7, 1_000)
}

fn has_bit_suffix(address: &str) -> bool {
    address
        .rsplit_once('.')
        .is_some_and(|(_, bit)| !bit.is_empty() && bit.bytes().all(|b| b.is_ascii_digit()))
}

/// Builds a simulated probe result for the given cycle.
///
/// The reported connection is the profile, replaced by `descriptor` when
/// the caller supplied one.
pub fn simulate_probe(
    profile: &SimulationProfile,
    descriptor: Option<&ConnectionDescriptor>,
    addresses: &[AddressRecord],
    cycle: u32,
) -> ProbeResult {
    let connection = ConnectionInfo::simulated(
        descriptor.cloned().unwrap_or_else(|| profile.descriptor()),
        profile.device_info(),
    );

    if addresses.is_empty() {
        return ProbeResult {
            connected: true,
            message: MSG_TEST_NO_ADDRESSES.to_string(),
            connection: Some(connection),
            addresses: Vec::new(),
        };
    }

    let statuses = addresses
        .iter()
        .enumerate()
        .map(|(index, record)| {
            AddressStatus::pending(record)
                .finish(ScanStatus::Ok, MSG_SIMULATED)
                .with_value(simulate_value(&record.address, index, cycle).to_display_string())
        })
        .collect();

    ProbeResult {
        connected: true,
        message: MSG_TEST_ACTIVE.to_string(),
        connection: Some(connection),
        addresses: statuses,
    }
}
