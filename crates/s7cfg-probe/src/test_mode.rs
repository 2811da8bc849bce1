// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Test-mode context.
//!
//! While test mode is enabled every probe is answered by the simulator
//! instead of a transport. The context is an explicit value handed to the
//! probe engine, so independent contexts can coexist (one per test, one per
//! service instance).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::info;

use s7cfg_core::ConnectionDescriptor;

use crate::result::DeviceInfo;

/// The cycle counter wraps to zero at this value.
pub const CYCLE_MODULUS: u32 = 100_000;

// =============================================================================
// SimulationProfile
// =============================================================================

/// The simulated controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationProfile {
    /// Profile name.
    pub name: String,
    /// Host name.
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Rack number.
    pub rack: u16,
    /// Slot number.
    pub slot: u16,
    /// CPU model.
    pub model: String,
    /// Firmware version.
    pub firmware: String,
    /// Serial number.
    pub serial: String,
}

impl Default for SimulationProfile {
    fn default() -> Self {
        Self {
            name: "S7-1200 Simulation".to_string(),
            host: "test-s71200.local".to_string(),
            port: 102,
            rack: 0,
            slot: 1,
            model: "CPU 1214C DC/DC/DC".to_string(),
            firmware: "V4.5.0".to_string(),
            serial: "SIM1200-0001".to_string(),
        }
    }
}

impl SimulationProfile {
    /// Returns the connection parameters of the simulated controller.
    pub fn descriptor(&self) -> ConnectionDescriptor {
        ConnectionDescriptor::new(self.host.clone())
            .with_port(self.port)
            .with_rack(self.rack)
            .with_slot(self.slot)
    }

    /// Returns the identity of the simulated controller.
    pub fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            name: self.name.clone(),
            model: self.model.clone(),
            firmware: self.firmware.clone(),
            serial: self.serial.clone(),
        }
    }
}

// =============================================================================
// TestModeState
// =============================================================================

/// Snapshot of the test-mode context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestModeState {
    /// Whether probes are simulated.
    pub enabled: bool,
    /// Simulation cycle counter.
    pub cycle: u32,
    /// When test mode was last switched on.
    pub last_activated: Option<DateTime<Utc>>,
    /// The simulated controller.
    pub metadata: SimulationProfile,
}

#[derive(Debug, Default)]
struct Inner {
    enabled: bool,
    cycle: u32,
    last_activated: Option<DateTime<Utc>>,
}

// =============================================================================
// TestModeContext
// =============================================================================

/// Shared, cloneable test-mode switch with its cycle counter.
///
/// # Examples
///
/// ```
/// use s7cfg_probe::TestModeContext;
///
/// let context = TestModeContext::new();
/// assert!(!context.is_enabled());
///
/// let state = context.set_enabled(true);
/// assert!(state.enabled);
/// assert_eq!(state.cycle, 0);
/// assert!(state.last_activated.is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TestModeContext {
    inner: Arc<Mutex<Inner>>,
    profile: Arc<SimulationProfile>,
}

impl TestModeContext {
    /// Creates a disabled context with the default profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a disabled context with a custom profile.
    pub fn with_profile(profile: SimulationProfile) -> Self {
        Self {
            inner: Arc::default(),
            profile: Arc::new(profile),
        }
    }

    /// Returns the simulated controller profile.
    pub fn profile(&self) -> &SimulationProfile {
        &self.profile
    }

    /// Returns `true` if probes are simulated.
    pub fn is_enabled(&self) -> bool {
        self.inner.lock().enabled
    }

    /// Switches test mode on or off and returns the new state.
    ///
    /// Only an actual transition resets the cycle counter; only switching
    /// on stamps `last_activated`.
    pub fn set_enabled(&self, enabled: bool) -> TestModeState {
        {
            let mut inner = self.inner.lock();
            if enabled != inner.enabled {
                inner.cycle = 0;
                if enabled {
                    inner.last_activated = Some(Utc::now());
                }
                inner.enabled = enabled;
                info!(enabled, "Test mode switched");
            }
        }
        self.state()
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> TestModeState {
        let inner = self.inner.lock();
        TestModeState {
            enabled: inner.enabled,
            cycle: inner.cycle,
            last_activated: inner.last_activated,
            metadata: (*self.profile).clone(),
        }
    }

    /// Advances the cycle counter if test mode is enabled.
    ///
    /// Returns the new cycle, or `None` when test mode is off.
    pub fn advance(&self) -> Option<u32> {
        let mut inner = self.inner.lock();
        if !inner.enabled {
            return None;
        }
        inner.cycle = (inner.cycle + 1) % CYCLE_MODULUS;
        Some(inner.cycle)
    }
}
