// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # s7cfg-probe
//!
//! Bounded probing of configured PLC addresses.
//!
//! ## Overview
//!
//! - [`ProbeEngine`] reads every address once over a
//!   [`PlcTransport`](s7cfg_core::PlcTransport), racing a hard timeout
//! - [`TestModeContext`] switches probes to a deterministic simulator
//! - [`ConnectorService`] offers the caller-facing operations
//!
//! A probe never fails: connection problems, timeouts and unreadable
//! addresses are reported per address inside the [`ProbeResult`].
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//! use s7cfg_probe::{ConnectorService, ScanStatus};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let service = ConnectorService::default();
//! let result = service
//!     .scan_document(&json!({"entities": [{"name": "Pump", "state": "DB1,X0.0"}]}))
//!     .await;
//!
//! assert!(!result.connected);
//! assert_eq!(result.addresses[0].status, ScanStatus::Skipped);
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Modules
// =============================================================================

pub mod engine;
pub mod result;
pub mod service;
pub mod simulation;
pub mod test_mode;

// =============================================================================
// Re-exports
// =============================================================================

pub use engine::{tag_name, ProbeConfig, ProbeEngine, DEFAULT_PROBE_TIMEOUT};
pub use result::{
    AddressStatus, ConnectionInfo, DeviceInfo, ProbeResult, ScanCounts, ScanMode, ScanStatus,
};
pub use service::ConnectorService;
pub use simulation::{simulate_probe, simulate_value};
pub use test_mode::{SimulationProfile, TestModeContext, TestModeState, CYCLE_MODULUS};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// =============================================================================
// Prelude
// =============================================================================

/// Convenience re-exports for common use cases.
pub mod prelude {
    pub use crate::engine::{ProbeConfig, ProbeEngine};
    pub use crate::result::{ProbeResult, ScanCounts, ScanStatus};
    pub use crate::service::ConnectorService;
    pub use crate::test_mode::{TestModeContext, TestModeState};
}
