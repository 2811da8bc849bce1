// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # s7cfg Integration Tests
//!
//! Cross-crate tests for the configuration toolkit, plus the mocks and
//! fixtures they share.
//!
//! ## Module Structure
//!
//! - [`common`]: Shared test utilities
//!   - `fixtures`: Sample configuration documents
//!   - `mocks`: A scriptable [`PlcTransport`](s7cfg_core::PlcTransport)
//!
//! ## Running Tests
//!
//! ```bash
//! # Run all integration tests
//! cargo test -p s7cfg-tests
//!
//! # Run specific test suite
//! cargo test -p s7cfg-tests --test integration_config
//! cargo test -p s7cfg-tests --test integration_sync
//! cargo test -p s7cfg-tests --test integration_probe
//! ```
//!
//! ## Test Categories
//!
//! ### Config Tests (`integration_config.rs`)
//! - Normalization and legacy migration
//! - Connection sanitizing and TSAP handling
//! - Address discovery
//! - Load and save round trips on disk
//!
//! ### Sync Tests (`integration_sync.rs`)
//! - Alias repair for JSON and YAML files
//! - Files that are already in sync stay untouched
//!
//! ### Probe Tests (`integration_probe.rs`)
//! - Live probes against the mock transport
//! - Timeout handling with paused time
//! - Test mode through the service surface

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod common;

/// Re-export commonly used items for convenience.
pub mod prelude {
    pub use crate::common::fixtures::*;
    pub use crate::common::mocks::*;
}
