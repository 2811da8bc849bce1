// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # s7cfg-bin
//!
//! Command-line tool for S7 connector configuration files.
//!
//! - CLI argument parsing with clap
//! - Logging initialization
//! - Command implementations (show, sync, save, addresses, simulate, version)
//!
//! ## Usage
//!
//! ```bash
//! # Show the normalized configuration (default command)
//! s7cfg -c /config/mqtt-s7.yaml
//!
//! # Repair the legacy devices list in place
//! s7cfg sync /config/mqtt-s7.yaml
//!
//! # List every PLC address as JSON
//! s7cfg addresses -f json
//!
//! # Three simulated scans
//! s7cfg simulate -n 3
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Modules
// =============================================================================

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;

// =============================================================================
// Re-exports
// =============================================================================

pub use cli::{Cli, Commands};
pub use error::{BinError, BinResult};
pub use logging::init_logging;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name() {
        assert_eq!(NAME, "s7cfg-bin");
    }
}
