// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # s7cfg-core
//!
//! Shared types for the S7 connector configuration toolkit.
//!
//! This crate holds the pieces every other crate agrees on:
//!
//! - **Types**: [`PlcValue`], [`AddressRecord`], [`AddressRole`]
//! - **Descriptor**: the sanitized [`ConnectionDescriptor`] and its [`Tsap`] fields
//! - **Transport**: the [`PlcTransport`] capability consumed by the probe engine
//! - **Error**: [`TransportError`]
//!
//! ## Example
//!
//! ```
//! use s7cfg_core::{AddressRecord, AddressRole, ConnectionDescriptor, PlcValue};
//!
//! let record = AddressRecord::new("Light", "state", AddressRole::Plc, "DB3,X0.0");
//! assert_eq!(record.role.as_str(), "plc");
//!
//! let descriptor = ConnectionDescriptor::new("10.0.0.5");
//! assert_eq!(descriptor.port, 102);
//!
//! assert_eq!(PlcValue::Bytes(vec![0xde, 0xad]).to_display_string(), "dead");
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Modules
// =============================================================================

pub mod descriptor;
pub mod error;
pub mod transport;
pub mod types;

// =============================================================================
// Re-exports
// =============================================================================

pub use descriptor::{ConnectionDescriptor, Tsap, DEFAULT_PORT, DEFAULT_RACK, DEFAULT_SLOT};
pub use error::{TransportError, TransportResult};
pub use transport::{PlcTransport, ReadOutcome, TagResolver, TransportFactory};
pub use types::{AddressRecord, AddressRole, PlcValue};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// =============================================================================
// Prelude
// =============================================================================

/// Convenience re-exports for common use cases.
pub mod prelude {
    pub use crate::descriptor::{ConnectionDescriptor, Tsap};
    pub use crate::error::{TransportError, TransportResult};
    pub use crate::transport::{PlcTransport, ReadOutcome, TransportFactory};
    pub use crate::types::{AddressRecord, AddressRole, PlcValue};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "s7cfg-core");
    }
}
