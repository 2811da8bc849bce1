// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # s7cfg-config
//!
//! Configuration documents for the S7 connector.
//!
//! ## Features
//!
//! - **Normalization**: legacy `devices` and current `entities` documents
//!   map to one canonical [`NormalizedConfig`]
//! - **Persistence shape**: [`prepare_for_save`] keeps `devices` as a
//!   stripped mirror of `entities`
//! - **Address discovery**: [`collect_addresses`] finds every PLC address
//! - **Connection sanitizing**: [`sanitize_connection`] builds a
//!   [`ConnectionDescriptor`](s7cfg_core::ConnectionDescriptor)
//! - **Alias sync**: [`sync_file`] repairs stored documents in place
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//! use s7cfg_config::{collect_addresses, normalize, sanitize_connection};
//!
//! let doc = json!({
//!     "plc": {"host": "192.168.0.50", "tsap_id": "0x4C00,0x1100"},
//!     "devices": [{"name": "Pump", "state": "DB1,X0.0"}]
//! });
//!
//! let descriptor = sanitize_connection(&doc["plc"]).unwrap();
//! assert_eq!(descriptor.remote_tsap.unwrap().to_string(), "0x1100");
//!
//! assert_eq!(normalize(&doc).entities.len(), 1);
//! assert_eq!(collect_addresses(&doc)[0].address, "DB1,X0.0");
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Modules
// =============================================================================

pub mod address;
pub mod alias;
pub mod connection;
pub mod document;
pub mod error;
pub mod format;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use address::{collect_addresses, collect_entity_addresses, is_plc_address, looks_like_address, AttributeValue};
pub use alias::{sync_file, synchronize, SyncOutcome};
pub use connection::{normalize_tsap, sanitize_connection};
pub use document::{
    normalize, prepare_for_save, sanitize_legacy_entry, standard_document, Entity, Mapping,
    NormalizedConfig,
};
pub use error::{ConfigError, ConfigResult};
pub use format::ConfigFormat;
pub use store::{load_document, read_document, save_document};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// =============================================================================
// Prelude
// =============================================================================

/// Convenience re-exports for common use cases.
pub mod prelude {
    pub use crate::address::{collect_addresses, is_plc_address, AttributeValue};
    pub use crate::alias::{sync_file, synchronize, SyncOutcome};
    pub use crate::connection::sanitize_connection;
    pub use crate::document::{normalize, prepare_for_save, Entity, NormalizedConfig};
    pub use crate::error::{ConfigError, ConfigResult};
    pub use crate::store::{load_document, save_document};
}
