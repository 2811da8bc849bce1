// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Controller transport abstraction.
//!
//! The probe engine does not speak any PLC protocol itself. It drives an
//! opaque capability with a fixed lifecycle:
//!
//! 1. `connect` with a [`ConnectionDescriptor`]
//! 2. `set_tag_resolver` so the transport can map logical tags to addresses
//! 3. `add_tags` with every logical tag of the scan
//! 4. `read_all` once
//! 5. `disconnect`, on every path
//!
//! Any type implementing [`PlcTransport`] is substitutable; a
//! [`TransportFactory`] hands out a fresh transport per scan.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::descriptor::ConnectionDescriptor;
use crate::error::TransportResult;
use crate::types::PlcValue;

/// Maps a logical tag name to the controller address it stands for.
pub type TagResolver = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

// =============================================================================
// ReadOutcome
// =============================================================================

/// Result of a bulk read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadOutcome {
    /// `true` if the transport reported a failure for any tag.
    pub any_failed: bool,
    /// Values keyed by logical tag. Tags that could not be read are absent.
    pub values: HashMap<String, PlcValue>,
}

impl ReadOutcome {
    /// Creates an outcome from the given values.
    pub fn new(values: HashMap<String, PlcValue>) -> Self {
        Self {
            any_failed: false,
            values,
        }
    }

    /// Marks the outcome as partially failed.
    pub fn with_failures(mut self, any_failed: bool) -> Self {
        self.any_failed = any_failed;
        self
    }

    /// Returns the value read for `tag`.
    pub fn get(&self, tag: &str) -> Option<&PlcValue> {
        self.values.get(tag)
    }
}

// =============================================================================
// PlcTransport
// =============================================================================

/// A connection to a controller.
///
/// Implementations must tolerate `disconnect` being called after a failed
/// or abandoned `connect`.
#[async_trait]
pub trait PlcTransport: Send {
    /// Returns a human-readable name for logging.
    fn name(&self) -> &str;

    /// Opens the connection.
    async fn connect(&mut self, descriptor: &ConnectionDescriptor) -> TransportResult<()>;

    /// Installs the tag-to-address lookup.
    fn set_tag_resolver(&mut self, resolver: TagResolver);

    /// Registers logical tags for the next [`read_all`](Self::read_all).
    fn add_tags(&mut self, tags: &[String]);

    /// Reads every registered tag in one request.
    async fn read_all(&mut self) -> ReadOutcome;

    /// Releases the connection.
    async fn disconnect(&mut self);
}

/// Creates transports, one per scan.
pub trait TransportFactory: Send + Sync {
    /// Returns the factory name for logging.
    fn name(&self) -> &str;

    /// Creates a new, unconnected transport.
    fn create(&self) -> Box<dyn PlcTransport>;
}
