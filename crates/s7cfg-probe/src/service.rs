// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Caller-facing operations.
//!
//! [`ConnectorService`] bundles a [`ProbeEngine`] with its
//! [`TestModeContext`] and exposes the operations an outer shell (an HTTP
//! router, the CLI) needs. It never fails on document shape; only storage
//! problems surface as [`ConfigError`](s7cfg_config::ConfigError).

use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use s7cfg_config::{
    collect_addresses, normalize, prepare_for_save, read_document, sanitize_connection, ConfigResult,
    Mapping, NormalizedConfig,
};
use s7cfg_core::{AddressRecord, ConnectionDescriptor};

use crate::engine::ProbeEngine;
use crate::result::ProbeResult;
use crate::test_mode::{TestModeContext, TestModeState};

/// The operations offered to an outer service shell.
#[derive(Debug, Clone)]
pub struct ConnectorService {
    engine: ProbeEngine,
    test_mode: TestModeContext,
}

impl ConnectorService {
    /// Creates a service with a fresh, disabled test-mode context.
    pub fn new(engine: ProbeEngine) -> Self {
        Self::with_test_mode(engine, TestModeContext::new())
    }

    /// Creates a service sharing an existing test-mode context.
    pub fn with_test_mode(engine: ProbeEngine, test_mode: TestModeContext) -> Self {
        Self { engine, test_mode }
    }

    /// Returns the probe engine.
    pub fn engine(&self) -> &ProbeEngine {
        &self.engine
    }

    /// Returns the test-mode context.
    pub fn test_mode(&self) -> &TestModeContext {
        &self.test_mode
    }

    /// Normalizes a raw document.
    pub fn get_config(&self, raw: &Value) -> NormalizedConfig {
        normalize(raw)
    }

    /// Returns the persistence form of a document.
    pub fn save_config(&self, document: &Value) -> Mapping {
        prepare_for_save(document)
    }

    /// Probes the given addresses.
    pub async fn scan(
        &self,
        descriptor: Option<&ConnectionDescriptor>,
        addresses: &[AddressRecord],
    ) -> ProbeResult {
        self.engine.probe(&self.test_mode, descriptor, addresses).await
    }

    /// Probes every address of a raw document over its `plc` connection.
    pub async fn scan_document(&self, document: &Value) -> ProbeResult {
        let descriptor = document.get("plc").and_then(sanitize_connection);
        let addresses = collect_addresses(document);
        debug!(
            has_connection = descriptor.is_some(),
            addresses = addresses.len(),
            "Scanning document"
        );
        self.scan(descriptor.as_ref(), &addresses).await
    }

    /// Loads a stored document and scans it.
    ///
    /// Blank content scans as an empty document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::FileNotFound` for a missing file and
    /// `ConfigError::InvalidDocument` for unparseable content.
    pub async fn scan_file(&self, path: impl AsRef<Path>) -> ConfigResult<ProbeResult> {
        let document = read_document(path)?.unwrap_or_else(|| Value::Object(Map::new()));
        Ok(self.scan_document(&document).await)
    }

    /// Switches test mode on or off.
    pub fn set_test_mode(&self, enabled: bool) -> TestModeState {
        self.test_mode.set_enabled(enabled)
    }

    /// Returns the test-mode state.
    pub fn get_test_mode(&self) -> TestModeState {
        self.test_mode.state()
    }
}

impl Default for ConnectorService {
    fn default() -> Self {
        Self::new(ProbeEngine::offline())
    }
}
