// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Mock Implementations
//!
//! [`MockTransportFactory`] hands out [`MockTransport`]s that share one
//! [`MockPlc`]. The PLC holds the address values, the failure switches and
//! the call counters, so a test can script the controller before the scan
//! and inspect it afterwards.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use s7cfg_core::{
    ConnectionDescriptor, PlcTransport, PlcValue, ReadOutcome, TagResolver, TransportError,
    TransportFactory, TransportResult,
};

// =============================================================================
// MockPlc
// =============================================================================

/// Shared state of a simulated controller.
#[derive(Debug, Default)]
pub struct MockPlc {
    /// Values keyed by address.
    values: Mutex<HashMap<String, PlcValue>>,

    /// Delay before `connect` returns.
    connect_latency: Mutex<Duration>,

    /// Delay before `read_all` returns.
    read_latency: Mutex<Duration>,

    /// Force connection to fail.
    fail_connection: AtomicBool,

    /// Report a partial failure even when every address resolved.
    report_failures: AtomicBool,

    /// Endpoints passed to `connect`.
    endpoints: Mutex<Vec<String>>,

    /// Tags registered by the last scan.
    tags: Mutex<Vec<String>>,

    connect_count: AtomicU64,
    read_count: AtomicU64,
    disconnect_count: AtomicU64,
}

impl MockPlc {
    /// Create a controller without any values.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Set a value for an address.
    pub fn set_value(&self, address: impl Into<String>, value: PlcValue) {
        self.values.lock().insert(address.into(), value);
    }

    /// Set multiple values at once.
    pub fn set_values<I, S>(&self, values: I)
    where
        I: IntoIterator<Item = (S, PlcValue)>,
        S: Into<String>,
    {
        let mut store = self.values.lock();
        for (address, value) in values {
            store.insert(address.into(), value);
        }
    }

    /// Set the connect latency.
    pub fn set_connect_latency(&self, latency: Duration) {
        *self.connect_latency.lock() = latency;
    }

    /// Set the read latency.
    pub fn set_read_latency(&self, latency: Duration) {
        *self.read_latency.lock() = latency;
    }

    /// Make every connection attempt fail.
    pub fn set_fail_connection(&self, fail: bool) {
        self.fail_connection.store(fail, Ordering::SeqCst);
    }

    /// Flag every read as partially failed.
    pub fn set_report_failures(&self, report: bool) {
        self.report_failures.store(report, Ordering::SeqCst);
    }

    /// Number of `connect` calls.
    pub fn connect_count(&self) -> u64 {
        self.connect_count.load(Ordering::SeqCst)
    }

    /// Number of `read_all` calls.
    pub fn read_count(&self) -> u64 {
        self.read_count.load(Ordering::SeqCst)
    }

    /// Number of `disconnect` calls.
    pub fn disconnect_count(&self) -> u64 {
        self.disconnect_count.load(Ordering::SeqCst)
    }

    /// Endpoints the transports connected to.
    pub fn endpoints(&self) -> Vec<String> {
        self.endpoints.lock().clone()
    }

    /// Tags registered by the most recent scan.
    pub fn tags(&self) -> Vec<String> {
        self.tags.lock().clone()
    }
}

// =============================================================================
// MockTransport
// =============================================================================

/// A [`PlcTransport`] backed by a [`MockPlc`].
pub struct MockTransport {
    plc: Arc<MockPlc>,
    resolver: Option<TagResolver>,
    tags: Vec<String>,
}

impl MockTransport {
    /// Create a transport talking to `plc`.
    pub fn new(plc: Arc<MockPlc>) -> Self {
        Self {
            plc,
            resolver: None,
            tags: Vec::new(),
        }
    }
}

#[async_trait]
impl PlcTransport for MockTransport {
    fn name(&self) -> &str {
        "mock"
    }

    async fn connect(&mut self, descriptor: &ConnectionDescriptor) -> TransportResult<()> {
        self.plc.connect_count.fetch_add(1, Ordering::SeqCst);
        self.plc.endpoints.lock().push(descriptor.endpoint());

        let latency = *self.plc.connect_latency.lock();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        if self.plc.fail_connection.load(Ordering::SeqCst) {
            return Err(TransportError::connection_failed("ECONNREFUSED"));
        }
        Ok(())
    }

    fn set_tag_resolver(&mut self, resolver: TagResolver) {
        self.resolver = Some(resolver);
    }

    fn add_tags(&mut self, tags: &[String]) {
        self.tags.extend_from_slice(tags);
        *self.plc.tags.lock() = self.tags.clone();
    }

    async fn read_all(&mut self) -> ReadOutcome {
        self.plc.read_count.fetch_add(1, Ordering::SeqCst);

        let latency = *self.plc.read_latency.lock();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        let store = self.plc.values.lock();
        let mut values = HashMap::new();
        let mut any_failed = self.plc.report_failures.load(Ordering::SeqCst);

        for tag in &self.tags {
            let value = self
                .resolver
                .as_ref()
                .and_then(|resolve| resolve(tag))
                .and_then(|address| store.get(&address).cloned());
            match value {
                Some(value) => {
                    values.insert(tag.clone(), value);
                }
                None => any_failed = true,
            }
        }

        ReadOutcome::new(values).with_failures(any_failed)
    }

    async fn disconnect(&mut self) {
        self.plc.disconnect_count.fetch_add(1, Ordering::SeqCst);
    }
}

// =============================================================================
// MockTransportFactory
// =============================================================================

/// Creates [`MockTransport`]s for one shared [`MockPlc`].
#[derive(Debug, Clone)]
pub struct MockTransportFactory {
    plc: Arc<MockPlc>,
}

impl MockTransportFactory {
    /// Create a factory for `plc`.
    pub fn new(plc: Arc<MockPlc>) -> Self {
        Self { plc }
    }

    /// Returns the shared controller.
    pub fn plc(&self) -> &Arc<MockPlc> {
        &self.plc
    }
}

impl TransportFactory for MockTransportFactory {
    fn name(&self) -> &str {
        "mock"
    }

    fn create(&self) -> Box<dyn PlcTransport> {
        Box::new(MockTransport::new(self.plc.clone()))
    }
}
