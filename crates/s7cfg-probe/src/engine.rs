// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The probe engine.
//!
//! One call to [`ProbeEngine::probe`] takes exactly one of these paths:
//!
//! ```text
//!   test mode on ──────────────▶ simulated result (connected)
//!   no descriptor ─────────────▶ every address skipped
//!   no addresses ──────────────▶ nothing to read
//!   live ─┬─ session wins ─┬───▶ connect failed: every address error
//!         │                └───▶ read: ok / warning / error per address
//!         └─ timer wins ───────▶ every address error (timeout),
//!                                connected if connect had finished
//! ```
//!
//! On the live path the session (connect, register tags, bulk read) races a
//! timer in `tokio::select!`. The loser is dropped and never polled again.
//! The transport is disconnected before the result is returned on every
//! live outcome.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use s7cfg_core::{
    AddressRecord, ConnectionDescriptor, PlcTransport, ReadOutcome, TagResolver, TransportError,
    TransportFactory,
};

use crate::result::{
    AddressStatus, ConnectionInfo, ProbeResult, ScanStatus, MSG_ADDRESS_CONNECT_FAILED,
    MSG_CONNECT_FAILED, MSG_NO_TRANSPORT, MSG_OK, MSG_PARTIAL, MSG_READ_OK, MSG_READ_PARTIAL,
    MSG_TIMEOUT, MSG_UNREADABLE,
};
use crate::simulation::simulate_probe;
use crate::test_mode::TestModeContext;

/// Default bound on a live scan.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

// =============================================================================
// ProbeConfig
// =============================================================================

/// Probe engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Upper bound on connect plus read.
    #[serde(default = "default_timeout", with = "duration_millis")]
    pub timeout: Duration,
}

fn default_timeout() -> Duration {
    DEFAULT_PROBE_TIMEOUT
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

impl ProbeConfig {
    /// Sets the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

// =============================================================================
// ProbeEngine
// =============================================================================

enum SessionOutcome {
    ConnectFailed(TransportError),
    Read(ReadOutcome),
    TimedOut,
}

/// Runs probes against a transport or the simulator.
///
/// # Examples
///
/// ```
/// use s7cfg_core::{AddressRecord, AddressRole};
/// use s7cfg_probe::{ProbeEngine, TestModeContext};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let engine = ProbeEngine::offline();
/// let context = TestModeContext::new();
/// context.set_enabled(true);
///
/// let records = vec![AddressRecord::new("Pump", "state", AddressRole::Plc, "DB1,X0.0")];
/// let result = engine.probe(&context, None, &records).await;
/// assert!(result.connected);
/// assert_eq!(result.addresses[0].value, "false");
/// # }
/// ```
#[derive(Clone)]
pub struct ProbeEngine {
    factory: Option<Arc<dyn TransportFactory>>,
    config: ProbeConfig,
}

impl std::fmt::Debug for ProbeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProbeEngine")
            .field("factory", &self.factory.as_ref().map(|factory| factory.name()))
            .field("config", &self.config)
            .finish()
    }
}

impl ProbeEngine {
    /// Creates an engine using the given transport factory.
    pub fn new(factory: Arc<dyn TransportFactory>) -> Self {
        Self::with_config(factory, ProbeConfig::default())
    }

    /// Creates an engine with custom settings.
    pub fn with_config(factory: Arc<dyn TransportFactory>, config: ProbeConfig) -> Self {
        Self {
            factory: Some(factory),
            config,
        }
    }

    /// Creates an engine without a transport.
    ///
    /// Live probes fail with a connection error; test mode works normally.
    pub fn offline() -> Self {
        Self {
            factory: None,
            config: ProbeConfig::default(),
        }
    }

    /// Returns the engine settings.
    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Probes `addresses` and always resolves with a result.
    pub async fn probe(
        &self,
        context: &TestModeContext,
        descriptor: Option<&ConnectionDescriptor>,
        addresses: &[AddressRecord],
    ) -> ProbeResult {
        if let Some(cycle) = context.advance() {
            debug!(cycle, addresses = addresses.len(), "Simulating probe");
            return simulate_probe(context.profile(), descriptor, addresses, cycle);
        }

        let Some(descriptor) = descriptor else {
            debug!(addresses = addresses.len(), "No connection descriptor, skipping probe");
            return ProbeResult::no_connection(addresses);
        };

        if addresses.is_empty() {
            debug!(endpoint = %descriptor.endpoint(), "No addresses to probe");
            return ProbeResult::no_addresses(descriptor);
        }

        let Some(factory) = &self.factory else {
            warn!(endpoint = %descriptor.endpoint(), "No transport available for live probe");
            return ProbeResult::failed(descriptor, addresses, MSG_NO_TRANSPORT, MSG_ADDRESS_CONNECT_FAILED);
        };

        self.probe_live(factory.create(), descriptor, addresses).await
    }

    async fn probe_live(
        &self,
        mut transport: Box<dyn PlcTransport>,
        descriptor: &ConnectionDescriptor,
        addresses: &[AddressRecord],
    ) -> ProbeResult {
        let tags: Vec<String> = (0..addresses.len()).map(tag_name).collect();
        transport.set_tag_resolver(tag_resolver(&tags, addresses));

        debug!(
            transport = transport.name(),
            endpoint = %descriptor.endpoint(),
            tags = tags.len(),
            "Starting live probe"
        );

        let mut connected = false;
        let outcome = {
            let session = run_session(transport.as_mut(), descriptor, &tags, &mut connected);
            tokio::select! {
                outcome = session => outcome,
                _ = tokio::time::sleep(self.config.timeout) => SessionOutcome::TimedOut,
            }
        };

        transport.disconnect().await;

        match outcome {
            SessionOutcome::TimedOut => {
                warn!(
                    endpoint = %descriptor.endpoint(),
                    timeout = ?self.config.timeout,
                    connected,
                    "Live probe timed out"
                );
                let mut result = ProbeResult::failed(descriptor, addresses, MSG_TIMEOUT, MSG_TIMEOUT);
                result.connected = connected;
                result
            }
            SessionOutcome::ConnectFailed(error) => {
                warn!(
                    endpoint = %descriptor.endpoint(),
                    error = %error,
                    error_type = error.error_type(),
                    "PLC connection failed"
                );
                let detail = error.detail();
                let message = if detail.is_empty() { MSG_CONNECT_FAILED.to_string() } else { detail };
                ProbeResult::failed(descriptor, addresses, message, MSG_ADDRESS_CONNECT_FAILED)
            }
            SessionOutcome::Read(read) => read_result(descriptor, addresses, &tags, read),
        }
    }
}

/// Returns the logical tag of the address at `index`.
pub fn tag_name(index: usize) -> String {
    format!("TAG_{}", index)
}

fn tag_resolver(tags: &[String], addresses: &[AddressRecord]) -> TagResolver {
    let map: HashMap<String, String> = tags
        .iter()
        .cloned()
        .zip(addresses.iter().map(|record| record.address.clone()))
        .collect();
    Arc::new(move |tag: &str| map.get(tag).cloned())
}

async fn run_session(
    transport: &mut dyn PlcTransport,
    descriptor: &ConnectionDescriptor,
    tags: &[String],
    connected: &mut bool,
) -> SessionOutcome {
    if let Err(error) = transport.connect(descriptor).await {
        return SessionOutcome::ConnectFailed(error);
    }
    *connected = true;
    transport.add_tags(tags);
    SessionOutcome::Read(transport.read_all().await)
}

fn read_result(
    descriptor: &ConnectionDescriptor,
    addresses: &[AddressRecord],
    tags: &[String],
    read: ReadOutcome,
) -> ProbeResult {
    let statuses: Vec<AddressStatus> = addresses
        .iter()
        .zip(tags)
        .map(|(record, tag)| {
            let pending = AddressStatus::pending(record);
            match read.get(tag) {
                None => pending.finish(ScanStatus::Error, MSG_UNREADABLE),
                Some(value) if read.any_failed => pending
                    .finish(ScanStatus::Warning, MSG_PARTIAL)
                    .with_value(value.to_display_string()),
                Some(value) => pending
                    .finish(ScanStatus::Ok, MSG_OK)
                    .with_value(value.to_display_string()),
            }
        })
        .collect();

    let message = if read.any_failed { MSG_READ_PARTIAL } else { MSG_READ_OK };

    let result = ProbeResult {
        connected: true,
        message: message.to_string(),
        connection: Some(ConnectionInfo::live(descriptor)),
        addresses: statuses,
    };

    let counts = result.counts();
    info!(
        endpoint = %descriptor.endpoint(),
        ok = counts.ok,
        warning = counts.warning,
        error = counts.error,
        "Live probe finished"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use s7cfg_core::{AddressRole, PlcValue, TransportResult};

    #[derive(Default)]
    struct Recorded {
        tags: Vec<String>,
        resolved: Vec<Option<String>>,
        disconnects: usize,
    }

    struct ScriptedTransport {
        fail_connect: bool,
        delay: Duration,
        read_delay: Duration,
        missing: Option<String>,
        resolver: Option<TagResolver>,
        recorded: Arc<Mutex<Recorded>>,
    }

    #[async_trait]
    impl PlcTransport for ScriptedTransport {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn connect(&mut self, _descriptor: &ConnectionDescriptor) -> TransportResult<()> {
            tokio::time::sleep(self.delay).await;
            if self.fail_connect {
                Err(TransportError::connection_failed("ECONNREFUSED"))
            } else {
                Ok(())
            }
        }

        fn set_tag_resolver(&mut self, resolver: TagResolver) {
            self.resolver = Some(resolver);
        }

        fn add_tags(&mut self, tags: &[String]) {
            self.recorded.lock().tags.extend_from_slice(tags);
        }

        async fn read_all(&mut self) -> ReadOutcome {
            tokio::time::sleep(self.read_delay).await;
            let resolver = self.resolver.clone();
            let mut recorded = self.recorded.lock();
            let mut values = HashMap::new();
            for tag in recorded.tags.clone() {
                recorded.resolved.push(resolver.as_ref().and_then(|r| r(tag.as_str())));
                if self.missing.as_deref() != Some(tag.as_str()) {
                    values.insert(tag, PlcValue::Int(7));
                }
            }
            ReadOutcome::new(values).with_failures(self.missing.is_some())
        }

        async fn disconnect(&mut self) {
            self.recorded.lock().disconnects += 1;
        }
    }

    struct ScriptedFactory {
        fail_connect: bool,
        delay: Duration,
        read_delay: Duration,
        missing: Option<String>,
        recorded: Arc<Mutex<Recorded>>,
    }

    impl ScriptedFactory {
        fn new() -> Self {
            Self {
                fail_connect: false,
                delay: Duration::ZERO,
                read_delay: Duration::ZERO,
                missing: None,
                recorded: Arc::default(),
            }
        }
    }

    impl TransportFactory for ScriptedFactory {
        fn name(&self) -> &str {
            "scripted"
        }

        fn create(&self) -> Box<dyn PlcTransport> {
            Box::new(ScriptedTransport {
                fail_connect: self.fail_connect,
                delay: self.delay,
                read_delay: self.read_delay,
                missing: self.missing.clone(),
                resolver: None,
                recorded: self.recorded.clone(),
            })
        }
    }

    fn records() -> Vec<AddressRecord> {
        vec![
            AddressRecord::new("Light", "state", AddressRole::Plc, "DB3,X0.0"),
            AddressRecord::new("Light", "brightness", AddressRole::SetPlc, "DB3,BYTE1"),
        ]
    }

    #[tokio::test]
    async fn test_live_read_ok() {
        let factory = ScriptedFactory::new();
        let recorded = factory.recorded.clone();
        let engine = ProbeEngine::new(Arc::new(factory));

        let descriptor = ConnectionDescriptor::new("10.0.0.5");
        let result = engine.probe(&TestModeContext::new(), Some(&descriptor), &records()).await;

        assert!(result.connected);
        assert_eq!(result.message, MSG_READ_OK);
        assert!(result.is_all_ok());
        assert_eq!(result.addresses[1].value, "7");

        let recorded = recorded.lock();
        assert_eq!(recorded.tags, vec!["TAG_0", "TAG_1"]);
        assert_eq!(
            recorded.resolved,
            vec![Some("DB3,X0.0".to_string()), Some("DB3,BYTE1".to_string())]
        );
        assert_eq!(recorded.disconnects, 1);
    }

    #[tokio::test]
    async fn test_live_partial_read() {
        let mut factory = ScriptedFactory::new();
        factory.missing = Some("TAG_1".to_string());
        let engine = ProbeEngine::new(Arc::new(factory));

        let descriptor = ConnectionDescriptor::new("10.0.0.5");
        let result = engine.probe(&TestModeContext::new(), Some(&descriptor), &records()).await;

        assert!(result.connected);
        assert_eq!(result.message, MSG_READ_PARTIAL);
        assert_eq!(result.addresses[0].status, ScanStatus::Warning);
        assert_eq!(result.addresses[0].value, "7");
        assert_eq!(result.addresses[1].status, ScanStatus::Error);
        assert_eq!(result.addresses[1].value, "");
    }

    #[tokio::test]
    async fn test_connect_failure() {
        let mut factory = ScriptedFactory::new();
        factory.fail_connect = true;
        let recorded = factory.recorded.clone();
        let engine = ProbeEngine::new(Arc::new(factory));

        let descriptor = ConnectionDescriptor::new("10.0.0.5");
        let result = engine.probe(&TestModeContext::new(), Some(&descriptor), &records()).await;

        assert!(!result.connected);
        assert_eq!(result.message, "ECONNREFUSED");
        assert_eq!(result.counts().error, 2);
        assert_eq!(recorded.lock().disconnects, 1);
        assert!(recorded.lock().tags.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout() {
        let mut factory = ScriptedFactory::new();
        factory.delay = Duration::from_secs(60);
        let recorded = factory.recorded.clone();
        let engine = ProbeEngine::with_config(
            Arc::new(factory),
            ProbeConfig::default().with_timeout(Duration::from_secs(2)),
        );

        let descriptor = ConnectionDescriptor::new("10.0.0.5");
        let result = engine.probe(&TestModeContext::new(), Some(&descriptor), &records()).await;

        assert!(!result.connected);
        assert_eq!(result.message, MSG_TIMEOUT);
        assert!(result
            .addresses
            .iter()
            .all(|entry| entry.status == ScanStatus::Error && entry.message == MSG_TIMEOUT));
        assert_eq!(recorded.lock().disconnects, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_after_connect() {
        let mut factory = ScriptedFactory::new();
        factory.read_delay = Duration::from_secs(60);
        let recorded = factory.recorded.clone();
        let engine = ProbeEngine::with_config(
            Arc::new(factory),
            ProbeConfig::default().with_timeout(Duration::from_secs(2)),
        );

        let descriptor = ConnectionDescriptor::new("10.0.0.5");
        let result = engine.probe(&TestModeContext::new(), Some(&descriptor), &records()).await;

        assert!(result.connected);
        assert_eq!(result.message, MSG_TIMEOUT);
        assert_eq!(result.counts().error, 2);
        assert!(result.addresses.iter().all(|entry| entry.value.is_empty()));
        assert_eq!(recorded.lock().tags, vec!["TAG_0", "TAG_1"]);
        assert!(recorded.lock().resolved.is_empty());
        assert_eq!(recorded.lock().disconnects, 1);
    }

    #[tokio::test]
    async fn test_no_descriptor_skips() {
        let engine = ProbeEngine::new(Arc::new(ScriptedFactory::new()));
        let result = engine.probe(&TestModeContext::new(), None, &records()).await;

        assert!(!result.connected);
        assert_eq!(result.counts().skipped, 2);
    }

    #[tokio::test]
    async fn test_no_addresses() {
        let factory = ScriptedFactory::new();
        let recorded = factory.recorded.clone();
        let engine = ProbeEngine::new(Arc::new(factory));

        let descriptor = ConnectionDescriptor::new("10.0.0.5");
        let result = engine.probe(&TestModeContext::new(), Some(&descriptor), &[]).await;

        assert!(!result.connected);
        assert!(result.addresses.is_empty());
        assert_eq!(recorded.lock().disconnects, 0);
    }

    #[tokio::test]
    async fn test_test_mode_takes_priority() {
        let factory = ScriptedFactory::new();
        let recorded = factory.recorded.clone();
        let engine = ProbeEngine::new(Arc::new(factory));
        let context = TestModeContext::new();
        context.set_enabled(true);

        for expected in 1..=3 {
            let result = engine.probe(&context, None, &records()).await;
            assert!(result.connected);
            assert!(result.is_all_ok());
            assert_eq!(context.state().cycle, expected);
        }
        assert_eq!(recorded.lock().disconnects, 0);
    }

    #[tokio::test]
    async fn test_offline_engine() {
        let engine = ProbeEngine::offline();
        let descriptor = ConnectionDescriptor::new("10.0.0.5");
        let result = engine.probe(&TestModeContext::new(), Some(&descriptor), &records()).await;

        assert!(!result.connected);
        assert_eq!(result.message, MSG_NO_TRANSPORT);
        assert_eq!(result.counts().error, 2);
    }

    #[test]
    fn test_probe_config() {
        assert_eq!(ProbeConfig::default().timeout, Duration::from_secs(10));
        let config: ProbeConfig = serde_json::from_str(r#"{"timeout": 2500}"#).unwrap();
        assert_eq!(config.timeout, Duration::from_millis(2500));
        let config: ProbeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ProbeConfig::default());
    }
}
