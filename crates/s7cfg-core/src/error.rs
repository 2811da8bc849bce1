// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Transport error types.
//!
//! These errors describe what went wrong while talking to a controller.
//! The probe engine never propagates them: it folds them into per-address
//! statuses and a session message.

use std::time::Duration;
use thiserror::Error;

/// Errors reported by a [`PlcTransport`](crate::transport::PlcTransport).
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection could not be established.
    #[error("Connection failed: {message}")]
    ConnectionFailed {
        /// Error message.
        message: String,
        /// Underlying error.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Read operation failed.
    #[error("Read failed for '{address}': {message}")]
    ReadFailed {
        /// The address that failed.
        address: String,
        /// Error message.
        message: String,
    },

    /// Operation timed out.
    #[error("Operation timed out after {duration:?}")]
    Timeout {
        /// The timeout duration.
        duration: Duration,
    },

    /// Transport is not connected.
    #[error("Transport is not connected")]
    NotConnected,

    /// Protocol-specific error.
    #[error("Protocol error: {message}")]
    Protocol {
        /// Error message.
        message: String,
    },
}

impl TransportError {
    /// Creates a connection failed error.
    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::ConnectionFailed {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a connection failed error with a source.
    pub fn connection_failed_with<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConnectionFailed {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a read failed error.
    pub fn read_failed(address: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ReadFailed {
            address: address.into(),
            message: message.into(),
        }
    }

    /// Creates a timeout error.
    pub fn timeout(duration: Duration) -> Self {
        Self::Timeout { duration }
    }

    /// Creates a protocol error.
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Returns the transport's own error text, without the variant prefix.
    ///
    /// Empty when the transport supplied no text.
    pub fn detail(&self) -> String {
        match self {
            TransportError::ConnectionFailed { message, .. } => message.clone(),
            TransportError::ReadFailed { message, .. } => message.clone(),
            TransportError::Protocol { message } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Returns `true` if this is a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout { .. })
    }

    /// Returns the error type as a string for logging.
    pub fn error_type(&self) -> &'static str {
        match self {
            TransportError::ConnectionFailed { .. } => "connection_failed",
            TransportError::ReadFailed { .. } => "read_failed",
            TransportError::Timeout { .. } => "timeout",
            TransportError::NotConnected => "not_connected",
            TransportError::Protocol { .. } => "protocol",
        }
    }
}

/// A Result type with TransportError.
pub type TransportResult<T> = Result<T, TransportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_creation() {
        let error = TransportError::connection_failed("ECONNREFUSED");
        assert_eq!(error.error_type(), "connection_failed");
        assert_eq!(error.detail(), "ECONNREFUSED");
        assert_eq!(error.to_string(), "Connection failed: ECONNREFUSED");

        let error = TransportError::timeout(Duration::from_secs(10));
        assert!(error.is_timeout());
        assert_eq!(error.error_type(), "timeout");
    }

    #[test]
    fn test_connection_failed_with_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let error = TransportError::connection_failed_with("cannot reach 10.0.0.5:102", io);
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_detail_for_empty_message() {
        let error = TransportError::connection_failed("");
        assert!(error.detail().is_empty());
    }
}
