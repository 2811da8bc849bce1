// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Error types for the s7cfg binary.

use thiserror::Error;

/// Result type alias for s7cfg-bin operations.
pub type BinResult<T> = Result<T, BinError>;

/// Errors that can occur in the s7cfg binary.
#[derive(Debug, Error)]
pub enum BinError {
    /// Output rendering error.
    #[error("Output error: {0}")]
    Output(String),

    /// Configuration document error.
    #[error("Config error: {0}")]
    Config(#[from] s7cfg_config::ConfigError),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        /// The context description.
        context: String,
        /// The underlying error.
        #[source]
        source: Box<BinError>,
    },
}

impl BinError {
    /// Creates an output error.
    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output(msg.into())
    }

    /// Adds context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Returns the exit code for this error.
    ///
    /// Unreadable documents exit with 1, file access failures with 4 and
    /// output failures with 5.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(e) if e.is_io_error() => 4,
            Self::Config(_) => 1,
            Self::Output(_) => 5,
            Self::WithContext { source, .. } => source.exit_code(),
        }
    }
}

// =============================================================================
// Error Reporting
// =============================================================================

/// Reports an error with appropriate formatting.
pub fn report_error(error: &BinError) {
    eprintln!("Error: {}", error);

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("  Caused by: {}", cause);
        source = cause.source();
    }
}

/// Reports an error and exits with the appropriate code.
pub fn report_error_and_exit(error: BinError) -> ! {
    report_error(&error);
    std::process::exit(error.exit_code())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use s7cfg_config::ConfigError;

    #[test]
    fn test_error_creation() {
        let err = BinError::output("broken pipe");
        assert_eq!(err.to_string(), "Output error: broken pipe");
    }

    #[test]
    fn test_error_with_context() {
        let err = BinError::from(ConfigError::file_not_found("config.yaml"))
            .with_context("Saving config.yaml");
        assert!(err.to_string().starts_with("Saving config.yaml: Config error: "));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(BinError::output("test").exit_code(), 5);
        assert_eq!(
            BinError::from(ConfigError::invalid_document("config.yaml", "bad")).exit_code(),
            1
        );
        assert_eq!(
            BinError::from(ConfigError::parse("yaml", "bad")).exit_code(),
            1
        );
        assert_eq!(
            BinError::from(ConfigError::file_not_found("config.yaml")).exit_code(),
            4
        );
    }
}
