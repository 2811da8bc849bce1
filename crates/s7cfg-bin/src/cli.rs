// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI argument parsing and command definitions.
//!
//! Subcommands:
//!
//! - `show`: Print the normalized configuration (default)
//! - `sync`: Repair the `devices` alias of a configuration file
//! - `save`: Rewrite a configuration file in canonical form
//! - `addresses`: List the connection and every PLC address
//! - `simulate`: Scan the configured addresses in test mode
//! - `version`: Show version information

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// =============================================================================
// Main CLI Structure
// =============================================================================

/// s7cfg - S7 connector configuration toolkit
///
/// Inspects, migrates and synchronizes configuration documents of the
/// MQTT S7 connector and probes their PLC addresses.
#[derive(Parser, Debug)]
#[command(
    name = "s7cfg",
    author = "Sylvex <contact@sylvex.io>",
    version = s7cfg_core::VERSION,
    about = "S7 connector configuration toolkit",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        default_value = "config.yaml",
        env = "S7CFG_CONFIG",
        global = true
    )]
    pub config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        default_value = "info",
        env = "S7CFG_LOG_LEVEL",
        global = true
    )]
    pub log_level: String,

    /// Log format (text, json, compact)
    #[arg(long, default_value = "text", env = "S7CFG_LOG_FORMAT", global = true)]
    pub log_format: LogFormat,

    /// Enable quiet mode (warnings and errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// =============================================================================
// Subcommands
// =============================================================================

/// Available subcommands for the s7cfg CLI.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the normalized configuration
    ///
    /// This is the default command. A missing file shows the standard
    /// starter configuration.
    Show(OutputArgs),

    /// Synchronize the legacy `devices` list with `entities`
    ///
    /// Rewrites the file only when the two lists are out of sync, keeping
    /// its JSON or YAML format.
    Sync(SyncArgs),

    /// Rewrite the configuration file in canonical form
    Save,

    /// List the PLC connection and every configured address
    Addresses(OutputArgs),

    /// Scan the configured addresses against the simulated controller
    Simulate(SimulateArgs),

    /// Show detailed version information
    Version,
}

// =============================================================================
// Command Arguments
// =============================================================================

/// Arguments for commands that print a document.
#[derive(Args, Debug, Default, Clone)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the `sync` command.
#[derive(Args, Debug, Default, Clone)]
pub struct SyncArgs {
    /// File to synchronize (defaults to --config)
    pub file: Option<PathBuf>,
}

/// Arguments for the `simulate` command.
#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Number of consecutive scans
    #[arg(short = 'n', long, default_value = "1")]
    pub scans: u32,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

// =============================================================================
// Enums
// =============================================================================

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for structured logging
    Json,
    /// Compact format for minimal output
    Compact,
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for programmatic parsing
    Json,
    /// YAML format
    Yaml,
}

// =============================================================================
// Helper Methods
// =============================================================================

impl Cli {
    /// Parse CLI arguments from the command line.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective command, defaulting to `Show` if none specified.
    pub fn effective_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Show(OutputArgs::default()))
    }

    /// Get the effective log level based on flags.
    pub fn effective_log_level(&self) -> &str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            &self.log_level
        }
    }
}

impl Default for SimulateArgs {
    fn default() -> Self {
        Self {
            scans: 1,
            format: OutputFormat::Text,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
