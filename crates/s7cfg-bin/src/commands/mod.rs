// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI command implementations.
//!
//! - `show`: Print the normalized configuration
//! - `sync`: Synchronize the `devices` alias
//! - `save`: Rewrite the file in canonical form
//! - `addresses`: List connection and addresses
//! - `simulate`: Scan in test mode
//! - `version`: Show version information

mod addresses;
mod save;
mod show;
mod simulate;
mod sync;
mod version;

pub use addresses::addresses;
pub use save::save;
pub use show::show;
pub use simulate::simulate;
pub use sync::sync;
pub use version::version;

use serde_json::Value;

use s7cfg_config::ConfigFormat;

use crate::cli::{Cli, Commands, OutputFormat};
use crate::error::{BinError, BinResult};

/// Executes the appropriate command based on CLI arguments.
pub async fn execute(cli: Cli) -> BinResult<()> {
    match cli.effective_command() {
        Commands::Show(args) => show::show(&cli, args),
        Commands::Sync(args) => sync::sync(&cli, args),
        Commands::Save => save::save(&cli),
        Commands::Addresses(args) => addresses::addresses(&cli, args),
        Commands::Simulate(args) => simulate::simulate(&cli, args).await,
        Commands::Version => version::version(&cli),
    }
}

/// Renders a value as JSON or YAML.
///
/// Text output is command-specific and falls back to JSON here.
pub(crate) fn render(value: &Value, format: OutputFormat) -> BinResult<String> {
    let encoding = match format {
        OutputFormat::Yaml => ConfigFormat::Yaml,
        OutputFormat::Json | OutputFormat::Text => ConfigFormat::Json,
    };
    encoding
        .serialize(value)
        .map(|text| text.trim_end().to_string())
        .map_err(|e| BinError::output(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_formats() {
        let value = json!({"plc": {"host": "plc.local"}});
        assert_eq!(
            render(&value, OutputFormat::Json).unwrap(),
            "{\n  \"plc\": {\n    \"host\": \"plc.local\"\n  }\n}"
        );
        assert_eq!(
            render(&value, OutputFormat::Yaml).unwrap(),
            "plc:\n  host: plc.local"
        );
    }
}
