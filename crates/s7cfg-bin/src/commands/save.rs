// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `save` command.

use s7cfg_config::document::ENTITIES_KEY;
use s7cfg_config::{load_document, save_document};

use crate::cli::Cli;
use crate::error::{BinError, BinResult};

/// Executes the `save` command to rewrite the configuration in canonical form.
///
/// A missing file is created from the standard configuration.
pub fn save(cli: &Cli) -> BinResult<()> {
    let path = &cli.config;

    let document = load_document(path)?;
    let saved = save_document(path, &document)
        .map_err(|e| BinError::from(e).with_context(format!("Saving {}", path.display())))?;

    let entities = saved
        .get(ENTITIES_KEY)
        .and_then(|list| list.as_array())
        .map_or(0, Vec::len);

    println!("✓ Saved {} ({} entities)", path.display(), entities);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_save_creates_standard_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let cli = Cli::parse_from(["s7cfg", "-c", path.to_str().unwrap(), "save"]);
        save(&cli).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, s7cfg_config::standard_document());
    }

    #[test]
    fn test_save_rejects_invalid_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "plc: [broken").unwrap();

        let cli = Cli::parse_from(["s7cfg", "-c", path.to_str().unwrap(), "save"]);
        let error = save(&cli).unwrap_err();
        assert_eq!(error.exit_code(), 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "plc: [broken");
    }
}
