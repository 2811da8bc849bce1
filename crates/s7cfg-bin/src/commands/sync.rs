// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `sync` command.

use tracing::debug;

use crate::cli::{Cli, SyncArgs};
use crate::error::BinResult;

/// Executes the `sync` command to repair the `devices` alias of a file.
///
/// A missing or unparseable file is not an error; the file is left alone.
pub fn sync(cli: &Cli, args: SyncArgs) -> BinResult<()> {
    let path = args.file.unwrap_or_else(|| cli.config.clone());
    debug!(path = %path.display(), "Synchronizing entity aliases");

    if s7cfg_config::sync_file(&path)? {
        println!("Synchronized devices with entities: {}", path.display());
    } else {
        println!("Nothing to synchronize: {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_sync_uses_config_path_by_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "entities:\n- name: Light\n  friendly_name: Licht\n").unwrap();

        let cli = Cli::parse_from(["s7cfg", "-c", path.to_str().unwrap(), "sync"]);
        sync(&cli, SyncArgs::default()).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("devices:"));
    }

    #[test]
    fn test_sync_missing_file_is_ok() {
        let dir = TempDir::new().unwrap();
        let cli = Cli::parse_from(["s7cfg"]);
        let args = SyncArgs {
            file: Some(dir.path().join("absent.json")),
        };
        assert!(sync(&cli, args).is_ok());
    }
}
