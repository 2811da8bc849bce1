// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `simulate` command.

use serde_json::json;

use s7cfg_config::load_document;
use s7cfg_probe::{ConnectorService, ProbeResult};

use crate::cli::{Cli, OutputFormat, SimulateArgs};
use crate::commands::render;
use crate::error::BinResult;

/// Executes the `simulate` command to scan the configured addresses in test mode.
pub async fn simulate(cli: &Cli, args: SimulateArgs) -> BinResult<()> {
    let document = load_document(&cli.config)?;

    let service = ConnectorService::default();
    service.set_test_mode(true);

    for _ in 0..args.scans.max(1) {
        let result = service.scan_document(&document).await;
        let cycle = service.get_test_mode().cycle;

        match args.format {
            OutputFormat::Text => print_result(cycle, &result),
            format => {
                let output = json!({
                    "cycle": cycle,
                    "counts": result.counts(),
                    "result": result,
                });
                println!("{}", render(&output, format)?);
            }
        }
    }

    Ok(())
}

fn print_result(cycle: u32, result: &ProbeResult) {
    let counts = result.counts();
    println!("Scan cycle {}: {}", cycle, result.message);
    if let Some(connection) = &result.connection {
        println!("  Controller: {}", connection.descriptor.endpoint());
    }
    println!(
        "  Addresses: {} total, {} ok, {} warning, {} error, {} skipped",
        counts.total, counts.ok, counts.warning, counts.error, counts.skipped
    );
    for entry in &result.addresses {
        println!(
            "  [{}] {}.{} ({}) = {}",
            entry.status, entry.entity, entry.attribute, entry.address, entry.value
        );
    }
}
