// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `addresses` command.

use serde_json::json;

use s7cfg_config::{collect_addresses, load_document, sanitize_connection};

use crate::cli::{Cli, OutputArgs, OutputFormat};
use crate::commands::render;
use crate::error::BinResult;

/// Executes the `addresses` command to list the connection and addresses.
pub fn addresses(cli: &Cli, args: OutputArgs) -> BinResult<()> {
    let document = load_document(&cli.config)?;
    let descriptor = document.get("plc").and_then(sanitize_connection);
    let records = collect_addresses(&document);

    match args.format {
        OutputFormat::Text => {
            match &descriptor {
                Some(d) => {
                    println!("Connection: {} (rack {}, slot {})", d.endpoint(), d.rack, d.slot);
                    if let (Some(local), Some(remote)) = (&d.local_tsap, &d.remote_tsap) {
                        println!("TSAP:       local {}, remote {}", local, remote);
                    }
                }
                None => println!("Connection: not configured"),
            }
            println!();
            println!("Addresses: {}", records.len());
            for record in &records {
                println!("  {}", record);
            }
        }
        format => {
            let output = json!({
                "connection": descriptor,
                "addresses": records,
            });
            println!("{}", render(&output, format)?);
        }
    }

    Ok(())
}
