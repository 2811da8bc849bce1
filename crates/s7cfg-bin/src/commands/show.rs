// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `show` command.

use serde_json::Value;

use s7cfg_config::{load_document, normalize, NormalizedConfig};

use crate::cli::{Cli, OutputArgs, OutputFormat};
use crate::commands::render;
use crate::error::BinResult;

/// Executes the `show` command to print the normalized configuration.
pub fn show(cli: &Cli, args: OutputArgs) -> BinResult<()> {
    let config = normalize(&load_document(&cli.config)?);

    match args.format {
        OutputFormat::Text => print_summary(cli, &config),
        format => println!("{}", render(&config.to_value(), format)?),
    }

    Ok(())
}

fn print_summary(cli: &Cli, config: &NormalizedConfig) {
    println!("Configuration: {}", cli.config.display());
    println!();
    println!("PLC:");
    if config.plc.is_empty() {
        println!("  (not configured)");
    }
    for (key, value) in &config.plc {
        println!("  {}: {}", key, scalar(value));
    }

    println!();
    println!("MQTT:");
    match config.mqtt.get("host") {
        Some(host) => println!("  host: {}", scalar(host)),
        None => println!("  (not configured)"),
    }

    println!();
    println!("Entities: {}", config.entities.len());
    for (index, entity) in config.entities.iter().enumerate() {
        println!(
            "  - {} ({})",
            entity.display_name(index),
            entity.entity_type().unwrap_or("untyped")
        );
    }

    if !config.extras.is_empty() {
        println!();
        let keys: Vec<&str> = config.extras.keys().map(String::as_str).collect();
        println!("Other keys: {}", keys.join(", "));
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
