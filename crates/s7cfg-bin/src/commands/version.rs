// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `version` command.

use crate::cli::Cli;
use crate::error::BinResult;

/// Executes the `version` command to display version information.
pub fn version(_cli: &Cli) -> BinResult<()> {
    println!("s7cfg - S7 connector configuration toolkit");
    println!();
    println!("Version Information:");
    println!("  s7cfg-bin:    {}", env!("CARGO_PKG_VERSION"));
    println!("  s7cfg-core:   {}", s7cfg_core::VERSION);
    println!("  s7cfg-config: {}", s7cfg_config::VERSION);
    println!("  s7cfg-probe:  {}", s7cfg_probe::VERSION);
    println!();
    println!("Build Information:");
    println!("  Target:       {}", std::env::consts::ARCH);
    println!("  OS:           {}", std::env::consts::OS);
    println!();
    println!("License: PolyForm Noncommercial License 1.0.0");
    println!("Copyright (c) 2025 Sylvex. All rights reserved.");

    Ok(())
}
