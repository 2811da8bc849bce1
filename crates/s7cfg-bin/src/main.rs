// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! s7cfg - S7 connector configuration toolkit
//!
//! Main binary entry point.

use s7cfg_bin::cli::Cli;
use s7cfg_bin::error::report_error_and_exit;
use s7cfg_bin::{commands, init_logging};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    init_logging(cli.effective_log_level(), cli.log_format);

    if let Err(error) = commands::execute(cli).await {
        report_error_and_exit(error);
    }
}
