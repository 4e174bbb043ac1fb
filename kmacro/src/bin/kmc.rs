// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Type keys into a text buffer with keyboard macros enabled. Run `kmc --help` for
//! the commands.

use clap::Parser;
use r3bl_kmacro::{CLIArg, ISSUES_URL, TracingConfig, run_app,
                  setup_default_miette_global_report_handler,
                  try_initialize_logging_global, unrecoverable_error_message};
use tracing_core::LevelFilter;

fn main() -> miette::Result<()> {
    setup_default_miette_global_report_handler(ISSUES_URL);

    // If no args are passed, the following line will fail, and help will be printed
    // thanks to `arg_required_else_help(true)` in the `CLIArg` struct.
    let cli_arg = CLIArg::parse();

    let enable_logging = cli_arg.global_options.enable_logging;
    if enable_logging {
        try_initialize_logging_global(TracingConfig::new_file(None, LevelFilter::DEBUG))?;
        // % is Display, ? is Debug.
        tracing::debug!(message = "Start logging...", cli_arg = ?cli_arg);
    }

    let result = run_app(&cli_arg);

    if let Err(report) = &result {
        // % is Display, ? is Debug.
        tracing::error!(
            message = "Could not run kmc due to the following problem",
            error = ?report
        );
        eprintln!("{}", unrecoverable_error_message(report));
        std::process::exit(1);
    }

    enable_logging.then(|| {
        tracing::debug!(message = "Stop logging...");
    });

    result
}
