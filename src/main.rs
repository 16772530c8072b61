// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing
    )
)]

use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::Result;
use photo_gallery::cli::{self, Args};
use photo_gallery::logging::{init_logging, parse_rotation, LogConfig};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Install color-eyre error hooks for colored error output
    color_eyre::install()?;

    // Parse CLI arguments first (before logging, so we can use log config)
    let args = Args::parse();

    let log_config = LogConfig {
        log_dir: args
            .log_dir
            .clone()
            .unwrap_or_else(|| LogConfig::default().log_dir),
        json_format: args.log_json,
        rotation: parse_rotation(&args.log_rotation),
        console: args.verbose,
        ..LogConfig::default()
    };
    let log_file = log_config.log_file();

    if let Err(e) = init_logging(&log_config) {
        eprintln!();
        eprintln!("Error: Failed to initialize logging: {e}");
        eprintln!("Logs: {}", log_file.display());
        eprintln!();
        return Err(e);
    }

    Ok(cli::run(args, &log_file).await)
}
