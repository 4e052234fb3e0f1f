//! # Storefront CLI Entry Point
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Initialize tracing (logging)
//! 3. Load configuration and open the token storage
//! 4. Run one subcommand and print its outcome
//!
//! The actual setup is in lib.rs so it can be tested.

use std::process::ExitCode;

use clap::Parser;
use storefront_cli::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    storefront_cli::init_tracing(cli.verbose);

    match storefront_cli::run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "Command aborted");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
