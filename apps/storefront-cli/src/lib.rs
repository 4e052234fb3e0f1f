//! # Storefront CLI Library
//!
//! Wiring for the `storefront` binary.
//!
//! ## Module Organization
//! ```text
//! storefront_cli/
//! ├── lib.rs          ◄─── You are here (logging, config, wiring, run)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── commands/
//! │   ├── mod.rs      ◄─── Routing and JSON rendering
//! │   ├── account.rs  ◄─── Login, registration, profile
//! │   ├── shop.rs     ◄─── Catalog, cart, orders, checkout
//! │   ├── admin.rs    ◄─── Product management, users
//! │   └── config.rs   ◄─── Client configuration
//! └── error.rs        ◄─── CLI error type
//! ```
//!
//! ## One Invocation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter, written to stderr             │
//! │     • RUST_LOG wins; otherwise WARN, or storefront=debug with -v        │
//! │                                                                         │
//! │  2. Load Configuration ───────────────────────────────────────────────► │
//! │     • client.toml ──► STOREFRONT_* env ──► --backend-url                │
//! │                                                                         │
//! │  3. Open State ───────────────────────────────────────────────────────► │
//! │     • FileTokenStore (persisted session token)                          │
//! │     • Store seeded with that token                                      │
//! │                                                                         │
//! │  4. Run Command ──────────────────────────────────────────────────────► │
//! │     • One dispatcher operation (plus its re-fetches)                    │
//! │     • Outcome printed as JSON on stdout                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;

use std::path::PathBuf;
use std::sync::Arc;

use storefront_client::{ClientConfig, Dispatcher};
use storefront_state::Store;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use error::CliResult;

/// Runs one invocation and prints its outcome.
///
/// Returns whether the outcome was a success.
pub async fn run(cli: Cli) -> CliResult<bool> {
    let config = load_config(cli.config.clone(), cli.backend_url)?;
    let dispatcher = open_dispatcher(&config)?;

    let rendered = commands::execute(&dispatcher, &config, cli.config, cli.command).await?;
    println!("{}", rendered.to_pretty()?);

    Ok(rendered.success)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages from every crate
/// - `-v` - `info,storefront=debug`
/// - Default: WARN, so stdout stays clean JSON and stderr quiet
pub fn init_tracing(verbose: bool) {
    let default = if verbose {
        "info,storefront=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the configuration, then applies `--backend-url`.
pub fn load_config(
    config_path: Option<PathBuf>,
    backend_url: Option<String>,
) -> CliResult<ClientConfig> {
    let mut config = ClientConfig::load(config_path)?;

    if let Some(url) = backend_url {
        debug!(url = %url, "Overriding backend URL from the command line");
        config.api.base_url = url;
        config.validate()?;
    }

    Ok(config)
}

/// Opens the token storage and builds a dispatcher over HTTP.
pub fn open_dispatcher(config: &ClientConfig) -> CliResult<Dispatcher> {
    let storage = config.token_store()?;
    debug!(path = %storage.path().display(), "Token storage opened");

    let store = Store::open(Arc::new(storage));
    Ok(Dispatcher::from_config(config, store)?)
}
