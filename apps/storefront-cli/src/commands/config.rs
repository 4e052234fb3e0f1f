//! # Config Commands
//!
//! Shows the effective configuration or saves a new backend URL.

use std::path::PathBuf;

use storefront_client::{ClientConfig, Outcome};
use tracing::info;

use super::{render, Rendered};
use crate::cli::ConfigCommand;
use crate::error::CliResult;

/// Runs a config command. `path` is where `set-backend` saves; `None` means
/// the default location.
pub fn execute(
    config: &ClientConfig,
    action: Option<ConfigCommand>,
    path: Option<PathBuf>,
) -> CliResult<Rendered> {
    match action.unwrap_or(ConfigCommand::Show) {
        ConfigCommand::Show => render(Outcome::ok(config.clone())),
        ConfigCommand::SetBackend { url } => {
            let mut updated = config.clone();
            updated.api.base_url = url;
            updated.validate()?;
            updated.save(path)?;
            info!(url = %updated.api.base_url, "Backend URL saved");

            render(Outcome::ok(updated))
        }
    }
}
