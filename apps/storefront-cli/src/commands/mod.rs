//! # Commands Module
//!
//! Maps each subcommand to dispatcher operations.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (routing, rendering)
//! ├── account.rs  ◄─── login, register, logout, profile
//! ├── shop.rs     ◄─── products, categories, cart, orders, checkout
//! ├── admin.rs    ◄─── product management, user list
//! └── config.rs   ◄─── show / change client configuration
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  $ storefront cart-add 3 2                                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Command::CartAdd { product_id: 3, quantity: 2 }                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  dispatcher.add_to_cart(3, 2).await ──► Outcome<()>                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Rendered { success, json } ──► stdout, exit code                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod account;
pub mod admin;
pub mod config;
pub mod shop;

use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;
use storefront_client::{ClientConfig, Dispatcher, Outcome};

use crate::cli::Command;
use crate::error::CliResult;

/// What a command prints, and whether it succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub success: bool,
    pub json: Value,
}

impl Rendered {
    /// Pretty JSON for stdout.
    pub fn to_pretty(&self) -> CliResult<String> {
        Ok(serde_json::to_string_pretty(&self.json)?)
    }
}

/// Serializes an outcome as-is.
pub fn render<T: Serialize>(outcome: Outcome<T>) -> CliResult<Rendered> {
    Ok(Rendered {
        success: outcome.success,
        json: serde_json::to_value(&outcome)?,
    })
}

/// Runs one subcommand.
///
/// `Config` commands work on `config` and save to `config_path`; everything
/// else goes through `dispatcher`.
pub async fn execute(
    dispatcher: &Dispatcher,
    config: &ClientConfig,
    config_path: Option<PathBuf>,
    command: Command,
) -> CliResult<Rendered> {
    match command {
        Command::Login { email, password } => account::login(dispatcher, &email, &password).await,
        Command::Register(args) => account::register(dispatcher, args).await,
        Command::Logout => render(dispatcher.logout()),
        Command::Profile { action } => account::profile(dispatcher, action).await,

        Command::Products { search, category } => {
            shop::products(dispatcher, search, category).await
        }
        Command::Product { id } => render(dispatcher.get_product(id).await),
        Command::Categories => render(dispatcher.get_categories().await),
        Command::Cart => shop::cart(dispatcher).await,
        Command::CartAdd {
            product_id,
            quantity,
        } => render(dispatcher.add_to_cart(product_id, quantity).await),
        Command::CartUpdate { item_id, quantity } => {
            render(dispatcher.update_cart_item(item_id, quantity).await)
        }
        Command::CartRemove { item_id } => render(dispatcher.remove_from_cart(item_id).await),
        Command::Orders => render(dispatcher.get_orders().await),
        Command::Order { id } => render(dispatcher.get_order(id).await),
        Command::Checkout(args) => shop::checkout(dispatcher, args).await,

        Command::Admin { action } => admin::execute(dispatcher, action).await,
        Command::Config { action } => config::execute(config, action, config_path),
    }
}
