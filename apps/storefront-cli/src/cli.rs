//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use storefront_core::PaymentMethod;

/// Storefront client
#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(about = "Browse the storefront, manage the cart and place orders", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to client.toml (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Backend base URL, overriding the configuration
    #[arg(long, global = true, value_name = "URL")]
    pub backend_url: Option<String>,

    /// Debug logging for the storefront crates
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and keep the session token
    Login {
        email: String,

        #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account (does not sign in)
    Register(RegisterArgs),

    /// Forget the session token
    Logout,

    /// Show or edit the signed-in user's profile
    Profile {
        #[command(subcommand)]
        action: Option<ProfileCommand>,
    },

    /// List products
    Products {
        /// Case-insensitive match on name or description
        #[arg(short, long)]
        search: Option<String>,

        /// Category id
        #[arg(short, long)]
        category: Option<i64>,
    },

    /// Show one product
    Product { id: i64 },

    /// List categories
    Categories,

    /// Show the cart with totals
    Cart,

    /// Add a product to the cart
    CartAdd {
        product_id: i64,

        #[arg(default_value_t = 1)]
        quantity: i64,
    },

    /// Set the quantity of a cart line
    CartUpdate { item_id: i64, quantity: i64 },

    /// Remove a cart line
    CartRemove { item_id: i64 },

    /// List the signed-in user's orders
    Orders,

    /// Show one order
    Order { id: i64 },

    /// Place an order for the current cart
    Checkout(CheckoutArgs),

    /// Administrator operations
    Admin {
        #[command(subcommand)]
        action: AdminCommand,
    },

    /// Show or change the client configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommand>,
    },
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    pub email: String,

    #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
    pub password: String,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub address: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Fetch the profile (default)
    Show,

    /// Change profile fields; omitted fields are kept
    Update {
        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        address: Option<String>,
    },

    /// Change the password
    Password {
        #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
        current: String,

        #[arg(long, env = "STOREFRONT_NEW_PASSWORD", hide_env_values = true)]
        new: String,
    },

    /// Delete the account and sign out
    Delete {
        /// Required; deletion cannot be undone
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Args)]
pub struct CheckoutArgs {
    /// Shipping address (defaults to the address on the profile)
    #[arg(long)]
    pub address: Option<String>,

    /// credit_card or paypal
    #[arg(long, default_value = "credit_card")]
    pub payment: PaymentMethod,

    #[arg(long)]
    pub cardholder: Option<String>,

    #[arg(long)]
    pub card_number: Option<String>,

    /// MM/YY
    #[arg(long)]
    pub expiry: Option<String>,

    #[arg(long, env = "STOREFRONT_CARD_CVV", hide_env_values = true)]
    pub cvv: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// List every account
    Users,

    /// Create a product
    CreateProduct(ProductArgs),

    /// Change product fields; omitted fields are kept
    UpdateProduct {
        id: i64,

        #[command(flatten)]
        changes: ProductChanges,
    },

    /// Delete a product
    DeleteProduct { id: i64 },
}

#[derive(Debug, Args)]
pub struct ProductArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub description: String,

    /// Unit price in major units, e.g. 19.99
    #[arg(long)]
    pub price: f64,

    #[arg(long, default_value_t = 0)]
    pub stock: i64,

    #[arg(long)]
    pub category: i64,

    #[arg(long)]
    pub image_url: Option<String>,

    /// Create the product hidden from the listing
    #[arg(long)]
    pub inactive: bool,
}

#[derive(Debug, Args)]
pub struct ProductChanges {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub price: Option<f64>,

    #[arg(long)]
    pub stock: Option<i64>,

    #[arg(long)]
    pub category: Option<i64>,

    #[arg(long)]
    pub image_url: Option<String>,

    #[arg(long)]
    pub active: Option<bool>,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (default)
    Show,

    /// Save a backend URL to the config file
    SetBackend { url: String },
}
