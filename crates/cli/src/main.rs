//! Aqua Aura CLI - Browse the catalog and manage the local cart.
//!
//! Every invocation is one page load: the cart is read from local storage,
//! one action runs, and the cart is written back before exiting.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog
//! aqua-aura products
//!
//! # Add product 1 to the cart, then take one away again
//! aqua-aura add 1
//! aqua-aura update 1 -1
//!
//! # Show the cart and check out
//! aqua-aura cart
//! aqua-aura checkout
//!
//! # Render a page as HTML
//! aqua-aura render cart --out cart.html
//! ```
//!
//! # Commands
//!
//! - `products` - List the catalog
//! - `add`, `update`, `remove` - Change the cart
//! - `cart`, `count` - Show the cart or its item count
//! - `checkout` - Clear the cart
//! - `render` - Render a page to HTML
//! - `contact` - Submit the contact form

#![cfg_attr(not(test), forbid(unsafe_code))]
// Command output goes to stdout by design
#![allow(clippy::print_stdout)]

use std::io::{self, Write};
use std::path::PathBuf;

use aqua_aura_core::ProductId;
use aqua_aura_storefront::{AppError, AppState, StorefrontConfig, View};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "aqua-aura")]
#[command(author, version, about = "Aqua Aura storefront")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all products
    Products,
    /// Add one unit of a product to the cart
    Add {
        /// Product ID
        id: ProductId,

        /// Page the product was added from
        #[arg(long, default_value = "products")]
        from: View,
    },
    /// Change a cart line's quantity (removed at zero)
    Update {
        /// Product ID
        id: ProductId,

        /// Amount to add, negative to take away
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        id: ProductId,
    },
    /// Show the cart
    Cart,
    /// Show the number of items in the cart
    Count,
    /// Check out and clear the cart
    Checkout,
    /// Render a page as HTML
    Render {
        /// Page to render (home, products, cart, contact)
        view: View,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Submit the contact form
    Contact {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        message: String,
    },
}

/// Log filter used when `RUST_LOG` is not set: info for the binary, warn for
/// the library.
const DEFAULT_LOG_FILTER: &str = "aqua_aura=info,aqua_aura_storefront=warn";

fn default_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_LOG_FILTER)
}

fn init_tracing(json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    if let Err(e) = run(cli) {
        match user_message(e.as_ref()) {
            Some(message) => println!("{message}"),
            None => tracing::error!("Command failed: {e}"),
        }
        std::process::exit(1);
    }
}

/// Message to print for errors the user can fix, `None` for everything else.
fn user_message(err: &(dyn std::error::Error + 'static)) -> Option<String> {
    err.downcast_ref::<AppError>()
        .filter(|app| app.is_user_error())
        .map(AppError::user_message)
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env().map_err(AppError::from)?;
    tracing::debug!(data_dir = %config.data_dir.display(), "Loading storefront");
    let mut state = AppState::load(config);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Products => commands::catalog::list(&state, &mut out)?,
        Commands::Add { id, from } => commands::cart::add(&mut state, id, from, &mut out)?,
        Commands::Update { id, delta } => commands::cart::update(&mut state, id, delta, &mut out)?,
        Commands::Remove { id } => commands::cart::remove(&mut state, id, &mut out)?,
        Commands::Cart => commands::cart::show(&state, &mut out)?,
        Commands::Count => commands::cart::count(&state, &mut out)?,
        Commands::Checkout => commands::cart::checkout(&mut state, &mut out)?,
        Commands::Render { view, out: path } => {
            commands::pages::render(&state, view, path.as_deref(), &mut out)?;
        }
        Commands::Contact {
            name,
            email,
            message,
        } => commands::pages::contact(&state, name, email, message, &mut out)?,
    }

    out.flush()?;
    Ok(())
}
