//! Artisan CLI - Inspect and edit the persisted shopping cart.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! artisan-cli show
//!
//! # Add a product (numeric and string ids are the same product)
//! artisan-cli add --id 7 --name Croissant --price 1.2 --image img/croissant.jpg
//!
//! # Adjust quantities
//! artisan-cli increase 7
//! artisan-cli decrease 7
//! artisan-cli remove 7
//!
//! # Check stored data, rewriting it without invalid entries
//! artisan-cli check --repair
//!
//! # Place the order and empty the cart
//! artisan-cli checkout --payment cash
//! ```
//!
//! # Environment Variables
//!
//! Storage and display settings are read by `CartConfig` (`CART_*`). In
//! addition:
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `LOG_FORMAT` - `json` for JSON log lines on stderr
//! - `RUST_LOG` - tracing filter (default: `artisan_cart=info,artisan_cli=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use artisan_cart::{CartConfig, CheckoutError, ConfigError};
use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "artisan-cli")]
#[command(author, version, about = "Artisan shopping cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart contents and totals
    Show {
        /// Print the cart summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add one unit of a product
    Add {
        /// Catalog product id
        #[arg(short, long)]
        id: String,

        /// Product display name
        #[arg(short, long)]
        name: String,

        /// Unit price, as written in the catalog (e.g. "1.200")
        #[arg(short, long)]
        price: String,

        /// Thumbnail URL or path
        #[arg(long)]
        image: Option<String>,
    },
    /// Add one more unit of a product already in the cart
    Increase {
        /// Product id
        id: String,
    },
    /// Remove one unit of a product
    Decrease {
        /// Product id
        id: String,
    },
    /// Remove a product entirely
    Remove {
        /// Product id
        id: String,
    },
    /// Empty the cart
    Clear,
    /// Print the cart total
    Total,
    /// Print the number of units in the cart
    Count,
    /// Re-read stored data and report dropped entries
    Check {
        /// Persist the cleaned cart
        #[arg(long)]
        repair: bool,
    },
    /// Place the order and clear the cart
    Checkout {
        /// Payment method identifier
        #[arg(short, long)]
        payment: String,
    },
}

/// Errors that end a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Checkout preconditions failed.
    #[error("Checkout failed: {0}")]
    Checkout(#[from] CheckoutError),

    /// Output could not be serialized.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry() -> Option<sentry::ClientInitGuard> {
    let dsn = std::env::var("SENTRY_DSN").ok()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: std::env::var("SENTRY_ENVIRONMENT")
                .ok()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "artisan_cart=info,artisan_cli=info".into());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

fn main() {
    // Load .env before Sentry reads SENTRY_DSN
    let _ = dotenvy::dotenv();

    // Initialize Sentry (must be done before tracing subscriber)
    let sentry_guard = init_sentry();
    init_tracing();

    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => print_output(&output),
        Err(e) => {
            tracing::error!("Command failed: {e}");
            // Flush Sentry before exiting
            drop(sentry_guard);
            std::process::exit(1);
        }
    }
}

#[allow(clippy::print_stdout)]
fn print_output(output: &str) {
    if !output.is_empty() {
        println!("{output}");
    }
}

fn run(cli: Cli) -> Result<String, CliError> {
    let config = CartConfig::from_env()?;
    let mut store = config.open_store();
    let format = &config.price_format;

    let output = match cli.command {
        Commands::Show { json } => commands::cart::show(&mut store, format, json)?,
        Commands::Add {
            id,
            name,
            price,
            image,
        } => commands::cart::add(&mut store, &id, &name, &price, image.as_deref()),
        Commands::Increase { id } => commands::cart::increase(&mut store, &id),
        Commands::Decrease { id } => commands::cart::decrease(&mut store, &id),
        Commands::Remove { id } => commands::cart::remove(&mut store, &id),
        Commands::Clear => commands::cart::clear(&mut store),
        Commands::Total => commands::cart::total(&mut store, format),
        Commands::Count => commands::cart::count(&mut store),
        Commands::Check { repair } => commands::cart::check(&mut store, repair),
        Commands::Checkout { payment } => {
            commands::checkout::place_order(&mut store, &payment, format)?
        }
    };
    Ok(output)
}
