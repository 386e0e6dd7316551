//! # Stockroom CLI
//!
//! Text-menu front-end over the `stockroom-core` inventory.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Load configuration from the environment                            │
//! │  2. Initialize tracing (stderr, filtered)                              │
//! │  3. Load the product catalog (built-in or STOCKROOM_CATALOG)           │
//! │  4. Run the menu over stdin/stdout until Quit or end of input          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod catalog;
mod config;
mod error;
mod menu;
mod output;

use std::io;
use std::process::ExitCode;

use stockroom_core::Store;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::catalog::load_catalog;
use crate::config::CliConfig;
use crate::error::CliError;
use crate::menu::Menu;
use crate::output::Palette;

fn main() -> ExitCode {
    let config = match CliConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", CliError::from(e));
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.log_filter);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Stockroom stopped");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` applies. Logs go
/// to stderr so they never interleave with the menu.
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(config: &CliConfig) -> Result<(), CliError> {
    let products = load_catalog(config.catalog_path.as_deref())?;
    info!(
        products = products.len(),
        catalog = ?config.catalog_path,
        "Catalog loaded"
    );

    let mut store = Store::new(products);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let exit = Menu::new(
        &mut store,
        stdin.lock(),
        stdout.lock(),
        Palette::new(config.color),
        config.store_name.as_str(),
    )
    .run()?;

    info!(?exit, remaining = store.total_quantity(), "Session ended");
    Ok(())
}
