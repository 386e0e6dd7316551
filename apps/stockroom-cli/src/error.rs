//! # CLI Error Type
//!
//! Failures that end the session. Core errors raised while placing an
//! order are shown to the user and never reach this type.
//!
//! ```text
//! ConfigError ──┐
//! CatalogError ─┼──► CliError ──► main() ──► exit code 1
//! io::Error ────┘
//! ```

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
