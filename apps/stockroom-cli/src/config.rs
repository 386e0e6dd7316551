//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable               | Default      | Meaning                          |
//! |------------------------|--------------|----------------------------------|
//! | `STOCKROOM_STORE_NAME` | `Best Buy`   | Title shown above the menu       |
//! | `STOCKROOM_LOG`        | `warn`       | Tracing filter when `RUST_LOG` is unset |
//! | `STOCKROOM_COLOR`      | `true`       | ANSI styling (`NO_COLOR` forces off) |
//! | `STOCKROOM_CATALOG`    | built-in     | Path to a JSON catalog           |

use std::env;
use std::path::PathBuf;

/// Front-end configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Title shown in the banner.
    pub store_name: String,

    /// Default tracing filter directive.
    pub log_filter: String,

    /// Whether to emit ANSI styling.
    pub color: bool,

    /// JSON catalog replacing the built-in one.
    pub catalog_path: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            store_name: "Best Buy".to_string(),
            log_filter: "warn".to_string(),
            color: true,
            catalog_path: None,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = CliConfig::default();

        let store_name = match lookup("STOCKROOM_STORE_NAME") {
            Some(name) if name.trim().is_empty() => {
                return Err(ConfigError::InvalidValue("STOCKROOM_STORE_NAME".to_string()))
            }
            Some(name) => name,
            None => defaults.store_name,
        };

        let log_filter = lookup("STOCKROOM_LOG").unwrap_or(defaults.log_filter);

        let color = match lookup("STOCKROOM_COLOR") {
            Some(value) => value
                .trim()
                .parse::<bool>()
                .map_err(|_| ConfigError::InvalidValue("STOCKROOM_COLOR".to_string()))?,
            None => defaults.color,
        };
        // https://no-color.org: any non-empty value disables color
        let no_color = lookup("NO_COLOR").is_some_and(|v| !v.is_empty());

        let catalog_path = lookup("STOCKROOM_CATALOG")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(CliConfig {
            store_name,
            log_filter,
            color: color && !no_color,
            catalog_path,
        })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
