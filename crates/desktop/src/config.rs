//! Startup configuration, read from the environment.

use std::path::PathBuf;

use thiserror::Error;

use caja_observability::LogFormat;
use caja_store::Store;

pub const INVENTORY_CSV_VAR: &str = "CAJA_INVENTORY_CSV";
pub const EMPTY_INVENTORY_VAR: &str = "CAJA_EMPTY_INVENTORY";
pub const LOG_FORMAT_VAR: &str = "CAJA_LOG_FORMAT";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Startup options. The defaults open the till with the seed catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Inventory CSV loaded at startup, replacing the opening catalog.
    pub inventory_csv: Option<PathBuf>,
    /// Open with no products instead of the seed catalog.
    pub empty_inventory: bool,
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let inventory_csv = lookup(INVENTORY_CSV_VAR)
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from);

        let empty_inventory = match lookup(EMPTY_INVENTORY_VAR) {
            Some(raw) => parse_flag(EMPTY_INVENTORY_VAR, &raw)?,
            None => false,
        };

        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(raw) if !raw.trim().is_empty() => {
                raw.parse::<LogFormat>().map_err(|reason| ConfigError::Invalid {
                    var: LOG_FORMAT_VAR,
                    reason,
                })?
            }
            _ => LogFormat::default(),
        };

        Ok(Self {
            inventory_csv,
            empty_inventory,
            log_format,
        })
    }

    /// Open the store this configuration describes.
    ///
    /// A configured inventory file that fails to load is logged and skipped; the
    /// till still opens with its opening catalog.
    pub fn build_store(&self) -> Store {
        let mut store = if self.empty_inventory {
            Store::new()
        } else {
            Store::with_default_inventory()
        };

        if let Some(path) = &self.inventory_csv {
            if let Err(err) = store.load_inventory_csv(path) {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "startup inventory not loaded; keeping opening catalog"
                );
            }
        }
        store
    }
}

fn parse_flag(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Invalid {
            var,
            reason: format!("'{other}' is not a boolean"),
        }),
    }
}
