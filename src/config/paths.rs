//! Path management for folio
//!
//! Provides XDG-compliant path resolution for configuration and data files.
//!
//! ## Path Resolution Order
//!
//! 1. `FOLIO_CLI_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`$XDG_CONFIG_HOME/folio-cli`,
//!    `~/.config/folio-cli`, or `%APPDATA%\folio-cli`)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::FolioError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "FOLIO_CLI_DATA_DIR";

/// Manages all paths used by folio
#[derive(Debug, Clone)]
pub struct FolioPaths {
    /// Base directory for all folio data
    base_dir: PathBuf,
}

impl FolioPaths {
    /// Create a new FolioPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, FolioError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create FolioPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn securities_file(&self) -> PathBuf {
        self.data_dir().join("securities.json")
    }

    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    pub fn prices_file(&self) -> PathBuf {
        self.data_dir().join("prices.json")
    }

    pub fn dividends_file(&self) -> PathBuf {
        self.data_dir().join("dividends.json")
    }

    /// Get the path to currencies.json (currency definitions)
    pub fn currencies_file(&self) -> PathBuf {
        self.data_dir().join("currencies.json")
    }

    /// Get the path to rates.json (exchange rates per currency)
    pub fn rates_file(&self) -> PathBuf {
        self.data_dir().join("rates.json")
    }

    /// Get the path to cash.json (manual deposits and withdrawals)
    pub fn cash_file(&self) -> PathBuf {
        self.data_dir().join("cash.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), FolioError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FolioError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| FolioError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if folio has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, FolioError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| FolioError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("folio-cli"))
}
