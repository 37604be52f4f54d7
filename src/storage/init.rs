//! Storage initialization
//!
//! Handles first-run setup: directories, settings and empty data files.

use std::collections::HashMap;
use std::path::Path;

use crate::config::paths::FolioPaths;
use crate::config::settings::Settings;
use crate::error::FolioError;
use crate::models::security::is_currency_code;

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Existing settings and data files are left untouched, so running this
/// twice is harmless. Returns the settings in effect afterwards.
pub fn initialize_storage(paths: &FolioPaths, home_currency: &str) -> Result<Settings, FolioError> {
    let home_currency = home_currency.trim().to_uppercase();
    if !is_currency_code(&home_currency) {
        return Err(FolioError::Validation(format!(
            "Invalid home currency '{}': expected three letters",
            home_currency
        )));
    }

    paths.ensure_directories()?;

    let settings = if paths.settings_file().exists() {
        Settings::load_or_create(paths)?
    } else {
        let settings = Settings {
            home_currency,
            ..Settings::default()
        };
        settings.save(paths)?;
        tracing::info!(path = %paths.settings_file().display(), "created settings");
        settings
    };

    for (path, collection) in [
        (paths.securities_file(), "securities"),
        (paths.transactions_file(), "transactions"),
        (paths.prices_file(), "prices"),
        (paths.dividends_file(), "dividends"),
        (paths.currencies_file(), "currencies"),
        (paths.rates_file(), "rates"),
        (paths.cash_file(), "cash"),
    ] {
        create_empty_collection(&path, collection)?;
    }

    Ok(settings)
}

fn create_empty_collection(path: &Path, collection: &str) -> Result<(), FolioError> {
    if path.exists() {
        return Ok(());
    }
    let mut data: HashMap<&str, Vec<()>> = HashMap::new();
    data.insert(collection, Vec::new());
    write_json_atomic(path, &data)
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &FolioPaths) -> bool {
    !paths.is_initialized()
}
