//! User settings for folio
//!
//! Manages user preferences: the home (reporting) currency, how prices are
//! looked up for valuations, what happens when a single security cannot be
//! valued, and the most recently used entry date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::paths::FolioPaths;
use crate::error::FolioError;
use crate::valuation::{FailurePolicy, LookupMode};

/// User settings for folio
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency all valuations are reported in
    #[serde(default = "default_home_currency")]
    pub home_currency: String,

    /// Date format preference (strftime format) for display
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Price lookup used by `portfolio` when no flag overrides it
    #[serde(default)]
    pub price_lookup: LookupMode,

    /// What a snapshot does when one security cannot be valued
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Date of the most recent entry, offered as the default for the next one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_entry_date: Option<NaiveDate>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_home_currency() -> String {
    "EUR".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            home_currency: default_home_currency(),
            date_format: default_date_format(),
            price_lookup: LookupMode::default(),
            failure_policy: FailurePolicy::default(),
            last_entry_date: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &FolioPaths) -> Result<Self, FolioError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| FolioError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FolioError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FolioPaths) -> Result<(), FolioError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FolioError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| FolioError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// The default date for a new entry: the last one used, else `today`
    pub fn default_entry_date(&self, today: NaiveDate) -> NaiveDate {
        self.last_entry_date.unwrap_or(today)
    }

    /// Remember `date` as the most recently used entry date
    pub fn remember_entry_date(&mut self, date: NaiveDate) {
        self.last_entry_date = Some(date);
    }
}
