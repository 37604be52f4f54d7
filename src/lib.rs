//! folio - Terminal-based investment portfolio tracker
//!
//! This library values a personal investment portfolio from a history of
//! purchases, sales, prices, dividends, exchange rates and cash movements.
//! Holdings are valued with average-cost accounting, in a single home
//! currency.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (securities, transactions, prices, etc.)
//! - `valuation`: Time series lookups, cost basis, currency conversion,
//!   snapshots, the cash ledger and stock splits
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `display`: Terminal table formatting
//! - `export`: CSV, JSON and YAML export
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use folio::config::{paths::FolioPaths, settings::Settings};
//! use folio::services::PortfolioService;
//! use folio::storage::Storage;
//! use folio::valuation::SnapshotOptions;
//!
//! let paths = FolioPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//!
//! let portfolio = PortfolioService::new(&storage, &settings.home_currency);
//! let snapshot = portfolio.snapshot(&SnapshotOptions::new(today))?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;
pub mod valuation;

pub use error::{FolioError, FolioResult};
