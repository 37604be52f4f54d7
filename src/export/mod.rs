//! Export module for folio
//!
//! Snapshots and the cash ledger export to CSV, JSON and YAML. The whole
//! database exports to JSON or YAML, and a single security's price history
//! to JSON.

pub mod csv;
pub mod json;
pub mod rows;
pub mod yaml;

pub use self::csv::{export_ledger_csv, export_snapshot_csv};
pub use json::{
    export_full_json, export_ledger_json, export_price_history_json, export_snapshot_json,
    FullExport, EXPORT_SCHEMA_VERSION,
};
pub use rows::{HoldingRow, LedgerRow, SnapshotExport};
pub use yaml::{export_full_yaml, export_ledger_yaml, export_snapshot_yaml};

use std::fmt;

use crate::error::FolioError;

pub(crate) fn export_error(e: impl fmt::Display) -> FolioError {
    FolioError::Export(e.to_string())
}
