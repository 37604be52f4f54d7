//! YAML Export functionality
//!
//! Human-readable exports: the full database for backup, and snapshots or
//! the ledger for reading alongside other notes.

use std::io::Write;

use crate::error::{FolioError, FolioResult};
use crate::storage::Storage;
use crate::valuation::{CashLedger, Snapshot};

use super::export_error;
use super::json::FullExport;
use super::rows::{LedgerRow, SnapshotExport};

/// Export the full database to YAML format
pub fn export_full_yaml<W: Write>(
    storage: &Storage,
    home_currency: &str,
    writer: &mut W,
) -> FolioResult<()> {
    let export = FullExport::from_storage(storage, home_currency)?;
    export.validate().map_err(FolioError::Export)?;

    writeln!(writer, "# folio full database export").map_err(export_error)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_error)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_error)?;
    writeln!(writer).map_err(export_error)?;

    serde_yaml::to_writer(writer, &export).map_err(export_error)?;

    Ok(())
}

/// Export a snapshot with its totals
pub fn export_snapshot_yaml<W: Write>(snapshot: &Snapshot, writer: &mut W) -> FolioResult<()> {
    serde_yaml::to_writer(writer, &SnapshotExport::from(snapshot)).map_err(export_error)
}

/// Export the cash ledger with a running balance on each line
pub fn export_ledger_yaml<W: Write>(ledger: &CashLedger, writer: &mut W) -> FolioResult<()> {
    serde_yaml::to_writer(writer, &LedgerRow::from_ledger(ledger)).map_err(export_error)
}
