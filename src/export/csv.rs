//! CSV export functionality
//!
//! One row per holding or ledger line. Amounts are written at full
//! precision so the file can be re-used for further calculation.

use std::io::Write;

use crate::error::FolioResult;
use crate::valuation::{CashLedger, Snapshot};

use super::export_error;
use super::rows::{HoldingRow, LedgerRow};

/// Export a snapshot's holdings to CSV
pub fn export_snapshot_csv<W: Write>(snapshot: &Snapshot, writer: W) -> FolioResult<()> {
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record([
        "Code",
        "Name",
        "Currency",
        "Quantity",
        "Average Cost",
        "Price",
        "Market Value",
        "Cost",
        "Dividends",
        "Gain",
        "Return %",
    ])
    .map_err(export_error)?;

    for holding in &snapshot.holdings {
        let row = HoldingRow::from(holding);
        csv.write_record([
            row.code,
            row.name,
            row.currency,
            row.quantity.to_string(),
            row.average_unit_cost
                .map(|c| c.amount().to_string())
                .unwrap_or_default(),
            row.current_price.amount().to_string(),
            row.market_value.amount().to_string(),
            row.cost.amount().to_string(),
            row.dividends.amount().to_string(),
            row.gain.amount().to_string(),
            row.return_pct.map(|p| p.to_string()).unwrap_or_default(),
        ])
        .map_err(export_error)?;
    }

    csv.flush().map_err(export_error)?;
    Ok(())
}

/// Export the cash ledger, with running balance, to CSV
pub fn export_ledger_csv<W: Write>(ledger: &CashLedger, writer: W) -> FolioResult<()> {
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(["Date", "Type", "Amount", "Balance", "Memo"])
        .map_err(export_error)?;

    for row in LedgerRow::from_ledger(ledger) {
        csv.write_record([
            row.date.format("%Y-%m-%d").to_string(),
            row.category.to_string(),
            row.amount.amount().to_string(),
            row.balance.amount().to_string(),
            row.memo,
        ])
        .map_err(export_error)?;
    }

    csv.flush().map_err(export_error)?;
    Ok(())
}
