//! JSON Export functionality
//!
//! Snapshots, the cash ledger and price histories serialize directly. The
//! full export carries every stored record with schema versioning.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FolioError, FolioResult};
use crate::models::{
    CashEntry, Currency, Dividend, ExchangeRate, Money, Price, Security, Transaction,
};
use crate::storage::Storage;
use crate::valuation::{CashLedger, Snapshot};

use super::export_error;
use super::rows::{LedgerRow, SnapshotExport};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full database export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub home_currency: String,

    pub securities: Vec<Security>,
    pub transactions: Vec<Transaction>,
    pub prices: Vec<Price>,
    pub dividends: Vec<Dividend>,
    pub currencies: Vec<Currency>,
    pub rates: Vec<ExchangeRate>,
    pub cash: Vec<CashEntry>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub security_count: usize,
    pub transaction_count: usize,
    pub price_count: usize,
    pub dividend_count: usize,
    pub currency_count: usize,
    pub rate_count: usize,
    pub cash_entry_count: usize,

    /// Date range of transactions (earliest)
    pub earliest_transaction: Option<String>,

    /// Date range of transactions (latest)
    pub latest_transaction: Option<String>,
}

impl FullExport {
    /// Create a new full export from storage
    pub fn from_storage(storage: &Storage, home_currency: &str) -> FolioResult<Self> {
        let securities = storage.securities.get_all()?;
        let transactions = storage.transactions.get_all()?;
        let prices = storage.prices.get_all()?;
        let dividends = storage.dividends.get_all()?;
        let currencies = storage.currencies.get_all()?;
        let rates = storage.rates.get_all()?;
        let cash = storage.cash.get_all()?;

        let earliest_transaction = transactions
            .iter()
            .map(|t| t.date)
            .min()
            .map(|d| d.to_string());
        let latest_transaction = transactions
            .iter()
            .map(|t| t.date)
            .max()
            .map(|d| d.to_string());

        let metadata = ExportMetadata {
            security_count: securities.len(),
            transaction_count: transactions.len(),
            price_count: prices.len(),
            dividend_count: dividends.len(),
            currency_count: currencies.len(),
            rate_count: rates.len(),
            cash_entry_count: cash.len(),
            earliest_transaction,
            latest_transaction,
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            home_currency: home_currency.to_string(),
            securities,
            transactions,
            prices,
            dividends,
            currencies,
            rates,
            cash,
            metadata,
        })
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let security_ids: HashSet<_> = self.securities.iter().map(|s| s.id).collect();
        let currency_ids: HashSet<_> = self.currencies.iter().map(|c| c.id).collect();

        for txn in &self.transactions {
            if !security_ids.contains(&txn.security_id) {
                return Err(format!(
                    "Transaction {} references unknown security {}",
                    txn.id, txn.security_id
                ));
            }
        }

        for price in &self.prices {
            if !security_ids.contains(&price.security_id) {
                return Err(format!(
                    "Price {} references unknown security {}",
                    price.id, price.security_id
                ));
            }
        }

        for dividend in &self.dividends {
            if !security_ids.contains(&dividend.security_id) {
                return Err(format!(
                    "Dividend {} references unknown security {}",
                    dividend.id, dividend.security_id
                ));
            }
        }

        for rate in &self.rates {
            if !currency_ids.contains(&rate.currency_id) {
                return Err(format!(
                    "Rate {} references unknown currency {}",
                    rate.id, rate.currency_id
                ));
            }
        }

        Ok(())
    }
}

/// Export the full database to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    home_currency: &str,
    writer: &mut W,
    pretty: bool,
) -> FolioResult<()> {
    let export = FullExport::from_storage(storage, home_currency)?;
    export.validate().map_err(FolioError::Export)?;

    write_json(writer, &export, pretty)
}

/// Export a snapshot with its totals
pub fn export_snapshot_json<W: Write>(
    snapshot: &Snapshot,
    writer: &mut W,
    pretty: bool,
) -> FolioResult<()> {
    write_json(writer, &SnapshotExport::from(snapshot), pretty)
}

/// Export the cash ledger with a running balance on each line
pub fn export_ledger_json<W: Write>(
    ledger: &CashLedger,
    writer: &mut W,
    pretty: bool,
) -> FolioResult<()> {
    write_json(writer, &LedgerRow::from_ledger(ledger), pretty)
}

#[derive(Serialize)]
struct PriceHistory<'a> {
    code: &'a str,
    name: &'a str,
    currency: &'a str,
    prices: Vec<PricePoint<'a>>,
}

#[derive(Serialize)]
struct PricePoint<'a> {
    date: NaiveDate,
    price: Money,
    #[serde(skip_serializing_if = "str::is_empty")]
    comments: &'a str,
}

/// Export one security's price history, oldest first
pub fn export_price_history_json<W: Write>(
    security: &Security,
    prices: &[Price],
    writer: &mut W,
) -> FolioResult<()> {
    let mut points: Vec<PricePoint> = prices
        .iter()
        .filter(|p| p.security_id == security.id)
        .map(|p| PricePoint {
            date: p.date,
            price: p.price,
            comments: &p.comments,
        })
        .collect();
    points.sort_by_key(|p| p.date);

    let history = PriceHistory {
        code: &security.code,
        name: &security.name,
        currency: &security.currency,
        prices: points,
    };

    write_json(writer, &history, true)
}

fn write_json<W: Write, T: Serialize + ?Sized>(
    writer: &mut W,
    value: &T,
    pretty: bool,
) -> FolioResult<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, value)
    } else {
        serde_json::to_writer(&mut *writer, value)
    }
    .map_err(export_error)?;

    writeln!(writer).map_err(export_error)?;
    Ok(())
}
