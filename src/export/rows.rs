//! Flat, serializable views of valuation results
//!
//! Export formats share these shapes so a CSV row and a JSON object carry
//! the same fields under the same names.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::Money;
use crate::valuation::{CashCategory, CashLedger, Holding, Snapshot};

/// One holding, flattened
#[derive(Debug, Clone, Serialize)]
pub struct HoldingRow {
    pub code: String,
    pub name: String,
    pub currency: String,
    pub quantity: Decimal,
    pub average_unit_cost: Option<Money>,
    pub current_price: Money,
    pub market_value: Money,
    pub cost: Money,
    pub dividends: Money,
    pub gain: Money,
    pub return_pct: Option<Decimal>,
}

impl From<&Holding> for HoldingRow {
    fn from(h: &Holding) -> Self {
        Self {
            code: h.security.code.clone(),
            name: h.security.name.clone(),
            currency: h.security.currency.clone(),
            quantity: h.quantity.normalize(),
            average_unit_cost: h.average_unit_cost,
            current_price: h.current_price,
            market_value: h.market_value,
            cost: h.cost,
            dividends: h.total_dividends,
            gain: h.gain,
            return_pct: h.return_pct,
        }
    }
}

/// A security left out of the snapshot
#[derive(Debug, Clone, Serialize)]
pub struct SkippedRow {
    pub code: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SnapshotTotals {
    pub market_value: Money,
    pub cost: Money,
    pub dividends: Money,
    pub gain: Money,
    pub return_pct: Option<Decimal>,
}

/// A whole snapshot, ready to serialize
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotExport {
    pub as_of: NaiveDate,
    pub home_currency: String,
    pub holdings: Vec<HoldingRow>,
    pub totals: SnapshotTotals,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedRow>,
}

impl From<&Snapshot> for SnapshotExport {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            as_of: snapshot.as_of,
            home_currency: snapshot.home_currency.clone(),
            holdings: snapshot.holdings.iter().map(HoldingRow::from).collect(),
            totals: SnapshotTotals {
                market_value: snapshot.total_market_value(),
                cost: snapshot.total_cost(),
                dividends: snapshot.total_dividends(),
                gain: snapshot.total_gain(),
                return_pct: snapshot.total_return_pct(),
            },
            skipped: snapshot
                .failures
                .iter()
                .map(|f| SkippedRow {
                    code: f.security.code.clone(),
                    reason: f.error.to_string(),
                })
                .collect(),
        }
    }
}

/// One ledger line with the balance after it
#[derive(Debug, Clone, Serialize)]
pub struct LedgerRow {
    pub date: NaiveDate,
    pub category: CashCategory,
    pub amount: Money,
    pub balance: Money,
    pub memo: String,
}

impl LedgerRow {
    pub fn from_ledger(ledger: &CashLedger) -> Vec<Self> {
        ledger
            .running_balances()
            .into_iter()
            .map(|(entry, balance)| Self {
                date: entry.date,
                category: entry.category,
                amount: entry.amount,
                balance,
                memo: entry.memo.clone(),
            })
            .collect()
    }
}
