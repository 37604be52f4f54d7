//! Cash ledger: every cash movement in date order
//!
//! Three kinds of record move cash: explicit deposits and withdrawals,
//! trades (a purchase spends its amount, a sale receives it) and dividends.
//! The ledger merges them into one list sorted by date, keeping the order
//! they were gathered in for entries on the same day.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use super::source::RecordSource;
use crate::error::FolioResult;
use crate::models::{CashEntry, CashEntryType, Dividend, Money, Security, Transaction};

/// Where a ledger line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CashCategory {
    Deposit,
    Withdrawal,
    Buy,
    Sell,
    Split,
    Dividend,
}

impl fmt::Display for CashCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Deposit => "Deposit",
            Self::Withdrawal => "Withdrawal",
            Self::Buy => "Buy",
            Self::Sell => "Sell",
            Self::Split => "Split",
            Self::Dividend => "Dividend",
        };
        f.pad(label)
    }
}

/// One movement of cash; positive amounts flow in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CashLedgerEntry {
    pub date: NaiveDate,
    pub amount: Money,
    pub category: CashCategory,
    pub memo: String,
}

impl CashLedgerEntry {
    pub fn from_cash_entry(entry: &CashEntry) -> Self {
        let category = match entry.entry_type() {
            CashEntryType::Deposit => CashCategory::Deposit,
            CashEntryType::Withdrawal => CashCategory::Withdrawal,
        };
        Self {
            date: entry.date,
            amount: entry.amount,
            category,
            memo: entry.memo.clone(),
        }
    }

    /// Purchases spend their amount, sales receive it, splits move nothing
    pub fn from_transaction(txn: &Transaction, security: &Security) -> Self {
        let (amount, category) = if txn.is_split_adjustment() {
            (Money::zero(), CashCategory::Split)
        } else if txn.is_purchase() {
            (-txn.amount, CashCategory::Buy)
        } else {
            (txn.amount, CashCategory::Sell)
        };

        Self {
            date: txn.date,
            amount,
            category,
            memo: format!(
                "{} {} {}",
                txn.type_label(),
                txn.quantity.normalize(),
                security.name
            ),
        }
    }

    pub fn from_dividend(dividend: &Dividend, security: &Security) -> Self {
        Self {
            date: dividend.date,
            amount: dividend.amount,
            category: CashCategory::Dividend,
            memo: format!("Dividends on {}", security.name),
        }
    }
}

/// Cash movements sorted by date
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct CashLedger {
    entries: Vec<CashLedgerEntry>,
}

impl CashLedger {
    /// Sort `entries` by date; same-day entries keep their relative order
    pub fn new(mut entries: Vec<CashLedgerEntry>) -> Self {
        entries.sort_by_key(|e| e.date);
        Self { entries }
    }

    pub fn entries(&self) -> &[CashLedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries dated on or before `date`
    pub fn entries_until(&self, date: NaiveDate) -> &[CashLedgerEntry] {
        let end = self.entries.partition_point(|e| e.date <= date);
        &self.entries[..end]
    }

    /// Cash balance at the end of `date`
    pub fn balance_as_of(&self, date: NaiveDate) -> Money {
        self.entries_until(date).iter().map(|e| e.amount).sum()
    }

    /// Balance of every entry in the ledger
    pub fn total(&self) -> Money {
        self.entries.iter().map(|e| e.amount).sum()
    }

    /// Each entry paired with the balance after it
    pub fn running_balances(&self) -> Vec<(&CashLedgerEntry, Money)> {
        let mut balance = Money::zero();
        self.entries
            .iter()
            .map(|e| {
                balance += e.amount;
                (e, balance)
            })
            .collect()
    }
}

/// Gather every cash movement in `source` into a ledger
///
/// Cash entries come first, then each security's transactions and dividends
/// with securities taken in code order.
pub fn build_cash_ledger<S: RecordSource + ?Sized>(source: &S) -> FolioResult<CashLedger> {
    let mut lines: Vec<CashLedgerEntry> = source
        .list_cash_entries()?
        .iter()
        .map(CashLedgerEntry::from_cash_entry)
        .collect();

    let mut securities = source.list_securities()?;
    securities.sort_by(|a, b| a.code.cmp(&b.code));

    for security in &securities {
        let mut transactions = source.list_transactions(security.id)?;
        transactions.sort_by_key(|t| t.date);
        lines.extend(
            transactions
                .iter()
                .map(|t| CashLedgerEntry::from_transaction(t, security)),
        );
    }

    for security in &securities {
        let mut dividends = source.list_dividends(security.id)?;
        dividends.sort_by_key(|d| d.date);
        lines.extend(
            dividends
                .iter()
                .map(|d| CashLedgerEntry::from_dividend(d, security)),
        );
    }

    let ledger = CashLedger::new(lines);
    tracing::debug!(entries = ledger.len(), "built cash ledger");
    Ok(ledger)
}

/// Cash balance at the end of `date`
pub fn balance_as_of(ledger: &CashLedger, date: NaiveDate) -> Money {
    ledger.balance_as_of(date)
}
