//! Cash entry model
//!
//! Manual deposits and withdrawals, independent of security activity. The
//! amount is signed: positive for a deposit, negative for a withdrawal.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CashEntryId;
use super::money::Money;

/// Direction of a manual cash entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CashEntryType {
    Deposit,
    Withdrawal,
}

impl CashEntryType {
    /// Parse entry type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "deposit" | "dep" | "in" => Some(Self::Deposit),
            "withdrawal" | "withdraw" | "wd" | "out" => Some(Self::Withdrawal),
            _ => None,
        }
    }

    /// Apply this direction to an unsigned amount
    pub fn signed(&self, amount: Money) -> Money {
        match self {
            Self::Deposit => amount.abs(),
            Self::Withdrawal => -amount.abs(),
        }
    }
}

impl fmt::Display for CashEntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit => write!(f, "Deposit"),
            Self::Withdrawal => write!(f, "Withdrawal"),
        }
    }
}

/// A manual deposit or withdrawal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashEntry {
    pub id: CashEntryId,

    pub date: NaiveDate,

    /// Signed amount: + deposit, - withdrawal
    pub amount: Money,

    #[serde(default)]
    pub memo: String,

    pub created_at: DateTime<Utc>,
}

impl CashEntry {
    pub fn new(date: NaiveDate, amount: Money, memo: impl Into<String>) -> Self {
        Self {
            id: CashEntryId::new(),
            date,
            amount,
            memo: memo.into(),
            created_at: Utc::now(),
        }
    }

    pub fn entry_type(&self) -> CashEntryType {
        if self.amount.is_negative() {
            CashEntryType::Withdrawal
        } else {
            CashEntryType::Deposit
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.amount.is_zero() {
            return Err("Cash amount cannot be zero".into());
        }
        Ok(())
    }
}
