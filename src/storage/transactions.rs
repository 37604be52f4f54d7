//! Transaction repository
//!
//! Transactions are listed by date; same-day transactions keep the order
//! they were entered in.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::error::FolioError;
use crate::models::{SecurityId, Transaction, TransactionId};

use super::repository::{Record, RecordRepository};

impl Record for Transaction {
    type Id = TransactionId;
    const COLLECTION: &'static str = "transactions";

    fn id(&self) -> TransactionId {
        self.id
    }

    fn compare(a: &Self, b: &Self) -> Ordering {
        a.date.cmp(&b.date)
    }
}

pub type TransactionRepository = RecordRepository<Transaction>;

impl RecordRepository<Transaction> {
    /// Transactions of one security, oldest first
    pub fn get_by_security(&self, security_id: SecurityId) -> Result<Vec<Transaction>, FolioError> {
        self.filter(|t| t.security_id == security_id)
    }

    /// Transactions dated within `[start, end]`, oldest first
    pub fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, FolioError> {
        self.filter(|t| t.date >= start && t.date <= end)
    }

    pub fn has_security(&self, security_id: SecurityId) -> Result<bool, FolioError> {
        self.any(|t| t.security_id == security_id)
    }
}
