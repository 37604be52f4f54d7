//! Dividend repository

use std::cmp::Ordering;

use crate::error::FolioError;
use crate::models::{Dividend, DividendId, SecurityId};

use super::repository::{Record, RecordRepository};

impl Record for Dividend {
    type Id = DividendId;
    const COLLECTION: &'static str = "dividends";

    fn id(&self) -> DividendId {
        self.id
    }

    fn compare(a: &Self, b: &Self) -> Ordering {
        a.date.cmp(&b.date)
    }
}

pub type DividendRepository = RecordRepository<Dividend>;

impl RecordRepository<Dividend> {
    /// Dividends paid by one security, oldest first
    pub fn get_by_security(&self, security_id: SecurityId) -> Result<Vec<Dividend>, FolioError> {
        self.filter(|d| d.security_id == security_id)
    }

    pub fn has_security(&self, security_id: SecurityId) -> Result<bool, FolioError> {
        self.any(|d| d.security_id == security_id)
    }
}
