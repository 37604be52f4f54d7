//! Price repository

use std::cmp::Ordering;

use crate::error::FolioError;
use crate::models::{Price, PriceId, SecurityId};

use super::repository::{Record, RecordRepository};

impl Record for Price {
    type Id = PriceId;
    const COLLECTION: &'static str = "prices";

    fn id(&self) -> PriceId {
        self.id
    }

    fn compare(a: &Self, b: &Self) -> Ordering {
        a.date.cmp(&b.date)
    }
}

pub type PriceRepository = RecordRepository<Price>;

impl RecordRepository<Price> {
    /// Price history of one security, oldest first
    pub fn get_by_security(&self, security_id: SecurityId) -> Result<Vec<Price>, FolioError> {
        self.filter(|p| p.security_id == security_id)
    }

    pub fn has_security(&self, security_id: SecurityId) -> Result<bool, FolioError> {
        self.any(|p| p.security_id == security_id)
    }
}
