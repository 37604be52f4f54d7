//! Cash entry repository

use std::cmp::Ordering;

use crate::models::{CashEntry, CashEntryId};

use super::repository::{Record, RecordRepository};

impl Record for CashEntry {
    type Id = CashEntryId;
    const COLLECTION: &'static str = "cash";

    fn id(&self) -> CashEntryId {
        self.id
    }

    fn compare(a: &Self, b: &Self) -> Ordering {
        a.date.cmp(&b.date)
    }
}

pub type CashRepository = RecordRepository<CashEntry>;
