//! Currency and exchange rate repositories
//!
//! Currency definitions and their rates live in separate files
//! (`currencies.json`, `rates.json`); rates reference currencies by ID.

use std::cmp::Ordering;

use crate::error::FolioError;
use crate::models::{Currency, CurrencyId, ExchangeRate, RateId};

use super::repository::{Record, RecordRepository};

impl Record for Currency {
    type Id = CurrencyId;
    const COLLECTION: &'static str = "currencies";

    fn id(&self) -> CurrencyId {
        self.id
    }

    fn compare(a: &Self, b: &Self) -> Ordering {
        a.code.cmp(&b.code)
    }
}

impl Record for ExchangeRate {
    type Id = RateId;
    const COLLECTION: &'static str = "rates";

    fn id(&self) -> RateId {
        self.id
    }

    fn compare(a: &Self, b: &Self) -> Ordering {
        a.date.cmp(&b.date)
    }
}

pub type CurrencyRepository = RecordRepository<Currency>;
pub type RateRepository = RecordRepository<ExchangeRate>;

impl RecordRepository<Currency> {
    /// Get a currency by code (case-insensitive)
    pub fn get_by_code(&self, code: &str) -> Result<Option<Currency>, FolioError> {
        let code = code.trim();
        self.find(|c| c.code.eq_ignore_ascii_case(code))
    }
}

impl RecordRepository<ExchangeRate> {
    /// Rates of one currency, oldest first
    pub fn get_by_currency(&self, currency_id: CurrencyId) -> Result<Vec<ExchangeRate>, FolioError> {
        self.filter(|r| r.currency_id == currency_id)
    }
}
