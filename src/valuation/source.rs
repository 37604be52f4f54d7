//! Read access to stored records
//!
//! Valuation never touches files directly; it reads through this trait so
//! that it can run against the on-disk store or an in-memory fixture.

use crate::error::FolioResult;
use crate::models::{
    CashEntry, Currency, CurrencyId, Dividend, ExchangeRate, Price, Security, SecurityId,
    Transaction,
};

/// The records a valuation needs
pub trait RecordSource {
    /// All securities, in no particular order
    fn list_securities(&self) -> FolioResult<Vec<Security>>;

    fn get_security(&self, id: SecurityId) -> FolioResult<Option<Security>>;

    fn list_transactions(&self, security_id: SecurityId) -> FolioResult<Vec<Transaction>>;

    fn list_prices(&self, security_id: SecurityId) -> FolioResult<Vec<Price>>;

    fn list_dividends(&self, security_id: SecurityId) -> FolioResult<Vec<Dividend>>;

    /// Case-insensitive lookup by ISO code
    fn get_currency_by_code(&self, code: &str) -> FolioResult<Option<Currency>>;

    fn list_exchange_rates(&self, currency_id: CurrencyId) -> FolioResult<Vec<ExchangeRate>>;

    fn list_cash_entries(&self) -> FolioResult<Vec<CashEntry>>;
}
