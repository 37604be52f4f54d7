//! Storage layer for folio
//!
//! Provides JSON file storage with atomic writes. Each record kind lives in
//! its own file under the data directory and is loaded fully into memory.

pub mod cash;
pub mod currencies;
pub mod dividends;
pub mod file_io;
pub mod init;
pub mod prices;
pub mod repository;
pub mod securities;
pub mod transactions;

pub use cash::CashRepository;
pub use currencies::{CurrencyRepository, RateRepository};
pub use dividends::DividendRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use prices::PriceRepository;
pub use repository::{Record, RecordRepository};
pub use securities::SecurityRepository;
pub use transactions::TransactionRepository;

use crate::config::paths::FolioPaths;
use crate::error::FolioError;
use crate::models::{
    CashEntry, Currency, CurrencyId, Dividend, ExchangeRate, Price, Security, SecurityId,
    Transaction,
};
use crate::valuation::RecordSource;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: FolioPaths,
    pub securities: SecurityRepository,
    pub transactions: TransactionRepository,
    pub prices: PriceRepository,
    pub dividends: DividendRepository,
    pub currencies: CurrencyRepository,
    pub rates: RateRepository,
    pub cash: CashRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: FolioPaths) -> Result<Self, FolioError> {
        paths.ensure_directories()?;

        Ok(Self {
            securities: SecurityRepository::new(paths.securities_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            prices: PriceRepository::new(paths.prices_file()),
            dividends: DividendRepository::new(paths.dividends_file()),
            currencies: CurrencyRepository::new(paths.currencies_file()),
            rates: RateRepository::new(paths.rates_file()),
            cash: CashRepository::new(paths.cash_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &FolioPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), FolioError> {
        self.securities.load()?;
        self.transactions.load()?;
        self.prices.load()?;
        self.dividends.load()?;
        self.currencies.load()?;
        self.rates.load()?;
        self.cash.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), FolioError> {
        self.securities.save()?;
        self.transactions.save()?;
        self.prices.save()?;
        self.dividends.save()?;
        self.currencies.save()?;
        self.rates.save()?;
        self.cash.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}

impl RecordSource for Storage {
    fn list_securities(&self) -> Result<Vec<Security>, FolioError> {
        self.securities.get_all()
    }

    fn get_security(&self, id: SecurityId) -> Result<Option<Security>, FolioError> {
        self.securities.get(id)
    }

    fn list_transactions(&self, security_id: SecurityId) -> Result<Vec<Transaction>, FolioError> {
        self.transactions.get_by_security(security_id)
    }

    fn list_prices(&self, security_id: SecurityId) -> Result<Vec<Price>, FolioError> {
        self.prices.get_by_security(security_id)
    }

    fn list_dividends(&self, security_id: SecurityId) -> Result<Vec<Dividend>, FolioError> {
        self.dividends.get_by_security(security_id)
    }

    fn get_currency_by_code(&self, code: &str) -> Result<Option<Currency>, FolioError> {
        self.currencies.get_by_code(code)
    }

    fn list_exchange_rates(&self, currency_id: CurrencyId) -> Result<Vec<ExchangeRate>, FolioError> {
        self.rates.get_by_currency(currency_id)
    }

    fn list_cash_entries(&self) -> Result<Vec<CashEntry>, FolioError> {
        self.cash.get_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FolioPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_save_and_reload_through_record_source() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FolioPaths::with_base_dir(temp_dir.path().to_path_buf());
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();

        let security = Security::new("ACME", "Acme Corp", "EUR");
        {
            let storage = Storage::new(paths.clone()).unwrap();
            storage.securities.upsert(security.clone()).unwrap();
            storage
                .transactions
                .upsert(Transaction::trade(
                    security.id,
                    date,
                    dec!(1.25),
                    Money::new(dec!(10.125)),
                    Money::zero(),
                ))
                .unwrap();
            storage
                .cash
                .upsert(CashEntry::new(date, Money::from_cents(50000), "Deposit"))
                .unwrap();
            storage.save_all().unwrap();
        }

        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        assert_eq!(storage.list_securities().unwrap().len(), 1);
        let txns = storage.list_transactions(security.id).unwrap();
        assert_eq!(txns[0].quantity, dec!(1.25));
        assert_eq!(txns[0].amount, Money::new(dec!(10.125)));
        assert_eq!(storage.list_cash_entries().unwrap().len(), 1);
        assert!(storage.get_currency_by_code("USD").unwrap().is_none());
    }
}
