//! Currency service
//!
//! Manages foreign currencies and their exchange rates into the home
//! currency. The home currency itself never needs a record.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{FolioError, FolioResult};
use crate::models::{Currency, CurrencyId, ExchangeRate, RateId};
use crate::storage::Storage;

/// Service for currency and exchange rate management
pub struct CurrencyService<'a> {
    storage: &'a Storage,
}

impl<'a> CurrencyService<'a> {
    /// Create a new currency service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new currency
    pub fn create(&self, code: &str, name: &str) -> FolioResult<Currency> {
        let currency = Currency::new(code, name);
        currency.validate().map_err(FolioError::Validation)?;

        if self.storage.currencies.get_by_code(&currency.code)?.is_some() {
            return Err(FolioError::Duplicate {
                entity_type: "Currency",
                identifier: currency.code.clone(),
            });
        }

        self.storage.currencies.upsert(currency.clone())?;
        self.storage.currencies.save()?;

        tracing::info!(code = %currency.code, "created currency");
        Ok(currency)
    }

    /// Find a currency by code (case-insensitive)
    pub fn find(&self, code: &str) -> FolioResult<Option<Currency>> {
        self.storage.currencies.get_by_code(code)
    }

    /// Find a currency by code, failing when there is none
    pub fn require(&self, code: &str) -> FolioResult<Currency> {
        self.find(code)?
            .ok_or_else(|| FolioError::currency_not_found(code.trim().to_uppercase()))
    }

    /// List all currencies, by code
    pub fn list(&self) -> FolioResult<Vec<Currency>> {
        self.storage.currencies.get_all()
    }

    /// Delete a currency and its rates; refused while a security trades in it
    pub fn delete(&self, id: CurrencyId) -> FolioResult<Currency> {
        let currency = self
            .storage
            .currencies
            .get(id)?
            .ok_or_else(|| FolioError::currency_not_found(id.to_string()))?;

        if self
            .storage
            .securities
            .any(|s| s.currency.eq_ignore_ascii_case(&currency.code))?
        {
            return Err(FolioError::Validation(format!(
                "{} is still the trading currency of a security",
                currency.code
            )));
        }

        let removed = self.storage.rates.delete_where(|r| r.currency_id == id)?;
        self.storage.currencies.delete(id)?;
        self.storage.rates.save()?;
        self.storage.currencies.save()?;

        tracing::info!(code = %currency.code, rates = removed, "deleted currency");
        Ok(currency)
    }

    /// Record the rate of one unit of `currency_id` in the home currency
    pub fn add_rate(
        &self,
        currency_id: CurrencyId,
        date: NaiveDate,
        rate: Decimal,
    ) -> FolioResult<ExchangeRate> {
        let currency = self
            .storage
            .currencies
            .get(currency_id)?
            .ok_or_else(|| FolioError::currency_not_found(currency_id.to_string()))?;

        let record = ExchangeRate::new(currency_id, date, rate);
        record.validate().map_err(FolioError::Validation)?;

        self.storage.rates.upsert(record.clone())?;
        self.storage.rates.save()?;

        tracing::info!(currency = %currency.code, %date, %rate, "recorded exchange rate");
        Ok(record)
    }

    /// Rate history of a currency, oldest first
    pub fn rates(&self, currency_id: CurrencyId) -> FolioResult<Vec<ExchangeRate>> {
        self.storage.rates.get_by_currency(currency_id)
    }

    /// Delete one exchange rate
    pub fn delete_rate(&self, identifier: &str) -> FolioResult<ExchangeRate> {
        let rate = super::resolve_record(&self.storage.rates, identifier, "Exchange rate")?;
        self.delete_rate_by_id(rate.id)?;
        Ok(rate)
    }

    fn delete_rate_by_id(&self, id: RateId) -> FolioResult<()> {
        self.storage.rates.delete(id)?;
        self.storage.rates.save()
    }
}
