//! Conversion of amounts into the home currency
//!
//! Each foreign currency has a series of exchange rates, read with a step
//! lookup: the rate entered most recently on or before the date applies.
//! A rate expresses one unit of the foreign currency in the home currency.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::time_series::{LookupMode, TimeSeries};
use crate::error::{FolioError, FolioResult};
use crate::models::{ExchangeRate, Money};

/// Converts foreign amounts into the home currency
#[derive(Debug, Clone)]
pub struct CurrencyConverter {
    home: String,
    rates: HashMap<String, TimeSeries>,
}

impl CurrencyConverter {
    pub fn new(home_currency: impl Into<String>) -> Self {
        Self {
            home: home_currency.into().trim().to_uppercase(),
            rates: HashMap::new(),
        }
    }

    /// Register (or replace) the rate series for a currency
    pub fn add_rates(&mut self, code: &str, rates: TimeSeries) {
        self.rates.insert(code.trim().to_uppercase(), rates);
    }

    /// Register a currency from its stored exchange rate records
    pub fn add_rate_records(&mut self, code: &str, records: &[ExchangeRate]) {
        let series = records.iter().map(|r| (r.date, r.rate)).collect();
        self.add_rates(code, series);
    }

    pub fn with_rates(mut self, code: &str, rates: TimeSeries) -> Self {
        self.add_rates(code, rates);
        self
    }

    pub fn home_currency(&self) -> &str {
        &self.home
    }

    pub fn is_home(&self, code: &str) -> bool {
        code.trim().eq_ignore_ascii_case(&self.home)
    }

    /// Whether `code` can be converted (the home currency always can)
    pub fn knows(&self, code: &str) -> bool {
        self.is_home(code) || self.rates.contains_key(&code.trim().to_uppercase())
    }

    /// Rate from `code` to the home currency on `date`
    ///
    /// The home currency converts at exactly one. Any other currency needs a
    /// registered rate series that has a value on `date`, otherwise the
    /// result is a `NotFound` error.
    pub fn rate_on(&self, code: &str, date: NaiveDate, mode: LookupMode) -> FolioResult<Decimal> {
        if self.is_home(code) {
            return Ok(Decimal::ONE);
        }

        let series = self
            .rates
            .get(&code.trim().to_uppercase())
            .ok_or_else(|| FolioError::currency_not_found(code.trim()))?;

        series.lookup(date, mode).ok_or_else(|| {
            tracing::debug!(currency = code, %date, "no exchange rate on or before date");
            FolioError::rate_not_found(format!("{} on {}", code.trim().to_uppercase(), date))
        })
    }

    /// `amount` in `code` expressed in the home currency on `date`
    pub fn value_in_home(&self, amount: Money, code: &str, date: NaiveDate) -> FolioResult<Money> {
        self.value_in_home_with(amount, code, date, LookupMode::Step)
    }

    /// Like [`value_in_home`](Self::value_in_home) with an explicit rate lookup
    pub fn value_in_home_with(
        &self,
        amount: Money,
        code: &str,
        date: NaiveDate,
        mode: LookupMode,
    ) -> FolioResult<Money> {
        Ok(amount * self.rate_on(code, date, mode)?)
    }
}
