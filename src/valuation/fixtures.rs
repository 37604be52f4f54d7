//! In-memory record source for unit tests

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::source::RecordSource;
use crate::error::FolioResult;
use crate::models::{
    CashEntry, Currency, CurrencyId, Dividend, ExchangeRate, Money, Price, Security, SecurityId,
    Transaction,
};

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[derive(Default)]
pub struct MemorySource {
    pub securities: Vec<Security>,
    pub transactions: Vec<Transaction>,
    pub prices: Vec<Price>,
    pub dividends: Vec<Dividend>,
    pub currencies: Vec<Currency>,
    pub rates: Vec<ExchangeRate>,
    pub cash: Vec<CashEntry>,
}

impl MemorySource {
    pub fn security(&mut self, code: &str, name: &str, currency: &str) -> SecurityId {
        let security = Security::new(code, name, currency);
        let id = security.id;
        self.securities.push(security);
        id
    }

    pub fn trade(&mut self, id: SecurityId, date: &str, qty: Decimal, amount: Decimal) {
        self.transactions
            .push(Transaction::trade(id, d(date), qty, Money::new(amount), Money::zero()));
    }

    pub fn price(&mut self, id: SecurityId, date: &str, price: Decimal) {
        self.prices.push(Price::new(id, d(date), Money::new(price)));
    }

    pub fn dividend(&mut self, id: SecurityId, date: &str, amount: Decimal) {
        self.dividends.push(Dividend::new(id, d(date), Money::new(amount)));
    }

    pub fn rate(&mut self, code: &str, date: &str, rate: Decimal) {
        let currency_id = match self.currencies.iter().find(|c| c.code == code) {
            Some(c) => c.id,
            None => {
                let currency = Currency::new(code, code);
                let id = currency.id;
                self.currencies.push(currency);
                id
            }
        };
        self.rates.push(ExchangeRate::new(currency_id, d(date), rate));
    }

    pub fn cash(&mut self, date: &str, amount: Decimal, memo: &str) {
        self.cash.push(CashEntry::new(d(date), Money::new(amount), memo));
    }
}

impl RecordSource for MemorySource {
    fn list_securities(&self) -> FolioResult<Vec<Security>> {
        Ok(self.securities.clone())
    }

    fn get_security(&self, id: SecurityId) -> FolioResult<Option<Security>> {
        Ok(self.securities.iter().find(|s| s.id == id).cloned())
    }

    fn list_transactions(&self, security_id: SecurityId) -> FolioResult<Vec<Transaction>> {
        Ok(self
            .transactions
            .iter()
            .filter(|t| t.security_id == security_id)
            .cloned()
            .collect())
    }

    fn list_prices(&self, security_id: SecurityId) -> FolioResult<Vec<Price>> {
        Ok(self
            .prices
            .iter()
            .filter(|p| p.security_id == security_id)
            .cloned()
            .collect())
    }

    fn list_dividends(&self, security_id: SecurityId) -> FolioResult<Vec<Dividend>> {
        Ok(self
            .dividends
            .iter()
            .filter(|p| p.security_id == security_id)
            .cloned()
            .collect())
    }

    fn get_currency_by_code(&self, code: &str) -> FolioResult<Option<Currency>> {
        Ok(self
            .currencies
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
            .cloned())
    }

    fn list_exchange_rates(&self, currency_id: CurrencyId) -> FolioResult<Vec<ExchangeRate>> {
        Ok(self
            .rates
            .iter()
            .filter(|r| r.currency_id == currency_id)
            .cloned()
            .collect())
    }

    fn list_cash_entries(&self) -> FolioResult<Vec<CashEntry>> {
        Ok(self.cash.clone())
    }
}
