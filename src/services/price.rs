//! Price service
//!
//! Records unit prices. A price can also be entered as the total value of
//! the position (input ending in `!`), in which case it is divided by the
//! units held on that date.

use chrono::NaiveDate;

use crate::error::{FolioError, FolioResult};
use crate::models::{Money, Price, PriceId, SecurityId};
use crate::storage::Storage;
use crate::valuation::units_held;

/// A price as typed by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceInput {
    /// Price of one unit
    Unit(Money),
    /// Value of the whole position
    Total(Money),
}

impl PriceInput {
    /// Parse `"12.34"` as a unit price and `"1234.00!"` as a position total
    pub fn parse(s: &str) -> FolioResult<Self> {
        let s = s.trim();
        let (text, total) = match s.strip_suffix('!') {
            Some(stripped) => (stripped, true),
            None => (s, false),
        };

        let amount = Money::parse(text).map_err(|e| FolioError::Validation(e.to_string()))?;
        Ok(if total {
            Self::Total(amount)
        } else {
            Self::Unit(amount)
        })
    }
}

/// Service for price management
pub struct PriceService<'a> {
    storage: &'a Storage,
}

impl<'a> PriceService<'a> {
    /// Create a new price service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a price for a security on a date
    pub fn record(
        &self,
        security_id: SecurityId,
        date: NaiveDate,
        input: PriceInput,
        comments: &str,
    ) -> FolioResult<Price> {
        let security = self
            .storage
            .securities
            .get(security_id)?
            .ok_or_else(|| FolioError::security_not_found(security_id.to_string()))?;

        let unit_price = match input {
            PriceInput::Unit(price) => price,
            PriceInput::Total(total) => {
                let transactions = self.storage.transactions.get_by_security(security_id)?;
                let held = units_held(&transactions, date);
                total.checked_div(held).ok_or_else(|| {
                    FolioError::DivisionUndefined(format!(
                        "no units of {} held on {} to divide the total by",
                        security.code, date
                    ))
                })?
            }
        };

        let price = Price::with_comments(security_id, date, unit_price, comments.trim());
        price.validate().map_err(FolioError::Validation)?;

        self.storage.prices.upsert(price.clone())?;
        self.storage.prices.save()?;

        tracing::info!(security = %security.code, %date, price = %price.price, "recorded price");
        Ok(price)
    }

    /// Price history of a security, oldest first
    pub fn list(&self, security_id: SecurityId) -> FolioResult<Vec<Price>> {
        self.storage.prices.get_by_security(security_id)
    }

    /// Find a price by full or short ID
    pub fn find(&self, identifier: &str) -> FolioResult<Price> {
        super::resolve_record(&self.storage.prices, identifier, "Price")
    }

    /// Delete a price
    pub fn delete(&self, id: PriceId) -> FolioResult<()> {
        if !self.storage.prices.delete(id)? {
            return Err(FolioError::price_not_found(id.to_string()));
        }
        self.storage.prices.save()?;
        tracing::info!(id = %id, "deleted price");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::create_test_storage;
    use crate::services::{CreateTransactionInput, SecurityService, TransactionService};
    use rust_decimal_macros::dec;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    #[test]
    fn test_parse_input() {
        assert_eq!(
            PriceInput::parse("12.50").unwrap(),
            PriceInput::Unit(Money::from_cents(1250))
        );
        assert_eq!(
            PriceInput::parse(" 1,000! ").unwrap(),
            PriceInput::Total(Money::from_cents(100000))
        );
        assert!(PriceInput::parse("abc!").is_err());
    }

    #[test]
    fn test_record_unit_price() {
        let (_temp_dir, storage) = create_test_storage();
        let security = SecurityService::new(&storage).create("ACME", "Acme", "EUR").unwrap();
        let service = PriceService::new(&storage);

        service
            .record(security.id, date(3), PriceInput::Unit(Money::from_cents(1250)), "")
            .unwrap();
        service
            .record(security.id, date(1), PriceInput::Unit(Money::from_cents(1200)), "statement")
            .unwrap();

        let history = service.list(security.id).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].date, date(1));
        assert_eq!(history[0].comments, "statement");
    }

    #[test]
    fn test_record_total_value() {
        let (_temp_dir, storage) = create_test_storage();
        let security = SecurityService::new(&storage).create("ACME", "Acme", "EUR").unwrap();
        TransactionService::new(&storage)
            .create(CreateTransactionInput {
                security_id: security.id,
                date: date(1),
                quantity: dec!(8),
                amount: Money::from_cents(80000),
                fees: Money::zero(),
                memo: None,
            })
            .unwrap();
        let service = PriceService::new(&storage);

        let price = service
            .record(security.id, date(2), PriceInput::Total(Money::from_cents(100000)), "")
            .unwrap();
        assert_eq!(price.price, Money::from_cents(12500));

        let before_purchase =
            service.record(security.id, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(), PriceInput::Total(Money::from_cents(100)), "");
        assert!(matches!(before_purchase, Err(FolioError::DivisionUndefined(_))));
    }

    #[test]
    fn test_record_rejects_non_positive() {
        let (_temp_dir, storage) = create_test_storage();
        let security = SecurityService::new(&storage).create("ACME", "Acme", "EUR").unwrap();
        let service = PriceService::new(&storage);

        let result = service.record(security.id, date(1), PriceInput::Unit(Money::zero()), "");
        assert!(result.unwrap_err().is_validation());
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let security = SecurityService::new(&storage).create("ACME", "Acme", "EUR").unwrap();
        let service = PriceService::new(&storage);

        let price = service
            .record(security.id, date(1), PriceInput::Unit(Money::from_cents(100)), "")
            .unwrap();
        service.delete(price.id).unwrap();
        assert!(service.delete(price.id).unwrap_err().is_not_found());
    }
}
