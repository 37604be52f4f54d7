//! Split service
//!
//! Persists a stock split as one unit: the adjustment transaction and the
//! rescaled price are both saved, or neither is.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{FolioError, FolioResult};
use crate::models::{Price, SecurityId, Transaction};
use crate::storage::Storage;
use crate::valuation::{plan_split, SplitPlan};

/// Service for stock splits
pub struct SplitService<'a> {
    storage: &'a Storage,
}

impl<'a> SplitService<'a> {
    /// Create a new split service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Work out a split without saving anything
    pub fn preview(
        &self,
        security_id: SecurityId,
        date: NaiveDate,
        new_quantity: Decimal,
    ) -> FolioResult<SplitPlan> {
        let security = self
            .storage
            .securities
            .get(security_id)?
            .ok_or_else(|| FolioError::security_not_found(security_id.to_string()))?;

        let transactions = self.storage.transactions.get_by_security(security_id)?;
        let prices = self.storage.prices.get_by_security(security_id)?;

        plan_split(&security, &transactions, &prices, date, new_quantity)
    }

    /// Bring the units held on `date` to `new_quantity`, keeping market value
    pub fn apply_split(
        &self,
        security_id: SecurityId,
        date: NaiveDate,
        new_quantity: Decimal,
    ) -> FolioResult<(Transaction, Price)> {
        let plan = self.preview(security_id, date, new_quantity)?;
        let (transaction, price) = (plan.transaction.clone(), plan.price.clone());

        self.storage.transactions.upsert(transaction.clone())?;
        if let Err(e) = self.storage.prices.upsert(price.clone()) {
            self.storage.transactions.delete(transaction.id)?;
            return Err(e);
        }

        if let Err(e) = self.persist() {
            tracing::warn!(error = %e, "split not saved, rolling back");
            self.rollback(&transaction, &price)?;
            return Err(e);
        }

        tracing::info!(
            security = %security_id,
            %date,
            from = %plan.current_quantity,
            to = %plan.new_quantity,
            price = %plan.new_price,
            "applied split"
        );
        Ok((transaction, price))
    }

    fn persist(&self) -> FolioResult<()> {
        self.storage.transactions.save()?;
        self.storage.prices.save()
    }

    fn rollback(&self, transaction: &Transaction, price: &Price) -> FolioResult<()> {
        self.storage.transactions.delete(transaction.id)?;
        self.storage.prices.delete(price.id)?;
        self.storage.transactions.save()?;
        self.storage.prices.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::services::test_support::create_test_storage;
    use crate::services::{
        CreateTransactionInput, PortfolioService, PriceInput, PriceService, SecurityService,
        TransactionService,
    };
    use crate::valuation::{LookupMode, SnapshotOptions};
    use rust_decimal_macros::dec;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    fn setup(storage: &Storage) -> SecurityId {
        let acme = SecurityService::new(storage).create("ACME", "Acme Corp", "EUR").unwrap();
        TransactionService::new(storage)
            .create(CreateTransactionInput {
                security_id: acme.id,
                date: date(1, 10),
                quantity: dec!(10),
                amount: Money::from_cents(50000),
                fees: Money::zero(),
                memo: None,
            })
            .unwrap();
        PriceService::new(storage)
            .record(acme.id, date(2, 1), PriceInput::Unit(Money::from_cents(5000)), "")
            .unwrap();
        acme.id
    }

    #[test]
    fn test_apply_split_keeps_value_and_cost() {
        let (_temp_dir, storage) = create_test_storage();
        let acme = setup(&storage);
        let portfolio = PortfolioService::new(&storage, "EUR");

        let before = portfolio.snapshot(&SnapshotOptions::new(date(2, 28))).unwrap();

        let (txn, price) = SplitService::new(&storage)
            .apply_split(acme, date(3, 1), dec!(20))
            .unwrap();
        assert_eq!(txn.quantity, dec!(10));
        assert!(txn.is_split_adjustment());
        assert_eq!(price.price, Money::from_cents(2500));

        let after = portfolio.snapshot(&SnapshotOptions::new(date(3, 1))).unwrap();
        assert_eq!(before.total_market_value(), after.total_market_value());
        assert_eq!(after.holdings[0].quantity, dec!(20));
        assert_eq!(after.holdings[0].cost, Money::from_cents(50000));
        assert_eq!(
            portfolio.current_value(acme, date(3, 1), LookupMode::Step).unwrap(),
            Money::from_cents(2500)
        );
    }

    #[test]
    fn test_split_persisted() {
        let (temp_dir, storage) = create_test_storage();
        let acme = setup(&storage);
        SplitService::new(&storage)
            .apply_split(acme, date(3, 1), dec!(5))
            .unwrap();

        let paths = crate::config::FolioPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut reloaded = Storage::new(paths).unwrap();
        reloaded.load_all().unwrap();
        assert_eq!(reloaded.transactions.get_by_security(acme).unwrap().len(), 2);
        assert_eq!(reloaded.prices.get_by_security(acme).unwrap().len(), 2);
    }

    #[test]
    fn test_noop_split_writes_nothing() {
        let (_temp_dir, storage) = create_test_storage();
        let acme = setup(&storage);

        let result = SplitService::new(&storage).apply_split(acme, date(3, 1), dec!(10));
        assert!(matches!(result, Err(FolioError::SplitNoOp(_))));
        assert_eq!(storage.transactions.count().unwrap(), 1);
        assert_eq!(storage.prices.count().unwrap(), 1);
    }

    #[test]
    fn test_split_before_any_price() {
        let (_temp_dir, storage) = create_test_storage();
        let acme = setup(&storage);

        let result = SplitService::new(&storage).apply_split(acme, date(1, 20), dec!(20));
        assert!(result.unwrap_err().is_not_found());
        assert_eq!(storage.transactions.count().unwrap(), 1);
    }
}
