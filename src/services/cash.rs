//! Cash service
//!
//! Manual deposits and withdrawals, and the cash ledger built from them
//! together with trades and dividends.

use chrono::NaiveDate;

use crate::error::{FolioError, FolioResult};
use crate::models::{CashEntry, CashEntryId, CashEntryType, Money};
use crate::storage::Storage;
use crate::valuation::{build_cash_ledger, CashLedger};

/// Service for cash management
pub struct CashService<'a> {
    storage: &'a Storage,
}

impl<'a> CashService<'a> {
    /// Create a new cash service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a deposit or withdrawal; the sign comes from `entry_type`
    pub fn record(
        &self,
        date: NaiveDate,
        entry_type: CashEntryType,
        amount: Money,
        memo: &str,
    ) -> FolioResult<CashEntry> {
        if amount.is_negative() {
            return Err(FolioError::Validation(
                "Enter a positive amount; the entry type sets the direction".into(),
            ));
        }

        let entry = CashEntry::new(date, entry_type.signed(amount), memo.trim());
        entry.validate().map_err(FolioError::Validation)?;

        self.storage.cash.upsert(entry.clone())?;
        self.storage.cash.save()?;

        tracing::info!(%date, amount = %entry.amount, "recorded cash entry");
        Ok(entry)
    }

    /// All manual cash entries, oldest first
    pub fn list(&self) -> FolioResult<Vec<CashEntry>> {
        self.storage.cash.get_all()
    }

    /// Find a cash entry by full or short ID
    pub fn find(&self, identifier: &str) -> FolioResult<CashEntry> {
        super::resolve_record(&self.storage.cash, identifier, "Cash entry")
    }

    /// Delete a cash entry
    pub fn delete(&self, id: CashEntryId) -> FolioResult<()> {
        if !self.storage.cash.delete(id)? {
            return Err(FolioError::cash_entry_not_found(id.to_string()));
        }
        self.storage.cash.save()?;
        tracing::info!(id = %id, "deleted cash entry");
        Ok(())
    }

    /// Every cash movement, in date order
    pub fn ledger(&self) -> FolioResult<CashLedger> {
        build_cash_ledger(self.storage)
    }

    /// Cash balance at the end of `date`
    pub fn balance_as_of(&self, date: NaiveDate) -> FolioResult<Money> {
        Ok(self.ledger()?.balance_as_of(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::create_test_storage;
    use crate::services::{CreateTransactionInput, DividendService, SecurityService, TransactionService};
    use crate::valuation::CashCategory;
    use rust_decimal_macros::dec;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, day).unwrap()
    }

    #[test]
    fn test_record_applies_sign() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CashService::new(&storage);

        let dep = service
            .record(date(1), CashEntryType::Deposit, Money::from_cents(100000), "Salary")
            .unwrap();
        let wd = service
            .record(date(2), CashEntryType::Withdrawal, Money::from_cents(2500), "ATM")
            .unwrap();

        assert_eq!(dep.amount, Money::from_cents(100000));
        assert_eq!(wd.amount, Money::from_cents(-2500));
        assert!(service
            .record(date(3), CashEntryType::Deposit, Money::from_cents(-1), "")
            .unwrap_err()
            .is_validation());
        assert!(service
            .record(date(3), CashEntryType::Deposit, Money::zero(), "")
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_ledger_and_balance() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CashService::new(&storage);
        service
            .record(date(1), CashEntryType::Deposit, Money::from_cents(500000), "Opening")
            .unwrap();

        let acme = SecurityService::new(&storage).create("ACME", "Acme Corp", "EUR").unwrap();
        TransactionService::new(&storage)
            .create(CreateTransactionInput {
                security_id: acme.id,
                date: date(5),
                quantity: dec!(10),
                amount: Money::from_cents(100000),
                fees: Money::zero(),
                memo: None,
            })
            .unwrap();
        DividendService::new(&storage)
            .record(acme.id, date(20), Money::from_cents(3000), "")
            .unwrap();

        let ledger = service.ledger().unwrap();
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.entries()[1].category, CashCategory::Buy);

        assert_eq!(service.balance_as_of(date(4)).unwrap(), Money::from_cents(500000));
        assert_eq!(service.balance_as_of(date(31)).unwrap(), Money::from_cents(403000));
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CashService::new(&storage);
        let entry = service
            .record(date(1), CashEntryType::Deposit, Money::from_cents(100), "")
            .unwrap();

        assert_eq!(service.find(&entry.id.to_string()).unwrap().id, entry.id);
        service.delete(entry.id).unwrap();
        assert!(service.delete(entry.id).unwrap_err().is_not_found());
    }
}
