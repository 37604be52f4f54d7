//! Transaction service
//!
//! Records purchases and sales. A new transaction is replayed against the
//! security's full history before it is saved, so a sale can never take the
//! holdings below zero on any date.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{FolioError, FolioResult};
use crate::models::{Money, SecurityId, Transaction, TransactionId};
use crate::storage::Storage;
use crate::valuation::CostBasisAccumulator;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub security_id: SecurityId,
    pub date: NaiveDate,
    /// Positive to buy, negative to sell
    pub quantity: Decimal,
    /// Total paid or received
    pub amount: Money,
    pub fees: Money,
    pub memo: Option<String>,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new transaction
    pub fn create(&self, input: CreateTransactionInput) -> FolioResult<Transaction> {
        let security = self
            .storage
            .securities
            .get(input.security_id)?
            .ok_or_else(|| FolioError::security_not_found(input.security_id.to_string()))?;

        let mut txn = Transaction::trade(
            input.security_id,
            input.date,
            input.quantity,
            input.amount,
            input.fees,
        );
        if let Some(memo) = input.memo {
            txn.memo = memo.trim().to_string();
        }

        txn.validate()
            .map_err(|e| FolioError::Validation(e.to_string()))?;

        let mut history = self.storage.transactions.get_by_security(security.id)?;
        history.push(txn.clone());
        CostBasisAccumulator::accumulate(&security.code, &history, NaiveDate::MAX)?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        tracing::info!(
            security = %security.code,
            id = %txn.id,
            quantity = %txn.quantity,
            amount = %txn.amount,
            "recorded transaction"
        );
        Ok(txn)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> FolioResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Find a transaction by full or short ID
    pub fn find(&self, identifier: &str) -> FolioResult<Transaction> {
        super::resolve_record(&self.storage.transactions, identifier, "Transaction")
    }

    /// List transactions, oldest first, optionally for one security
    pub fn list(&self, security_id: Option<SecurityId>) -> FolioResult<Vec<Transaction>> {
        match security_id {
            Some(id) => self.storage.transactions.get_by_security(id),
            None => self.storage.transactions.get_all(),
        }
    }

    /// Delete a transaction
    ///
    /// Refused when the remaining history would oversell on some date.
    pub fn delete(&self, id: TransactionId) -> FolioResult<Transaction> {
        let txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| FolioError::transaction_not_found(id.to_string()))?;

        let label = self
            .storage
            .securities
            .get(txn.security_id)?
            .map(|s| s.code)
            .unwrap_or_else(|| txn.security_id.to_string());

        let remaining: Vec<Transaction> = self
            .storage
            .transactions
            .get_by_security(txn.security_id)?
            .into_iter()
            .filter(|t| t.id != id)
            .collect();
        CostBasisAccumulator::accumulate(label.as_str(), &remaining, NaiveDate::MAX)?;

        self.storage.transactions.delete(id)?;
        self.storage.transactions.save()?;

        tracing::info!(id = %id, security = %label, "deleted transaction");
        Ok(txn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::create_test_storage;
    use crate::services::SecurityService;
    use rust_decimal_macros::dec;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, day).unwrap()
    }

    fn input(security_id: SecurityId, day: u32, quantity: Decimal, amount: i64) -> CreateTransactionInput {
        CreateTransactionInput {
            security_id,
            date: date(day),
            quantity,
            amount: Money::from_cents(amount),
            fees: Money::zero(),
            memo: None,
        }
    }

    #[test]
    fn test_create_and_list() {
        let (_temp_dir, storage) = create_test_storage();
        let security = SecurityService::new(&storage).create("ACME", "Acme", "EUR").unwrap();
        let service = TransactionService::new(&storage);

        service.create(input(security.id, 10, dec!(5), 50000)).unwrap();
        service.create(input(security.id, 2, dec!(1), 9000)).unwrap();

        let txns = service.list(Some(security.id)).unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].date, date(2));
    }

    #[test]
    fn test_create_unknown_security() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let result = service.create(input(SecurityId::new(), 1, dec!(1), 100));
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn test_oversell_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let security = SecurityService::new(&storage).create("ACME", "Acme", "EUR").unwrap();
        let service = TransactionService::new(&storage);

        service.create(input(security.id, 10, dec!(5), 50000)).unwrap();
        // Sale dated before the purchase
        let early = service.create(input(security.id, 1, dec!(-2), 20000));
        assert!(matches!(early, Err(FolioError::NegativeHoldings { .. })));

        let too_many = service.create(input(security.id, 20, dec!(-6), 60000));
        assert!(matches!(too_many, Err(FolioError::NegativeHoldings { .. })));

        assert_eq!(service.list(None).unwrap().len(), 1);
    }

    #[test]
    fn test_validation_errors() {
        let (_temp_dir, storage) = create_test_storage();
        let security = SecurityService::new(&storage).create("ACME", "Acme", "EUR").unwrap();
        let service = TransactionService::new(&storage);

        assert!(service
            .create(input(security.id, 1, Decimal::ZERO, 100))
            .unwrap_err()
            .is_validation());
        assert!(service
            .create(input(security.id, 1, dec!(1), 0))
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_delete_and_find() {
        let (_temp_dir, storage) = create_test_storage();
        let security = SecurityService::new(&storage).create("ACME", "Acme", "EUR").unwrap();
        let service = TransactionService::new(&storage);

        let buy = service.create(input(security.id, 1, dec!(5), 50000)).unwrap();
        let sell = service.create(input(security.id, 2, dec!(-5), 60000)).unwrap();

        assert_eq!(service.find(&buy.id.to_string()).unwrap().id, buy.id);

        // Removing the purchase would leave the sale oversold
        assert!(matches!(
            service.delete(buy.id),
            Err(FolioError::NegativeHoldings { .. })
        ));

        service.delete(sell.id).unwrap();
        service.delete(buy.id).unwrap();
        assert!(service.list(None).unwrap().is_empty());
    }
}
