//! Transaction model
//!
//! A purchase or sale of a security. Quantity is signed: positive for a
//! purchase, negative for a sale. Split adjustments are transactions too, so
//! that holdings on any date can be recomputed from the transaction list alone.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{SecurityId, TransactionId};
use super::money::Money;

/// What produced a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// A purchase or sale for cash
    #[default]
    Trade,
    /// A quantity adjustment from a stock split; no cash, no cost change
    Split,
}

/// A purchase, sale or split adjustment of one security
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// The security traded
    pub security_id: SecurityId,

    /// Transaction date
    pub date: NaiveDate,

    /// Units bought (positive) or sold (negative)
    pub quantity: Decimal,

    /// Total paid (purchases, fees included) or received (sales), in home currency
    pub amount: Money,

    /// Commission or fees paid
    #[serde(default)]
    pub fees: Money,

    #[serde(default)]
    pub kind: TransactionKind,

    /// Memo/notes
    #[serde(default)]
    pub memo: String,

    /// When the transaction was created
    pub created_at: DateTime<Utc>,

    /// When the transaction was last modified
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a purchase (positive quantity) or sale (negative quantity)
    pub fn trade(
        security_id: SecurityId,
        date: NaiveDate,
        quantity: Decimal,
        amount: Money,
        fees: Money,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            security_id,
            date,
            quantity,
            amount,
            fees,
            kind: TransactionKind::Trade,
            memo: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a split adjustment changing the held quantity by `quantity`
    pub fn split_adjustment(security_id: SecurityId, date: NaiveDate, quantity: Decimal) -> Self {
        let mut txn = Self::trade(security_id, date, quantity, Money::zero(), Money::zero());
        txn.kind = TransactionKind::Split;
        txn
    }

    pub fn is_purchase(&self) -> bool {
        self.quantity > Decimal::ZERO
    }

    pub fn is_sale(&self) -> bool {
        self.quantity < Decimal::ZERO
    }

    pub fn is_split_adjustment(&self) -> bool {
        self.kind == TransactionKind::Split
    }

    /// Short label used in memos and listings: Buy, Sell or Split
    pub fn type_label(&self) -> &'static str {
        if self.is_split_adjustment() {
            "Split"
        } else if self.is_purchase() {
            "Buy"
        } else {
            "Sell"
        }
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.quantity.is_zero() {
            return Err(TransactionValidationError::ZeroQuantity);
        }

        if self.fees.is_negative() {
            return Err(TransactionValidationError::NegativeFees(self.fees));
        }

        match self.kind {
            TransactionKind::Trade => {
                if !self.amount.is_positive() {
                    return Err(TransactionValidationError::NonPositiveAmount(self.amount));
                }
                if self.fees > self.amount {
                    return Err(TransactionValidationError::FeesExceedAmount {
                        amount: self.amount,
                        fees: self.fees,
                    });
                }
            }
            TransactionKind::Split => {
                if !self.amount.is_zero() || !self.fees.is_zero() {
                    return Err(TransactionValidationError::SplitWithCash);
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} for {}",
            self.date.format("%Y-%m-%d"),
            self.type_label(),
            self.quantity.abs(),
            self.amount
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    ZeroQuantity,
    NegativeFees(Money),
    NonPositiveAmount(Money),
    FeesExceedAmount { amount: Money, fees: Money },
    SplitWithCash,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroQuantity => write!(f, "Transaction quantity cannot be zero"),
            Self::NegativeFees(fees) => write!(f, "Fees cannot be negative: {}", fees),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Transaction amount must be positive: {}", amount)
            }
            Self::FeesExceedAmount { amount, fees } => {
                write!(f, "Fees ({}) exceed the transaction amount ({})", fees, amount)
            }
            Self::SplitWithCash => {
                write!(f, "Split adjustments cannot carry an amount or fees")
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_purchase_and_sale() {
        let security_id = SecurityId::new();
        let buy = Transaction::trade(security_id, date(), dec!(10), Money::from_cents(100000), Money::zero());
        assert!(buy.is_purchase());
        assert_eq!(buy.type_label(), "Buy");
        assert!(buy.validate().is_ok());

        let sell = Transaction::trade(security_id, date(), dec!(-4), Money::from_cents(50000), Money::from_cents(995));
        assert!(sell.is_sale());
        assert_eq!(sell.type_label(), "Sell");
        assert!(sell.validate().is_ok());
    }

    #[test]
    fn test_split_adjustment() {
        let txn = Transaction::split_adjustment(SecurityId::new(), date(), dec!(10));
        assert!(txn.is_split_adjustment());
        assert_eq!(txn.type_label(), "Split");
        assert!(txn.amount.is_zero());
        assert!(txn.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let security_id = SecurityId::new();

        let zero = Transaction::trade(security_id, date(), Decimal::ZERO, Money::from_cents(100), Money::zero());
        assert_eq!(zero.validate(), Err(TransactionValidationError::ZeroQuantity));

        let neg_fees = Transaction::trade(security_id, date(), dec!(1), Money::from_cents(100), Money::from_cents(-1));
        assert!(matches!(neg_fees.validate(), Err(TransactionValidationError::NegativeFees(_))));

        let free = Transaction::trade(security_id, date(), dec!(1), Money::zero(), Money::zero());
        assert!(matches!(free.validate(), Err(TransactionValidationError::NonPositiveAmount(_))));

        let mut split = Transaction::split_adjustment(security_id, date(), dec!(5));
        split.amount = Money::from_cents(100);
        assert_eq!(split.validate(), Err(TransactionValidationError::SplitWithCash));
    }

    #[test]
    fn test_serialization_defaults_kind() {
        let txn = Transaction::trade(SecurityId::new(), date(), dec!(2.5), Money::from_cents(1000), Money::zero());
        let mut json: serde_json::Value = serde_json::to_value(&txn).unwrap();
        json.as_object_mut().unwrap().remove("kind");

        let deserialized: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(deserialized.kind, TransactionKind::Trade);
        assert_eq!(deserialized.quantity, dec!(2.5));
    }

    #[test]
    fn test_display() {
        let txn = Transaction::trade(SecurityId::new(), date(), dec!(-4), Money::from_cents(50000), Money::zero());
        assert_eq!(txn.to_string(), "2025-01-15 Sell 4 for 500.00");
    }
}
