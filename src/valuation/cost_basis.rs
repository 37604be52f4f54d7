//! Average-cost accounting for a single security
//!
//! Purchases add their quantity and their net amount (amount less fees) to
//! the position. Sales remove quantity at the current average unit cost, so
//! the average cost of what remains is unchanged by a sale. Split
//! adjustments change the quantity only; the total cost carries over.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{FolioError, FolioResult};
use crate::models::{Money, Transaction};

/// Running quantity and total cost of one security's position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostBasisAccumulator {
    label: String,
    quantity: Decimal,
    cost: Money,
}

impl CostBasisAccumulator {
    /// Empty position; `label` names the security in error messages
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            quantity: Decimal::ZERO,
            cost: Money::zero(),
        }
    }

    /// Replay every transaction dated on or before `as_of`, in date order
    ///
    /// Transactions may arrive in any order; same-day transactions are
    /// applied in the order given.
    pub fn accumulate<'a, I>(label: impl Into<String>, transactions: I, as_of: NaiveDate) -> FolioResult<Self>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut ordered: Vec<&Transaction> = transactions
            .into_iter()
            .filter(|t| t.date <= as_of)
            .collect();
        ordered.sort_by_key(|t| t.date);

        let mut position = Self::new(label);
        for txn in ordered {
            position.apply(txn)?;
        }
        Ok(position)
    }

    /// Apply one transaction
    ///
    /// A sale larger than the quantity held fails with
    /// [`FolioError::NegativeHoldings`] and leaves the position untouched.
    pub fn apply(&mut self, txn: &Transaction) -> FolioResult<()> {
        if txn.is_split_adjustment() {
            let quantity = self.quantity + txn.quantity;
            if quantity < Decimal::ZERO {
                return Err(self.negative_holdings(txn.quantity.abs()));
            }
            self.quantity = quantity;
            if quantity.is_zero() {
                self.cost = Money::zero();
            }
            return Ok(());
        }

        if txn.is_purchase() {
            self.quantity += txn.quantity;
            self.cost += txn.amount - txn.fees;
            return Ok(());
        }

        let sold = txn.quantity.abs();
        if self.quantity <= Decimal::ZERO || sold > self.quantity {
            return Err(self.negative_holdings(sold));
        }

        let average = self.cost / self.quantity;
        self.quantity -= sold;
        self.cost = if self.quantity.is_zero() {
            Money::zero()
        } else {
            self.cost - average * sold
        };

        Ok(())
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Units currently held
    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// Total cost of the units currently held
    pub fn cost(&self) -> Money {
        self.cost
    }

    /// True once every unit has been sold (or none were ever bought)
    pub fn is_closed(&self) -> bool {
        self.quantity.is_zero()
    }

    /// Cost per unit held; undefined for a closed position
    pub fn average_unit_cost(&self) -> FolioResult<Money> {
        self.cost.checked_div(self.quantity).ok_or_else(|| {
            FolioError::DivisionUndefined(format!("{} has no units held", self.label))
        })
    }

    fn negative_holdings(&self, requested: Decimal) -> FolioError {
        FolioError::NegativeHoldings {
            security: self.label.clone(),
            held: self.quantity,
            requested,
        }
    }
}

/// Units of a security held at the end of `as_of`
///
/// Sums signed quantities without cost accounting, so it never fails.
pub fn units_held(transactions: &[Transaction], as_of: NaiveDate) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.date <= as_of)
        .map(|t| t.quantity)
        .sum()
}
