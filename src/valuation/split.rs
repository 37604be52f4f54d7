//! Stock split planning
//!
//! A split is recorded as two new rows rather than by rewriting history:
//! a split adjustment transaction bringing the quantity held to the new
//! figure, and a price on the split date scaled so that the market value of
//! the position is the same before and after.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::cost_basis::units_held;
use super::snapshot::price_series;
use super::time_series::LookupMode;
use crate::error::{FolioError, FolioResult};
use crate::models::{Money, Price, Security, Transaction};

/// The rows a split produces, plus the figures they were derived from
#[derive(Debug, Clone)]
pub struct SplitPlan {
    pub current_quantity: Decimal,
    pub new_quantity: Decimal,
    /// Price in the trading currency before the split
    pub current_price: Money,
    /// Price in the trading currency after the split
    pub new_price: Money,
    pub transaction: Transaction,
    pub price: Price,
}

impl SplitPlan {
    /// Quantity change recorded by the adjustment transaction
    pub fn adjustment(&self) -> Decimal {
        self.transaction.quantity
    }
}

/// Work out the rows that bring `security` to `new_quantity` units on `date`
///
/// `transactions` and `prices` are the security's own records.
pub fn plan_split(
    security: &Security,
    transactions: &[Transaction],
    prices: &[Price],
    date: NaiveDate,
    new_quantity: Decimal,
) -> FolioResult<SplitPlan> {
    if new_quantity < Decimal::ZERO {
        return Err(FolioError::Validation(format!(
            "New quantity must be positive, got {}",
            new_quantity
        )));
    }
    if new_quantity.is_zero() {
        return Err(FolioError::DivisionUndefined(format!(
            "cannot split {} into zero units",
            security.code
        )));
    }

    let current_quantity = units_held(transactions, date);
    if current_quantity.is_zero() {
        return Err(FolioError::SplitNoOp(format!(
            "no units of {} held on {}",
            security.code, date
        )));
    }

    let adjustment = new_quantity - current_quantity;
    if adjustment.is_zero() {
        return Err(FolioError::SplitNoOp(format!(
            "{} units of {} already held on {}",
            new_quantity.normalize(),
            security.code,
            date
        )));
    }

    let current_price = price_series(prices)
        .lookup(date, LookupMode::Step)
        .map(Money::new)
        .ok_or_else(|| FolioError::price_not_found(format!("{} on {}", security.code, date)))?;

    let new_price = current_price * current_quantity / new_quantity;

    let mut transaction = Transaction::split_adjustment(security.id, date, adjustment);
    transaction.memo = format!(
        "Split: {} -> {}",
        current_quantity.normalize(),
        new_quantity.normalize()
    );

    let price = Price::with_comments(
        security.id,
        date,
        new_price,
        format!(
            "Split adjustment: {} x {} / {}",
            current_price,
            current_quantity.normalize(),
            new_quantity.normalize()
        ),
    );

    Ok(SplitPlan {
        current_quantity,
        new_quantity,
        current_price,
        new_price,
        transaction,
        price,
    })
}
