//! Dividend model
//!
//! Dividends are recorded in the home currency, as received.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{DividendId, SecurityId};
use super::money::Money;

/// A dividend paid by a security
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dividend {
    pub id: DividendId,

    pub security_id: SecurityId,

    /// Payment date
    pub date: NaiveDate,

    /// Amount received, in home currency
    pub amount: Money,

    #[serde(default)]
    pub comments: String,
}

impl Dividend {
    pub fn new(security_id: SecurityId, date: NaiveDate, amount: Money) -> Self {
        Self {
            id: DividendId::new(),
            security_id,
            date,
            amount,
            comments: String::new(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.amount.is_positive() {
            return Err(format!("Dividend amount must be positive: {}", self.amount));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let security_id = SecurityId::new();
        assert!(Dividend::new(security_id, date, Money::from_cents(5000)).validate().is_ok());
        assert!(Dividend::new(security_id, date, Money::zero()).validate().is_err());
    }
}
