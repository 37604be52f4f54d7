//! Price model
//!
//! A quoted unit price for a security on a date, in the security's trading
//! currency. Prices are sparse: a price holds until the next one is entered.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{PriceId, SecurityId};
use super::money::Money;

/// Unit price of a security on a date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Price {
    pub id: PriceId,

    pub security_id: SecurityId,

    pub date: NaiveDate,

    /// Unit price in the security's trading currency
    pub price: Money,

    /// Free-text comments (e.g., "From statement")
    #[serde(default)]
    pub comments: String,
}

impl Price {
    pub fn new(security_id: SecurityId, date: NaiveDate, price: Money) -> Self {
        Self {
            id: PriceId::new(),
            security_id,
            date,
            price,
            comments: String::new(),
        }
    }

    pub fn with_comments(
        security_id: SecurityId,
        date: NaiveDate,
        price: Money,
        comments: impl Into<String>,
    ) -> Self {
        let mut p = Self::new(security_id, date, price);
        p.comments = comments.into();
        p
    }

    /// Prices must be strictly positive
    pub fn validate(&self) -> Result<(), String> {
        if !self.price.is_positive() {
            return Err(format!("Price must be positive: {}", self.price));
        }
        Ok(())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date.format("%Y-%m-%d"), self.price)
    }
}
