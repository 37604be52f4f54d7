//! Currency and exchange rate models
//!
//! An exchange rate multiplies one unit of its currency into the home
//! currency: `value_in_home = amount * rate`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CurrencyId, RateId};
use super::security::is_currency_code;

/// A foreign currency that securities may trade in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Currency {
    pub id: CurrencyId,

    /// Three-letter code, upper case (e.g., "USD")
    pub code: String,

    /// Display name (e.g., "US Dollar")
    pub name: String,
}

impl Currency {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: CurrencyId::new(),
            code: code.into().trim().to_uppercase(),
            name: name.into().trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !is_currency_code(&self.code) {
            return Err(format!(
                "Invalid currency code '{}': expected three letters",
                self.code
            ));
        }
        if self.name.is_empty() {
            return Err("Currency name cannot be empty".into());
        }
        Ok(())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code, self.name)
    }
}

/// Rate converting one unit of a currency into the home currency on a date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub id: RateId,

    pub currency_id: CurrencyId,

    pub date: NaiveDate,

    pub rate: Decimal,
}

impl ExchangeRate {
    pub fn new(currency_id: CurrencyId, date: NaiveDate, rate: Decimal) -> Self {
        Self {
            id: RateId::new(),
            currency_id,
            date,
            rate,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.rate <= Decimal::ZERO {
            return Err(format!("Exchange rate must be positive: {}", self.rate));
        }
        Ok(())
    }
}
