//! Security model
//!
//! Any tradeable holding: shares, funds, ETFs. Prices for a security are
//! recorded in its trading currency.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::SecurityId;

/// A security that can be bought, sold, priced and pay dividends
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Security {
    /// Unique identifier
    pub id: SecurityId,

    /// Ticker or short code (e.g., "VWRL")
    pub code: String,

    /// Display name
    pub name: String,

    /// Trading currency code (e.g., "USD")
    pub currency: String,

    /// When the security was created
    pub created_at: DateTime<Utc>,

    /// When the security was last modified
    pub updated_at: DateTime<Utc>,
}

impl Security {
    /// Create a new security; code and currency are normalized to upper case
    pub fn new(code: impl Into<String>, name: impl Into<String>, currency: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: SecurityId::new(),
            code: code.into().trim().to_uppercase(),
            name: name.into().trim().to_string(),
            currency: currency.into().trim().to_uppercase(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate the security
    pub fn validate(&self) -> Result<(), SecurityValidationError> {
        if self.code.trim().is_empty() {
            return Err(SecurityValidationError::EmptyCode);
        }

        if self.name.trim().is_empty() {
            return Err(SecurityValidationError::EmptyName);
        }

        if !is_currency_code(&self.currency) {
            return Err(SecurityValidationError::InvalidCurrency(self.currency.clone()));
        }

        Ok(())
    }
}

impl fmt::Display for Security {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// Three ASCII letters, upper case
pub fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase())
}

/// Validation errors for securities
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecurityValidationError {
    EmptyCode,
    EmptyName,
    InvalidCurrency(String),
}

impl fmt::Display for SecurityValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCode => write!(f, "Security code cannot be empty"),
            Self::EmptyName => write!(f, "Security name cannot be empty"),
            Self::InvalidCurrency(c) => {
                write!(f, "Invalid currency code '{}': expected three letters", c)
            }
        }
    }
}

impl std::error::Error for SecurityValidationError {}
