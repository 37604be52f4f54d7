//! Custom error types for folio
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Valuation failures (negative holdings,
//! undefined ratios, no-op splits) are ordinary variants so callers can decide
//! whether to surface them per security or abort a whole computation.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for folio operations
#[derive(Error, Debug)]
pub enum FolioError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors (securities, currencies, prices, ...)
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Unparseable or out-of-range date
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// A sale (or reverse split) would take holdings below zero
    #[error("Negative holdings in {security}: holding {held}, cannot remove {requested}")]
    NegativeHoldings {
        security: String,
        held: Decimal,
        requested: Decimal,
    },

    /// A ratio was required but its denominator is zero
    #[error("Division undefined: {0}")]
    DivisionUndefined(String),

    /// A split that would not change the quantity held
    #[error("Split has no effect: {0}")]
    SplitNoOp(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl FolioError {
    /// Create a "not found" error for securities
    pub fn security_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Security",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for currencies
    pub fn currency_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Currency",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for exchange rates
    pub fn rate_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Exchange rate",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for prices
    pub fn price_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Price",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for dividends
    pub fn dividend_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Dividend",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for cash entries
    pub fn cash_entry_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Cash entry",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for FolioError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for folio operations
pub type FolioResult<T> = Result<T, FolioError>;
