//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod cash;
pub mod currency;
pub mod dividend;
pub mod export;
pub mod portfolio;
pub mod price;
pub mod security;
pub mod split;
pub mod transaction;

pub use cash::{handle_cash_command, CashCommands};
pub use currency::{handle_currency_command, CurrencyCommands};
pub use dividend::{handle_dividend_command, DividendCommands};
pub use export::{handle_export_command, ExportCommands};
pub use portfolio::{handle_portfolio_command, PortfolioArgs};
pub use price::{handle_price_command, PriceCommands};
pub use security::{handle_security_command, SecurityCommands};
pub use split::{handle_split_command, SplitArgs};
pub use transaction::{handle_transaction_command, TransactionCommands};

use std::str::FromStr;

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

use crate::config::settings::Settings;
use crate::error::{FolioError, FolioResult};
use crate::models::{parse_date, Money};

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Date for a new entry: as given, else the last one used, else today
pub(crate) fn entry_date(arg: Option<&str>, settings: &Settings) -> FolioResult<NaiveDate> {
    match arg {
        Some(s) => parse_date(s),
        None => Ok(settings.default_entry_date(today())),
    }
}

/// Valuation date: as given, else today
pub(crate) fn as_of_date(arg: Option<&str>) -> FolioResult<NaiveDate> {
    arg.map(parse_date).transpose().map(|d| d.unwrap_or_else(today))
}

pub(crate) fn parse_quantity(s: &str) -> FolioResult<Decimal> {
    Decimal::from_str(s.trim().trim_start_matches('+'))
        .map_err(|_| FolioError::Validation(format!("Invalid quantity: '{}'", s)))
}

pub(crate) fn parse_amount(s: &str, what: &str) -> FolioResult<Money> {
    Money::parse(s).map_err(|e| {
        FolioError::Validation(format!(
            "Invalid {}: '{}'. Use format like '1000.00' or '1000'. Error: {}",
            what, s, e
        ))
    })
}
