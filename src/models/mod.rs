//! Core data models for folio
//!
//! Records entered by the user (securities, transactions, prices, dividends,
//! currencies, exchange rates, cash entries) plus the value types shared by
//! all of them: ids, money and dates.

pub mod cash;
pub mod currency;
pub mod date;
pub mod dividend;
pub mod ids;
pub mod money;
pub mod price;
pub mod security;
pub mod transaction;

pub use cash::{CashEntry, CashEntryType};
pub use currency::{Currency, ExchangeRate};
pub use date::{format_date, parse_date};
pub use dividend::Dividend;
pub use ids::{CashEntryId, CurrencyId, DividendId, PriceId, RateId, SecurityId, TransactionId};
pub use money::Money;
pub use price::Price;
pub use security::Security;
pub use transaction::{Transaction, TransactionKind};
