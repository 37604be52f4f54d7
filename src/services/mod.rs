//! Service layer for folio
//!
//! The service layer provides business logic on top of the storage layer:
//! validation, duplicate checks, cross-record consistency, and the
//! storage-backed entry points into the valuation engine.

pub mod cash;
pub mod currency;
pub mod dividend;
pub mod portfolio;
pub mod price;
pub mod security;
pub mod split;
pub mod transaction;

pub use cash::CashService;
pub use currency::CurrencyService;
pub use dividend::DividendService;
pub use portfolio::PortfolioService;
pub use price::{PriceInput, PriceService};
pub use security::SecurityService;
pub use split::SplitService;
pub use transaction::{CreateTransactionInput, TransactionService};

use std::str::FromStr;

use crate::error::{FolioError, FolioResult};
use crate::storage::{Record, RecordRepository};

/// Look a record up by full UUID or by its short display form (`txn-1a2b3c4d`)
pub(crate) fn resolve_record<T>(
    repo: &RecordRepository<T>,
    identifier: &str,
    entity_type: &'static str,
) -> FolioResult<T>
where
    T: Record,
    T::Id: FromStr,
{
    let identifier = identifier.trim();

    if let Ok(id) = identifier.parse::<T::Id>() {
        if let Some(record) = repo.get(id)? {
            return Ok(record);
        }
    }

    let mut matches = repo.filter(|r| r.id().to_string().eq_ignore_ascii_case(identifier))?;
    match matches.len() {
        0 => Err(FolioError::NotFound {
            entity_type,
            identifier: identifier.to_string(),
        }),
        1 => Ok(matches.remove(0)),
        n => Err(FolioError::Validation(format!(
            "{} matches {} {} records; use the full ID",
            identifier, n, entity_type
        ))),
    }
}
