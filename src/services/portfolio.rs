//! Portfolio service
//!
//! Storage-backed entry points into the valuation engine: snapshots, units
//! held and the home-currency value of one unit of a security.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{FolioError, FolioResult};
use crate::models::{Money, Security, SecurityId};
use crate::storage::Storage;
use crate::valuation::snapshot::load_converter;
use crate::valuation::{self, LookupMode, Snapshot, SnapshotOptions};

/// Service for portfolio valuation
pub struct PortfolioService<'a> {
    storage: &'a Storage,
    home_currency: String,
}

impl<'a> PortfolioService<'a> {
    /// Create a new portfolio service reporting in `home_currency`
    pub fn new(storage: &'a Storage, home_currency: &str) -> Self {
        Self {
            storage,
            home_currency: home_currency.trim().to_uppercase(),
        }
    }

    pub fn home_currency(&self) -> &str {
        &self.home_currency
    }

    /// Value every security on `options.as_of`
    pub fn snapshot(&self, options: &SnapshotOptions) -> FolioResult<Snapshot> {
        valuation::build_snapshot(self.storage, &self.home_currency, options)
    }

    /// Units of a security held at the end of `as_of`
    pub fn units_held(&self, security_id: SecurityId, as_of: NaiveDate) -> FolioResult<Decimal> {
        self.security(security_id)?;
        let transactions = self.storage.transactions.get_by_security(security_id)?;
        Ok(valuation::units_held(&transactions, as_of))
    }

    /// Value of one unit of a security on `as_of`, in the home currency
    pub fn current_value(
        &self,
        security_id: SecurityId,
        as_of: NaiveDate,
        mode: LookupMode,
    ) -> FolioResult<Money> {
        let security = self.security(security_id)?;
        let converter = load_converter(
            self.storage,
            &self.home_currency,
            std::slice::from_ref(&security),
        )?;
        valuation::unit_value(self.storage, &converter, &security, as_of, mode)
    }

    fn security(&self, security_id: SecurityId) -> FolioResult<Security> {
        self.storage
            .securities
            .get(security_id)?
            .ok_or_else(|| FolioError::security_not_found(security_id.to_string()))
    }
}
