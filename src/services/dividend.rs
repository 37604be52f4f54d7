//! Dividend service

use chrono::NaiveDate;

use crate::error::{FolioError, FolioResult};
use crate::models::{Dividend, DividendId, Money, SecurityId};
use crate::storage::Storage;

/// Service for dividend management
pub struct DividendService<'a> {
    storage: &'a Storage,
}

impl<'a> DividendService<'a> {
    /// Create a new dividend service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a dividend payment, in the home currency
    pub fn record(
        &self,
        security_id: SecurityId,
        date: NaiveDate,
        amount: Money,
        comments: &str,
    ) -> FolioResult<Dividend> {
        let security = self
            .storage
            .securities
            .get(security_id)?
            .ok_or_else(|| FolioError::security_not_found(security_id.to_string()))?;

        let mut dividend = Dividend::new(security_id, date, amount);
        dividend.comments = comments.trim().to_string();
        dividend.validate().map_err(FolioError::Validation)?;

        self.storage.dividends.upsert(dividend.clone())?;
        self.storage.dividends.save()?;

        tracing::info!(security = %security.code, %date, amount = %amount, "recorded dividend");
        Ok(dividend)
    }

    /// Dividends of one security (or all), oldest first
    pub fn list(&self, security_id: Option<SecurityId>) -> FolioResult<Vec<Dividend>> {
        match security_id {
            Some(id) => self.storage.dividends.get_by_security(id),
            None => self.storage.dividends.get_all(),
        }
    }

    /// Find a dividend by full or short ID
    pub fn find(&self, identifier: &str) -> FolioResult<Dividend> {
        super::resolve_record(&self.storage.dividends, identifier, "Dividend")
    }

    /// Delete a dividend
    pub fn delete(&self, id: DividendId) -> FolioResult<()> {
        if !self.storage.dividends.delete(id)? {
            return Err(FolioError::dividend_not_found(id.to_string()));
        }
        self.storage.dividends.save()?;
        tracing::info!(id = %id, "deleted dividend");
        Ok(())
    }
}
