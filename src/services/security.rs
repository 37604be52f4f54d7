//! Security service
//!
//! Provides business logic for security management: unique codes, and
//! refusing to delete a security that still has records attached.

use crate::error::{FolioError, FolioResult};
use crate::models::{Security, SecurityId};
use crate::storage::Storage;

/// Service for security management
pub struct SecurityService<'a> {
    storage: &'a Storage,
}

impl<'a> SecurityService<'a> {
    /// Create a new security service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new security
    pub fn create(&self, code: &str, name: &str, currency: &str) -> FolioResult<Security> {
        let security = Security::new(code, name, currency);

        security
            .validate()
            .map_err(|e| FolioError::Validation(e.to_string()))?;

        if self.storage.securities.get_by_code(&security.code)?.is_some() {
            return Err(FolioError::Duplicate {
                entity_type: "Security",
                identifier: security.code.clone(),
            });
        }

        self.storage.securities.upsert(security.clone())?;
        self.storage.securities.save()?;

        tracing::info!(code = %security.code, id = %security.id, "created security");
        Ok(security)
    }

    /// Get a security by ID
    pub fn get(&self, id: SecurityId) -> FolioResult<Option<Security>> {
        self.storage.securities.get(id)
    }

    /// Find a security by code or ID
    pub fn find(&self, identifier: &str) -> FolioResult<Option<Security>> {
        if let Some(security) = self.storage.securities.get_by_code(identifier)? {
            return Ok(Some(security));
        }

        match super::resolve_record(&self.storage.securities, identifier, "Security") {
            Ok(security) => Ok(Some(security)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Find a security by code or ID, failing when there is none
    pub fn require(&self, identifier: &str) -> FolioResult<Security> {
        self.find(identifier)?
            .ok_or_else(|| FolioError::security_not_found(identifier.trim()))
    }

    /// List all securities, by code
    pub fn list(&self) -> FolioResult<Vec<Security>> {
        self.storage.securities.get_all()
    }

    /// Rename a security or change its trading currency
    pub fn update(
        &self,
        id: SecurityId,
        name: Option<&str>,
        currency: Option<&str>,
    ) -> FolioResult<Security> {
        let mut security = self
            .storage
            .securities
            .get(id)?
            .ok_or_else(|| FolioError::security_not_found(id.to_string()))?;

        if let Some(name) = name {
            security.name = name.trim().to_string();
        }
        if let Some(currency) = currency {
            security.currency = currency.trim().to_uppercase();
        }
        security.updated_at = chrono::Utc::now();

        security
            .validate()
            .map_err(|e| FolioError::Validation(e.to_string()))?;

        self.storage.securities.upsert(security.clone())?;
        self.storage.securities.save()?;

        tracing::info!(code = %security.code, "updated security");
        Ok(security)
    }

    /// Delete a security that has no transactions, prices or dividends
    pub fn delete(&self, id: SecurityId) -> FolioResult<Security> {
        let security = self
            .storage
            .securities
            .get(id)?
            .ok_or_else(|| FolioError::security_not_found(id.to_string()))?;

        if self.storage.transactions.has_security(id)?
            || self.storage.prices.has_security(id)?
            || self.storage.dividends.has_security(id)?
        {
            return Err(FolioError::Validation(format!(
                "{} still has transactions, prices or dividends recorded",
                security.code
            )));
        }

        self.storage.securities.delete(id)?;
        self.storage.securities.save()?;

        tracing::info!(code = %security.code, "deleted security");
        Ok(security)
    }
}
