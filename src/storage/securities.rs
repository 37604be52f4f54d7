//! Security repository
//!
//! Securities are listed by code; codes are unique, compared case-insensitively.

use std::cmp::Ordering;

use crate::error::FolioError;
use crate::models::{Security, SecurityId};

use super::repository::{Record, RecordRepository};

impl Record for Security {
    type Id = SecurityId;
    const COLLECTION: &'static str = "securities";

    fn id(&self) -> SecurityId {
        self.id
    }

    fn compare(a: &Self, b: &Self) -> Ordering {
        a.code.cmp(&b.code)
    }
}

pub type SecurityRepository = RecordRepository<Security>;

impl RecordRepository<Security> {
    /// Get a security by code (case-insensitive)
    pub fn get_by_code(&self, code: &str) -> Result<Option<Security>, FolioError> {
        let code = code.trim();
        self.find(|s| s.code.eq_ignore_ascii_case(code))
    }
}
