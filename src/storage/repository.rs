//! Generic JSON-backed record repository
//!
//! Every record kind is stored the same way: one JSON file holding a single
//! named array (`{"prices": [...]}`), loaded fully into memory. Records keep
//! the order they were inserted in; listings sort by each kind's natural
//! order with a stable sort, so same-day records keep their entry order.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::FolioError;

use super::file_io::{read_json, write_json_atomic};

/// A record kind that can live in a [`RecordRepository`]
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Id: Copy + Eq + Hash + fmt::Display;

    /// Name of the array in the JSON file
    const COLLECTION: &'static str;

    fn id(&self) -> Self::Id;

    /// Natural listing order
    fn compare(a: &Self, b: &Self) -> Ordering;
}

/// Repository for one record kind
pub struct RecordRepository<T: Record> {
    path: PathBuf,
    data: RwLock<Vec<T>>,
}

impl<T: Record> RecordRepository<T> {
    /// Create a new, empty repository backed by `path`
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load records from disk, replacing anything in memory
    pub fn load(&self) -> Result<(), FolioError> {
        let mut file_data: HashMap<String, Vec<T>> = read_json(&self.path)?;
        let records = file_data.remove(T::COLLECTION).unwrap_or_default();

        let mut data = self.write_lock()?;
        *data = records;

        tracing::trace!(collection = T::COLLECTION, count = data.len(), "loaded records");
        Ok(())
    }

    /// Save records to disk
    pub fn save(&self) -> Result<(), FolioError> {
        let data = self.read_lock()?;

        let mut file_data: HashMap<&str, &[T]> = HashMap::new();
        file_data.insert(T::COLLECTION, data.as_slice());
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a record by ID
    pub fn get(&self, id: T::Id) -> Result<Option<T>, FolioError> {
        let data = self.read_lock()?;
        Ok(data.iter().find(|r| r.id() == id).cloned())
    }

    /// All records in natural order
    pub fn get_all(&self) -> Result<Vec<T>, FolioError> {
        self.filter(|_| true)
    }

    /// Records matching `predicate`, in natural order
    pub fn filter<F>(&self, predicate: F) -> Result<Vec<T>, FolioError>
    where
        F: Fn(&T) -> bool,
    {
        let data = self.read_lock()?;
        let mut records: Vec<T> = data.iter().filter(|r| predicate(r)).cloned().collect();
        records.sort_by(T::compare);
        Ok(records)
    }

    /// First record matching `predicate`
    pub fn find<F>(&self, predicate: F) -> Result<Option<T>, FolioError>
    where
        F: Fn(&T) -> bool,
    {
        let data = self.read_lock()?;
        Ok(data.iter().find(|r| predicate(r)).cloned())
    }

    /// Whether any record matches `predicate`
    pub fn any<F>(&self, predicate: F) -> Result<bool, FolioError>
    where
        F: Fn(&T) -> bool,
    {
        let data = self.read_lock()?;
        Ok(data.iter().any(predicate))
    }

    /// Insert a record, or replace the one with the same ID in place
    pub fn upsert(&self, record: T) -> Result<(), FolioError> {
        let mut data = self.write_lock()?;
        let id = record.id();
        match data.iter_mut().find(|r| r.id() == id) {
            Some(existing) => *existing = record,
            None => data.push(record),
        }
        Ok(())
    }

    /// Delete a record; returns whether it existed
    pub fn delete(&self, id: T::Id) -> Result<bool, FolioError> {
        let mut data = self.write_lock()?;
        let before = data.len();
        data.retain(|r| r.id() != id);
        Ok(data.len() != before)
    }

    /// Delete every record matching `predicate`; returns how many went
    pub fn delete_where<F>(&self, predicate: F) -> Result<usize, FolioError>
    where
        F: Fn(&T) -> bool,
    {
        let mut data = self.write_lock()?;
        let before = data.len();
        data.retain(|r| !predicate(r));
        Ok(before - data.len())
    }

    pub fn count(&self) -> Result<usize, FolioError> {
        Ok(self.read_lock()?.len())
    }

    fn read_lock(&self) -> Result<RwLockReadGuard<'_, Vec<T>>, FolioError> {
        self.data
            .read()
            .map_err(|e| FolioError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_lock(&self) -> Result<RwLockWriteGuard<'_, Vec<T>>, FolioError> {
        self.data
            .write()
            .map_err(|e| FolioError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}
