//! In-process record store.

use std::collections::HashMap;
use std::sync::Mutex;

use ut_core::UserId;

use crate::{LocationRecord, LocationStore, StoreError, StoreResult, StoredLocation};

/// A `HashMap<UserId, StoredLocation>` behind a mutex.
///
/// Used by tests and the demo.  [`insert_raw`][Self::insert_raw] bypasses
/// the validated write path so fixtures can plant malformed rows.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<HashMap<UserId, StoredLocation>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `rows`; later rows win on duplicate
    /// owners.
    pub fn with_rows(rows: impl IntoIterator<Item = StoredLocation>) -> Self {
        let store = Self::new();
        {
            // Freshly created; the lock cannot be poisoned yet.
            let mut map = store.rows.lock().unwrap_or_else(|e| e.into_inner());
            for row in rows {
                map.insert(row.owner_id.clone(), row);
            }
        }
        store
    }

    /// Store a raw row as-is, skipping validation.
    pub fn insert_raw(&self, row: StoredLocation) -> StoreResult<()> {
        let mut map = self.rows.lock().map_err(|_| StoreError::Poisoned)?;
        map.insert(row.owner_id.clone(), row);
        Ok(())
    }

    /// Number of rows, sharing or not.
    pub fn len(&self) -> usize {
        self.rows.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LocationStore for MemoryStore {
    fn get(&self, owner: &UserId) -> StoreResult<Option<StoredLocation>> {
        let map = self.rows.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(owner).cloned())
    }

    fn list_sharing_except(&self, owner: &UserId) -> StoreResult<Vec<StoredLocation>> {
        let map = self.rows.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(map
            .values()
            .filter(|row| row.is_sharing() && &row.owner_id != owner)
            .cloned()
            .collect())
    }

    fn upsert(&self, record: &LocationRecord) -> StoreResult<()> {
        let mut map = self.rows.lock().map_err(|_| StoreError::Poisoned)?;
        map.insert(record.owner_id.clone(), StoredLocation::from(record));
        Ok(())
    }
}
