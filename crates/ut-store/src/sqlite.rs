//! SQLite record store (feature `sqlite`).
//!
//! One table, `locations`, keyed by owner.  The coordinate columns are
//! nullable; a cleared record keeps its row with both columns `NULL`.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OptionalExtension, Row};

use ut_core::{Timestamp, UserId};

use crate::{LocationRecord, LocationStore, StoreError, StoreResult, StoredLocation};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS locations (
        owner_id     TEXT    PRIMARY KEY,
        latitude     REAL,
        longitude    REAL,
        last_updated INTEGER NOT NULL
    );";

/// Record store backed by an SQLite database.
///
/// `rusqlite::Connection` is `Send` but not `Sync`; the mutex makes the
/// store shareable between the watch callback and the query.
pub struct SqliteLocationStore {
    conn: Mutex<Connection>,
}

impl SqliteLocationStore {
    /// Open (or create) the database at `path` and initialise the schema.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;",
        )?;
        Self::init(conn)
    }

    /// A private in-memory database; contents vanish on drop.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Write a raw row without validation (used for seeding).
    pub fn insert_raw(&self, row: &StoredLocation) -> StoreResult<()> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        conn.execute(
            "INSERT INTO locations (owner_id, latitude, longitude, last_updated) \
             VALUES (?1, ?2, ?3, ?4) \
             ON CONFLICT(owner_id) DO UPDATE SET \
                 latitude     = excluded.latitude, \
                 longitude    = excluded.longitude, \
                 last_updated = excluded.last_updated",
            rusqlite::params![
                row.owner_id.as_str(),
                row.latitude,
                row.longitude,
                row.last_updated.unix_millis(),
            ],
        )?;
        Ok(())
    }
}

/// Read a coordinate column without failing the row.
///
/// SQLite keeps whatever was written, so a REAL column can hold text or a
/// blob.  Those come back as NaN, which [`StoredLocation::location`] rejects
/// as malformed; the rest of the scan is unaffected.
fn coordinate(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<f64>> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null       => None,
        ValueRef::Real(v)    => Some(v),
        ValueRef::Integer(v) => Some(v as f64),
        ValueRef::Text(_) | ValueRef::Blob(_) => Some(f64::NAN),
    })
}

fn row_to_stored(row: &Row<'_>) -> rusqlite::Result<StoredLocation> {
    Ok(StoredLocation {
        owner_id:     UserId::new(row.get::<_, String>(0)?),
        latitude:     coordinate(row, 1)?,
        longitude:    coordinate(row, 2)?,
        last_updated: Timestamp(row.get(3)?),
    })
}

impl LocationStore for SqliteLocationStore {
    fn get(&self, owner: &UserId) -> StoreResult<Option<StoredLocation>> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let row = conn
            .query_row(
                "SELECT owner_id, latitude, longitude, last_updated \
                 FROM locations WHERE owner_id = ?1",
                [owner.as_str()],
                row_to_stored,
            )
            .optional()?;
        Ok(row)
    }

    fn list_sharing_except(&self, owner: &UserId) -> StoreResult<Vec<StoredLocation>> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let mut stmt = conn.prepare_cached(
            "SELECT owner_id, latitude, longitude, last_updated \
             FROM locations \
             WHERE (latitude IS NOT NULL OR longitude IS NOT NULL) AND owner_id <> ?1",
        )?;
        let rows = stmt
            .query_map([owner.as_str()], row_to_stored)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn upsert(&self, record: &LocationRecord) -> StoreResult<()> {
        self.insert_raw(&StoredLocation::from(record))
    }
}
