//! CSV seed loader.
//!
//! # CSV format
//!
//! One row per owner.  An empty coordinate cell is a null (not sharing).
//!
//! ```csv
//! owner_id,latitude,longitude,last_updated
//! alice@example.com,0.0,0.0,1700000000000
//! bob@example.com,0.0,0.05,1700000000000
//! carol@example.com,,,1700000000000
//! ```
//!
//! `last_updated` is Unix milliseconds and may be left empty (epoch).
//!
//! Rows are loaded raw: a coordinate that parses as a float (including
//! `NaN`) is kept even if it is out of range, so fixtures can describe
//! malformed rows.  Validation happens when a reader converts the row.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use ut_core::{Timestamp, UserId};

use crate::{StoreError, StoredLocation};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct SeedRecord {
    owner_id:     String,
    latitude:     Option<f64>,
    longitude:    Option<f64>,
    last_updated: Option<i64>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load raw location rows from a CSV file.
pub fn load_records_csv(path: &Path) -> Result<Vec<StoredLocation>, StoreError> {
    let file = std::fs::File::open(path).map_err(StoreError::Io)?;
    load_records_reader(file)
}

/// Like [`load_records_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedding seed data.
pub fn load_records_reader<R: Read>(reader: R) -> Result<Vec<StoredLocation>, StoreError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in csv_reader.deserialize::<SeedRecord>() {
        let rec = result.map_err(|e| StoreError::Parse(e.to_string()))?;
        if rec.owner_id.is_empty() {
            return Err(StoreError::Parse(format!(
                "empty owner_id on seed row {}",
                rows.len() + 1
            )));
        }
        rows.push(StoredLocation {
            owner_id:     UserId::new(rec.owner_id),
            latitude:     rec.latitude,
            longitude:    rec.longitude,
            last_updated: Timestamp(rec.last_updated.unwrap_or(0)),
        });
    }
    Ok(rows)
}
