//! `ut-store` — location records and the record-store seam.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                      |
//! |------------|---------------------------------------------------------------|
//! | [`record`] | `LocationRecord` (write shape), `StoredLocation` (raw row)    |
//! | [`store`]  | `LocationStore` trait                                         |
//! | [`memory`] | `MemoryStore` — mutex-guarded map                             |
//! | [`sqlite`] | `SqliteLocationStore` (feature = `"sqlite"` only)             |
//! | [`loader`] | `load_records_csv`, `load_records_reader`                     |
//! | [`error`]  | `StoreError`, `StoreResult<T>`, `MalformedRecord`             |
//!
//! # Null semantics
//!
//! A location of `None` / both columns `NULL` means "not sharing".  It is a
//! stored value in its own right, distinct from a missing row, and is never
//! read back as `(0, 0)`.
//!
//! # Feature flags
//!
//! | Flag     | Effect                                                      |
//! |----------|-------------------------------------------------------------|
//! | `sqlite` | Enables `SqliteLocationStore` via `rusqlite`.               |
//! | `serde`  | Derives `Serialize`/`Deserialize` on `LocationRecord`.      |

pub mod error;
pub mod loader;
pub mod memory;
pub mod record;
pub mod store;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use error::{MalformedRecord, StoreError, StoreResult};
pub use loader::{load_records_csv, load_records_reader};
pub use memory::MemoryStore;
pub use record::{LocationRecord, StoredLocation};
pub use store::LocationStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteLocationStore;
