//! Error types for ut-store.

use thiserror::Error;

use ut_core::{CoreError, UserId};

/// Errors returned by a [`LocationStore`][crate::LocationStore] operation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store unavailable: {0}")]
    Unavailable(String),

    #[error("record store lock poisoned")]
    Poisoned,

    #[error("seed parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// A stored row whose coordinates cannot be used.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MalformedRecord {
    #[error("record for {0} has a latitude but no longitude")]
    MissingLongitude(UserId),

    #[error("record for {0} has a longitude but no latitude")]
    MissingLatitude(UserId),

    #[error("record for {owner} has invalid coordinates: {source}")]
    InvalidCoordinates {
        owner:  UserId,
        #[source]
        source: CoreError,
    },
}

impl MalformedRecord {
    pub fn owner(&self) -> &UserId {
        match self {
            MalformedRecord::MissingLongitude(o)
            | MalformedRecord::MissingLatitude(o)
            | MalformedRecord::InvalidCoordinates { owner: o, .. } => o,
        }
    }
}
