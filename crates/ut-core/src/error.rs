//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]` where they need to propagate it.

use thiserror::Error;

/// The error type for `ut-core` validation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("latitude {0} is outside [-90, 90] or not finite")]
    InvalidLatitude(f64),

    #[error("longitude {0} is outside [-180, 180] or not finite")]
    InvalidLongitude(f64),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `ut-core`.
pub type CoreResult<T> = Result<T, CoreError>;
