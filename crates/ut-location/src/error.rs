use thiserror::Error;

/// Failures surfaced to the caller of `enable_tracking` /
/// `request_permission`.
///
/// Everything else that can go wrong while tracking (a bad fix, a failed
/// write) is logged and reported to the [`TrackerObserver`][crate::TrackerObserver]
/// instead.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LocationError {
    /// The platform has no geolocation capability.  Not retried.
    #[error("geolocation is not supported on this platform")]
    CapabilityUnavailable,

    /// The user declined, or has not yet granted, location access.  The
    /// caller may retry later.
    #[error("location permission denied")]
    PermissionDenied,
}

pub type LocationResult<T> = Result<T, LocationError>;
