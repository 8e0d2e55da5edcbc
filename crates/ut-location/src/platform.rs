//! The platform geolocation capability, as a trait.
//!
//! A browser, a mobile OS, or a test double implements [`Geolocation`].  The
//! tracker only ever talks to this trait, never to a global.

use thiserror::Error;

use ut_core::{GeoPoint, TrackerConfig};

/// What the platform reports when asked about location permission.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PermissionState {
    Granted,
    Denied,
    /// Not yet decided; asking would prompt the user.
    Prompt,
}

/// Options passed to [`Geolocation::watch_position`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WatchOptions {
    pub high_accuracy:  bool,
    pub timeout_ms:     u32,
    /// 0 forbids the platform from returning a cached fix.
    pub maximum_age_ms: u32,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self::from(&TrackerConfig::default())
    }
}

impl From<&TrackerConfig> for WatchOptions {
    fn from(cfg: &TrackerConfig) -> Self {
        Self {
            high_accuracy:  cfg.high_accuracy,
            timeout_ms:     cfg.fix_timeout_ms,
            maximum_age_ms: cfg.maximum_age_ms,
        }
    }
}

/// One position delivered by the platform.
///
/// Coordinates are whatever the platform produced; the tracker validates
/// them before writing.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PositionFix {
    pub latitude:  f64,
    pub longitude: f64,
}

impl PositionFix {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn at(point: GeoPoint) -> Self {
        Self::new(point.lat, point.lon)
    }
}

/// A single failed delivery.  Never fatal to the watch.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FixError {
    #[error("position permission revoked")]
    PermissionDenied,

    #[error("position unavailable: {0}")]
    PositionUnavailable(String),

    #[error("no fix within {0} ms")]
    Timeout(u32),

    #[error("platform delivered an unusable fix: {0}")]
    InvalidFix(#[from] ut_core::CoreError),
}

/// Failure of the permission query itself (as opposed to a "no" answer).
#[derive(Debug, Error, Clone, PartialEq)]
#[error("permission query failed: {0}")]
pub struct PlatformError(pub String);

/// Opaque token identifying one active watch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WatchHandle(pub u64);

/// Callback receiving every delivery for one watch.
///
/// The platform serialises calls per watch, so the sink is `FnMut` and needs
/// no internal locking.  It must be `Send` because the platform may deliver
/// on its own thread.
pub type FixSink = Box<dyn FnMut(Result<PositionFix, FixError>) + Send + 'static>;

/// Platform geolocation capability.
pub trait Geolocation: Send + Sync {
    /// `false` when the device has no geolocation at all.
    fn is_supported(&self) -> bool;

    /// Current permission decision.  Must not prompt the user.
    fn query_permission(&self) -> Result<PermissionState, PlatformError>;

    /// Start a continuous watch delivering into `sink` until cleared.
    fn watch_position(&self, options: WatchOptions, sink: FixSink) -> WatchHandle;

    /// Stop the watch.  After this returns, `sink` receives nothing further.
    /// Clearing an unknown handle is a no-op.
    fn clear_watch(&self, handle: WatchHandle);
}

impl<G: Geolocation + ?Sized> Geolocation for std::sync::Arc<G> {
    fn is_supported(&self) -> bool {
        (**self).is_supported()
    }

    fn query_permission(&self) -> Result<PermissionState, PlatformError> {
        (**self).query_permission()
    }

    fn watch_position(&self, options: WatchOptions, sink: FixSink) -> WatchHandle {
        (**self).watch_position(options, sink)
    }

    fn clear_watch(&self, handle: WatchHandle) {
        (**self).clear_watch(handle)
    }
}
