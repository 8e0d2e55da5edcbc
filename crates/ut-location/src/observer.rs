//! Observer trait for lifecycle transitions and per-fix outcomes.

use ut_core::{GeoPoint, UserId};
use ut_store::StoreError;

use crate::{FixError, TrackerState};

/// Callbacks invoked by [`LocationTracker`][crate::LocationTracker] and by
/// the watch sinks it installs.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Fix callbacks may arrive on the
/// platform's delivery thread, hence `Send + Sync`.
///
/// # Example — status line
///
/// ```rust,ignore
/// struct StatusLine;
///
/// impl TrackerObserver for StatusLine {
///     fn on_transition(&self, user: &UserId, _from: TrackerState, to: TrackerState) {
///         println!("{user}: {to}");
///     }
/// }
/// ```
pub trait TrackerObserver: Send + Sync {
    /// The session for `user` moved from `from` to `to`.
    fn on_transition(&self, _user: &UserId, _from: TrackerState, _to: TrackerState) {}

    /// A fix was validated and written to the record store.
    fn on_fix_stored(&self, _user: &UserId, _point: GeoPoint) {}

    /// A delivery failed or carried unusable coordinates.  Tracking goes on.
    fn on_fix_error(&self, _user: &UserId, _error: &FixError) {}

    /// A best-effort write (fix upsert or location clear) failed.
    fn on_store_error(&self, _user: &UserId, _error: &StoreError) {}
}

/// A [`TrackerObserver`] that does nothing.
pub struct NoopObserver;

impl TrackerObserver for NoopObserver {}
