//! `ut-location` — the location-sharing lifecycle.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`platform`] | `Geolocation` trait, `WatchOptions`, `PositionFix`, `FixError`  |
//! | [`state`]    | `TrackerState`                                                  |
//! | [`tracker`]  | `LocationTracker<G, S>` — permission, watch, writes             |
//! | [`observer`] | `TrackerObserver` trait, `NoopObserver`                         |
//! | [`error`]    | `LocationError`, `LocationResult<T>`                            |
//!
//! # Lifecycle (summary)
//!
//! 1. `enable_tracking(user)` checks permission (without prompting) and
//!    starts one platform watch for `user`.
//! 2. Each fix is validated and upserted as `{ user, point, now }`.  A failed
//!    fix or a failed write is logged and tracking continues.
//! 3. `disable_tracking(user)` clears the watch before returning, then
//!    upserts a null location so peers stop seeing `user`.
//!
//! Only [`LocationError::CapabilityUnavailable`] and
//! [`LocationError::PermissionDenied`] ever reach the caller.

pub mod error;
pub mod observer;
pub mod platform;
pub mod state;
pub mod tracker;


pub use error::{LocationError, LocationResult};
pub use observer::{NoopObserver, TrackerObserver};
pub use platform::{
    FixError, FixSink, Geolocation, PermissionState, PlatformError, PositionFix, WatchHandle,
    WatchOptions,
};
pub use state::TrackerState;
pub use tracker::LocationTracker;
