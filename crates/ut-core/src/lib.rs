//! `ut-core` — foundational types for the UserTrack proximity core.
//!
//! This crate is a dependency of every other `ut-*` crate.  It has no `ut-*`
//! dependencies and minimal external ones (only `thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `UserId`                                              |
//! | [`geo`]         | `GeoPoint`, haversine distance                        |
//! | [`time`]        | `Timestamp`, `Clock`, `SystemClock`, `ManualClock`    |
//! | [`config`]      | `TrackerConfig`                                       |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::TrackerConfig;
pub use error::{CoreError, CoreResult};
pub use geo::{EARTH_RADIUS_KM, GeoPoint, deg_to_rad, distance_km};
pub use ids::UserId;
pub use time::{Clock, ManualClock, SharedClock, SystemClock, Timestamp};
