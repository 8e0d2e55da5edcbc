//! `ut-proximity` — who is near me.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                        |
//! |------------|-----------------------------------------------------------------|
//! | [`query`]  | `ProximityQuery<S>` — radius filter over a `LocationStore`      |
//! | [`nearby`] | `NearbyUser`, `NearbyResult`, `QueryFailure`                    |
//! | [`live`]   | `NearbySet`, `LocationChange` — fold pushed updates into a view |
//! | [`layout`] | `radial_layout` — the presence view's schematic placement       |
//!
//! The query is best-effort: it never returns an error.  Store failures
//! yield an empty result with the failure attached; malformed records are
//! skipped.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `NearbyUser`, `Marker`. |

pub mod layout;
pub mod live;
pub mod nearby;
pub mod query;


pub use layout::{ME_LABEL, Marker, MarkerKind, RadialLayout, radial_layout};
pub use live::{ChangeOutcome, LocationChange, NearbySet};
pub use nearby::{NearbyResult, NearbyUser, QueryFailure};
pub use query::{DEFAULT_RADIUS_KM, ProximityQuery};
