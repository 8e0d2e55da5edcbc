//! Merging realtime location changes into a nearby set.
//!
//! The realtime channel (an external pub/sub collaborator) pushes a
//! [`LocationChange`] whenever some user's stored location is updated.
//! [`NearbySet`] folds those into the last query result so the UI can react
//! between polls.  Polling [`ProximityQuery`][crate::ProximityQuery] stays
//! the source of truth; this is only a faster path.

use std::collections::HashMap;

use tracing::debug;

use ut_core::{GeoPoint, UserId};
use ut_store::StoredLocation;

use crate::{NearbyResult, NearbyUser};

/// One pushed update: the new coordinate columns for `owner_id`.
#[derive(Clone, Debug, PartialEq)]
pub struct LocationChange {
    pub owner_id:  UserId,
    pub latitude:  Option<f64>,
    pub longitude: Option<f64>,
}

impl From<StoredLocation> for LocationChange {
    fn from(row: StoredLocation) -> Self {
        Self { owner_id: row.owner_id, latitude: row.latitude, longitude: row.longitude }
    }
}

/// What [`NearbySet::apply`] did with a change.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChangeOutcome {
    Inserted,
    Updated,
    Removed,
    /// The change did not affect the set.
    Ignored,
}

/// The requester's current view of who is nearby, keyed by owner.
#[derive(Debug, Clone)]
pub struct NearbySet {
    me:        UserId,
    origin:    Option<GeoPoint>,
    radius_km: f64,
    users:     HashMap<UserId, NearbyUser>,
}

impl NearbySet {
    /// An empty set.  `origin` is the requester's own location; `None` means
    /// the requester is not sharing, and then the set stays empty.
    pub fn new(me: UserId, origin: Option<GeoPoint>, radius_km: f64) -> Self {
        Self { me, origin, radius_km, users: HashMap::new() }
    }

    /// Seed from a query result.
    pub fn from_result(
        me:        UserId,
        origin:    Option<GeoPoint>,
        radius_km: f64,
        result:    &NearbyResult,
    ) -> Self {
        let mut set = Self::new(me, origin, radius_km);
        if set.origin.is_some() {
            for u in &result.users {
                if u.owner_id != set.me {
                    set.users.insert(u.owner_id.clone(), u.clone());
                }
            }
        }
        set
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn contains(&self, owner: &UserId) -> bool {
        self.users.contains_key(owner)
    }

    pub fn get(&self, owner: &UserId) -> Option<&NearbyUser> {
        self.users.get(owner)
    }

    /// Current members, unordered.
    pub fn users(&self) -> impl Iterator<Item = &NearbyUser> {
        self.users.values()
    }

    /// Members as a `Vec`, for handing to [`radial_layout`][crate::radial_layout].
    pub fn to_vec(&self) -> Vec<NearbyUser> {
        self.users.values().cloned().collect()
    }

    /// The requester moved (or stopped sharing).  Members now outside the
    /// radius are dropped and distances recomputed; a `None` origin empties
    /// the set.
    pub fn set_origin(&mut self, origin: Option<GeoPoint>) {
        self.origin = origin;
        match origin {
            None => self.users.clear(),
            Some(o) => {
                let radius = self.radius_km;
                self.users.retain(|_, u| {
                    u.distance_km = o.distance_km(u.location);
                    u.distance_km <= radius
                });
            }
        }
    }

    /// Fold one pushed change into the set.
    pub fn apply(&mut self, change: LocationChange) -> ChangeOutcome {
        if change.owner_id == self.me {
            return ChangeOutcome::Ignored;
        }
        let Some(origin) = self.origin else {
            return ChangeOutcome::Ignored;
        };

        let point = match (change.latitude, change.longitude) {
            (Some(lat), Some(lon)) => GeoPoint::try_new(lat, lon).ok(),
            _ => None,
        };
        let within = point
            .map(|p| (p, origin.distance_km(p)))
            .filter(|&(_, d)| d <= self.radius_km);

        match within {
            Some((location, distance_km)) => {
                let user = NearbyUser { owner_id: change.owner_id.clone(), location, distance_km };
                match self.users.insert(change.owner_id, user) {
                    Some(_) => ChangeOutcome::Updated,
                    None => ChangeOutcome::Inserted,
                }
            }
            None => {
                if self.users.remove(&change.owner_id).is_some() {
                    debug!(owner = %change.owner_id, "peer left the nearby set");
                    ChangeOutcome::Removed
                } else {
                    ChangeOutcome::Ignored
                }
            }
        }
    }
}
