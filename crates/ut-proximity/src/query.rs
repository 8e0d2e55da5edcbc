//! The radius-filtered nearby-user query.
//!
//! # Algorithm
//!
//! 1. Read the requester's own record.  Absent, null, or malformed → empty
//!    result: a user who is not sharing cannot discover anyone.
//! 2. Read every sharing record except the requester's.
//! 3. Validate each candidate; malformed rows are skipped and counted.
//! 4. Keep candidates with `distance_km ≤ radius_km`.
//!
//! This is a linear scan over every sharing user per call.  There is no
//! spatial index; at the scale this client targets that is fine, and it is
//! the first thing to revisit if the user count grows.

use std::sync::Arc;

use tracing::{debug, error, warn};

use ut_core::{TrackerConfig, UserId};
use ut_store::LocationStore;

use crate::{NearbyResult, NearbyUser, QueryFailure};

/// Radius used when the caller does not pick one, kilometres.
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Best-effort nearby-user lookup over a [`LocationStore`].
///
/// Holds no cache; every call reads the store afresh, so a concurrent
/// location write may or may not be reflected.
pub struct ProximityQuery<S: LocationStore> {
    store:             Arc<S>,
    default_radius_km: f64,
}

impl<S: LocationStore> ProximityQuery<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store, default_radius_km: DEFAULT_RADIUS_KM }
    }

    /// Take the default radius from `config`.
    pub fn with_config(mut self, config: &TrackerConfig) -> Self {
        self.default_radius_km = config.default_radius_km;
        self
    }

    pub fn default_radius_km(&self) -> f64 {
        self.default_radius_km
    }

    /// [`get_nearby_users`][Self::get_nearby_users] with the configured
    /// default radius.
    pub fn get_nearby_users_default(&self, user: &UserId) -> NearbyResult {
        self.get_nearby_users(user, self.default_radius_km)
    }

    /// Users other than `user` whose shared location lies within
    /// `radius_km` of `user`'s own shared location.
    ///
    /// Never fails: store errors produce an empty result with
    /// [`NearbyResult::failure`] set, and malformed candidates are skipped.
    /// A negative or non-finite radius matches nobody.
    pub fn get_nearby_users(&self, user: &UserId, radius_km: f64) -> NearbyResult {
        if !radius_km.is_finite() || radius_km < 0.0 {
            warn!(%user, radius_km, "nearby query with unusable radius");
            return NearbyResult::empty();
        }

        let origin = match self.store.get(user) {
            Ok(Some(row)) => match row.location() {
                Ok(Some(point)) => point,
                Ok(None) => return NearbyResult::empty(),
                Err(e) => {
                    warn!(%user, error = %e, "own location record is malformed");
                    return NearbyResult::empty();
                }
            },
            Ok(None) => return NearbyResult::empty(),
            Err(e) => {
                error!(%user, error = %e, "failed to read own location");
                return NearbyResult::failed(QueryFailure::OwnRecord(e));
            }
        };

        let candidates = match self.store.list_sharing_except(user) {
            Ok(rows) => rows,
            Err(e) => {
                error!(%user, error = %e, "failed to read nearby candidates");
                return NearbyResult::failed(QueryFailure::Candidates(e));
            }
        };

        let mut result = NearbyResult::empty();
        for row in candidates {
            // The store contract already excludes the requester; a backend
            // that gets it wrong must still not make a user their own peer.
            if &row.owner_id == user {
                continue;
            }
            let point = match row.location() {
                Ok(Some(p)) => p,
                Ok(None) => continue,
                Err(e) => {
                    debug!(error = %e, "skipping malformed location record");
                    result.skipped += 1;
                    continue;
                }
            };
            let distance_km = origin.distance_km(point);
            if distance_km <= radius_km {
                result.users.push(NearbyUser {
                    owner_id: row.owner_id,
                    location: point,
                    distance_km,
                });
            }
        }

        debug!(
            %user,
            radius_km,
            found = result.users.len(),
            skipped = result.skipped,
            "nearby query complete"
        );
        result
    }
}
