//! Result types handed to the UI.

use thiserror::Error;

use ut_core::{GeoPoint, UserId};
use ut_store::StoreError;

/// One user within the query radius.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NearbyUser {
    pub owner_id:    UserId,
    pub location:    GeoPoint,
    /// Great-circle distance from the requester, kilometres.
    pub distance_km: f64,
}

/// Which read failed when a query came back empty because of the store.
#[derive(Debug, Error)]
pub enum QueryFailure {
    /// Fetching the requester's own record failed.
    #[error("reading own location: {0}")]
    OwnRecord(#[source] StoreError),

    /// Fetching the candidate records failed.
    #[error("reading nearby candidates: {0}")]
    Candidates(#[source] StoreError),
}

/// Outcome of [`ProximityQuery::get_nearby_users`][crate::ProximityQuery::get_nearby_users].
///
/// `users` has no guaranteed order.  A failed read never propagates: it
/// leaves `users` empty and is recorded in `failure` for the caller to show.
#[derive(Debug, Default)]
pub struct NearbyResult {
    pub users:   Vec<NearbyUser>,
    /// Candidates dropped because their stored coordinates were unusable.
    pub skipped: usize,
    pub failure: Option<QueryFailure>,
}

impl NearbyResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn failed(failure: QueryFailure) -> Self {
        Self { failure: Some(failure), ..Self::default() }
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
        self.users.iter().any(|u| &u.owner_id == owner)
    }

    /// Users sorted nearest first.  The query itself does not sort.
    pub fn sorted_by_distance(&self) -> Vec<&NearbyUser> {
        let mut v: Vec<&NearbyUser> = self.users.iter().collect();
        v.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        v
    }
}
