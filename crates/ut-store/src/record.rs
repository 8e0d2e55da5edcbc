//! Location record shapes.
//!
//! [`LocationRecord`] is what the client writes: a validated point or
//! `None` for "not sharing".  [`StoredLocation`] is what a store hands back:
//! raw nullable columns that have not been checked.  Readers convert with
//! [`StoredLocation::location`], which is where malformed rows are caught.

use ut_core::{GeoPoint, Timestamp, UserId};

use crate::MalformedRecord;

/// One user's shared location, as written by the tracker.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationRecord {
    pub owner_id:     UserId,
    /// `None` means the user has stopped sharing.  It is never `(0, 0)`.
    pub location:     Option<GeoPoint>,
    pub last_updated: Timestamp,
}

impl LocationRecord {
    /// A record announcing `owner` at `point`.
    pub fn sharing(owner: UserId, point: GeoPoint, now: Timestamp) -> Self {
        Self { owner_id: owner, location: Some(point), last_updated: now }
    }

    /// A record clearing `owner`'s shared location.
    pub fn cleared(owner: UserId, now: Timestamp) -> Self {
        Self { owner_id: owner, location: None, last_updated: now }
    }
}

/// A row as it comes back from a store, before validation.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredLocation {
    pub owner_id:     UserId,
    pub latitude:     Option<f64>,
    pub longitude:    Option<f64>,
    pub last_updated: Timestamp,
}

impl StoredLocation {
    /// `true` if either coordinate column is non-null.
    ///
    /// This is the store-level "location is not null" predicate.  A row with
    /// only one coordinate counts as sharing and is then rejected as
    /// malformed by [`location`][Self::location].
    #[inline]
    pub fn is_sharing(&self) -> bool {
        self.latitude.is_some() || self.longitude.is_some()
    }

    /// Validate the coordinate columns.
    ///
    /// - both null → `Ok(None)` (not sharing)
    /// - both present, finite and in range → `Ok(Some(point))`
    /// - anything else → `Err(MalformedRecord)`
    pub fn location(&self) -> Result<Option<GeoPoint>, MalformedRecord> {
        match (self.latitude, self.longitude) {
            (None, None) => Ok(None),
            (Some(lat), Some(lon)) => GeoPoint::try_new(lat, lon)
                .map(Some)
                .map_err(|source| MalformedRecord::InvalidCoordinates {
                    owner: self.owner_id.clone(),
                    source,
                }),
            (Some(_), None) => Err(MalformedRecord::MissingLongitude(self.owner_id.clone())),
            (None, Some(_)) => Err(MalformedRecord::MissingLatitude(self.owner_id.clone())),
        }
    }
}

impl From<&LocationRecord> for StoredLocation {
    fn from(r: &LocationRecord) -> Self {
        Self {
            owner_id:     r.owner_id.clone(),
            latitude:     r.location.map(|p| p.lat),
            longitude:    r.location.map(|p| p.lon),
            last_updated: r.last_updated,
        }
    }
}

impl From<LocationRecord> for StoredLocation {
    fn from(r: LocationRecord) -> Self {
        StoredLocation::from(&r)
    }
}
