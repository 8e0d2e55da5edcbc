//! The `LocationStore` trait implemented by all record-store backends.

use ut_core::UserId;

use crate::{LocationRecord, StoreResult, StoredLocation};

/// Keyed store of location records, one row per owner.
///
/// Backends must keep "cleared" (both coordinates null) distinct from "no
/// row at all": [`get`][Self::get] returns `Some` with null coordinates for
/// the former and `None` for the latter.
///
/// Implementations are shared between the tracker's watch callback and the
/// proximity query, so they must be `Send + Sync`.
pub trait LocationStore: Send + Sync {
    /// Fetch the row for `owner`, if one exists.
    fn get(&self, owner: &UserId) -> StoreResult<Option<StoredLocation>>;

    /// Every row whose location is not null, excluding `owner`.
    ///
    /// Rows are returned unvalidated; callers skip malformed ones.
    fn list_sharing_except(&self, owner: &UserId) -> StoreResult<Vec<StoredLocation>>;

    /// Insert or replace the row keyed by `record.owner_id`.
    fn upsert(&self, record: &LocationRecord) -> StoreResult<()>;
}

impl<S: LocationStore + ?Sized> LocationStore for std::sync::Arc<S> {
    fn get(&self, owner: &UserId) -> StoreResult<Option<StoredLocation>> {
        (**self).get(owner)
    }

    fn list_sharing_except(&self, owner: &UserId) -> StoreResult<Vec<StoredLocation>> {
        (**self).list_sharing_except(owner)
    }

    fn upsert(&self, record: &LocationRecord) -> StoreResult<()> {
        (**self).upsert(record)
    }
}
