//! Unit tests for ut-store.

use ut_core::{GeoPoint, Timestamp, UserId};

use crate::{LocationRecord, StoredLocation};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn raw(owner: &str, lat: Option<f64>, lon: Option<f64>) -> StoredLocation {
    StoredLocation {
        owner_id:     UserId::from(owner),
        latitude:     lat,
        longitude:    lon,
        last_updated: Timestamp(1_000),
    }
}

fn owners(rows: &[StoredLocation]) -> Vec<&str> {
    let mut v: Vec<&str> = rows.iter().map(|r| r.owner_id.as_str()).collect();
    v.sort_unstable();
    v
}

// ── StoredLocation validation ─────────────────────────────────────────────────

#[cfg(test)]
mod record {
    use super::*;
    use crate::MalformedRecord;

    #[test]
    fn both_null_is_not_sharing() {
        let r = raw("a", None, None);
        assert!(!r.is_sharing());
        assert_eq!(r.location(), Ok(None));
    }

    #[test]
    fn valid_pair_converts() {
        let r = raw("a", Some(12.5), Some(-45.0));
        assert!(r.is_sharing());
        assert_eq!(r.location(), Ok(Some(GeoPoint::new(12.5, -45.0))));
    }

    #[test]
    fn zero_zero_is_a_real_location() {
        assert_eq!(raw("a", Some(0.0), Some(0.0)).location(), Ok(Some(GeoPoint::new(0.0, 0.0))));
    }

    #[test]
    fn half_null_is_malformed_but_sharing() {
        let r = raw("a", Some(1.0), None);
        assert!(r.is_sharing());
        assert_eq!(r.location(), Err(MalformedRecord::MissingLongitude(UserId::from("a"))));

        let r = raw("b", None, Some(1.0));
        assert_eq!(r.location(), Err(MalformedRecord::MissingLatitude(UserId::from("b"))));
    }

    #[test]
    fn nan_and_out_of_range_are_malformed() {
        let err = raw("a", Some(f64::NAN), Some(0.0)).location().unwrap_err();
        assert_eq!(err.owner(), &UserId::from("a"));
        assert!(matches!(err, MalformedRecord::InvalidCoordinates { .. }));
        assert!(raw("a", Some(0.0), Some(200.0)).location().is_err());
        assert!(raw("a", Some(-91.0), Some(0.0)).location().is_err());
    }

    #[test]
    fn from_record_round_trips_null() {
        let cleared = LocationRecord::cleared(UserId::from("a"), Timestamp(5));
        let row = StoredLocation::from(&cleared);
        assert_eq!(row.latitude, None);
        assert_eq!(row.longitude, None);
        assert_eq!(row.last_updated, Timestamp(5));

        let shared =
            LocationRecord::sharing(UserId::from("a"), GeoPoint::new(1.0, 2.0), Timestamp(6));
        let row = StoredLocation::from(shared);
        assert_eq!((row.latitude, row.longitude), (Some(1.0), Some(2.0)));
    }
}

// ── MemoryStore ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod memory {
    use super::*;
    use crate::{LocationStore, MemoryStore};

    #[test]
    fn get_missing_is_none() {
        let store = MemoryStore::new();
        assert!(store.get(&UserId::from("nobody")).unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn upsert_replaces() {
        let store = MemoryStore::new();
        let me = UserId::from("me");
        let record = LocationRecord::sharing(me.clone(), GeoPoint::new(1.0, 1.0), Timestamp(1));
        store.upsert(&record).unwrap();
        let record = LocationRecord::sharing(me.clone(), GeoPoint::new(2.0, 2.0), Timestamp(2));
        store.upsert(&record).unwrap();
        assert_eq!(store.len(), 1);

        let row = store.get(&me).unwrap().unwrap();
        assert_eq!(row.location(), Ok(Some(GeoPoint::new(2.0, 2.0))));
        assert_eq!(row.last_updated, Timestamp(2));
    }

    #[test]
    fn cleared_row_is_kept_not_deleted() {
        let store = MemoryStore::new();
        let me = UserId::from("me");
        let record = LocationRecord::sharing(me.clone(), GeoPoint::new(1.0, 1.0), Timestamp(1));
        store.upsert(&record).unwrap();
        store.upsert(&LocationRecord::cleared(me.clone(), Timestamp(2))).unwrap();

        let row = store.get(&me).unwrap().expect("row still present");
        assert_eq!(row.location(), Ok(None));
    }

    #[test]
    fn list_sharing_excludes_owner_and_nulls() {
        let store = MemoryStore::with_rows([
            raw("me", Some(0.0), Some(0.0)),
            raw("peer", Some(0.0), Some(0.05)),
            raw("hidden", None, None),
            raw("half", Some(3.0), None),
        ]);
        let rows = store.list_sharing_except(&UserId::from("me")).unwrap();
        assert_eq!(owners(&rows), ["half", "peer"]);
    }

    #[test]
    fn insert_raw_keeps_malformed_values() {
        let store = MemoryStore::new();
        store.insert_raw(raw("bad", Some(f64::NAN), Some(0.0))).unwrap();
        let row = store.get(&UserId::from("bad")).unwrap().unwrap();
        assert!(row.latitude.unwrap().is_nan());
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use super::*;
    use crate::{StoreError, load_records_reader};

    #[test]
    fn parses_nulls_and_nan() {
        let csv = "\
owner_id,latitude,longitude,last_updated
alice@example.com,0.0,0.0,1700000000000
bob@example.com, 0.0 , 0.05 ,
carol@example.com,,,1700000000000
dave@example.com,NaN,1.0,1
erin@example.com,1.0,,1
";
        let rows = load_records_reader(Cursor::new(csv)).unwrap();
        assert_eq!(rows.len(), 5);

        assert_eq!(rows[0].location(), Ok(Some(GeoPoint::new(0.0, 0.0))));
        assert_eq!(rows[0].last_updated, Timestamp(1_700_000_000_000));

        assert_eq!(rows[1].longitude, Some(0.05));
        assert_eq!(rows[1].last_updated, Timestamp::EPOCH);

        assert!(!rows[2].is_sharing());

        assert!(rows[3].latitude.unwrap().is_nan());
        assert!(rows[3].location().is_err());

        assert!(rows[4].is_sharing());
        assert!(rows[4].location().is_err());
    }

    #[test]
    fn rejects_unparseable_coordinate() {
        let csv = "owner_id,latitude,longitude,last_updated\na,north,1.0,0\n";
        assert!(matches!(load_records_reader(Cursor::new(csv)), Err(StoreError::Parse(_))));
    }

    #[test]
    fn rejects_empty_owner() {
        let csv = "owner_id,latitude,longitude,last_updated\n,1.0,1.0,0\n";
        assert!(matches!(load_records_reader(Cursor::new(csv)), Err(StoreError::Parse(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let missing = std::path::Path::new("/definitely/not/here.csv");
        let err = crate::load_records_csv(missing).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}

// ── SQLite backend ────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{LocationStore, SqliteLocationStore};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _s = SqliteLocationStore::open(&dir.path().join("locations.db")).unwrap();
        assert!(dir.path().join("locations.db").exists());
    }

    #[test]
    fn sqlite_upsert_and_get() {
        let store = SqliteLocationStore::open_in_memory().unwrap();
        let me = UserId::from("me@example.com");
        let record = LocationRecord::sharing(me.clone(), GeoPoint::new(10.0, 20.0), Timestamp(7));
        store.upsert(&record).unwrap();
        let record = LocationRecord::sharing(me.clone(), GeoPoint::new(11.0, 21.0), Timestamp(8));
        store.upsert(&record).unwrap();

        let row = store.get(&me).unwrap().unwrap();
        assert_eq!(row.location(), Ok(Some(GeoPoint::new(11.0, 21.0))));
        assert_eq!(row.last_updated, Timestamp(8));
        assert!(store.get(&UserId::from("other")).unwrap().is_none());
    }

    #[test]
    fn sqlite_cleared_is_null_not_missing() {
        let store = SqliteLocationStore::open_in_memory().unwrap();
        let me = UserId::from("me");
        store.upsert(&LocationRecord::cleared(me.clone(), Timestamp(1))).unwrap();

        let row = store.get(&me).unwrap().expect("cleared row exists");
        assert_eq!((row.latitude, row.longitude), (None, None));
        assert!(store.list_sharing_except(&UserId::from("x")).unwrap().is_empty());
    }

    #[test]
    fn sqlite_list_sharing_except() {
        let store = SqliteLocationStore::open_in_memory().unwrap();
        for row in [
            raw("me", Some(0.0), Some(0.0)),
            raw("peer", Some(0.0), Some(0.05)),
            raw("hidden", None, None),
            raw("half", None, Some(2.0)),
        ] {
            store.insert_raw(&row).unwrap();
        }
        let rows = store.list_sharing_except(&UserId::from("me")).unwrap();
        assert_eq!(owners(&rows), ["half", "peer"]);
    }

    #[test]
    fn sqlite_persists_across_reopen() {
        let dir = tmp();
        let path = dir.path().join("locations.db");
        {
            let store = SqliteLocationStore::open(&path).unwrap();
            let a = UserId::from("a");
            let record = LocationRecord::sharing(a, GeoPoint::new(1.0, 1.0), Timestamp(3));
            store.upsert(&record).unwrap();
        }
        let store = SqliteLocationStore::open(&path).unwrap();
        assert!(store.get(&UserId::from("a")).unwrap().is_some());
    }

    #[test]
    fn sqlite_text_coordinate_is_malformed_not_fatal() {
        let dir = tmp();
        let path = dir.path().join("locations.db");
        let store = SqliteLocationStore::open(&path).unwrap();
        store.insert_raw(&raw("me", Some(0.0), Some(0.0))).unwrap();
        store.insert_raw(&raw("near", Some(0.0), Some(0.05))).unwrap();

        // Another writer stores text in the REAL column; SQLite keeps it as TEXT.
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute(
            "INSERT INTO locations (owner_id, latitude, longitude, last_updated) \
             VALUES ('bad', 'NaN', 0.0, 0)",
            [],
        )
        .unwrap();
        drop(conn);

        let rows = store.list_sharing_except(&UserId::from("me")).unwrap();
        assert_eq!(owners(&rows), ["bad", "near"]);

        let bad = rows.iter().find(|r| r.owner_id.as_str() == "bad").unwrap();
        assert!(bad.latitude.unwrap().is_nan());
        assert!(bad.location().is_err());

        let near = rows.iter().find(|r| r.owner_id.as_str() == "near").unwrap();
        assert_eq!(near.location(), Ok(Some(GeoPoint::new(0.0, 0.05))));

        let row = store.get(&UserId::from("bad")).unwrap().expect("row readable");
        assert!(row.location().is_err());
    }
}
