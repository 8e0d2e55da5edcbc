//! nearby — end-to-end run of the UserTrack proximity core.
//!
//! Seeds a SQLite store with a handful of users around Westminster, starts
//! tracking one of them on a simulated device that wanders about, and polls
//! the nearby-user query the way the presence view does.  Time is simulated:
//! each round advances a manual clock by the configured poll interval.
//!
//! ```text
//! nearby [CONFIG.json] [SEED.csv]
//! ```
//!
//! Set `RUST_LOG=debug` to see lifecycle transitions and query details.

mod platform;

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ut_core::{Clock, GeoPoint, ManualClock, SharedClock, Timestamp, TrackerConfig, UserId};
use ut_location::{FixError, LocationTracker, TrackerObserver, TrackerState};
use ut_proximity::{LocationChange, NearbySet, ProximityQuery, RadialLayout, radial_layout};
use ut_store::{
    LocationStore, SqliteLocationStore, StoreError, StoredLocation, load_records_csv,
    load_records_reader,
};

use platform::SimulatedGeolocation;

// ── Constants ─────────────────────────────────────────────────────────────────

const ME:          &str  = "dana@example.com";
const SEED:        u64   = 7;
const ROUNDS:      usize = 5;
const START_UNIX:  i64   = 1_700_000_000;

// ── Seed CSV ──────────────────────────────────────────────────────────────────

const SEED_CSV: &str = "\
owner_id,latitude,longitude,last_updated\n\
alice@example.com,51.5033,-0.1196,1700000000000\n\
bob@example.com,51.5081,-0.0759,1700000000000\n\
carol@example.com,51.4994,-0.1273,1700000000000\n\
erin@example.com,51.7520,-1.2577,1700000000000\n\
frank@example.com,,,1700000000000\n\
";

// ── Observer ──────────────────────────────────────────────────────────────────

struct LogObserver;

impl TrackerObserver for LogObserver {
    fn on_transition(&self, user: &UserId, from: TrackerState, to: TrackerState) {
        info!(%user, %from, %to, "tracking");
    }

    fn on_fix_error(&self, user: &UserId, error: &FixError) {
        info!(%user, %error, "fix rejected");
    }

    fn on_store_error(&self, user: &UserId, error: &StoreError) {
        info!(%user, %error, "write failed");
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn load_config(path: Option<&str>) -> Result<TrackerConfig> {
    let config = match path {
        Some(p) => {
            let text = std::fs::read_to_string(p).with_context(|| format!("reading {p}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {p}"))?
        }
        None => TrackerConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn load_seed(path: Option<&str>) -> Result<Vec<StoredLocation>> {
    let rows = match path {
        Some(p) => load_records_csv(Path::new(p))?,
        None => load_records_reader(Cursor::new(SEED_CSV))?,
    };
    Ok(rows)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = load_config(args.first().map(String::as_str))?;
    let seed   = load_seed(args.get(1).map(String::as_str))?;

    println!("=== nearby — UserTrack proximity core ===");
    println!(
        "Radius: {} km  |  Poll: {} s  |  Rounds: {ROUNDS}",
        config.default_radius_km, config.poll_interval_secs
    );

    // 1. Store, seeded.
    let store = Arc::new(SqliteLocationStore::open_in_memory()?);
    for row in &seed {
        store.insert_raw(row)?;
    }
    println!("Seeded {} users", seed.len());

    // 2. Clock, platform, tracker.
    let manual = Arc::new(ManualClock::new(Timestamp::from_unix_secs(START_UNIX)));
    let clock: SharedClock = manual.clone();
    let geo = Arc::new(SimulatedGeolocation::new(GeoPoint::new(51.5007, -0.1246), SEED));

    let me = UserId::from(ME);
    let mut tracker = LocationTracker::new(Arc::clone(&geo), Arc::clone(&store), clock.clone())
        .with_config(&config)
        .with_observer(Arc::new(LogObserver));
    tracker.enable_tracking(&me)?;

    // 3. Poll.
    let query = ProximityQuery::new(Arc::clone(&store)).with_config(&config);
    let step_ms = i64::try_from(config.poll_interval_secs)
        .context("poll interval out of range")?
        .saturating_mul(1_000);

    let mut last = query.get_nearby_users_default(&me);
    println!("Initially {} users within {} km", last.len(), query.default_radius_km());
    for round in 1..=ROUNDS {
        manual.advance_millis(step_ms);
        geo.step();

        last = query.get_nearby_users_default(&me);
        if let Some(failure) = &last.failure {
            eprintln!("round {round}: {failure}");
            continue;
        }

        let here = store.get(&me)?.and_then(|row| row.location().ok().flatten());
        println!();
        println!(
            "Round {round} @ {}  you are at {}",
            clock.now(),
            here.map(|p| p.to_string()).unwrap_or_else(|| "-".into())
        );
        println!("{:<22} {:>10}", "User", "km");
        println!("{}", "-".repeat(33));
        for user in last.sorted_by_distance() {
            println!("{:<22} {:>10.3}", user.owner_id, user.distance_km);
        }
    }

    // 4. Presence view snapshot.
    let markers = radial_layout(&last.users, &RadialLayout::default());
    println!();
    println!("Presence view markers:");
    println!("{}", serde_json::to_string_pretty(&markers)?);

    // 5. A pushed change between polls: carol walks off towards Oxford.
    let origin = store.get(&me)?.and_then(|row| row.location().ok().flatten());
    let mut live = NearbySet::from_result(me.clone(), origin, config.default_radius_km, &last);
    let carol_moved = LocationChange {
        owner_id:  UserId::from("carol@example.com"),
        latitude:  Some(51.7000),
        longitude: Some(-1.2000),
    };
    let outcome = live.apply(carol_moved);
    println!();
    println!("Pushed change for carol: {outcome:?}; {} users in view", live.len());

    // 6. Stop sharing.  Peers no longer see us.
    tracker.disable_tracking(&me);
    let peer = UserId::from("alice@example.com");
    let seen = query.get_nearby_users_default(&peer).contains(&me);
    println!("After disable, alice sees {ME}: {seen}");

    Ok(())
}
