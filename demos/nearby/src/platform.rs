//! A simulated geolocation platform: every watch follows a seeded random walk.

use std::collections::HashMap;
use std::sync::Mutex;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use ut_core::GeoPoint;
use ut_location::{
    FixSink, Geolocation, PermissionState, PlatformError, PositionFix, WatchHandle, WatchOptions,
};

/// Largest per-step move in either axis, degrees (~1 km).
const STEP_DEG: f64 = 0.01;

struct Watch {
    position: GeoPoint,
    sink:     FixSink,
}

pub struct SimulatedGeolocation {
    start:   GeoPoint,
    rng:     Mutex<SmallRng>,
    next:    Mutex<u64>,
    watches: Mutex<HashMap<WatchHandle, Watch>>,
}

impl SimulatedGeolocation {
    pub fn new(start: GeoPoint, seed: u64) -> Self {
        Self {
            start,
            rng:     Mutex::new(SmallRng::seed_from_u64(seed)),
            next:    Mutex::new(0),
            watches: Mutex::new(HashMap::new()),
        }
    }

    /// Move every watched device one step and deliver the new fix.
    /// Returns the number of fixes delivered.
    pub fn step(&self) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let mut watches = self.watches.lock().unwrap_or_else(|e| e.into_inner());
        for watch in watches.values_mut() {
            let d_lat = rng.gen_range(-STEP_DEG..=STEP_DEG);
            let d_lon = rng.gen_range(-STEP_DEG..=STEP_DEG);
            let lat = (watch.position.lat + d_lat).clamp(-90.0, 90.0);
            let lon = (watch.position.lon + d_lon).clamp(-180.0, 180.0);
            watch.position = GeoPoint::new(lat, lon);
            (watch.sink)(Ok(PositionFix::at(watch.position)));
        }
        watches.len()
    }
}

impl Geolocation for SimulatedGeolocation {
    fn is_supported(&self) -> bool {
        true
    }

    fn query_permission(&self) -> Result<PermissionState, PlatformError> {
        Ok(PermissionState::Granted)
    }

    fn watch_position(&self, _options: WatchOptions, mut sink: FixSink) -> WatchHandle {
        let handle = {
            let mut next = self.next.lock().unwrap_or_else(|e| e.into_inner());
            *next += 1;
            WatchHandle(*next)
        };
        // First fix right away, like a real device with a warm receiver.
        sink(Ok(PositionFix::at(self.start)));
        self.watches
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(handle, Watch { position: self.start, sink });
        handle
    }

    fn clear_watch(&self, handle: WatchHandle) {
        self.watches.lock().unwrap_or_else(|e| e.into_inner()).remove(&handle);
    }
}
