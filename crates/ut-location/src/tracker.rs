//! `LocationTracker` — permission, position watch, and location writes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, trace, warn};

use ut_core::{GeoPoint, SharedClock, TrackerConfig, UserId};
use ut_store::{LocationRecord, LocationStore};

use crate::observer::{NoopObserver, TrackerObserver};
use crate::{
    FixError, FixSink, Geolocation, LocationError, LocationResult, PermissionState, PositionFix,
    TrackerState, WatchHandle, WatchOptions,
};

// ── Sink gate ─────────────────────────────────────────────────────────────────

/// Open/closed flag shared by a session and its watch sink.
///
/// The sink holds the lock for the whole check-then-write, so once
/// [`close`][Self::close] returns no write from that sink is in flight and
/// none will start.
#[derive(Debug)]
struct SinkGate(Mutex<bool>);

impl SinkGate {
    fn open() -> Arc<Self> {
        Arc::new(SinkGate(Mutex::new(true)))
    }

    fn close(&self) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = false;
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Client-side state for one user who is sharing location.  Present in the
/// tracker's map only while tracking; never persisted.
#[derive(Debug)]
struct TrackingSession {
    watch: WatchHandle,
    gate:  Arc<SinkGate>,
}

// ── LocationTracker ───────────────────────────────────────────────────────────

/// Drives the location-sharing lifecycle for the users of one client.
///
/// # Type parameters
///
/// - `G: Geolocation` — the platform capability (browser, OS, test double).
/// - `S: LocationStore` — the record store, shared with the proximity query.
///
/// Constructed explicitly by the application's composition root; there is
/// no global instance.
pub struct LocationTracker<G: Geolocation, S: LocationStore + 'static> {
    platform:       G,
    store:          Arc<S>,
    clock:          SharedClock,
    observer:       Arc<dyn TrackerObserver>,
    options:        WatchOptions,
    has_permission: bool,
    sessions:       HashMap<UserId, TrackingSession>,
}

impl<G: Geolocation, S: LocationStore + 'static> LocationTracker<G, S> {
    /// Create a tracker with default watch options and no observer.
    pub fn new(platform: G, store: Arc<S>, clock: SharedClock) -> Self {
        Self {
            platform,
            store,
            clock,
            observer:       Arc::new(NoopObserver),
            options:        WatchOptions::default(),
            has_permission: false,
            sessions:       HashMap::new(),
        }
    }

    /// Take watch options from `config`.
    pub fn with_config(mut self, config: &TrackerConfig) -> Self {
        self.options = WatchOptions::from(config);
        self
    }

    /// Report transitions and per-fix outcomes to `observer`.
    pub fn with_observer(mut self, observer: Arc<dyn TrackerObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// The platform this tracker drives.
    pub fn platform(&self) -> &G {
        &self.platform
    }

    /// The options every new watch is started with.
    pub fn watch_options(&self) -> WatchOptions {
        self.options
    }

    /// Current lifecycle state for `user`.
    pub fn state(&self, user: &UserId) -> TrackerState {
        if self.sessions.contains_key(user) {
            TrackerState::Tracking
        } else {
            TrackerState::Disabled
        }
    }

    #[inline]
    pub fn is_tracking(&self, user: &UserId) -> bool {
        self.sessions.contains_key(user)
    }

    /// Ask the platform whether location access is granted.
    ///
    /// Never prompts.  A query failure, `Denied`, or `Prompt` all yield
    /// `Ok(false)`.  Only a platform with no geolocation at all is an error.
    pub fn request_permission(&mut self) -> LocationResult<bool> {
        if !self.platform.is_supported() {
            self.has_permission = false;
            return Err(LocationError::CapabilityUnavailable);
        }

        let granted = match self.platform.query_permission() {
            Ok(PermissionState::Granted) => true,
            Ok(state) => {
                debug!(?state, "location permission not granted");
                false
            }
            Err(e) => {
                warn!(error = %e, "location permission query failed; treating as denied");
                false
            }
        };
        self.has_permission = granted;
        Ok(granted)
    }

    /// Start sharing `user`'s location.
    ///
    /// Checks permission first if it has not been granted yet.  On success a
    /// platform watch is started and every good fix is upserted into the
    /// store.  Calling this again while `user` is already tracking is a no-op;
    /// no second watch is started.
    ///
    /// # Errors
    ///
    /// [`LocationError::CapabilityUnavailable`] or
    /// [`LocationError::PermissionDenied`]; the session is left `Disabled`.
    pub fn enable_tracking(&mut self, user: &UserId) -> LocationResult<()> {
        if self.sessions.contains_key(user) {
            debug!(%user, "tracking already active; enable is a no-op");
            return Ok(());
        }

        let mut from = TrackerState::Disabled;
        if !self.has_permission {
            from = TrackerState::RequestingPermission;
            self.transition(user, TrackerState::Disabled, from);
            match self.request_permission() {
                Ok(true) => {}
                Ok(false) => {
                    self.transition(user, from, TrackerState::PermissionDenied);
                    self.transition(user, TrackerState::PermissionDenied, TrackerState::Disabled);
                    return Err(LocationError::PermissionDenied);
                }
                Err(e) => {
                    self.transition(user, from, TrackerState::Disabled);
                    return Err(e);
                }
            }
        }

        let gate  = SinkGate::open();
        let sink  = self.make_sink(user.clone(), Arc::clone(&gate));
        let watch = self.platform.watch_position(self.options, sink);
        self.sessions.insert(user.clone(), TrackingSession { watch, gate });

        self.transition(user, from, TrackerState::Tracking);
        Ok(())
    }

    /// Stop sharing `user`'s location and clear it in the store.
    ///
    /// The platform watch is cleared before this returns, so no further fix
    /// for `user` is written.  The store is then told the location is null.
    /// Safe to call when nothing is active; a failed clear is logged and
    /// reported to the observer, never returned.
    pub fn disable_tracking(&mut self, user: &UserId) {
        match self.sessions.remove(user) {
            Some(session) => {
                session.gate.close();
                self.platform.clear_watch(session.watch);
                self.transition(user, TrackerState::Tracking, TrackerState::Disabled);
            }
            None => debug!(%user, "disable with no active watch"),
        }

        let record = LocationRecord::cleared(user.clone(), self.clock.now());
        if let Err(e) = self.store.upsert(&record) {
            warn!(%user, error = %e, "failed to clear shared location");
            self.observer.on_store_error(user, &e);
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn transition(&self, user: &UserId, from: TrackerState, to: TrackerState) {
        debug!(%user, %from, %to, "tracking state change");
        self.observer.on_transition(user, from, to);
    }

    fn make_sink(&self, user: UserId, gate: Arc<SinkGate>) -> FixSink {
        let store    = Arc::clone(&self.store);
        let clock    = Arc::clone(&self.clock);
        let observer = Arc::clone(&self.observer);

        Box::new(move |delivery: Result<PositionFix, FixError>| {
            let open = gate.0.lock().unwrap_or_else(PoisonError::into_inner);
            if !*open {
                trace!(%user, "fix delivered after watch was cleared; dropped");
                return;
            }

            let point = delivery.and_then(|fix| {
                GeoPoint::try_new(fix.latitude, fix.longitude).map_err(FixError::from)
            });

            match point {
                Ok(point) => {
                    let record = LocationRecord::sharing(user.clone(), point, clock.now());
                    match store.upsert(&record) {
                        Ok(()) => {
                            trace!(%user, %point, "location fix stored");
                            observer.on_fix_stored(&user, point);
                        }
                        Err(e) => {
                            warn!(%user, error = %e, "failed to store location fix");
                            observer.on_store_error(&user, &e);
                        }
                    }
                }
                Err(e) => {
                    warn!(%user, error = %e, "location fix failed; tracking continues");
                    observer.on_fix_error(&user, &e);
                }
            }
        })
    }
}

impl<G: Geolocation, S: LocationStore + 'static> Drop for LocationTracker<G, S> {
    /// A terminating client stops its watches.  The stored locations are
    /// left as they are; clearing them is `disable_tracking`'s job.
    fn drop(&mut self) {
        for (user, session) in self.sessions.drain() {
            session.gate.close();
            self.platform.clear_watch(session.watch);
            trace!(%user, "watch cleared on tracker drop");
        }
    }
}
