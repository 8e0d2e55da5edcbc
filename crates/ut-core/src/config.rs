//! Tracker configuration.
//!
//! Typically loaded from a JSON file by the application crate and passed to
//! the tracker and the proximity query.  [`TrackerConfig::default`] carries
//! the values the web client shipped with.

use crate::{CoreError, CoreResult};

/// Tuning for the position watch and the nearby-user query.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrackerConfig {
    /// Ask the platform for a GPS-grade fix rather than a coarse one.
    pub high_accuracy: bool,

    /// How long the platform may take to produce one fix, milliseconds.
    pub fix_timeout_ms: u32,

    /// Maximum age of a cached fix the platform may hand back.  0 forces a
    /// fresh fix on every delivery.
    pub maximum_age_ms: u32,

    /// Radius used by `get_nearby_users_default`, kilometres.
    pub default_radius_km: f64,

    /// How often the UI re-runs the nearby query.  The core has no
    /// scheduler; this is read by whoever drives the polling.
    pub poll_interval_secs: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            high_accuracy:      true,
            fix_timeout_ms:     5_000,
            maximum_age_ms:     0,
            default_radius_km:  10.0,
            poll_interval_secs: 30,
        }
    }
}

impl TrackerConfig {
    /// Reject values that would make the watch or the query meaningless.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.default_radius_km.is_finite() || self.default_radius_km <= 0.0 {
            return Err(CoreError::Config(format!(
                "default_radius_km must be a positive number, got {}",
                self.default_radius_km
            )));
        }
        if self.fix_timeout_ms == 0 {
            return Err(CoreError::Config("fix_timeout_ms must be non-zero".into()));
        }
        if self.poll_interval_secs == 0 {
            return Err(CoreError::Config("poll_interval_secs must be non-zero".into()));
        }
        Ok(())
    }
}
