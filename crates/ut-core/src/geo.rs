//! Geographic coordinate type and great-circle distance.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Location fixes arrive from the
//! platform as doubles and the distance tests need sub-metre agreement, so
//! there is no reason to narrow them.

use std::f64::consts::PI;
use std::fmt;

use crate::{CoreError, CoreResult};

/// Mean Earth radius used by the haversine formula, kilometres.
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Convert degrees to radians.
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (PI / 180.0)
}

/// Haversine great-circle distance in kilometres between two lat/lon pairs
/// given in degrees.
///
/// Performs no bounds checking; validate with [`GeoPoint::try_new`] first.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = deg_to_rad(lat2 - lat1);
    let d_lon = deg_to_rad(lon2 - lon1);

    let a = (d_lat * 0.5).sin().powi(2)
        + deg_to_rad(lat1).cos() * deg_to_rad(lat2).cos() * (d_lon * 0.5).sin().powi(2);

    // Rounding can push `a` a hair past 1 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Construct without validation.  Use for literals known to be in range.
    #[inline]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Construct a point, rejecting non-finite or out-of-range values.
    pub fn try_new(lat: f64, lon: f64) -> CoreResult<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(CoreError::InvalidLatitude(lat));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(CoreError::InvalidLongitude(lon));
        }
        Ok(Self { lat, lon })
    }

    /// Haversine distance to `other` in kilometres.
    #[inline]
    pub fn distance_km(self, other: GeoPoint) -> f64 {
        distance_km(self.lat, self.lon, other.lat, other.lon)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
