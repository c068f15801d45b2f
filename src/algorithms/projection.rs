//! Geodesic distance and bearing relative to the origin
//!
//! Bearings here live in the site's clock convention: 0° points from the
//! origin away from the entrance (12 o'clock) and increase clockwise. The
//! raw geographic bearing is skewed relative to the street grid, so every
//! conversion subtracts an empirically fit offset curve.

use serde::{Deserialize, Serialize};

use crate::core::constants::{
    DEFAULT_OFFSET_COEFFICIENTS, EARTH_RADIUS_KM, FEET_PER_MILE, KM_PER_MILE,
};
use crate::core::GeoCoordinate;

/// Angular correction `c0 * sin(c1 * angle + c2) + c3`, angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OffsetCurve {
    pub coefficients: [f64; 4],
}

impl Default for OffsetCurve {
    fn default() -> Self {
        Self {
            coefficients: DEFAULT_OFFSET_COEFFICIENTS,
        }
    }
}

impl OffsetCurve {
    pub fn new(coefficients: [f64; 4]) -> Self {
        Self { coefficients }
    }

    /// Offset in degrees for the given angle
    pub fn offset(&self, angle: f64) -> f64 {
        let [a, b, c, d] = self.coefficients;
        a * (b * angle + c).sin() + d
    }

    pub fn is_finite(&self) -> bool {
        self.coefficients.iter().all(|c| c.is_finite())
    }
}

/// Normalize an angle to `[0, 360)`, mapping 360 to 0
pub fn normalize_degrees(angle: f64) -> f64 {
    let normalized = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Great-circle distance in feet (haversine on a 6371 km sphere)
pub fn geodesic_distance(a: &GeoCoordinate, b: &GeoCoordinate) -> f64 {
    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let lon1 = a.longitude().to_radians();
    let lon2 = b.longitude().to_radians();

    let u = ((lat2 - lat1) / 2.0).sin();
    let v = ((lon2 - lon1) / 2.0).sin();
    let h = (u * u + lat1.cos() * lat2.cos() * v * v).clamp(0.0, 1.0);
    let kilometers = 2.0 * EARTH_RADIUS_KM * h.sqrt().asin();

    kilometers / KM_PER_MILE * FEET_PER_MILE
}

/// Uncorrected clock-convention bearing of `point` as seen from `origin`.
///
/// `atan2` of the latitude/longitude deltas gives a mathematical angle
/// (east = 0°, counter-clockwise); rotating by -90° and reflecting turns
/// it into a clockwise angle with 0° at north.
pub fn raw_bearing_angle(point: &GeoCoordinate, origin: &GeoCoordinate) -> f64 {
    let angle = (point.latitude() - origin.latitude())
        .atan2(point.longitude() - origin.longitude())
        .to_degrees();
    let angle = normalize_degrees(angle);
    let rotated = normalize_degrees(angle - 90.0);
    normalize_degrees(360.0 - rotated)
}

/// Raw bearing with the offset curve subtracted, in `[0, 360)`
pub fn calibrated_bearing(point: &GeoCoordinate, origin: &GeoCoordinate, curve: &OffsetCurve) -> f64 {
    let raw = raw_bearing_angle(point, origin);
    normalize_degrees(raw - curve.offset(raw))
}
