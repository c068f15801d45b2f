//! Physical constants and layout defaults

/// Mean Earth radius used by the haversine distance (km)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometres per mile as used by the site's distance tables
pub const KM_PER_MILE: f64 = 1.6;

pub const FEET_PER_MILE: f64 = 5280.0;

/// Default origin (the central reference point)
pub const DEFAULT_ORIGIN_LATITUDE: f64 = 40.7864;
pub const DEFAULT_ORIGIN_LONGITUDE: f64 = -119.2065;

/// Default coefficients of `c0 * sin(c1 * angle + c2) + c3`
pub const DEFAULT_OFFSET_COEFFICIENTS: [f64; 4] = [8.2, 0.035, 6.3, 44.7];

/// Distance from the origin to the inner edge of the Esplanade (feet)
pub const DEFAULT_ESPLANADE_DISTANCE: f64 = 2700.0;

/// Radial width of one lettered block (feet)
pub const DEFAULT_BLOCK_WIDTH: f64 = 240.0;

/// Lettered streets A through L
pub const LETTERED_STREET_COUNT: u8 = 12;

pub const ESPLANADE_LABEL: &str = "Esplanade";

pub const HOURS_PER_DIAL: u32 = 12;
pub const MINUTES_PER_HOUR: u32 = 60;
pub const MINUTES_PER_DIAL: u32 = HOURS_PER_DIAL * MINUTES_PER_HOUR;
