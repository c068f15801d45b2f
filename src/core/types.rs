//! Core data types for radial addressing

use serde::{Deserialize, Serialize};

use crate::core::constants::{HOURS_PER_DIAL, MINUTES_PER_DIAL, MINUTES_PER_HOUR};
use crate::utils::config::Calibration;
use crate::validation::error::ParseError;

/// GPS position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
}

impl GeoCoordinate {
    /// Create a coordinate, rejecting non-finite or out-of-range degrees
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ParseError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ParseError::OutOfRange {
                field: "latitude",
                value: latitude,
            });
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ParseError::OutOfRange {
                field: "longitude",
                value: longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub(crate) const fn from_degrees(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Parse `"lat,lon"` or two whitespace/newline separated values
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let fields: Vec<&str> = text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();
        if fields.len() != 2 {
            return Err(ParseError::FieldCount {
                expected: "2",
                actual: fields.len(),
            });
        }
        let latitude = fields[0]
            .parse::<f64>()
            .map_err(|_| ParseError::number("latitude", fields[0]))?;
        let longitude = fields[1]
            .parse::<f64>()
            .map_err(|_| ParseError::number("longitude", fields[1]))?;
        Self::new(latitude, longitude)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn is_valid(&self) -> bool {
        Self::new(self.latitude, self.longitude).is_ok()
    }
}

/// Clock-face position plus radial distance from the origin.
///
/// The hour is always kept in `0..12` and the minute in `0..60`; the
/// distance is in feet and never negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialAddress {
    hour: u8,
    minute: u8,
    distance: f64,
}

impl RadialAddress {
    /// Create an address. Hours wrap around the dial; minutes must be below
    /// 60 and the distance finite and non-negative.
    pub fn new(hour: u32, minute: u32, distance: f64) -> Result<Self, ParseError> {
        if minute >= MINUTES_PER_HOUR {
            return Err(ParseError::OutOfRange {
                field: "minute",
                value: minute as f64,
            });
        }
        if !distance.is_finite() || distance < 0.0 {
            return Err(ParseError::OutOfRange {
                field: "distance",
                value: distance,
            });
        }
        Ok(Self::from_minutes(
            (hour % HOURS_PER_DIAL) * MINUTES_PER_HOUR + minute,
            distance,
        ))
    }

    /// Create an address whose distance is resolved from a street label
    pub fn from_street(
        hour: u32,
        minute: u32,
        street: &str,
        calibration: &Calibration,
    ) -> Result<Self, ParseError> {
        let distance = calibration
            .streets
            .distance_for(street, &calibration.params);
        Self::new(hour, minute, distance)
    }

    /// Build from minutes past 0:00, wrapping around the dial
    pub(crate) fn from_minutes(total_minutes: u32, distance: f64) -> Self {
        let wrapped = total_minutes % MINUTES_PER_DIAL;
        Self {
            hour: (wrapped / MINUTES_PER_HOUR) as u8,
            minute: (wrapped % MINUTES_PER_HOUR) as u8,
            distance: if distance.is_finite() { distance.max(0.0) } else { 0.0 },
        }
    }

    /// Parse the `"hour,minute,distance"` storage form
    pub fn from_csv(text: &str) -> Result<Self, ParseError> {
        let fields: Vec<&str> = text.split(',').map(str::trim).collect();
        if fields.len() != 3 {
            return Err(ParseError::FieldCount {
                expected: "3",
                actual: fields.len(),
            });
        }
        let hour = fields[0]
            .parse::<u32>()
            .map_err(|_| ParseError::number("hour", fields[0]))?;
        let minute = fields[1]
            .parse::<u32>()
            .map_err(|_| ParseError::number("minute", fields[1]))?;
        let distance = fields[2]
            .parse::<f64>()
            .map_err(|_| ParseError::number("distance", fields[2]))?;
        Self::new(hour, minute, distance)
    }

    /// Storage form `"hour,minute,distance"` with whole feet
    pub fn to_csv(&self) -> String {
        format!("{},{},{}", self.hour, self.minute, self.distance as i64)
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Distance from the origin in feet
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Minutes past 0:00
    pub fn total_minutes(&self) -> u32 {
        self.hour as u32 * MINUTES_PER_HOUR + self.minute as u32
    }

    /// Fractional clock time in `[0, 12)`
    pub fn clock_time(&self) -> f64 {
        (self.hour as f64 + self.minute as f64 / MINUTES_PER_HOUR as f64) % HOURS_PER_DIAL as f64
    }
}

/// The origin itself, 0:00 at zero feet
impl Default for RadialAddress {
    fn default() -> Self {
        Self::from_minutes(0, 0.0)
    }
}
