//! Conversion between GPS fixes, radial addresses and address text
//!
//! Text addresses look like `"4:30 & D"`, `"10:05 & Esplanade"` or, outside
//! the named streets, `"2:00 & 6100'"`. Minutes are always two digits, hours
//! never padded.

use log::debug;

use crate::algorithms::projection::{calibrated_bearing, geodesic_distance};
use crate::core::constants::{HOURS_PER_DIAL, MINUTES_PER_HOUR};
use crate::core::{GeoCoordinate, RadialAddress};
use crate::utils::config::Calibration;
use crate::validation::error::ParseError;

/// Radial address of a GPS fix
pub fn to_address(geo: &GeoCoordinate, calibration: &Calibration) -> RadialAddress {
    let params = &calibration.params;
    let angle = calibrated_bearing(geo, &params.origin, &params.offset);

    let time = angle / 360.0 * HOURS_PER_DIAL as f64;
    let hour = (time.floor() as u32).min(HOURS_PER_DIAL - 1);
    let minute = (((time - hour as f64) * MINUTES_PER_HOUR as f64).floor() as u32)
        .min(MINUTES_PER_HOUR - 1);
    let distance = geodesic_distance(geo, &params.origin);

    let address = RadialAddress::from_minutes(hour * MINUTES_PER_HOUR + minute, distance);
    debug!(
        "({:.6}, {:.6}) -> angle {:.3} -> {}",
        geo.latitude(),
        geo.longitude(),
        angle,
        format_address(&address, calibration)
    );
    address
}

/// Street name for a distance, or the whole-foot distance with a trailing `'`
pub fn to_street_label(distance: f64, calibration: &Calibration) -> String {
    calibration
        .streets
        .label_for(distance, &calibration.params)
        .unwrap_or_else(|| format!("{}'", distance as i64))
}

/// Distance in feet represented by a street label
pub fn to_distance(label: &str, calibration: &Calibration) -> f64 {
    calibration.streets.distance_for(label, &calibration.params)
}

/// `"H:MM & <street>"`
pub fn format_address(address: &RadialAddress, calibration: &Calibration) -> String {
    format!(
        "{}:{:02} & {}",
        address.hour(),
        address.minute(),
        to_street_label(address.distance(), calibration)
    )
}

/// Like [`format_address`], but multi-character street names and
/// out-of-band distances are written as bare whole feet
pub fn format_export(address: &RadialAddress, calibration: &Calibration) -> String {
    let street = match calibration
        .streets
        .label_for(address.distance(), &calibration.params)
    {
        Some(label) if label.chars().count() == 1 => label,
        _ => (address.distance() as i64).to_string(),
    };
    format!("{}:{:02} & {}", address.hour(), address.minute(), street)
}

/// Parse `"H:MM & <street>"`, `"H:MM & <feet>'"` or `"H:MM & <feet>"`
pub fn parse_address(text: &str, calibration: &Calibration) -> Result<RadialAddress, ParseError> {
    let (clock, street) = text
        .split_once('&')
        .ok_or_else(|| ParseError::malformed(text, "missing '&' separator"))?;

    let (hour, minute) = clock
        .trim()
        .split_once(':')
        .ok_or_else(|| ParseError::malformed(text, "clock must be H:MM"))?;
    let hour_text = hour.trim();
    let minute_text = minute.trim();
    let hour = hour_text
        .parse::<u32>()
        .map_err(|_| ParseError::number("hour", hour_text))?;
    let minute = minute_text
        .parse::<u32>()
        .map_err(|_| ParseError::number("minute", minute_text))?;
    if hour > HOURS_PER_DIAL {
        return Err(ParseError::OutOfRange {
            field: "hour",
            value: hour as f64,
        });
    }

    let street = street.trim();
    if street.contains('&') {
        return Err(ParseError::malformed(text, "malformed separator"));
    }
    if street.is_empty() {
        return Err(ParseError::malformed(text, "missing street"));
    }
    let distance = parse_street_or_distance(street, calibration)?;
    RadialAddress::new(hour, minute, distance)
}

/// A street label, or a foot distance with an optional trailing `'`
pub fn parse_street_or_distance(field: &str, calibration: &Calibration) -> Result<f64, ParseError> {
    let field = field.trim();
    if let Some(feet) = field.strip_suffix('\'') {
        let feet = feet.trim();
        return feet
            .parse::<f64>()
            .map_err(|_| ParseError::number("distance", feet));
    }
    if field.starts_with(|c: char| c.is_ascii_digit()) {
        return field
            .parse::<f64>()
            .map_err(|_| ParseError::number("distance", field));
    }
    Ok(to_distance(field, calibration))
}
