//! Local plane geometry between radial addresses
//!
//! Addresses are laid out on a flat plane centred on the origin with
//! 12:00 pointing "north" (negative y) and 3:00 pointing east (positive x).
//! Distances and bearings between two addresses are measured on this plane,
//! never on the ellipsoid.

use std::f64::consts::TAU;
use std::fmt;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::algorithms::projection::{normalize_degrees, OffsetCurve};
use crate::core::constants::{HOURS_PER_DIAL, MINUTES_PER_DIAL};
use crate::core::RadialAddress;

/// Compass heading on the local plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Heading {
    North,
    NorthNortheast,
    Northeast,
    NortheastEast,
    East,
    SoutheastEast,
    Southeast,
    SouthSoutheast,
    South,
    SouthSouthwest,
    Southwest,
    SouthwestWest,
    West,
    NorthwestWest,
    Northwest,
    NorthNorthwest,
}

impl Heading {
    pub fn as_str(&self) -> &'static str {
        match self {
            Heading::North => "north",
            Heading::NorthNortheast => "north-northeast",
            Heading::Northeast => "northeast",
            Heading::NortheastEast => "northeast-east",
            Heading::East => "east",
            Heading::SoutheastEast => "southeast-east",
            Heading::Southeast => "southeast",
            Heading::SouthSoutheast => "south-southeast",
            Heading::South => "south",
            Heading::SouthSouthwest => "south-southwest",
            Heading::Southwest => "southwest",
            Heading::SouthwestWest => "southwest-west",
            Heading::West => "west",
            Heading::NorthwestWest => "northwest-west",
            Heading::Northwest => "northwest",
            Heading::NorthNorthwest => "north-northwest",
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolution of the compass used by [`cardinal`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompassRose {
    #[default]
    Eight,
    Sixteen,
}

/// Upper (exclusive) bounds of each 8-way sector; anything above wraps to north
const EIGHT_POINT_SECTORS: [(f64, Heading); 8] = [
    (23.0, Heading::North),
    (68.0, Heading::Northeast),
    (113.0, Heading::East),
    (158.0, Heading::Southeast),
    (203.0, Heading::South),
    (248.0, Heading::Southwest),
    (293.0, Heading::West),
    (338.0, Heading::Northwest),
];

const SIXTEEN_POINT_SECTORS: [(f64, Heading); 16] = [
    (11.0, Heading::North),
    (34.0, Heading::NorthNortheast),
    (56.0, Heading::Northeast),
    (79.0, Heading::NortheastEast),
    (101.0, Heading::East),
    (124.0, Heading::SoutheastEast),
    (146.0, Heading::Southeast),
    (169.0, Heading::SouthSoutheast),
    (191.0, Heading::South),
    (214.0, Heading::SouthSouthwest),
    (236.0, Heading::Southwest),
    (259.0, Heading::SouthwestWest),
    (281.0, Heading::West),
    (304.0, Heading::NorthwestWest),
    (326.0, Heading::Northwest),
    (348.0, Heading::NorthNorthwest),
];

/// Clock angle of an address in radians, 0 at 12:00, clockwise
fn clock_angle(address: &RadialAddress) -> f64 {
    TAU * (address.clock_time() / HOURS_PER_DIAL as f64)
}

/// Position of an address on the local plane, in feet
pub fn to_local_cartesian(address: &RadialAddress) -> Vector2<f64> {
    let angle = clock_angle(address);
    let distance = address.distance();
    Vector2::new(distance * angle.sin(), -distance * angle.cos())
}

/// Recover the address of a local plane point, rounded to the nearest minute
pub fn from_local_cartesian(point: &Vector2<f64>) -> RadialAddress {
    let distance = point.norm();
    let angle = point.x.atan2(-point.y).rem_euclid(TAU);
    let minutes = (angle / TAU * MINUTES_PER_DIAL as f64).round() as u32;
    RadialAddress::from_minutes(minutes % MINUTES_PER_DIAL, distance)
}

/// Straight-line distance between two addresses in whole feet
pub fn distance(from: &RadialAddress, to: &RadialAddress) -> u32 {
    let delta = to_local_cartesian(to) - to_local_cartesian(from);
    delta.norm() as u32
}

/// Distance to an optional target; no target gives no distance
pub fn distance_between(from: &RadialAddress, to: Option<&RadialAddress>) -> Option<u32> {
    to.map(|target| distance(from, target))
}

/// Bearing from one address to another in `[0, 360)` degrees.
///
/// The offset curve is applied again here, on top of the correction already
/// made when the addresses were derived from GPS fixes.
pub fn bearing(from: &RadialAddress, to: &RadialAddress, curve: &OffsetCurve) -> f64 {
    let a = to_local_cartesian(from);
    let b = to_local_cartesian(to);
    let dx = b.x - a.x;
    let dy = a.y - b.y;
    let angle = dx.atan2(dy).to_degrees();
    normalize_degrees(angle + curve.offset(angle))
}

/// Map a bearing in degrees onto a compass heading.
///
/// Sectors are closed on their lower edge. Bearings outside `[0, 360)` are
/// normalized first.
pub fn cardinal(bearing: f64, rose: CompassRose) -> Heading {
    let bearing = normalize_degrees(bearing);
    let sectors: &[(f64, Heading)] = match rose {
        CompassRose::Eight => &EIGHT_POINT_SECTORS,
        CompassRose::Sixteen => &SIXTEEN_POINT_SECTORS,
    };
    sectors
        .iter()
        .find(|(upper, _)| bearing < *upper)
        .map(|(_, heading)| *heading)
        .unwrap_or(Heading::North)
}

/// Heading from one address to another
pub fn cardinal_between(
    from: &RadialAddress,
    to: &RadialAddress,
    curve: &OffsetCurve,
    rose: CompassRose,
) -> Heading {
    cardinal(bearing(from, to, curve), rose)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(hour: u32, minute: u32, distance: f64) -> RadialAddress {
        RadialAddress::new(hour, minute, distance).unwrap()
    }

    #[test]
    fn test_local_cartesian_axes() {
        let noon = to_local_cartesian(&addr(0, 0, 1000.0));
        assert!(noon.x.abs() < 1e-9);
        assert!((noon.y + 1000.0).abs() < 1e-9);

        let three = to_local_cartesian(&addr(3, 0, 1000.0));
        assert!((three.x - 1000.0).abs() < 1e-9);
        assert!(three.y.abs() < 1e-9);

        let six = to_local_cartesian(&addr(6, 0, 1000.0));
        assert!(six.x.abs() < 1e-9);
        assert!((six.y - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_round_trip_through_plane() {
        for (hour, minute) in [(0, 0), (2, 15), (4, 30), (6, 0), (9, 45), (11, 59)] {
            let original = addr(hour, minute, 3780.0);
            let back = from_local_cartesian(&to_local_cartesian(&original));
            assert_eq!(back.hour(), original.hour());
            assert_eq!(back.minute(), original.minute());
            assert!((back.distance() - 3780.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_distance() {
        let a = addr(3, 0, 3000.0);
        let b = addr(9, 0, 3000.0);
        assert_eq!(distance(&a, &b), 6000);
        assert_eq!(distance(&a, &a), 0);

        // Right angle: 3:00 and 6:00 at 3000 ft
        let c = addr(6, 0, 3000.0);
        assert_eq!(distance(&a, &c), (3000.0f64 * 2f64.sqrt()) as u32);
    }

    #[test]
    fn test_distance_between_missing_target() {
        let a = addr(3, 0, 3000.0);
        assert_eq!(distance_between(&a, None), None);
        assert_eq!(distance_between(&a, Some(&a)), Some(0));
    }

    #[test]
    fn test_bearing_reapplies_offset() {
        let flat = OffsetCurve::new([0.0, 0.0, 0.0, 0.0]);
        let origin = RadialAddress::default();

        // Towards 3:00 is due east on the plane
        let east = addr(3, 0, 1000.0);
        assert!((bearing(&origin, &east, &flat) - 90.0).abs() < 1e-9);

        // Towards 12:00 is due north
        let north = addr(0, 0, 1000.0);
        assert!(bearing(&origin, &north, &flat).abs() < 1e-9);

        let curve = OffsetCurve::default();
        let expected = 90.0 + curve.offset(90.0);
        assert!((bearing(&origin, &east, &curve) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_bearing_wraps_negative_angles() {
        let flat = OffsetCurve::new([0.0, 0.0, 0.0, 0.0]);
        let origin = RadialAddress::default();
        let west = addr(9, 0, 1000.0);
        assert!((bearing(&origin, &west, &flat) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_cardinal_eight_point_boundaries() {
        assert_eq!(cardinal(0.0, CompassRose::Eight), Heading::North);
        assert_eq!(cardinal(22.999, CompassRose::Eight), Heading::North);
        assert_eq!(cardinal(23.0, CompassRose::Eight), Heading::Northeast);
        assert_eq!(cardinal(112.9, CompassRose::Eight), Heading::East);
        assert_eq!(cardinal(158.0, CompassRose::Eight), Heading::South);
        assert_eq!(cardinal(247.0, CompassRose::Eight), Heading::Southwest);
        assert_eq!(cardinal(300.0, CompassRose::Eight), Heading::Northwest);
        assert_eq!(cardinal(338.0, CompassRose::Eight), Heading::North);
        assert_eq!(cardinal(359.99, CompassRose::Eight), Heading::North);
        assert_eq!(cardinal(360.0, CompassRose::Eight), Heading::North);
    }

    #[test]
    fn test_cardinal_is_total() {
        let eight = [
            Heading::North,
            Heading::Northeast,
            Heading::East,
            Heading::Southeast,
            Heading::South,
            Heading::Southwest,
            Heading::West,
            Heading::Northwest,
        ];
        let mut tenth = 0;
        while tenth < 3600 {
            let heading = cardinal(tenth as f64 / 10.0, CompassRose::Eight);
            assert!(eight.contains(&heading));
            tenth += 1;
        }
    }

    #[test]
    fn test_cardinal_sixteen_point() {
        assert_eq!(cardinal(10.9, CompassRose::Sixteen), Heading::North);
        assert_eq!(cardinal(11.0, CompassRose::Sixteen), Heading::NorthNortheast);
        assert_eq!(cardinal(45.0, CompassRose::Sixteen), Heading::Northeast);
        assert_eq!(cardinal(70.0, CompassRose::Sixteen), Heading::NortheastEast);
        assert_eq!(cardinal(200.0, CompassRose::Sixteen), Heading::SouthSouthwest);
        assert_eq!(cardinal(350.0, CompassRose::Sixteen), Heading::North);
        assert_eq!(Heading::NorthNortheast.to_string(), "north-northeast");
    }

    #[test]
    fn test_sixteen_point_labels() {
        let bearings = [
            5.0, 20.0, 45.0, 70.0, 90.0, 110.0, 135.0, 160.0, 180.0, 200.0, 225.0, 250.0, 270.0,
            290.0, 315.0, 340.0,
        ];
        let labels: Vec<String> = bearings
            .iter()
            .map(|b| cardinal(*b, CompassRose::Sixteen).to_string())
            .collect();
        assert_eq!(
            labels,
            [
                "north",
                "north-northeast",
                "northeast",
                "northeast-east",
                "east",
                "southeast-east",
                "southeast",
                "south-southeast",
                "south",
                "south-southwest",
                "southwest",
                "southwest-west",
                "west",
                "northwest-west",
                "northwest",
                "north-northwest",
            ]
        );

        // Serialized names match the displayed ones
        for label in &labels {
            let heading: Heading = serde_json::from_str(&format!("\"{}\"", label)).unwrap();
            assert_eq!(&heading.to_string(), label);
        }
    }
}
