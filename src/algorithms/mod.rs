//! Coordinate transforms: geodesic projection and local plane geometry

pub mod projection;
pub mod geometry;

pub use projection::{calibrated_bearing, geodesic_distance, raw_bearing_angle, OffsetCurve};
pub use geometry::{
    bearing, cardinal, cardinal_between, distance, distance_between, from_local_cartesian,
    to_local_cartesian, CompassRose, Heading,
};
