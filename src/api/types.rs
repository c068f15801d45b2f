//! Output contracts for directions and the status panel

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::algorithms::geometry::{cardinal_between, distance, CompassRose, Heading};
use crate::core::RadialAddress;
use crate::processing::codec::format_address;
use crate::utils::config::Calibration;

/// How to get from the current location to a target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directions {
    /// Name of the target, if it has one
    pub target: Option<String>,
    /// Target address text
    pub address: String,
    /// Straight-line distance on the local plane (feet)
    pub distance_ft: u32,
    pub heading: Heading,
}

impl Directions {
    pub fn between(
        from: &RadialAddress,
        to: &RadialAddress,
        target: Option<&str>,
        calibration: &Calibration,
        rose: CompassRose,
    ) -> Self {
        Self {
            target: target.map(str::to_string),
            address: format_address(to, calibration),
            distance_ft: distance(from, to),
            heading: cardinal_between(from, to, &calibration.params.offset, rose),
        }
    }
}

/// `"<distance>', <heading>"`
impl fmt::Display for Directions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}', {}", self.distance_ft, self.heading)
    }
}

/// Everything the status panel shows after a location update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelUpdate {
    /// Current address text, `None` before the first fix
    pub current: Option<String>,
    pub nearest_amenity: Option<Directions>,
    pub home: Option<Directions>,
    pub destination: Option<Directions>,
}

/// Output format preference for the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directions_display() {
        let calibration = Calibration::default();
        let from = RadialAddress::new(6, 0, 3000.0).unwrap();
        let to = RadialAddress::new(6, 0, 4000.0).unwrap();
        let directions = Directions::between(&from, &to, Some("Camp"), &calibration, CompassRose::Eight);

        assert_eq!(directions.distance_ft, 1000);
        assert_eq!(directions.address, "6:00 & E");
        assert_eq!(directions.target.as_deref(), Some("Camp"));
        assert_eq!(
            directions.to_string(),
            format!("1000', {}", directions.heading)
        );
    }

    #[test]
    fn test_heading_serializes_as_text() {
        let directions = Directions {
            target: None,
            address: "4:30 & D".to_string(),
            distance_ft: 120,
            heading: Heading::NorthNortheast,
        };
        let json = serde_json::to_string(&directions).unwrap();
        assert!(json.contains(r#""heading":"north-northeast""#));
    }
}
