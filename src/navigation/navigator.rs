//! Location tracking and directions to camps, favorites, amenities and home

use log::{debug, info, warn};

use crate::algorithms::geometry::{distance, CompassRose};
use crate::api::types::{Directions, PanelUpdate};
use crate::core::{GeoCoordinate, RadialAddress};
use crate::navigation::index::{Landmark, LandmarkIndex};
use crate::processing::codec::{format_address, to_address};
use crate::processing::parser::LandmarkRecord;
use crate::utils::shared::SharedCalibration;
use crate::validation::error::ParseError;

/// Where the user is, where they are going and what is around them
pub struct Navigator {
    calibration: SharedCalibration,
    rose: CompassRose,
    current: Option<RadialAddress>,
    home: Option<RadialAddress>,
    destination: Option<Landmark>,
    camps: LandmarkIndex,
    favorites: LandmarkIndex,
    amenities: Vec<RadialAddress>,
}

impl Navigator {
    pub fn new(calibration: SharedCalibration) -> Self {
        Self {
            calibration,
            rose: CompassRose::default(),
            current: None,
            home: None,
            destination: None,
            camps: LandmarkIndex::new(),
            favorites: LandmarkIndex::new(),
            amenities: Vec::new(),
        }
    }

    pub fn with_compass_rose(mut self, rose: CompassRose) -> Self {
        self.rose = rose;
        self
    }

    /// Convert a GPS fix and make it the current location
    pub fn update_location(&mut self, geo: &GeoCoordinate) -> RadialAddress {
        let calibration = self.calibration.snapshot();
        let address = to_address(geo, &calibration);
        self.current = Some(address);
        address
    }

    pub fn current_location(&self) -> Option<&RadialAddress> {
        self.current.as_ref()
    }

    /// Use `address`, or the current location when `None`, as home.
    /// Returns the new home, or `None` if there was nothing to set.
    pub fn set_home(&mut self, address: Option<RadialAddress>) -> Option<RadialAddress> {
        let home = address.or(self.current)?;
        self.home = Some(home);
        info!("home set to {}", self.describe(&home));
        Some(home)
    }

    pub fn home(&self) -> Option<&RadialAddress> {
        self.home.as_ref()
    }

    /// Head for a camp or favorite by exact name
    pub fn set_destination(&mut self, name: &str) -> bool {
        match self.lookup(name).cloned() {
            Some(landmark) => {
                info!("destination set to '{}'", landmark.name());
                self.destination = Some(landmark);
                true
            }
            None => {
                warn!("no camp or favorite named '{}'", name);
                false
            }
        }
    }

    pub fn clear_destination(&mut self) {
        self.destination = None;
    }

    pub fn destination(&self) -> Option<&Landmark> {
        self.destination.as_ref()
    }

    /// Exact name lookup, camps before favorites
    pub fn lookup(&self, name: &str) -> Option<&Landmark> {
        self.camps.get(name).or_else(|| self.favorites.get(name))
    }

    pub fn find_camps(&self, term: &str) -> Vec<&str> {
        self.camps.search(term)
    }

    pub fn add_camp(&mut self, landmark: Landmark) -> bool {
        self.camps.insert_landmark(landmark)
    }

    pub fn add_favorite(&mut self, name: impl Into<String>, address: RadialAddress) -> bool {
        self.favorites.insert(name, address)
    }

    pub fn remove_favorite(&mut self, name: &str) -> Option<Landmark> {
        self.favorites.remove(name)
    }

    pub fn add_amenity(&mut self, address: RadialAddress) {
        self.amenities.push(address);
    }

    pub fn camps(&self) -> &LandmarkIndex {
        &self.camps
    }

    pub fn favorites(&self) -> &LandmarkIndex {
        &self.favorites
    }

    /// Resolve named records into the camp index. Unnamed records and
    /// records that fail to resolve are skipped and returned as errors.
    pub fn load_camps(&mut self, records: &[LandmarkRecord]) -> Vec<ParseError> {
        let calibration = self.calibration.snapshot();
        let mut errors = Vec::new();
        for record in records {
            let Some(name) = &record.name else {
                errors.push(ParseError::malformed(&format!("{:?}", record.position), "camp record has no name"));
                continue;
            };
            match record.resolve(&calibration) {
                Ok(address) => {
                    let mut landmark = Landmark::new(name.clone(), address);
                    if let Some(description) = &record.description {
                        landmark = landmark.with_description(description.clone());
                    }
                    self.camps.insert_landmark(landmark);
                }
                Err(e) => {
                    warn!("camp '{}' skipped: {}", name, e);
                    errors.push(e);
                }
            }
        }
        info!("{} camp(s) loaded", self.camps.len());
        errors
    }

    /// Resolve records into the amenity list; names are ignored
    pub fn load_amenities(&mut self, records: &[LandmarkRecord]) -> Vec<ParseError> {
        let calibration = self.calibration.snapshot();
        let mut errors = Vec::new();
        for record in records {
            match record.resolve(&calibration) {
                Ok(address) => self.amenities.push(address),
                Err(e) => {
                    warn!("amenity skipped: {}", e);
                    errors.push(e);
                }
            }
        }
        info!("{} amenit(ies) loaded", self.amenities.len());
        errors
    }

    /// Closest amenity to the current location; ties go to the first loaded
    pub fn nearest_amenity(&self) -> Option<RadialAddress> {
        let current = self.current.as_ref()?;
        let mut best: Option<(RadialAddress, u32)> = None;
        for amenity in &self.amenities {
            let d = distance(current, amenity);
            if best.map_or(true, |(_, best_distance)| d < best_distance) {
                best = Some((*amenity, d));
            }
        }
        best.map(|(amenity, _)| amenity)
    }

    /// Directions from the current location to `target`
    pub fn directions_to(&self, target: &RadialAddress, name: Option<&str>) -> Option<Directions> {
        let current = self.current.as_ref()?;
        let calibration = self.calibration.snapshot();
        Some(Directions::between(current, target, name, &calibration, self.rose))
    }

    /// Current address and directions to the nearest amenity, home and the
    /// destination, all computed against one calibration snapshot
    pub fn panel_update(&self) -> PanelUpdate {
        let Some(current) = self.current else {
            return PanelUpdate::default();
        };
        let calibration = self.calibration.snapshot();
        let directions = |target: &RadialAddress, name: Option<&str>| {
            Directions::between(&current, target, name, &calibration, self.rose)
        };

        let panel = PanelUpdate {
            current: Some(format_address(&current, &calibration)),
            nearest_amenity: self.nearest_amenity().map(|a| directions(&a, None)),
            home: self.home.as_ref().map(|h| directions(h, Some("Home"))),
            destination: self
                .destination
                .as_ref()
                .map(|d| directions(d.address(), Some(d.name()))),
        };
        debug!("panel update: {:?}", panel);
        panel
    }

    fn describe(&self, address: &RadialAddress) -> String {
        format_address(address, &self.calibration.snapshot())
    }
}
