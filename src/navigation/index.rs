//! Named landmarks and nearest-neighbour search

use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, warn};

use crate::algorithms::geometry::distance;
use crate::core::RadialAddress;
use crate::processing::codec::format_address;
use crate::utils::config::Calibration;

/// A named place on the dial
#[derive(Debug, Clone, PartialEq)]
pub struct Landmark {
    name: String,
    address: RadialAddress,
    description: Option<String>,
}

impl Landmark {
    pub fn new(name: impl Into<String>, address: RadialAddress) -> Self {
        Self {
            name: name.into(),
            address,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &RadialAddress {
        &self.address
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// `name<TAB>address<TAB>description`, the description left empty if absent
    pub fn to_row(&self, calibration: &Calibration) -> String {
        format!(
            "{}\t{}\t{}",
            self.name,
            format_address(&self.address, calibration),
            self.description.as_deref().unwrap_or("")
        )
    }
}

/// Closest landmark to `current`; on equal distance the earlier one wins
pub fn nearest<'a, I>(landmarks: I, current: &RadialAddress) -> Option<&'a Landmark>
where
    I: IntoIterator<Item = &'a Landmark>,
{
    let mut best: Option<(&Landmark, u32)> = None;
    for landmark in landmarks {
        let d = distance(current, &landmark.address);
        match best {
            Some((_, best_distance)) if d >= best_distance => {}
            _ => best = Some((landmark, d)),
        }
    }
    best.map(|(landmark, _)| landmark)
}

/// Landmarks in insertion order, unique by name
#[derive(Debug, Clone, Default)]
pub struct LandmarkIndex {
    landmarks: Vec<Landmark>,
}

impl LandmarkIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a landmark; returns `false` and keeps the existing entry when the
    /// name is already present
    pub fn insert(&mut self, name: impl Into<String>, address: RadialAddress) -> bool {
        self.insert_landmark(Landmark::new(name, address))
    }

    pub fn insert_landmark(&mut self, landmark: Landmark) -> bool {
        if self.get(&landmark.name).is_some() {
            warn!("landmark '{}' already exists, ignoring", landmark.name);
            return false;
        }
        self.landmarks.push(landmark);
        true
    }

    /// Exact, case-sensitive lookup
    pub fn get(&self, name: &str) -> Option<&Landmark> {
        self.landmarks.iter().find(|l| l.name == name)
    }

    /// Remove by exact name, keeping the order of the rest
    pub fn remove(&mut self, name: &str) -> Option<Landmark> {
        let position = self.landmarks.iter().position(|l| l.name == name)?;
        Some(self.landmarks.remove(position))
    }

    pub fn nearest(&self, current: &RadialAddress) -> Option<&Landmark> {
        let found = nearest(&self.landmarks, current);
        debug!(
            "nearest of {} landmark(s): {:?}",
            self.landmarks.len(),
            found.map(Landmark::name)
        );
        found
    }

    /// Names containing `term`, ignoring case, in insertion order.
    /// `"*"` matches every name.
    pub fn search(&self, term: &str) -> Vec<&str> {
        let needle = term.to_lowercase();
        self.landmarks
            .iter()
            .filter(|l| term == "*" || l.name.to_lowercase().contains(&needle))
            .map(|l| l.name.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.landmarks.iter()
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }
}

impl Extend<Landmark> for LandmarkIndex {
    fn extend<T: IntoIterator<Item = Landmark>>(&mut self, iter: T) {
        for landmark in iter {
            self.insert_landmark(landmark);
        }
    }
}

/// Landmark index shared between a loader and concurrent readers
#[derive(Debug, Clone, Default)]
pub struct SharedLandmarkIndex {
    inner: Arc<RwLock<LandmarkIndex>>,
}

impl SharedLandmarkIndex {
    pub fn new(index: LandmarkIndex) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    pub fn insert(&self, landmark: Landmark) -> bool {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        guard.insert_landmark(landmark)
    }

    pub fn remove(&self, name: &str) -> Option<Landmark> {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        guard.remove(name)
    }

    /// Owned copy of the closest landmark
    pub fn nearest(&self, current: &RadialAddress) -> Option<Landmark> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        guard.nearest(current).cloned()
    }

    pub fn search(&self, term: &str) -> Vec<String> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        guard.search(term).into_iter().map(str::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn addr(hour: u32, minute: u32, distance: f64) -> RadialAddress {
        RadialAddress::new(hour, minute, distance).unwrap()
    }

    fn sample() -> LandmarkIndex {
        let mut index = LandmarkIndex::new();
        index.insert("Camp Alpha", addr(3, 0, 3000.0));
        index.insert("Bravo Lounge", addr(6, 0, 3000.0));
        index.insert("alphabet soup", addr(9, 0, 3000.0));
        index
    }

    #[test]
    fn test_nearest_empty_and_single() {
        let index = LandmarkIndex::new();
        assert!(index.nearest(&addr(0, 0, 0.0)).is_none());

        let mut index = LandmarkIndex::new();
        index.insert("Only", addr(1, 0, 4000.0));
        assert_eq!(index.nearest(&addr(7, 0, 2000.0)).unwrap().name(), "Only");
    }

    #[test]
    fn test_nearest_picks_closest() {
        let index = sample();
        let found = index.nearest(&addr(5, 45, 3100.0)).unwrap();
        assert_eq!(found.name(), "Bravo Lounge");
    }

    #[test]
    fn test_nearest_tie_goes_to_first_inserted() {
        let mut index = LandmarkIndex::new();
        index.insert("First", addr(3, 0, 3000.0));
        index.insert("Second", addr(9, 0, 3000.0));
        // The origin is equidistant from both
        assert_eq!(index.nearest(&addr(0, 0, 0.0)).unwrap().name(), "First");
    }

    #[test]
    fn test_zero_distance_is_a_result() {
        let index = sample();
        let found = index.nearest(&addr(9, 0, 3000.0)).unwrap();
        assert_eq!(found.name(), "alphabet soup");
        assert_eq!(distance(found.address(), &addr(9, 0, 3000.0)), 0);
    }

    #[test]
    fn test_search() {
        let index = sample();
        assert_eq!(index.search("ALPHA"), vec!["Camp Alpha", "alphabet soup"]);
        assert_eq!(index.search("lounge"), vec!["Bravo Lounge"]);
        assert!(index.search("zulu").is_empty());
        assert_eq!(index.search("*").len(), 3);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut index = sample();
        assert!(!index.insert("Camp Alpha", addr(1, 0, 2000.0)));
        assert_eq!(index.len(), 3);
        assert_eq!(index.get("Camp Alpha").unwrap().address().hour(), 3);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut index = sample();
        let removed = index.remove("Bravo Lounge").unwrap();
        assert_eq!(removed.address().hour(), 6);
        assert!(index.remove("Bravo Lounge").is_none());
        let names: Vec<&str> = index.iter().map(Landmark::name).collect();
        assert_eq!(names, vec!["Camp Alpha", "alphabet soup"]);
        assert_eq!(index.nearest(&addr(6, 0, 3000.0)).unwrap().name(), "Camp Alpha");
    }

    #[test]
    fn test_to_row() {
        let calibration = Calibration::default();
        let landmark = Landmark::new("Dust Lounge", addr(4, 30, 3780.0)).with_description("cold drinks");
        assert_eq!(landmark.to_row(&calibration), "Dust Lounge\t4:30 & D\tcold drinks");

        let landmark = Landmark::new("Porta", addr(2, 5, 6100.0));
        assert_eq!(landmark.to_row(&calibration), "Porta\t2:05 & 6100'\t");
    }

    #[test]
    fn test_shared_index_concurrent_reads() {
        let shared = SharedLandmarkIndex::new(sample());
        let writer = {
            let shared = shared.clone();
            thread::spawn(move || {
                for i in 0..100 {
                    shared.insert(Landmark::new(format!("Camp {}", i), addr(i % 12, 0, 4000.0)));
                }
            })
        };
        let reader = {
            let shared = shared.clone();
            thread::spawn(move || {
                for _ in 0..100 {
                    assert!(shared.nearest(&addr(6, 0, 3000.0)).is_some());
                    assert!(shared.search("*").len() >= 3);
                }
            })
        };
        writer.join().unwrap();
        reader.join().unwrap();
        assert_eq!(shared.len(), 103);
        assert_eq!(shared.remove("Camp 5").map(|l| l.name().to_string()).as_deref(), Some("Camp 5"));
    }
}
