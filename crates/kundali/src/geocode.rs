//! Place name to coordinate lookup.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

pub trait Geocoder: Send + Sync {
    fn locate(&self, place: &str) -> Option<Coordinates>;
}

// (name, latitude, longitude)
const GAZETTEER: &[(&str, f64, f64)] = &[
    ("New Delhi", 28.6139, 77.2090),
    ("Delhi", 28.7041, 77.1025),
    ("Ghaziabad", 28.6692, 77.4538),
    ("Noida", 28.5355, 77.3910),
    ("Gurgaon", 28.4595, 77.0266),
    ("Mumbai", 19.0760, 72.8777),
    ("Kolkata", 22.5726, 88.3639),
    ("Chennai", 13.0827, 80.2707),
    ("Bengaluru", 12.9716, 77.5946),
    ("Bangalore", 12.9716, 77.5946),
    ("Hyderabad", 17.3850, 78.4867),
    ("Ahmedabad", 23.0225, 72.5714),
    ("Pune", 18.5204, 73.8567),
    ("Jaipur", 26.9124, 75.7873),
    ("Lucknow", 26.8467, 80.9462),
    ("Varanasi", 25.3176, 82.9739),
    ("Patna", 25.5941, 85.1376),
    ("Chandigarh", 30.7333, 76.7794),
    ("Bhopal", 23.2599, 77.4126),
    ("Kathmandu", 27.7172, 85.3240),
    ("Colombo", 6.9271, 79.8612),
    ("Dubai", 25.2048, 55.2708),
    ("Abu Dhabi", 24.4539, 54.3773),
    ("Doha", 25.2854, 51.5310),
    ("Muscat", 23.5880, 58.3829),
    ("Riyadh", 24.7136, 46.6753),
];

/// Offline gazetteer of common birth places, extendable from configuration.
/// Lookups ignore case and surrounding whitespace; text after the first
/// comma ("Mumbai, India") is ignored when the full string is unknown.
#[derive(Debug, Clone)]
pub struct StaticGeocoder {
    places: HashMap<String, Coordinates>,
}

fn place_key(place: &str) -> String {
    place.trim().to_lowercase()
}

impl StaticGeocoder {
    pub fn new() -> Self {
        let places = GAZETTEER
            .iter()
            .map(|(name, lat, lon)| (place_key(name), Coordinates::new(*lat, *lon)))
            .collect();
        Self { places }
    }

    pub fn empty() -> Self {
        Self {
            places: HashMap::new(),
        }
    }

    /// Add or replace a place.
    pub fn insert(&mut self, name: &str, coordinates: Coordinates) {
        self.places.insert(place_key(name), coordinates);
    }

    pub fn with_places<I, S>(mut self, places: I) -> Self
    where
        I: IntoIterator<Item = (S, Coordinates)>,
        S: AsRef<str>,
    {
        for (name, coordinates) in places {
            self.insert(name.as_ref(), coordinates);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl Default for StaticGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Geocoder for StaticGeocoder {
    fn locate(&self, place: &str) -> Option<Coordinates> {
        let key = place_key(place);
        if let Some(found) = self.places.get(&key) {
            return Some(*found);
        }
        let head = key.split(',').next()?.trim();
        self.places.get(head).copied()
    }
}
