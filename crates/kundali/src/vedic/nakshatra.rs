//! Nakshatra utilities for Vedic astrology.
//!
//! Nakshatras are 27 lunar mansions, each spanning 13°20' (360/27 degrees).
//! Each nakshatra is divided into 4 padas (quarters).

use crate::ephemeris::Body;
use crate::util::normalize_degrees;
use serde::{Deserialize, Serialize};

pub const NAKSHATRA_SEGMENT_SIZE: f64 = 360.0 / 27.0;
pub const PADA_SIZE: f64 = NAKSHATRA_SEGMENT_SIZE / 4.0;

// (display name, ruling body)
pub const NAKSHATRA_ORDER: [(&str, Body); 27] = [
    ("Ashwini", Body::Ketu),
    ("Bharani", Body::Venus),
    ("Krittika", Body::Sun),
    ("Rohini", Body::Moon),
    ("Mrigashira", Body::Mars),
    ("Ardra", Body::Rahu),
    ("Punarvasu", Body::Jupiter),
    ("Pushya", Body::Saturn),
    ("Ashlesha", Body::Mercury),
    ("Magha", Body::Ketu),
    ("Purva Phalguni", Body::Venus),
    ("Uttara Phalguni", Body::Sun),
    ("Hasta", Body::Moon),
    ("Chitra", Body::Mars),
    ("Swati", Body::Rahu),
    ("Vishakha", Body::Jupiter),
    ("Anuradha", Body::Saturn),
    ("Jyeshtha", Body::Mercury),
    ("Mula", Body::Ketu),
    ("Purva Ashadha", Body::Venus),
    ("Uttara Ashadha", Body::Sun),
    ("Shravana", Body::Moon),
    ("Dhanishta", Body::Mars),
    ("Shatabhisha", Body::Rahu),
    ("Purva Bhadrapada", Body::Jupiter),
    ("Uttara Bhadrapada", Body::Saturn),
    ("Revati", Body::Mercury),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NakshatraPlacement {
    pub name: String,
    /// 0-26
    pub index: usize,
    /// 1-4
    pub pada: u8,
    pub lord: Body,
    pub longitude: f64,
    /// Portion of the nakshatra already traversed, in [0, 1)
    pub fraction_elapsed: f64,
}

pub fn nakshatra_index(longitude: f64) -> usize {
    let lon = normalize_degrees(longitude);
    ((lon / NAKSHATRA_SEGMENT_SIZE).floor() as usize).min(26)
}

/// Placement of a sidereal longitude, usually the Moon's.
pub fn nakshatra_for_longitude(longitude: f64) -> NakshatraPlacement {
    let lon = normalize_degrees(longitude);
    let index = nakshatra_index(lon);
    let offset = (lon - index as f64 * NAKSHATRA_SEGMENT_SIZE).max(0.0);
    let pada = ((offset / PADA_SIZE).floor() as u8 + 1).min(4);
    let (name, lord) = NAKSHATRA_ORDER[index];

    NakshatraPlacement {
        name: name.to_string(),
        index,
        pada,
        lord,
        longitude: lon,
        fraction_elapsed: (offset / NAKSHATRA_SEGMENT_SIZE).min(1.0),
    }
}
