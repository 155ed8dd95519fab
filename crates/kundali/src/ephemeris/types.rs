use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Bodies tracked by a chart, in canonical listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    Rahu,
    Ketu,
    Uranus,
    Neptune,
    Pluto,
}

pub const ALL_BODIES: [Body; 12] = [
    Body::Sun,
    Body::Moon,
    Body::Mars,
    Body::Mercury,
    Body::Jupiter,
    Body::Venus,
    Body::Saturn,
    Body::Rahu,
    Body::Ketu,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
];

/// The seven bodies subject to dignity, combustion and drishti rules.
pub const CLASSICAL_BODIES: [Body; 7] = [
    Body::Sun,
    Body::Moon,
    Body::Mars,
    Body::Mercury,
    Body::Jupiter,
    Body::Venus,
    Body::Saturn,
];

/// Lunar node flavour used for Rahu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    #[default]
    True,
    Mean,
}

impl Body {
    pub const fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mars => "Mars",
            Body::Mercury => "Mercury",
            Body::Jupiter => "Jupiter",
            Body::Venus => "Venus",
            Body::Saturn => "Saturn",
            Body::Rahu => "Rahu",
            Body::Ketu => "Ketu",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
        }
    }

    /// Swiss Ephemeris body index. Ketu is never queried: it is derived from
    /// the node.
    pub const fn ephemeris_id(self, node: NodeKind) -> Option<i32> {
        match self {
            Body::Sun => Some(0),
            Body::Moon => Some(1),
            Body::Mercury => Some(2),
            Body::Venus => Some(3),
            Body::Mars => Some(4),
            Body::Jupiter => Some(5),
            Body::Saturn => Some(6),
            Body::Uranus => Some(7),
            Body::Neptune => Some(8),
            Body::Pluto => Some(9),
            Body::Rahu => match node {
                NodeKind::Mean => Some(10),
                NodeKind::True => Some(11),
            },
            Body::Ketu => None,
        }
    }

    pub fn is_classical(self) -> bool {
        CLASSICAL_BODIES.contains(&self)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tropical ecliptic position as returned by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EclipticPosition {
    /// Longitude in degrees (0-360)
    pub longitude: f64,
    /// Speed in longitude (degrees per day)
    pub speed: f64,
}

/// Process-wide ephemeris configuration, fixed at provider construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EphemerisConfig {
    /// Directory holding `.se1` data files. `None` selects the built-in
    /// analytic ephemeris.
    pub data_path: Option<PathBuf>,
    pub node: NodeKind,
}
