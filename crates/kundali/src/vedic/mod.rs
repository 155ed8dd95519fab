pub mod dashas;
pub mod nakshatra;
pub mod strength;

pub use dashas::{
    compute_vimshottari_dasha, fractional_year, DashaLevel, DashaPeriod, DashaReference,
    DashaTimeline, VIMSHOTTARI_SEQUENCE,
};
pub use nakshatra::{nakshatra_for_longitude, NakshatraPlacement};
pub use strength::{planet_strengths, Dignity, DignityFacts, PlanetStrength};
