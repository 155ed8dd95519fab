//! Sidereal (Lahiri) birth charts with whole-sign houses, Navamsa,
//! nakshatra, Vimshottari dasha, dignity and graha drishti.

pub mod aspects;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod geocode;
pub mod report;
pub mod service;
pub mod sidereal;
pub mod time;
pub mod util;
pub mod vedic;

pub use chart::{ChartHouse, HouseChart, Sign, Varga};
pub use ephemeris::{Body, EphemerisConfig, EphemerisProvider, NodeKind, SwissEphemerisAdapter};
pub use error::{ChartError, EphemerisError, Stage, StageError};
pub use geocode::{Coordinates, Geocoder, StaticGeocoder};
pub use report::{render_markdown, render_prompt};
pub use service::{BirthLocation, ChartOptions, ChartRequest, ChartResult, ChartService};
pub use time::{BirthMoment, NormalizedTime, TimezoneResolver};
pub use vedic::{DashaLevel, DashaReference};
