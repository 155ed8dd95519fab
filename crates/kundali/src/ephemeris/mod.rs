pub mod adapter;
pub mod ayanamsa;
pub mod types;

pub use adapter::{EphemerisError, SwissEphemerisAdapter};
pub use ayanamsa::lahiri_ayanamsa;
pub use types::{Body, EclipticPosition, EphemerisConfig, NodeKind, ALL_BODIES, CLASSICAL_BODIES};

/// Source of tropical positions, ayanamsa and ascendant.
///
/// Implementations are configured once and read-only afterwards, so a single
/// provider may serve concurrent chart requests.
pub trait EphemerisProvider: Send + Sync {
    /// Tropical longitude and daily speed of `body`. Ketu is derived by the
    /// caller and must be rejected.
    fn position(&self, jd_ut: f64, body: Body) -> Result<EclipticPosition, EphemerisError>;

    /// Lahiri ayanamsa in degrees.
    fn ayanamsa(&self, jd_ut: f64) -> Result<f64, EphemerisError>;

    /// Tropical ascendant longitude for a geographic location.
    fn ascendant(&self, jd_ut: f64, latitude: f64, longitude: f64) -> Result<f64, EphemerisError>;
}
