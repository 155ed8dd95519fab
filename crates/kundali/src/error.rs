//! Error kinds surfaced by chart computation.

use std::fmt;
use thiserror::Error;

pub use crate::ephemeris::adapter::EphemerisError;

/// Failures of a single chart computation.
///
/// All of these are deterministic: retrying the same request yields the same
/// error, so none of them are marked retryable.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("invalid {field}: {message}")]
    InvalidInput { field: &'static str, message: String },
    #[error("no timezone for lat={latitude}, lon={longitude}: {message}")]
    TimezoneResolution {
        latitude: f64,
        longitude: f64,
        message: String,
    },
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
    #[error("internal computation error: {0}")]
    Computation(String),
}

impl ChartError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        ChartError::InvalidInput {
            field,
            message: message.into(),
        }
    }
}

/// Facade stage that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Input,
    Geocoding,
    TimeNormalization,
    SiderealPositions,
    ChartAssembly,
    DerivedFacts,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Input => "input validation",
            Stage::Geocoding => "geocoding",
            Stage::TimeNormalization => "time normalization",
            Stage::SiderealPositions => "sidereal positions",
            Stage::ChartAssembly => "chart assembly",
            Stage::DerivedFacts => "derived facts",
        };
        f.write_str(name)
    }
}

/// A [`ChartError`] tagged with the stage it came from.
#[derive(Error, Debug)]
#[error("{stage} failed: {source}")]
pub struct StageError {
    pub stage: Stage,
    #[source]
    pub source: ChartError,
}

impl StageError {
    pub fn new(stage: Stage, source: impl Into<ChartError>) -> Self {
        Self {
            stage,
            source: source.into(),
        }
    }
}

/// Extension for tagging stage results inside the facade.
pub(crate) trait AtStage<T> {
    fn at(self, stage: Stage) -> Result<T, StageError>;
}

impl<T, E: Into<ChartError>> AtStage<T> for Result<T, E> {
    fn at(self, stage: Stage) -> Result<T, StageError> {
        self.map_err(|e| StageError::new(stage, e))
    }
}
