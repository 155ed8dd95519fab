use crate::ephemeris::ayanamsa::lahiri_ayanamsa;
use crate::ephemeris::types::{Body, EclipticPosition, EphemerisConfig, NodeKind};
use crate::ephemeris::EphemerisProvider;
use crate::util::normalize_degrees;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use swisseph::swe::{calc_ut, houses_ex, set_ephe_path};
use swisseph::AscMc;
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris path not found: {path}. {message}")]
    PathNotFound { path: String, message: String },
    #[error("Ephemeris directory {path} is missing data files: {missing:?}")]
    MissingFiles { path: String, missing: Vec<String> },
    #[error("Julian Day {julian_day} is outside the supported range {min}..{max}")]
    OutOfRange { julian_day: f64, min: f64, max: f64 },
    #[error("{body} is derived from the lunar node and cannot be queried directly")]
    DerivedBody { body: Body },
    #[error("Failed to calculate position for {body} at JD {julian_day}: {message}")]
    CalculationFailed {
        body: Body,
        julian_day: f64,
        message: String,
    },
    #[error("Ascendant calculation failed at JD {julian_day}: {message}")]
    AscendantFailed { julian_day: f64, message: String },
    #[error("Swiss Ephemeris is already reading {configured}; cannot switch to {requested}")]
    PathConflict { configured: String, requested: String },
}

/// Roughly 3000 BCE .. 3000 CE, the span of both the data files and the
/// built-in analytic ephemeris.
pub const MIN_JULIAN_DAY: f64 = 625_000.5;
pub const MAX_JULIAN_DAY: f64 = 2_818_000.5;

// Swiss Ephemeris flag bits
const FLG_SWIEPH: i32 = 2;
const FLG_MOSEPH: i32 = 4;
const FLG_SPEED: i32 = 256;

const WHOLE_SIGN_HOUSES: u8 = b'W';

/// (base name, alternate name) pairs that must be present in a data directory
const REQUIRED_FILES: &[(&str, &str)] = &[
    ("sepl.se1", "sepl_18.se1"),
    ("semo.se1", "semo_18.se1"),
    ("seas.se1", "seas_18.se1"),
];

lazy_static::lazy_static! {
    // The C library keeps global state; calls must not interleave. The
    // guarded value is the data path handed to the library, if any.
    static ref SWE_LOCK: Mutex<Option<PathBuf>> = Mutex::new(None);
}

fn swe_lock() -> MutexGuard<'static, Option<PathBuf>> {
    SWE_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Swiss Ephemeris adapter implementation
pub struct SwissEphemerisAdapter {
    node: NodeKind,
    flags: i32,
}

impl SwissEphemerisAdapter {
    /// Create an adapter. A configured data path must exist and hold the
    /// planetary, lunar and asteroid files; without one the built-in Moshier
    /// ephemeris is used.
    pub fn new(config: &EphemerisConfig) -> Result<Self, EphemerisError> {
        let flags = match &config.data_path {
            Some(path) => {
                validate_data_path(path)?;
                let mut configured = swe_lock();
                match configured.as_deref() {
                    // The library holds one path per process.
                    Some(existing) if existing != path.as_path() => {
                        return Err(EphemerisError::PathConflict {
                            configured: existing.display().to_string(),
                            requested: path.display().to_string(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        set_ephe_path(&path.to_string_lossy());
                        info!("Swiss Ephemeris data path set to {}", path.display());
                        *configured = Some(path.clone());
                    }
                }
                FLG_SWIEPH | FLG_SPEED
            }
            None => {
                info!("Swiss Ephemeris using built-in Moshier ephemeris");
                FLG_MOSEPH | FLG_SPEED
            }
        };

        Ok(Self {
            node: config.node,
            flags,
        })
    }
}

impl EphemerisProvider for SwissEphemerisAdapter {
    fn position(&self, jd_ut: f64, body: Body) -> Result<EclipticPosition, EphemerisError> {
        check_range(jd_ut)?;
        let code = body
            .ephemeris_id(self.node)
            .ok_or(EphemerisError::DerivedBody { body })?;

        let result = {
            let _guard = swe_lock();
            calc_ut(jd_ut, code as u32, self.flags as u32)
        }
        .map_err(|e| EphemerisError::CalculationFailed {
            body,
            julian_day: jd_ut,
            message: format!("Swiss Ephemeris error: {}", e),
        })?;

        let out = result.out;
        Ok(EclipticPosition {
            longitude: normalize_degrees(out[0]),
            speed: out[3],
        })
    }

    fn ayanamsa(&self, jd_ut: f64) -> Result<f64, EphemerisError> {
        check_range(jd_ut)?;
        Ok(lahiri_ayanamsa(jd_ut))
    }

    fn ascendant(&self, jd_ut: f64, latitude: f64, longitude: f64) -> Result<f64, EphemerisError> {
        check_range(jd_ut)?;
        let (_cusps, angles) = {
            let _guard = swe_lock();
            houses_ex(jd_ut, 0, latitude, longitude, WHOLE_SIGN_HOUSES as i32)
        };
        let ascmc = AscMc::from_array(angles);
        let asc = ascmc.ascendant;
        if !asc.is_finite() {
            return Err(EphemerisError::AscendantFailed {
                julian_day: jd_ut,
                message: format!("non-finite ascendant for lat={latitude}, lon={longitude}"),
            });
        }
        Ok(normalize_degrees(asc))
    }
}

fn check_range(jd_ut: f64) -> Result<(), EphemerisError> {
    if !(MIN_JULIAN_DAY..=MAX_JULIAN_DAY).contains(&jd_ut) {
        return Err(EphemerisError::OutOfRange {
            julian_day: jd_ut,
            min: MIN_JULIAN_DAY,
            max: MAX_JULIAN_DAY,
        });
    }
    Ok(())
}

/// Check a data directory for the files the Swiss library needs.
pub fn validate_data_path(path: &Path) -> Result<(), EphemerisError> {
    if !path.is_dir() {
        return Err(EphemerisError::PathNotFound {
            path: path.display().to_string(),
            message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
        });
    }

    let present: Vec<String> = fs::read_dir(path)
        .map_err(|e| EphemerisError::PathNotFound {
            path: path.display().to_string(),
            message: e.to_string(),
        })?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();

    let missing: Vec<String> = REQUIRED_FILES
        .iter()
        .filter(|(base, alt)| !present.iter().any(|f| f == base || f == alt))
        .map(|(base, alt)| format!("{base} (or {alt})"))
        .collect();

    if !missing.is_empty() {
        return Err(EphemerisError::MissingFiles {
            path: path.display().to_string(),
            missing,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_check() {
        assert!(check_range(2_451_545.0).is_ok());
        assert!(matches!(
            check_range(0.0),
            Err(EphemerisError::OutOfRange { .. })
        ));
        assert!(check_range(MAX_JULIAN_DAY + 1.0).is_err());
    }

    #[test]
    fn test_missing_data_path_fails_fast() {
        let config = EphemerisConfig {
            data_path: Some(PathBuf::from("/nonexistent/kundali/ephe")),
            node: NodeKind::True,
        };
        assert!(matches!(
            SwissEphemerisAdapter::new(&config),
            Err(EphemerisError::PathNotFound { .. })
        ));
    }

    #[test]
    fn test_ketu_is_never_queried() {
        let adapter = SwissEphemerisAdapter::new(&EphemerisConfig::default()).unwrap();
        assert!(matches!(
            adapter.position(2_451_545.0, Body::Ketu),
            Err(EphemerisError::DerivedBody { body: Body::Ketu })
        ));
    }

    fn data_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("kundali-swe-{tag}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        for name in ["sepl_18.se1", "semo_18.se1", "seas_18.se1"] {
            fs::write(dir.join(name), b"").unwrap();
        }
        dir
    }

    #[test]
    fn test_second_data_path_is_rejected() {
        let first = data_dir("first");
        let second = data_dir("second");
        let config = |path: &Path| EphemerisConfig {
            data_path: Some(path.to_path_buf()),
            node: NodeKind::True,
        };

        assert!(SwissEphemerisAdapter::new(&config(&first)).is_ok());
        // Same directory again is fine
        assert!(SwissEphemerisAdapter::new(&config(&first)).is_ok());
        match SwissEphemerisAdapter::new(&config(&second)) {
            Err(EphemerisError::PathConflict { configured, requested }) => {
                assert_eq!(configured, first.display().to_string());
                assert_eq!(requested, second.display().to_string());
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("adapter switched the process-wide data path"),
        }
        // Built-in mode does not touch the configured path
        assert!(SwissEphemerisAdapter::new(&EphemerisConfig::default()).is_ok());
        assert_eq!(swe_lock().as_deref(), Some(first.as_path()));

        let _ = fs::remove_dir_all(&first);
        let _ = fs::remove_dir_all(&second);
    }
}
