//! Coordinate to timezone resolution.

use log::warn;

/// Maps a geographic coordinate to an IANA zone identifier.
pub trait TimezoneResolver: Send + Sync {
    /// Zone identifier for the coordinate, or `None` when no zone is known.
    fn resolve(&self, latitude: f64, longitude: f64) -> Option<String>;

    /// True when the resolver only approximates civil time and ignores
    /// political boundaries and historical rules.
    fn is_approximate(&self) -> bool {
        false
    }
}

impl<T: TimezoneResolver + ?Sized> TimezoneResolver for Box<T> {
    fn resolve(&self, latitude: f64, longitude: f64) -> Option<String> {
        (**self).resolve(latitude, longitude)
    }

    fn is_approximate(&self) -> bool {
        (**self).is_approximate()
    }
}

/// Always answers with one configured zone.
#[derive(Debug, Clone)]
pub struct FixedZoneResolver {
    zone: String,
}

impl FixedZoneResolver {
    pub fn new(zone: impl Into<String>) -> Self {
        Self { zone: zone.into() }
    }

    pub fn zone(&self) -> &str {
        &self.zone
    }
}

impl TimezoneResolver for FixedZoneResolver {
    fn resolve(&self, _latitude: f64, _longitude: f64) -> Option<String> {
        Some(self.zone.clone())
    }
}

/// Degraded fallback: one hour per 15 degrees of longitude, as a fixed
/// `Etc/GMT` zone with no daylight saving or history.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongitudeZoneResolver;

impl LongitudeZoneResolver {
    /// Whole-hour offset east of Greenwich.
    pub fn offset_hours(longitude: f64) -> i32 {
        (longitude / 15.0).round().clamp(-12.0, 12.0) as i32
    }
}

impl TimezoneResolver for LongitudeZoneResolver {
    fn resolve(&self, _latitude: f64, longitude: f64) -> Option<String> {
        if !longitude.is_finite() {
            return None;
        }
        let hours = Self::offset_hours(longitude);
        warn!(
            "approximating timezone from longitude {:.4} as UTC{:+}",
            longitude, hours
        );
        // Etc/GMT names carry the inverted sign: UTC+5 is Etc/GMT-5.
        Some(match hours {
            0 => "Etc/GMT".to_string(),
            h if h > 0 => format!("Etc/GMT-{h}"),
            h => format!("Etc/GMT+{}", -h),
        })
    }

    fn is_approximate(&self) -> bool {
        true
    }
}

/// Offline lookup against bundled timezone boundary polygons.
#[cfg(feature = "geo-tz")]
pub struct BoundaryZoneResolver {
    finder: tzf_rs::DefaultFinder,
}

#[cfg(feature = "geo-tz")]
impl BoundaryZoneResolver {
    pub fn new() -> Self {
        Self {
            finder: tzf_rs::DefaultFinder::new(),
        }
    }
}

#[cfg(feature = "geo-tz")]
impl Default for BoundaryZoneResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "geo-tz")]
impl TimezoneResolver for BoundaryZoneResolver {
    fn resolve(&self, latitude: f64, longitude: f64) -> Option<String> {
        let name = self.finder.get_tz_name(longitude, latitude);
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    }
}

/// Best resolver available in this build: boundary lookup when compiled in,
/// the longitude approximation otherwise.
pub fn default_resolver() -> Box<dyn TimezoneResolver> {
    #[cfg(feature = "geo-tz")]
    {
        Box::new(BoundaryZoneResolver::new())
    }
    #[cfg(not(feature = "geo-tz"))]
    {
        Box::new(LongitudeZoneResolver)
    }
}
