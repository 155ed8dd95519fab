//! Civil birth time to UT Julian Day.

pub mod zone;

pub use zone::{default_resolver, FixedZoneResolver, LongitudeZoneResolver, TimezoneResolver};

#[cfg(feature = "geo-tz")]
pub use zone::BoundaryZoneResolver;

use crate::error::ChartError;
use chrono::{
    DateTime, Datelike, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone,
    Timelike, Utc,
};
use chrono_tz::Tz;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use swisseph::swe::julday;

/// Birth data as supplied by the caller, validated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BirthMoment {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub latitude: f64,
    pub longitude: f64,
}

impl BirthMoment {
    pub fn new(
        date: NaiveDate,
        time: NaiveTime,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, ChartError> {
        validate_coordinates(latitude, longitude)?;
        Ok(Self {
            date,
            time,
            latitude,
            longitude,
        })
    }

    /// Parse `YYYY-MM-DD` and `HH:MM[:SS]` strings.
    pub fn parse(date: &str, time: &str, latitude: f64, longitude: f64) -> Result<Self, ChartError> {
        let date = parse_date(date)?;
        let time = parse_time(time)?;
        Self::new(date, time, latitude, longitude)
    }

    pub fn local_datetime(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate, ChartError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
        ChartError::invalid(
            "date_of_birth",
            format!("expected YYYY-MM-DD, got {value:?}: {e}"),
        )
    })
}

pub fn parse_time(value: &str) -> Result<NaiveTime, ChartError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|e| {
            ChartError::invalid(
                "time_of_birth",
                format!("expected HH:MM or HH:MM:SS, got {value:?}: {e}"),
            )
        })
}

pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), ChartError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(ChartError::invalid(
            "latitude",
            format!("{latitude} is outside [-90, 90]"),
        ));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(ChartError::invalid(
            "longitude",
            format!("{longitude} is outside [-180, 180]"),
        ));
    }
    Ok(())
}

/// A UT Julian Day number.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JulianInstant(pub f64);

impl JulianInstant {
    pub fn from_utc(utc: &NaiveDateTime) -> Self {
        JulianInstant(julian_day(utc))
    }

    pub fn ut(self) -> f64 {
        self.0
    }
}

/// Calendar flag for `swe_julday`: proleptic Gregorian.
const GREG_CAL: u32 = 1;

/// Julian Day of a UT calendar instant, from the Swiss Ephemeris.
pub fn julian_day(utc: &NaiveDateTime) -> f64 {
    let seconds = utc.num_seconds_from_midnight() as f64 + utc.nanosecond() as f64 * 1e-9;
    julday(
        utc.year(),
        utc.month() as i32,
        utc.day() as i32,
        seconds / 3600.0,
        GREG_CAL,
    )
}

/// Result of resolving a birth moment to universal time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTime {
    pub julian_day: JulianInstant,
    pub utc: DateTime<Utc>,
    pub local: NaiveDateTime,
    pub zone: String,
    pub utc_offset_seconds: i32,
    /// The offset came from the longitude approximation rather than the
    /// timezone database.
    pub approximate: bool,
}

/// Convert local civil birth time to UT using the resolver's zone and the
/// IANA rules in force on that date.
pub fn normalize_birth(
    birth: &BirthMoment,
    resolver: &dyn TimezoneResolver,
) -> Result<NormalizedTime, ChartError> {
    let zone_name = resolver
        .resolve(birth.latitude, birth.longitude)
        .ok_or_else(|| ChartError::TimezoneResolution {
            latitude: birth.latitude,
            longitude: birth.longitude,
            message: "coordinate is not covered by any known zone".to_string(),
        })?;
    let tz: Tz = zone_name
        .parse()
        .map_err(|e| ChartError::TimezoneResolution {
            latitude: birth.latitude,
            longitude: birth.longitude,
            message: format!("unknown zone {zone_name:?}: {e}"),
        })?;

    let local = birth.local_datetime();
    let zoned = match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earlier, later) => {
            warn!(
                "local time {} is ambiguous in {} ({} or {}); using the earlier instant",
                local,
                zone_name,
                earlier.offset().fix(),
                later.offset().fix()
            );
            earlier
        }
        LocalResult::None => {
            return Err(ChartError::invalid(
                "time_of_birth",
                format!("{local} does not exist in {zone_name} (daylight saving gap)"),
            ));
        }
    };

    let utc = zoned.with_timezone(&Utc);
    let julian_day = JulianInstant::from_utc(&utc.naive_utc());
    let approximate = resolver.is_approximate();
    if approximate {
        warn!("birth time normalized with an approximate zone {}", zone_name);
    }
    debug!(
        "normalized {} {} -> {} UT (JD {:.6})",
        local, zone_name, utc, julian_day.0
    );

    Ok(NormalizedTime {
        julian_day,
        utc,
        local,
        zone: zone_name,
        utc_offset_seconds: zoned.offset().fix().local_minus_utc(),
        approximate,
    })
}
