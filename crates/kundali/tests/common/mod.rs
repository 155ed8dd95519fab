#![allow(dead_code)]

use kundali::ephemeris::{EclipticPosition, EphemerisProvider};
use kundali::{Body, EphemerisError, TimezoneResolver};
use std::collections::BTreeMap;
use std::sync::Mutex;

pub const STUB_AYANAMSA: f64 = 24.0;

/// Deterministic provider returning fixed tropical positions.
///
/// Default sidereal layout (ayanamsa 24°, ascendant 15° Aries):
/// Sun 300 Aquarius, Moon 45 Taurus, Mars 280 Capricorn, Mercury 310
/// Aquarius (retrograde), Jupiter 100 Cancer (retrograde), Venus 330 Pisces,
/// Saturn 70 Gemini, Rahu 60 Gemini, Uranus 305, Neptune 290, Pluto 235.
pub struct StubEphemeris {
    pub sidereal: BTreeMap<Body, (f64, f64)>,
    pub ascendant_sidereal: f64,
    pub max_julian_day: f64,
    pub queried: Mutex<Vec<Body>>,
}

impl Default for StubEphemeris {
    fn default() -> Self {
        let sidereal = BTreeMap::from([
            (Body::Sun, (300.0, 1.0)),
            (Body::Moon, (45.0, 13.0)),
            (Body::Mars, (280.0, 0.6)),
            (Body::Mercury, (310.0, -0.5)),
            (Body::Jupiter, (100.0, -0.1)),
            (Body::Venus, (330.0, 1.2)),
            (Body::Saturn, (70.0, 0.05)),
            (Body::Rahu, (60.0, -0.05)),
            (Body::Uranus, (305.0, 0.04)),
            (Body::Neptune, (290.0, 0.02)),
            (Body::Pluto, (235.0, 0.01)),
        ]);
        Self {
            sidereal,
            ascendant_sidereal: 15.0,
            max_julian_day: f64::INFINITY,
            queried: Mutex::new(Vec::new()),
        }
    }
}

impl StubEphemeris {
    pub fn with_sidereal(mut self, body: Body, longitude: f64) -> Self {
        let speed = self.sidereal.get(&body).map(|(_, s)| *s).unwrap_or(1.0);
        self.sidereal.insert(body, (longitude, speed));
        self
    }

    pub fn with_max_julian_day(mut self, max: f64) -> Self {
        self.max_julian_day = max;
        self
    }

    fn check(&self, jd: f64) -> Result<(), EphemerisError> {
        if jd > self.max_julian_day {
            return Err(EphemerisError::OutOfRange {
                julian_day: jd,
                min: 0.0,
                max: self.max_julian_day,
            });
        }
        Ok(())
    }
}

impl EphemerisProvider for StubEphemeris {
    fn position(&self, jd: f64, body: Body) -> Result<EclipticPosition, EphemerisError> {
        self.check(jd)?;
        self.queried.lock().unwrap().push(body);
        let (sidereal, speed) = self
            .sidereal
            .get(&body)
            .copied()
            .ok_or(EphemerisError::DerivedBody { body })?;
        Ok(EclipticPosition {
            longitude: sidereal + STUB_AYANAMSA,
            speed,
        })
    }

    fn ayanamsa(&self, jd: f64) -> Result<f64, EphemerisError> {
        self.check(jd)?;
        Ok(STUB_AYANAMSA)
    }

    fn ascendant(&self, jd: f64, _lat: f64, _lon: f64) -> Result<f64, EphemerisError> {
        self.check(jd)?;
        Ok(self.ascendant_sidereal + STUB_AYANAMSA)
    }
}

/// Resolver that knows no zones.
pub struct NowhereResolver;

impl TimezoneResolver for NowhereResolver {
    fn resolve(&self, _latitude: f64, _longitude: f64) -> Option<String> {
        None
    }
}
