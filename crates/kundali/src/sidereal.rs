//! Tropical to sidereal conversion for the tracked bodies.

use crate::ephemeris::{Body, EphemerisError, EphemerisProvider};
use crate::util::normalize_degrees;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    pub body: Body,
    pub tropical_longitude: f64,
    pub sidereal_longitude: f64,
    /// Degrees per day
    pub speed: f64,
    pub retrograde: bool,
}

/// Sidereal positions at one instant, keyed in canonical body order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiderealPositions {
    pub julian_day: f64,
    pub ayanamsa: f64,
    pub bodies: BTreeMap<Body, BodyPosition>,
}

impl SiderealPositions {
    pub fn get(&self, body: Body) -> Option<&BodyPosition> {
        self.bodies.get(&body)
    }

    pub fn sidereal_longitude(&self, body: Body) -> Option<f64> {
        self.get(body).map(|p| p.sidereal_longitude)
    }

    /// Sidereal longitudes in canonical order.
    pub fn longitudes(&self) -> BTreeMap<Body, f64> {
        self.bodies
            .iter()
            .map(|(body, p)| (*body, p.sidereal_longitude))
            .collect()
    }
}

/// Sidereal ascendant with the tropical value it came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiderealAscendant {
    pub tropical_longitude: f64,
    pub sidereal_longitude: f64,
}

pub fn to_sidereal(tropical: f64, ayanamsa: f64) -> f64 {
    normalize_degrees(tropical - ayanamsa)
}

/// Applies the Lahiri correction to provider output.
pub struct SiderealEngine<'a> {
    provider: &'a dyn EphemerisProvider,
}

impl<'a> SiderealEngine<'a> {
    pub fn new(provider: &'a dyn EphemerisProvider) -> Self {
        Self { provider }
    }

    /// Positions for `bodies`. Ketu is always derived from Rahu, which is
    /// queried even when only Ketu is requested.
    pub fn positions(
        &self,
        julian_day: f64,
        bodies: &[Body],
    ) -> Result<SiderealPositions, EphemerisError> {
        let ayanamsa = self.provider.ayanamsa(julian_day)?;
        let mut out = BTreeMap::new();

        let wants_ketu = bodies.contains(&Body::Ketu);
        let mut rahu: Option<BodyPosition> = None;

        for &body in bodies {
            if body == Body::Ketu || out.contains_key(&body) {
                continue;
            }
            let position = self.position(julian_day, body, ayanamsa)?;
            if body == Body::Rahu {
                rahu = Some(position);
            }
            out.insert(body, position);
        }

        if wants_ketu {
            let node = match rahu {
                Some(node) => node,
                None => self.position(julian_day, Body::Rahu, ayanamsa)?,
            };
            out.insert(Body::Ketu, derive_ketu(&node));
        }

        debug!(
            "computed {} sidereal positions at JD {:.6} (ayanamsa {:.6})",
            out.len(),
            julian_day,
            ayanamsa
        );

        Ok(SiderealPositions {
            julian_day,
            ayanamsa,
            bodies: out,
        })
    }

    pub fn ascendant(
        &self,
        julian_day: f64,
        latitude: f64,
        longitude: f64,
    ) -> Result<SiderealAscendant, EphemerisError> {
        let tropical = normalize_degrees(self.provider.ascendant(julian_day, latitude, longitude)?);
        let ayanamsa = self.provider.ayanamsa(julian_day)?;
        Ok(SiderealAscendant {
            tropical_longitude: tropical,
            sidereal_longitude: to_sidereal(tropical, ayanamsa),
        })
    }

    fn position(
        &self,
        julian_day: f64,
        body: Body,
        ayanamsa: f64,
    ) -> Result<BodyPosition, EphemerisError> {
        let raw = self.provider.position(julian_day, body)?;
        let tropical = normalize_degrees(raw.longitude);
        Ok(BodyPosition {
            body,
            tropical_longitude: tropical,
            sidereal_longitude: to_sidereal(tropical, ayanamsa),
            speed: raw.speed,
            retrograde: raw.speed < 0.0,
        })
    }
}

/// The south node sits exactly opposite the north node and moves with it.
fn derive_ketu(rahu: &BodyPosition) -> BodyPosition {
    BodyPosition {
        body: Body::Ketu,
        tropical_longitude: normalize_degrees(rahu.tropical_longitude + 180.0),
        sidereal_longitude: normalize_degrees(rahu.sidereal_longitude + 180.0),
        speed: rahu.speed,
        retrograde: rahu.retrograde,
    }
}
