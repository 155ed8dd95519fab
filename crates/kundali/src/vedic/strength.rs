//! Sign dignity and combustion for the seven classical bodies.

use crate::chart::Sign;
use crate::ephemeris::{Body, CLASSICAL_BODIES};
use crate::sidereal::SiderealPositions;
use crate::util::{angular_separation, normalize_degrees};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dignity {
    Exalted,
    Debilitated,
    #[serde(rename = "Own Sign")]
    OwnSign,
    Neutral,
}

impl fmt::Display for Dignity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dignity::Exalted => "Exalted",
            Dignity::Debilitated => "Debilitated",
            Dignity::OwnSign => "Own Sign",
            Dignity::Neutral => "Neutral",
        })
    }
}

/// Fixed dignity facts for a classical body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DignityFacts {
    pub exaltation: Sign,
    pub debilitation: Sign,
    pub own_signs: &'static [Sign],
    /// Separation from the Sun below which the body is combust; `None` for
    /// the Sun itself.
    pub combustion_orb: Option<f64>,
}

impl Body {
    pub fn dignity_facts(self) -> Option<DignityFacts> {
        use Sign::*;
        let facts = match self {
            Body::Sun => DignityFacts {
                exaltation: Aries,
                debilitation: Libra,
                own_signs: &[Leo],
                combustion_orb: None,
            },
            Body::Moon => DignityFacts {
                exaltation: Taurus,
                debilitation: Scorpio,
                own_signs: &[Cancer],
                combustion_orb: Some(12.0),
            },
            Body::Mars => DignityFacts {
                exaltation: Capricorn,
                debilitation: Cancer,
                own_signs: &[Aries, Scorpio],
                combustion_orb: Some(17.0),
            },
            Body::Mercury => DignityFacts {
                exaltation: Virgo,
                debilitation: Pisces,
                own_signs: &[Gemini, Virgo],
                combustion_orb: Some(14.0),
            },
            Body::Jupiter => DignityFacts {
                exaltation: Cancer,
                debilitation: Capricorn,
                own_signs: &[Sagittarius, Pisces],
                combustion_orb: Some(11.0),
            },
            Body::Venus => DignityFacts {
                exaltation: Pisces,
                debilitation: Virgo,
                own_signs: &[Taurus, Libra],
                combustion_orb: Some(10.0),
            },
            Body::Saturn => DignityFacts {
                exaltation: Libra,
                debilitation: Aries,
                own_signs: &[Capricorn, Aquarius],
                combustion_orb: Some(15.0),
            },
            _ => return None,
        };
        Some(facts)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetStrength {
    pub body: Body,
    pub sign: Sign,
    pub longitude: f64,
    pub dignity: Dignity,
    pub retrograde: bool,
    pub combust: bool,
}

/// Exaltation wins over own sign (Mercury in Virgo is exalted).
pub fn dignity_in(body: Body, sign: Sign) -> Option<Dignity> {
    let facts = body.dignity_facts()?;
    let dignity = if sign == facts.exaltation {
        Dignity::Exalted
    } else if sign == facts.debilitation {
        Dignity::Debilitated
    } else if facts.own_signs.contains(&sign) {
        Dignity::OwnSign
    } else {
        Dignity::Neutral
    };
    Some(dignity)
}

pub fn is_combust(body: Body, longitude: f64, sun_longitude: f64) -> bool {
    match body.dignity_facts().and_then(|f| f.combustion_orb) {
        Some(orb) => angular_separation(longitude, sun_longitude) < orb,
        None => false,
    }
}

/// Strength of one classical body; `None` for nodes and outer planets.
pub fn planet_strength(
    body: Body,
    longitude: f64,
    retrograde: bool,
    sun_longitude: Option<f64>,
) -> Option<PlanetStrength> {
    let longitude = normalize_degrees(longitude);
    let sign = Sign::from_longitude(longitude);
    let dignity = dignity_in(body, sign)?;
    Some(PlanetStrength {
        body,
        sign,
        longitude,
        dignity,
        retrograde,
        combust: sun_longitude.is_some_and(|sun| is_combust(body, longitude, sun)),
    })
}

/// Strengths of every classical body present in `positions`.
pub fn planet_strengths(positions: &SiderealPositions) -> BTreeMap<Body, PlanetStrength> {
    let sun = positions.sidereal_longitude(Body::Sun);
    CLASSICAL_BODIES
        .iter()
        .filter_map(|&body| {
            let p = positions.get(body)?;
            planet_strength(body, p.sidereal_longitude, p.retrograde, sun).map(|s| (body, s))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exaltation_boundary() {
        // Sun enters Aries at 0°; 1° into Taurus is Neutral.
        assert_eq!(planet_strength(Body::Sun, 0.0, false, None).unwrap().dignity, Dignity::Exalted);
        assert_eq!(planet_strength(Body::Sun, 31.0, false, None).unwrap().dignity, Dignity::Neutral);
    }

    #[test]
    fn test_exaltation_precedes_own_sign() {
        assert_eq!(dignity_in(Body::Mercury, Sign::Virgo), Some(Dignity::Exalted));
        assert_eq!(dignity_in(Body::Mercury, Sign::Gemini), Some(Dignity::OwnSign));
        assert_eq!(dignity_in(Body::Saturn, Sign::Aries), Some(Dignity::Debilitated));
        assert_eq!(dignity_in(Body::Rahu, Sign::Gemini), None);
    }

    #[test]
    fn test_combustion() {
        assert!(is_combust(Body::Mercury, 100.0, 105.0));
        assert!(!is_combust(Body::Mercury, 100.0, 150.0));
        // Wraps across 0°
        assert!(is_combust(Body::Venus, 355.0, 3.0));
        // Strictly inside the orb
        assert!(!is_combust(Body::Venus, 0.0, 10.0));
        assert!(!is_combust(Body::Sun, 10.0, 10.0));
    }
}
