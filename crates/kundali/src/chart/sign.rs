use crate::util::normalize_degrees;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

pub const ALL_SIGNS: [Sign; 12] = [
    Sign::Aries,
    Sign::Taurus,
    Sign::Gemini,
    Sign::Cancer,
    Sign::Leo,
    Sign::Virgo,
    Sign::Libra,
    Sign::Scorpio,
    Sign::Sagittarius,
    Sign::Capricorn,
    Sign::Aquarius,
    Sign::Pisces,
];

pub const SIGN_SPAN: f64 = 30.0;

/// Sign index 0-11 of a longitude. Any finite input is accepted.
pub fn sign_index(longitude: f64) -> usize {
    (normalize_degrees(longitude) / SIGN_SPAN).floor() as usize % 12
}

impl Sign {
    pub fn from_index(index: usize) -> Sign {
        ALL_SIGNS[index % 12]
    }

    pub fn from_longitude(longitude: f64) -> Sign {
        Sign::from_index(sign_index(longitude))
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Sign::Aries => "Aries",
            Sign::Taurus => "Taurus",
            Sign::Gemini => "Gemini",
            Sign::Cancer => "Cancer",
            Sign::Leo => "Leo",
            Sign::Virgo => "Virgo",
            Sign::Libra => "Libra",
            Sign::Scorpio => "Scorpio",
            Sign::Sagittarius => "Sagittarius",
            Sign::Capricorn => "Capricorn",
            Sign::Aquarius => "Aquarius",
            Sign::Pisces => "Pisces",
        }
    }

    /// Sign `count` places further along the zodiac.
    pub fn offset(self, count: usize) -> Sign {
        Sign::from_index(self.index() + count)
    }

    /// Forward distance in signs from `self` to `other`, 0-11.
    pub fn distance_to(self, other: Sign) -> usize {
        (other.index() + 12 - self.index()) % 12
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Degrees already traversed within the longitude's sign.
pub fn degree_in_sign(longitude: f64) -> f64 {
    normalize_degrees(longitude) - sign_index(longitude) as f64 * SIGN_SPAN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_boundaries() {
        assert_eq!(Sign::from_longitude(0.0), Sign::Aries);
        assert_eq!(Sign::from_longitude(29.999), Sign::Aries);
        assert_eq!(Sign::from_longitude(30.0), Sign::Taurus);
        assert_eq!(Sign::from_longitude(359.99), Sign::Pisces);
        assert_eq!(Sign::from_longitude(-0.5), Sign::Pisces);
        assert_eq!(Sign::from_longitude(360.0), Sign::Aries);
    }

    #[test]
    fn test_distance_and_offset() {
        assert_eq!(Sign::Aries.distance_to(Sign::Libra), 6);
        assert_eq!(Sign::Libra.distance_to(Sign::Aries), 6);
        assert_eq!(Sign::Pisces.distance_to(Sign::Aries), 1);
        assert_eq!(Sign::Capricorn.offset(3), Sign::Aries);
    }

    #[test]
    fn test_degree_in_sign() {
        assert!((degree_in_sign(45.5) - 15.5).abs() < 1e-12);
        assert!((degree_in_sign(-1.0) - 29.0).abs() < 1e-12);
    }
}
