//! Angle helpers shared across the chart and derived-fact calculators.

/// Normalize degrees to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    let normalized = value.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Smallest angular separation between two longitudes, in [0, 180].
pub fn angular_separation(a: f64, b: f64) -> f64 {
    let delta = (normalize_degrees(a) - normalize_degrees(b)).abs();
    delta.min(360.0 - delta)
}

/// Longitude in a harmonic (divisional) chart: normalize first, multiply,
/// normalize again.
pub fn harmonic_longitude(longitude: f64, harmonic: u32) -> f64 {
    normalize_degrees(normalize_degrees(longitude) * harmonic as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
        assert_eq!(normalize_degrees(-10.0), 350.0);
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert!(normalize_degrees(-1e-15) < 360.0);
    }

    #[test]
    fn test_angular_separation() {
        assert_eq!(angular_separation(10.0, 350.0), 20.0);
        assert_eq!(angular_separation(350.0, 10.0), 20.0);
        assert_eq!(angular_separation(0.0, 180.0), 180.0);
        assert_eq!(angular_separation(45.0, 45.0), 0.0);
    }

    #[test]
    fn test_harmonic_longitude() {
        assert_eq!(harmonic_longitude(45.0, 1), 45.0);
        assert!((harmonic_longitude(45.0, 9) - 45.0).abs() < 1e-9);
        assert!((harmonic_longitude(405.0, 9) - harmonic_longitude(45.0, 9)).abs() < 1e-9);
        assert!((harmonic_longitude(-315.0, 9) - harmonic_longitude(45.0, 9)).abs() < 1e-9);
    }
}
