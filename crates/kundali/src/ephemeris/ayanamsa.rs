//! Lahiri (Chitrapaksha) ayanamsa.
//!
//! The reference value at J2000.0 is advanced by the IAU 2006 general
//! precession in ecliptic longitude.

pub const J2000_JD: f64 = 2_451_545.0;

/// Lahiri ayanamsa at J2000.0, degrees.
pub const LAHIRI_J2000_DEG: f64 = 23.853;

/// IAU 2006 general precession in longitude, arcseconds, for `t` Julian
/// centuries since J2000.0.
pub fn general_precession_arcsec(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;
    5028.796195 * t + 1.1054348 * t2 + 0.00007964 * t3 - 0.000023857 * t4 - 0.0000000383 * t5
}

/// Lahiri ayanamsa in degrees at a UT Julian Day.
pub fn lahiri_ayanamsa(jd_ut: f64) -> f64 {
    let t = (jd_ut - J2000_JD) / 36525.0;
    LAHIRI_J2000_DEG + general_precession_arcsec(t) / 3600.0
}
