use chrono::NaiveDate;
use kundali::chart::Sign;
use kundali::vedic::dashas::lord_years;
use kundali::vedic::nakshatra::{nakshatra_for_longitude, NAKSHATRA_ORDER, NAKSHATRA_SEGMENT_SIZE};
use kundali::vedic::strength::{is_combust, planet_strength};
use kundali::vedic::{compute_vimshottari_dasha, Dignity, DashaLevel, DashaReference};
use kundali::Body;
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_nakshatra_endpoints() {
    let first = nakshatra_for_longitude(0.0);
    assert_eq!((first.name.as_str(), first.pada), ("Ashwini", 1));

    let last = nakshatra_for_longitude(359.99);
    assert_eq!((last.name.as_str(), last.pada), ("Revati", 4));
    assert_eq!(last.lord, Body::Mercury);
}

#[test]
fn test_nakshatra_formula() {
    // 101° -> index 7 (Pushya), offset 7.6667 -> pada 3
    let p = nakshatra_for_longitude(101.0);
    assert_eq!(p.index, 7);
    assert_eq!(p.name, "Pushya");
    assert_eq!(p.pada, 3);
    assert_eq!(p.lord, Body::Saturn);
}

#[test]
fn test_dasha_timeline_shape() {
    let timeline = compute_vimshottari_dasha(
        123.4,
        date(1985, 7, 20),
        DashaReference::Birth,
        DashaLevel::Mahadasha,
    )
    .unwrap();

    assert_eq!(timeline.periods.len(), 9);
    let span = timeline.periods[8].end_year - timeline.periods[0].start_year;
    assert!((span - 120.0).abs() < 1e-9);
    for pair in timeline.periods.windows(2) {
        assert_eq!(pair[0].end_year, pair[1].start_year);
    }
    for period in &timeline.periods {
        let years = lord_years(period.lord).unwrap();
        assert!((period.duration_years() - years).abs() < 1e-9);
    }
    // Current at birth is the Moon's nakshatra lord.
    assert_eq!(timeline.current_lord, nakshatra_for_longitude(123.4).lord);
    assert_eq!(timeline.current_index, 0);
}

#[test]
fn test_dasha_start_precedes_birth_by_elapsed_share() {
    // Three quarters through Magha (Ketu, 7 years)
    let moon = NAKSHATRA_SEGMENT_SIZE * 9.75;
    let birth = date(2000, 6, 1);
    let timeline =
        compute_vimshottari_dasha(moon, birth, DashaReference::Birth, DashaLevel::Mahadasha).unwrap();
    assert_eq!(timeline.birth_lord, Body::Ketu);
    assert!((timeline.balance_years - 1.75).abs() < 1e-9);
    assert!(timeline.periods[0].start_date < birth);
    assert!(timeline.periods[0].end_date > birth);
    assert_eq!(timeline.periods[1].lord, Body::Venus);
}

#[test]
fn test_pratyantardasha_depth() {
    let timeline = compute_vimshottari_dasha(
        200.0,
        date(1970, 1, 1),
        DashaReference::On(date(1990, 5, 5)),
        DashaLevel::Pratyantardasha,
    )
    .unwrap();
    let first = &timeline.periods[0];
    assert_eq!(first.children.len(), 9);
    assert_eq!(first.children[0].children.len(), 9);
    assert_eq!(first.children[0].children[0].level, DashaLevel::Pratyantardasha);
    assert_eq!(timeline.active_lords.len(), 3);
    assert_eq!(timeline.active_lords[0], timeline.current_lord);
}

#[test]
fn test_exaltation_boundary_round_trip() {
    for (body, exaltation) in [
        (Body::Sun, Sign::Aries),
        (Body::Moon, Sign::Taurus),
        (Body::Mars, Sign::Capricorn),
        (Body::Mercury, Sign::Virgo),
        (Body::Jupiter, Sign::Cancer),
        (Body::Venus, Sign::Pisces),
        (Body::Saturn, Sign::Libra),
    ] {
        let boundary = exaltation.index() as f64 * 30.0;
        let at = planet_strength(body, boundary, false, None).unwrap();
        assert_eq!(at.dignity, Dignity::Exalted, "{body} at {boundary}");
        // One degree into the following sign is neutral for every body.
        let beyond = planet_strength(body, boundary + 31.0, false, None).unwrap();
        assert_eq!(beyond.dignity, Dignity::Neutral, "{body} at {}", boundary + 31.0);
    }
    // Sun: Aries exalted, Taurus is neutral ground
    assert_eq!(planet_strength(Body::Sun, 31.0, false, None).unwrap().dignity, Dignity::Neutral);
}

#[test]
fn test_mercury_combustion() {
    let x = 200.0;
    assert!(planet_strength(Body::Mercury, x, false, Some(x + 5.0)).unwrap().combust);
    assert!(!planet_strength(Body::Mercury, x, false, Some(x + 50.0)).unwrap().combust);
    assert!(is_combust(Body::Saturn, 1.0, 346.5));
}

#[test]
fn test_birth_lord_holds_at_nakshatra_edges() {
    let births = [date(1900, 2, 28), date(1990, 1, 1), date(2003, 3, 13), date(2024, 12, 31)];
    for birth in births {
        for k in 1..=27 {
            let edge = NAKSHATRA_SEGMENT_SIZE * k as f64;
            // Last representable longitude below the edge, and the edge itself
            let below = f64::from_bits(edge.to_bits() - 1);
            for lon in [below, edge % 360.0] {
                let timeline = compute_vimshottari_dasha(
                    lon,
                    birth,
                    DashaReference::Birth,
                    DashaLevel::Antardasha,
                )
                .unwrap();
                let lord = nakshatra_for_longitude(lon).lord;
                assert_eq!(timeline.current_index, 0, "{birth} lon={lon}");
                assert_eq!(timeline.current_lord, lord, "{birth} lon={lon}");
                assert_eq!(timeline.birth_lord, lord, "{birth} lon={lon}");
                assert_eq!(timeline.active_lords.len(), 2, "{birth} lon={lon}");
                assert!(timeline.remaining_years >= 0.0);
            }
        }
    }
}

proptest! {
    #[test]
    fn prop_nakshatra_in_range(lon in 0.0..360.0f64) {
        let p = nakshatra_for_longitude(lon);
        prop_assert!(p.index < 27);
        prop_assert!((1..=4).contains(&p.pada));
        prop_assert_eq!(p.lord, NAKSHATRA_ORDER[p.index % 9].1);
        prop_assert!((0.0..1.0).contains(&p.fraction_elapsed));
    }

    #[test]
    fn prop_dasha_contiguous(lon in 0.0..360.0f64) {
        let timeline = compute_vimshottari_dasha(
            lon,
            NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            DashaReference::Birth,
            DashaLevel::Mahadasha,
        ).unwrap();
        let total: f64 = timeline.periods.iter().map(|p| p.duration_years()).sum();
        prop_assert!((total - 120.0).abs() < 1e-9);
        prop_assert_eq!(timeline.birth_lord, timeline.current_lord);
    }
}
