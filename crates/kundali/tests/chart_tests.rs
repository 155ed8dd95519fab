use kundali::chart::{assemble, sign_index, Sign};
use kundali::ephemeris::ALL_BODIES;
use kundali::util::harmonic_longitude;
use kundali::Body;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashSet};

fn longitudes_from(values: &[f64]) -> BTreeMap<Body, f64> {
    ALL_BODIES.iter().copied().zip(values.iter().copied()).collect()
}

#[test]
fn test_sign_names() {
    assert_eq!(Sign::from_index(0).to_string(), "Aries");
    assert_eq!(Sign::from_index(11).to_string(), "Pisces");
    assert_eq!(Sign::from_index(12), Sign::Aries);
}

#[test]
fn test_harmonic_one_is_rashi() {
    let longitudes = longitudes_from(&[10.0, 40.0, 70.0, 100.0, 130.0, 160.0, 190.0]);
    let rashi = assemble(200.0, &longitudes, 1);
    let zero = assemble(200.0, &longitudes, 0);
    assert_eq!(rashi, zero);
    assert_eq!(rashi.ascendant_sign, Sign::Libra);
    assert_eq!(rashi.house_of(Body::Sun), Some(7));
}

proptest! {
    #[test]
    fn prop_sign_modular_closure(lon in 0.0..360.0f64) {
        prop_assert_eq!(sign_index(lon), sign_index(lon + 360.0));
        prop_assert!(sign_index(lon) <= 11);
        prop_assert!(sign_index(-lon) <= 11);
    }

    #[test]
    fn prop_navamsa_ignores_prenormalization(lon in 0.0..360.0f64, turns in 1..5i32) {
        let shifted = lon + 360.0 * turns as f64;
        let a = harmonic_longitude(lon, 9);
        let b = harmonic_longitude(shifted, 9);
        let delta = (a - b).abs().min(360.0 - (a - b).abs());
        prop_assert!(delta < 1e-9, "{} vs {}", a, b);
    }

    #[test]
    fn prop_whole_sign_houses(
        asc in 0.0..360.0f64,
        values in prop::collection::vec(0.0..360.0f64, 12),
        harmonic in prop_oneof![Just(1u32), Just(9u32)],
    ) {
        let longitudes = longitudes_from(&values);
        let chart = assemble(asc, &longitudes, harmonic);
        let a = sign_index(harmonic_longitude(asc, harmonic));

        prop_assert_eq!(chart.houses.len(), 12);
        prop_assert_eq!(chart.houses[0].sign.index(), a);
        prop_assert_eq!(chart.houses[11].sign.index(), (a + 11) % 12);
        let signs: HashSet<usize> = chart.houses.iter().map(|h| h.sign.index()).collect();
        prop_assert_eq!(signs.len(), 12);

        let placed: Vec<Body> = chart.houses.iter().flat_map(|h| h.bodies.iter().copied()).collect();
        prop_assert_eq!(placed.len(), longitudes.len());
        for (body, lon) in &longitudes {
            let house = chart.house_of(*body).unwrap();
            let sign = chart.house(house).unwrap().sign;
            prop_assert_eq!(sign.index(), sign_index(harmonic_longitude(*lon, harmonic)));
        }
        for house in &chart.houses {
            let mut sorted = house.bodies.clone();
            sorted.sort();
            prop_assert_eq!(&sorted, &house.bodies);
        }
    }
}
