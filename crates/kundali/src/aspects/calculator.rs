use crate::aspects::types::{AspectMap, AspectPair, DrishtiRule};
use crate::chart::Sign;
use crate::ephemeris::Body;
use std::collections::BTreeMap;

const DRISHTI_RULES: &[DrishtiRule] = &[
    DrishtiRule { body: Body::Sun, sign_distances: &[6] },
    DrishtiRule { body: Body::Moon, sign_distances: &[6] },
    DrishtiRule { body: Body::Mars, sign_distances: &[3, 6, 7] },
    DrishtiRule { body: Body::Mercury, sign_distances: &[6] },
    DrishtiRule { body: Body::Jupiter, sign_distances: &[4, 6, 8] },
    DrishtiRule { body: Body::Venus, sign_distances: &[6] },
    DrishtiRule { body: Body::Saturn, sign_distances: &[2, 6, 9] },
];

/// Sign-based graha drishti between the classical bodies.
///
/// Aspects are not symmetric: Saturn aspecting the 3rd sign from itself does
/// not mean the body there aspects Saturn back.
#[derive(Debug, Default, Clone, Copy)]
pub struct AspectCalculator;

impl AspectCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn rule(&self, body: Body) -> Option<&'static DrishtiRule> {
        DRISHTI_RULES.iter().find(|r| r.body == body)
    }

    /// Whether `from` in `from_sign` casts drishti on a body in `to_sign`.
    pub fn aspects(&self, from: Body, from_sign: Sign, to_sign: Sign) -> bool {
        self.rule(from)
            .is_some_and(|r| r.sign_distances.contains(&from_sign.distance_to(to_sign)))
    }

    /// Every aspect between classical bodies in `longitudes`, in canonical
    /// order of the aspecting then the aspected body.
    pub fn compute_pairs(&self, longitudes: &BTreeMap<Body, f64>) -> Vec<AspectPair> {
        let classical: Vec<(Body, Sign)> = longitudes
            .iter()
            .filter(|(body, _)| body.is_classical())
            .map(|(body, lon)| (*body, Sign::from_longitude(*lon)))
            .collect();

        let mut pairs = Vec::new();
        for &(from, from_sign) in &classical {
            for &(to, to_sign) in &classical {
                if from == to {
                    continue;
                }
                if self.aspects(from, from_sign, to_sign) {
                    pairs.push(AspectPair {
                        from,
                        to,
                        sign_distance: from_sign.distance_to(to_sign),
                    });
                }
            }
        }
        pairs
    }

    /// Aspect map with an entry, possibly empty, for every classical body
    /// present in `longitudes`.
    pub fn compute_map(&self, longitudes: &BTreeMap<Body, f64>) -> AspectMap {
        let mut map: AspectMap = longitudes
            .keys()
            .filter(|body| body.is_classical())
            .map(|body| (*body, Vec::new()))
            .collect();
        for pair in self.compute_pairs(longitudes) {
            map.entry(pair.from).or_default().push(pair.to);
        }
        map
    }
}
