//! Whole-sign house assembly for the birth chart and its harmonic variants.

use crate::chart::sign::{sign_index, Sign};
use crate::ephemeris::Body;
use crate::util::harmonic_longitude;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Divisional charts produced by the assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Varga {
    /// D1
    Rashi,
    /// D9
    Navamsa,
}

impl Varga {
    pub fn harmonic(self) -> u32 {
        match self {
            Varga::Rashi => 1,
            Varga::Navamsa => 9,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Varga::Rashi => "Lagna (Ascendant)",
            Varga::Navamsa => "Navamsa (D9)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartHouse {
    /// 1-12
    pub number: u8,
    pub sign: Sign,
    /// Occupants in canonical body order
    pub bodies: Vec<Body>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseChart {
    pub harmonic: u32,
    pub ascendant_sign: Sign,
    /// Ascendant longitude after the harmonic transform
    pub ascendant_longitude: f64,
    pub houses: Vec<ChartHouse>,
}

impl HouseChart {
    /// House number (1-12) occupied by `body`.
    pub fn house_of(&self, body: Body) -> Option<u8> {
        self.houses
            .iter()
            .find(|h| h.bodies.contains(&body))
            .map(|h| h.number)
    }

    pub fn house(&self, number: u8) -> Option<&ChartHouse> {
        self.houses.iter().find(|h| h.number == number)
    }

    /// Markdown table with one row per house.
    pub fn to_markdown(&self) -> String {
        houses_to_markdown(&self.houses)
    }
}

/// `| House | Sign | Planets |` table; empty houses show a dash.
pub fn houses_to_markdown(houses: &[ChartHouse]) -> String {
    let mut out = String::new();
    out.push_str("| House | Sign | Planets |\n");
    out.push_str("| ----- | ----- | -------- |\n");
    for house in houses {
        let planets = if house.bodies.is_empty() {
            "—".to_string()
        } else {
            house
                .bodies
                .iter()
                .map(|b| b.name())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let _ = writeln!(out, "| {} | {} | {} |", house.number, house.sign, planets);
    }
    out
}

/// Assign bodies to whole-sign houses counted from the ascendant's sign.
///
/// For a harmonic above 1 every longitude, the ascendant included, is
/// multiplied first and only then mapped to a sign. A harmonic of 0 is
/// treated as 1.
pub fn assemble(ascendant: f64, longitudes: &BTreeMap<Body, f64>, harmonic: u32) -> HouseChart {
    let harmonic = harmonic.max(1);
    let ascendant_longitude = harmonic_longitude(ascendant, harmonic);
    let ascendant_index = sign_index(ascendant_longitude);

    let mut houses: Vec<ChartHouse> = (0..12)
        .map(|i| ChartHouse {
            number: i as u8 + 1,
            sign: Sign::from_index(ascendant_index + i),
            bodies: Vec::new(),
        })
        .collect();

    // BTreeMap iteration yields canonical body order
    for (body, longitude) in longitudes {
        let body_index = sign_index(harmonic_longitude(*longitude, harmonic));
        let house = (body_index + 12 - ascendant_index) % 12;
        houses[house].bodies.push(*body);
    }

    HouseChart {
        harmonic,
        ascendant_sign: Sign::from_index(ascendant_index),
        ascendant_longitude,
        houses,
    }
}

pub fn assemble_varga(ascendant: f64, longitudes: &BTreeMap<Body, f64>, varga: Varga) -> HouseChart {
    assemble(ascendant, longitudes, varga.harmonic())
}
