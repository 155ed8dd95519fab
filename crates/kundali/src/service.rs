//! One-call chart computation over the pipeline stages.

use crate::aspects::{AspectCalculator, AspectMap};
use crate::chart::{assemble, degree_in_sign, ChartHouse, HouseChart, Sign, Varga};
use crate::ephemeris::{Body, EphemerisProvider, ALL_BODIES};
use crate::error::{AtStage, ChartError, Stage, StageError};
use crate::geocode::{Coordinates, Geocoder, StaticGeocoder};
use crate::sidereal::{SiderealEngine, SiderealPositions};
use crate::time::{
    default_resolver, normalize_birth, parse_date, parse_time, validate_coordinates, BirthMoment,
    FixedZoneResolver, NormalizedTime, TimezoneResolver,
};
use crate::vedic::{
    compute_vimshottari_dasha, nakshatra_for_longitude, planet_strengths, DashaLevel,
    DashaReference, DashaTimeline, NakshatraPlacement, PlanetStrength,
};
use chrono::{NaiveDate, NaiveTime};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BirthLocation {
    Coordinates(Coordinates),
    Place(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    pub name: String,
    /// `YYYY-MM-DD`
    pub date_of_birth: String,
    /// `HH:MM` or `HH:MM:SS`, local civil time
    pub time_of_birth: String,
    pub location: BirthLocation,
    /// IANA zone overriding the service's resolver for this request
    #[serde(default)]
    pub zone: Option<String>,
}

impl ChartRequest {
    pub fn at_coordinates(
        name: impl Into<String>,
        date_of_birth: impl Into<String>,
        time_of_birth: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            name: name.into(),
            date_of_birth: date_of_birth.into(),
            time_of_birth: time_of_birth.into(),
            location: BirthLocation::Coordinates(Coordinates::new(latitude, longitude)),
            zone: None,
        }
    }

    pub fn at_place(
        name: impl Into<String>,
        date_of_birth: impl Into<String>,
        time_of_birth: impl Into<String>,
        place: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            date_of_birth: date_of_birth.into(),
            time_of_birth: time_of_birth.into(),
            location: BirthLocation::Place(place.into()),
            zone: None,
        }
    }

    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub navamsa: bool,
    pub dasha_reference: DashaReference,
    pub dasha_depth: DashaLevel,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            navamsa: true,
            dasha_reference: DashaReference::Birth,
            dasha_depth: DashaLevel::Mahadasha,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthSummary {
    pub date_of_birth: NaiveDate,
    pub time_of_birth: NaiveTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AscendantSummary {
    pub sign: Sign,
    /// Sidereal longitude
    pub longitude: f64,
    pub degree_in_sign: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavamsaChart {
    pub ascendant_sign: Sign,
    pub houses: Vec<ChartHouse>,
}

/// Per-body row of the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedBody {
    pub body: Body,
    pub tropical_longitude: f64,
    pub sidereal_longitude: f64,
    pub speed: f64,
    pub retrograde: bool,
    pub sign: Sign,
    pub degree_in_sign: f64,
    pub house: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navamsa_sign: Option<Sign>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartResult {
    pub name: String,
    pub birth: BirthSummary,
    pub time: NormalizedTime,
    pub ayanamsa: f64,
    pub ascendant: AscendantSummary,
    pub houses: Vec<ChartHouse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navamsa: Option<NavamsaChart>,
    pub positions: Vec<PlacedBody>,
    pub nakshatra: NakshatraPlacement,
    pub dasha: DashaTimeline,
    pub planet_strengths: BTreeMap<Body, PlanetStrength>,
    pub aspects: AspectMap,
}

/// Chart facade. Collaborators are fixed at construction and shared
/// read-only across requests.
pub struct ChartService {
    provider: Box<dyn EphemerisProvider>,
    resolver: Box<dyn TimezoneResolver>,
    geocoder: Box<dyn Geocoder>,
    options: ChartOptions,
    aspects: AspectCalculator,
}

impl ChartService {
    pub fn new(provider: impl EphemerisProvider + 'static) -> Self {
        Self {
            provider: Box::new(provider),
            resolver: default_resolver(),
            geocoder: Box::new(StaticGeocoder::new()),
            options: ChartOptions::default(),
            aspects: AspectCalculator::new(),
        }
    }

    pub fn with_resolver(mut self, resolver: impl TimezoneResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn with_geocoder(mut self, geocoder: impl Geocoder + 'static) -> Self {
        self.geocoder = Box::new(geocoder);
        self
    }

    pub fn with_options(mut self, options: ChartOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    pub fn compute(&self, request: &ChartRequest) -> Result<ChartResult, StageError> {
        self.compute_with(request, &self.options)
    }

    pub fn compute_with(
        &self,
        request: &ChartRequest,
        options: &ChartOptions,
    ) -> Result<ChartResult, StageError> {
        let date = parse_date(&request.date_of_birth).at(Stage::Input)?;
        let clock = parse_time(&request.time_of_birth).at(Stage::Input)?;

        let (coordinates, place) = match &request.location {
            BirthLocation::Coordinates(c) => {
                validate_coordinates(c.latitude, c.longitude).at(Stage::Input)?;
                (*c, None)
            }
            BirthLocation::Place(name) => {
                let found = self.geocoder.locate(name).ok_or_else(|| {
                    StageError::new(
                        Stage::Geocoding,
                        ChartError::invalid("place_of_birth", format!("unknown place {name:?}")),
                    )
                })?;
                debug!("geocoded {:?} to {:.4}, {:.4}", name, found.latitude, found.longitude);
                (found, Some(name.clone()))
            }
        };
        let birth = BirthMoment::new(date, clock, coordinates.latitude, coordinates.longitude)
            .at(Stage::Input)?;

        let time = match &request.zone {
            Some(zone) => normalize_birth(&birth, &FixedZoneResolver::new(zone.clone())),
            None => normalize_birth(&birth, self.resolver.as_ref()),
        }
        .at(Stage::TimeNormalization)?;
        let jd = time.julian_day.ut();

        let engine = SiderealEngine::new(self.provider.as_ref());
        let positions = engine.positions(jd, &ALL_BODIES).at(Stage::SiderealPositions)?;
        let ascendant = engine
            .ascendant(jd, birth.latitude, birth.longitude)
            .at(Stage::SiderealPositions)?;
        debug!("sidereal positions ready for {}", request.name);

        let longitudes = positions.longitudes();
        let rashi = assemble(ascendant.sidereal_longitude, &longitudes, Varga::Rashi.harmonic());
        let navamsa = options.navamsa.then(|| {
            assemble(ascendant.sidereal_longitude, &longitudes, Varga::Navamsa.harmonic())
        });
        let placed = place_bodies(&positions, &rashi, navamsa.as_ref()).at(Stage::ChartAssembly)?;
        debug!("assembled chart with ascendant {}", rashi.ascendant_sign);

        let moon = positions.sidereal_longitude(Body::Moon).ok_or_else(|| {
            StageError::new(
                Stage::DerivedFacts,
                ChartError::Computation("Moon position missing".to_string()),
            )
        })?;
        let nakshatra = nakshatra_for_longitude(moon);
        let dasha = compute_vimshottari_dasha(moon, date, options.dasha_reference, options.dasha_depth)
            .at(Stage::DerivedFacts)?;
        let strengths = planet_strengths(&positions);
        let aspects = self.aspects.compute_map(&longitudes);

        Ok(ChartResult {
            name: request.name.clone(),
            birth: BirthSummary {
                date_of_birth: date,
                time_of_birth: clock,
                place,
                latitude: birth.latitude,
                longitude: birth.longitude,
            },
            ayanamsa: positions.ayanamsa,
            ascendant: AscendantSummary {
                sign: rashi.ascendant_sign,
                longitude: ascendant.sidereal_longitude,
                degree_in_sign: degree_in_sign(ascendant.sidereal_longitude),
            },
            houses: rashi.houses,
            navamsa: navamsa.map(|chart| NavamsaChart {
                ascendant_sign: chart.ascendant_sign,
                houses: chart.houses,
            }),
            positions: placed,
            nakshatra,
            dasha,
            planet_strengths: strengths,
            aspects,
            time,
        })
    }
}

fn place_bodies(
    positions: &SiderealPositions,
    rashi: &HouseChart,
    navamsa: Option<&HouseChart>,
) -> Result<Vec<PlacedBody>, ChartError> {
    positions
        .bodies
        .values()
        .map(|p| {
            let house = rashi.house_of(p.body).ok_or_else(|| {
                ChartError::Computation(format!("{} was not placed in any house", p.body))
            })?;
            let navamsa_sign = navamsa
                .and_then(|chart| chart.house_of(p.body).and_then(|n| chart.house(n)))
                .map(|h| h.sign);
            Ok(PlacedBody {
                body: p.body,
                tropical_longitude: p.tropical_longitude,
                sidereal_longitude: p.sidereal_longitude,
                speed: p.speed,
                retrograde: p.retrograde,
                sign: Sign::from_longitude(p.sidereal_longitude),
                degree_in_sign: degree_in_sign(p.sidereal_longitude),
                house,
                navamsa_sign,
            })
        })
        .collect()
}
