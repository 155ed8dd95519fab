//! Vimshottari dasha calculations for Vedic astrology.
//!
//! Dashas are time periods ruled by planets, calculated based on the Moon's nakshatra.

use crate::error::ChartError;
use crate::ephemeris::Body;
use crate::vedic::nakshatra::nakshatra_for_longitude;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

pub const VIMSHOTTARI_TOTAL_YEARS: f64 = 120.0;
pub const VIMSHOTTARI_YEAR_DAYS: f64 = 365.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashaLevel {
    #[default]
    Mahadasha,
    Antardasha,
    Pratyantardasha,
}

const DEPTH_LEVELS: &[DashaLevel] = &[
    DashaLevel::Mahadasha,
    DashaLevel::Antardasha,
    DashaLevel::Pratyantardasha,
];

pub const VIMSHOTTARI_SEQUENCE: [(Body, f64); 9] = [
    (Body::Ketu, 7.0),
    (Body::Venus, 20.0),
    (Body::Sun, 6.0),
    (Body::Moon, 10.0),
    (Body::Mars, 7.0),
    (Body::Rahu, 18.0),
    (Body::Jupiter, 16.0),
    (Body::Saturn, 19.0),
    (Body::Mercury, 17.0),
];

/// Date at which the current period is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "date", rename_all = "lowercase")]
pub enum DashaReference {
    #[default]
    Birth,
    On(NaiveDate),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashaPeriod {
    pub lord: Body,
    pub level: DashaLevel,
    pub start_year: f64,
    pub end_year: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<DashaPeriod>,
}

impl DashaPeriod {
    pub fn duration_years(&self) -> f64 {
        self.end_year - self.start_year
    }

    pub fn contains(&self, year: f64) -> bool {
        self.start_year <= year && year < self.end_year
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashaTimeline {
    /// Lord of the Moon's nakshatra; rules the first period
    pub birth_lord: Body,
    /// Years of the first period left at birth
    pub balance_years: f64,
    pub reference_date: NaiveDate,
    pub reference_year: f64,
    pub current_index: usize,
    pub current_lord: Body,
    pub remaining_years: f64,
    /// Lords of the running period at each computed level, outermost first
    pub active_lords: Vec<Body>,
    pub periods: Vec<DashaPeriod>,
}

impl DashaTimeline {
    pub fn current(&self) -> &DashaPeriod {
        &self.periods[self.current_index]
    }
}

/// `year + month/12 + day/365.25`, the convention all period bounds use.
pub fn fractional_year(date: NaiveDate) -> f64 {
    date.year() as f64 + date.month() as f64 / 12.0 + date.day() as f64 / VIMSHOTTARI_YEAR_DAYS
}

pub fn lord_years(lord: Body) -> Option<f64> {
    VIMSHOTTARI_SEQUENCE
        .iter()
        .find(|(body, _)| *body == lord)
        .map(|(_, years)| *years)
}

fn find_sequence_index(lord: Body) -> Result<usize, ChartError> {
    VIMSHOTTARI_SEQUENCE
        .iter()
        .position(|(body, _)| *body == lord)
        .ok_or_else(|| ChartError::Computation(format!("{lord} is not a Vimshottari lord")))
}

/// Maps fractional years to calendar dates, anchored at birth.
struct Calendar {
    birth_date: NaiveDate,
    birth_year: f64,
}

impl Calendar {
    fn date_at(&self, year: f64) -> Result<NaiveDate, ChartError> {
        let days = ((year - self.birth_year) * VIMSHOTTARI_YEAR_DAYS).round() as i64;
        self.birth_date
            .checked_add_signed(Duration::days(days))
            .ok_or_else(|| ChartError::Computation(format!("dasha boundary {year:.2} overflows the calendar")))
    }
}

/// Compute the full nine-period Vimshottari cycle from the Moon's sidereal
/// longitude, subdivided down to `depth`.
pub fn compute_vimshottari_dasha(
    moon_longitude: f64,
    birth_date: NaiveDate,
    reference: DashaReference,
    depth: DashaLevel,
) -> Result<DashaTimeline, ChartError> {
    let moon = nakshatra_for_longitude(moon_longitude);
    let start_index = find_sequence_index(moon.lord)?;
    let first_span = VIMSHOTTARI_SEQUENCE[start_index].1;
    let balance_years = (1.0 - moon.fraction_elapsed) * first_span;

    let calendar = Calendar {
        birth_date,
        birth_year: fractional_year(birth_date),
    };
    let target_depth_index = DEPTH_LEVELS.iter().position(|&d| d == depth).unwrap_or(0);

    // Anchor the first period on its end so the birth balance survives.
    let mut current_start = (calendar.birth_year + balance_years) - first_span;
    let mut periods = Vec::with_capacity(VIMSHOTTARI_SEQUENCE.len());
    for offset in 0..VIMSHOTTARI_SEQUENCE.len() {
        let seq_index = (start_index + offset) % VIMSHOTTARI_SEQUENCE.len();
        let (lord, years) = VIMSHOTTARI_SEQUENCE[seq_index];
        let period = build_period(
            lord,
            current_start,
            years,
            0,
            target_depth_index,
            seq_index,
            &calendar,
        )?;
        current_start = period.end_year;
        periods.push(period);
    }

    let reference_date = match reference {
        DashaReference::Birth => birth_date,
        DashaReference::On(date) => date,
    };
    let reference_year = fractional_year(reference_date);
    // At birth the running period is the Moon's nakshatra lord by
    // definition, even when the balance is below float resolution.
    let at_birth = reference_date == birth_date;
    let current_index = if at_birth {
        Some(0)
    } else {
        periods.iter().position(|p| p.contains(reference_year))
    }
    .ok_or_else(|| {
        ChartError::Computation(format!(
            "reference {reference_date} ({reference_year:.2}) is outside the dasha cycle {:.2}..{:.2}",
            periods.first().map(|p| p.start_year).unwrap_or(f64::NAN),
            periods.last().map(|p| p.end_year).unwrap_or(f64::NAN),
        ))
    })?;

    let current = &periods[current_index];
    let descent_year = reference_year.clamp(current.start_year, current.end_year);
    let mut active_lords = vec![current.lord];
    let mut cursor = current;
    while let Some(child) = active_child(cursor, descent_year) {
        active_lords.push(child.lord);
        cursor = child;
    }
    let remaining_years = if at_birth {
        balance_years
    } else {
        current.end_year - reference_year
    };

    Ok(DashaTimeline {
        birth_lord: moon.lord,
        balance_years,
        reference_date,
        reference_year,
        current_index,
        current_lord: current.lord,
        remaining_years,
        active_lords,
        periods,
    })
}

/// Sub-period running at `year`. The last child also claims its parent's
/// end instant, which the parent only holds at birth.
fn active_child(parent: &DashaPeriod, year: f64) -> Option<&DashaPeriod> {
    parent.children.iter().find(|c| c.contains(year)).or_else(|| {
        parent
            .children
            .last()
            .filter(|c| c.start_year <= year && year <= c.end_year)
    })
}

fn build_period(
    lord: Body,
    start_year: f64,
    duration_years: f64,
    level_index: usize,
    target_depth_index: usize,
    sequence_start_index: usize,
    calendar: &Calendar,
) -> Result<DashaPeriod, ChartError> {
    let end_year = start_year + duration_years;
    let level = DEPTH_LEVELS[level_index.min(DEPTH_LEVELS.len() - 1)];

    let mut period = DashaPeriod {
        lord,
        level,
        start_year,
        end_year,
        start_date: calendar.date_at(start_year)?,
        end_date: calendar.date_at(end_year)?,
        children: Vec::new(),
    };

    if level_index >= target_depth_index {
        return Ok(period);
    }

    // Sub-periods start with the parent's own lord and share its span
    // in proportion to each lord's years.
    let mut child_start = start_year;
    for offset in 0..VIMSHOTTARI_SEQUENCE.len() {
        let child_index = (sequence_start_index + offset) % VIMSHOTTARI_SEQUENCE.len();
        let (child_lord, child_years) = VIMSHOTTARI_SEQUENCE[child_index];
        let child_duration = duration_years * (child_years / VIMSHOTTARI_TOTAL_YEARS);
        let mut child = build_period(
            child_lord,
            child_start,
            child_duration,
            level_index + 1,
            target_depth_index,
            child_index,
            calendar,
        )?;
        if offset == VIMSHOTTARI_SEQUENCE.len() - 1 {
            // Pin the last child to the parent's end so rounding cannot
            // leave a gap.
            child.end_year = end_year;
            child.end_date = period.end_date;
        }
        child_start = child.end_year;
        period.children.push(child);
    }

    Ok(period)
}
