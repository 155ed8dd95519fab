//! Text renderings of a computed chart for report generators and terminals.

use crate::chart::{houses_to_markdown, Varga};
use crate::service::ChartResult;
use crate::vedic::DashaPeriod;
use std::fmt::Write;

/// Markdown with the Rashi and, when computed, Navamsa house tables.
pub fn render_markdown(chart: &ChartResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n### {} Chart:", Varga::Rashi.label());
    out.push_str(&houses_to_markdown(&chart.houses));
    if let Some(navamsa) = &chart.navamsa {
        let _ = writeln!(out, "\n### {} Chart:", Varga::Navamsa.label());
        out.push_str(&houses_to_markdown(&navamsa.houses));
    }
    out
}

fn push_periods(out: &mut String, periods: &[DashaPeriod], indent: usize) {
    for period in periods {
        let _ = writeln!(
            out,
            "{}- {} {:?}: {:.2} to {:.2}",
            "  ".repeat(indent),
            period.lord,
            period.level,
            period.start_year,
            period.end_year
        );
        push_periods(out, &period.children, indent + 1);
    }
}

/// Prompt handed to an external narrative generator.
pub fn render_prompt(chart: &ChartResult) -> String {
    let mut out = String::new();
    out.push_str(
        "Act as a master Vedic astrologer and analyze this Vedic astrology chart. \
         Interpret the D1 chart and the listed properties, and use the running Maha Dasha.\n\n",
    );

    out.push_str("Birth Details:\n");
    let _ = writeln!(out, "Name: {}", chart.name);
    let _ = writeln!(out, "Date of Birth: {}", chart.birth.date_of_birth);
    let _ = writeln!(out, "Time of Birth: {}", chart.birth.time_of_birth.format("%H:%M"));
    if let Some(place) = &chart.birth.place {
        let _ = writeln!(out, "Place of Birth: {place}");
    }
    let _ = writeln!(
        out,
        "Location: {:.4}°{}, {:.4}°{}",
        chart.birth.latitude.abs(),
        if chart.birth.latitude >= 0.0 { "N" } else { "S" },
        chart.birth.longitude.abs(),
        if chart.birth.longitude >= 0.0 { "E" } else { "W" },
    );
    let _ = writeln!(
        out,
        "Time Zone: {}{}",
        chart.time.zone,
        if chart.time.approximate { " (approximated from longitude)" } else { "" }
    );

    let _ = writeln!(
        out,
        "\nAscendant: {} ({:.2}°)",
        chart.ascendant.sign, chart.ascendant.degree_in_sign
    );
    let _ = writeln!(
        out,
        "Nakshatra: {} (Pada {})",
        chart.nakshatra.name, chart.nakshatra.pada
    );

    out.push_str("\nPlanetary Positions:\n");
    for p in &chart.positions {
        let _ = writeln!(
            out,
            "{}: {} (House {}){}",
            p.body,
            p.sign,
            p.house,
            if p.retrograde { " R" } else { "" }
        );
    }

    out.push_str("\nPlanetary Strengths:\n");
    for s in chart.planet_strengths.values() {
        let _ = writeln!(
            out,
            "{}: {}{}",
            s.body,
            s.dignity,
            if s.combust { ", combust" } else { "" }
        );
    }

    out.push_str("\nHouse Placements:\n");
    for house in &chart.houses {
        let planets = house
            .bodies
            .iter()
            .map(|b| b.name())
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "House {}: {} - Planets: {}", house.number, house.sign, planets);
    }

    out.push_str("\nDasha Periods:\nComplete Dasha Sequence:\n");
    for period in &chart.dasha.periods {
        let _ = writeln!(
            out,
            "- {} Dasha: {:.2} to {:.2}",
            period.lord, period.start_year, period.end_year
        );
    }
    if chart.dasha.periods.iter().any(|p| !p.children.is_empty()) {
        out.push_str("\nSub-periods:\n");
        push_periods(&mut out, &chart.dasha.periods, 0);
    }
    let _ = writeln!(
        out,
        "Current Dasha (as of {}): {} ({:.2} years remaining)",
        chart.dasha.reference_date,
        chart.dasha.current_lord,
        chart.dasha.remaining_years
    );

    out.push_str(&render_markdown(chart));
    out
}
