use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use kundali::{
    render_markdown, render_prompt, ChartRequest, ChartService, DashaLevel, DashaReference,
    SwissEphemerisAdapter,
};
use kundali_config::{load_settings, TimezoneMode};
use log::debug;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// Full chart as pretty-printed JSON.
    Json,
    /// Rashi (and Navamsa) house tables.
    Markdown,
    /// Plain-text chart summary for an interpretation prompt.
    Prompt,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Depth {
    Mahadasha,
    Antardasha,
    Pratyantardasha,
}

impl From<Depth> for DashaLevel {
    fn from(depth: Depth) -> Self {
        match depth {
            Depth::Mahadasha => DashaLevel::Mahadasha,
            Depth::Antardasha => DashaLevel::Antardasha,
            Depth::Pratyantardasha => DashaLevel::Pratyantardasha,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Vedic birth chart calculator")]
struct Args {
    /// Birth date, YYYY-MM-DD.
    #[arg(long)]
    date: String,

    /// Local birth time, HH:MM or HH:MM:SS.
    #[arg(long)]
    time: String,

    /// Latitude in degrees, north positive.
    #[arg(long, allow_negative_numbers = true, requires = "lon", conflicts_with = "place")]
    lat: Option<f64>,

    /// Longitude in degrees, east positive.
    #[arg(long, allow_negative_numbers = true, requires = "lat", conflicts_with = "place")]
    lon: Option<f64>,

    /// Birth place looked up in the gazetteer (built-in plus config [places]).
    #[arg(long)]
    place: Option<String>,

    #[arg(long, default_value = "Native")]
    name: String,

    /// IANA zone for the birth time (skips coordinate lookup).
    #[arg(long)]
    zone: Option<String>,

    /// Approximate the zone from longitude (15 degrees per hour, no DST).
    #[arg(long, conflicts_with = "zone")]
    approximate_zone: bool,

    /// Config file (otherwise $KUNDALI_CONFIG or configs/kundali.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    no_navamsa: bool,

    /// Report the dasha running on this date, YYYY-MM-DD.
    #[arg(long, conflicts_with = "dasha_now")]
    dasha_as_of: Option<String>,

    /// Report the dasha running today.
    #[arg(long)]
    dasha_now: bool,

    /// Sub-period depth of the dasha timeline.
    #[arg(long, value_enum)]
    depth: Option<Depth>,

    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

fn build_request(args: &Args) -> anyhow::Result<ChartRequest> {
    let request = match (args.lat, args.lon, &args.place) {
        (Some(lat), Some(lon), None) => {
            ChartRequest::at_coordinates(&args.name, &args.date, &args.time, lat, lon)
        }
        (None, None, Some(place)) => ChartRequest::at_place(&args.name, &args.date, &args.time, place),
        _ => anyhow::bail!("Give either --lat and --lon, or --place"),
    };
    Ok(match &args.zone {
        Some(zone) => request.with_zone(zone),
        None => request,
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if args.approximate_zone {
        settings.zone = None;
        settings.timezone_mode = TimezoneMode::Longitude;
    }

    let today = Local::now().date_naive();
    let mut options = settings.chart_options(today);
    if args.no_navamsa {
        options.navamsa = false;
    }
    if let Some(depth) = args.depth {
        options.dasha_depth = depth.into();
    }
    if args.dasha_now {
        options.dasha_reference = DashaReference::On(today);
    } else if let Some(value) = &args.dasha_as_of {
        let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .with_context(|| format!("Invalid --dasha-as-of {value:?}, expected YYYY-MM-DD"))?;
        options.dasha_reference = DashaReference::On(date);
    }
    debug!("chart options: {options:?}");

    let adapter = SwissEphemerisAdapter::new(&settings.ephemeris)
        .context("Failed to configure the Swiss ephemeris")?;
    let service = ChartService::new(adapter)
        .with_resolver(settings.resolver())
        .with_geocoder(settings.geocoder())
        .with_options(options);

    let request = build_request(&args)?;
    let chart = service.compute(&request)?;

    let output = match args.format {
        Format::Json => serde_json::to_string_pretty(&chart).context("Failed to serialize chart")?,
        Format::Markdown => render_markdown(&chart),
        Format::Prompt => render_prompt(&chart),
    };
    println!("{output}");
    Ok(())
}
