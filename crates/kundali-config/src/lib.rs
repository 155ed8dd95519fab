use anyhow::Context;
use chrono::NaiveDate;
use kundali::ephemeris::adapter::validate_data_path;
use kundali::time::{default_resolver, FixedZoneResolver, LongitudeZoneResolver, TimezoneResolver};
use kundali::{
    ChartOptions, Coordinates, DashaLevel, DashaReference, EphemerisConfig, NodeKind, StaticGeocoder,
};
use log::info;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "KUNDALI_CONFIG";

const DEFAULT_PATHS: [&str; 2] = ["configs/kundali.toml", "../../configs/kundali.toml"];

/// How a birth coordinate is turned into a zone when no zone is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimezoneMode {
    /// Timezone boundary lookup (longitude approximation when the lookup
    /// is compiled out).
    #[default]
    Lookup,
    Longitude,
}

/// Which date the current dasha is reported for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashaAnchor {
    #[default]
    Birth,
    Now,
}

#[derive(Debug, Clone)]
pub struct KundaliSettings {
    /// File the settings were read from, `None` for built-in defaults.
    pub source: Option<PathBuf>,
    pub ephemeris: EphemerisConfig,
    pub timezone_mode: TimezoneMode,
    pub zone: Option<String>,
    pub dasha_anchor: DashaAnchor,
    pub dasha_depth: DashaLevel,
    pub navamsa: bool,
    pub places: BTreeMap<String, Coordinates>,
}

impl Default for KundaliSettings {
    fn default() -> Self {
        Self {
            source: None,
            ephemeris: EphemerisConfig::default(),
            timezone_mode: TimezoneMode::Lookup,
            zone: None,
            dasha_anchor: DashaAnchor::Birth,
            dasha_depth: DashaLevel::Mahadasha,
            navamsa: true,
            places: BTreeMap::new(),
        }
    }
}

impl KundaliSettings {
    /// Chart options with a `now` anchor pinned to `today`.
    pub fn chart_options(&self, today: NaiveDate) -> ChartOptions {
        ChartOptions {
            navamsa: self.navamsa,
            dasha_reference: match self.dasha_anchor {
                DashaAnchor::Birth => DashaReference::Birth,
                DashaAnchor::Now => DashaReference::On(today),
            },
            dasha_depth: self.dasha_depth,
        }
    }

    pub fn resolver(&self) -> Box<dyn TimezoneResolver> {
        if let Some(zone) = &self.zone {
            return Box::new(FixedZoneResolver::new(zone.clone()));
        }
        match self.timezone_mode {
            TimezoneMode::Lookup => default_resolver(),
            TimezoneMode::Longitude => Box::new(LongitudeZoneResolver),
        }
    }

    /// Built-in gazetteer extended with the `[places]` table.
    pub fn geocoder(&self) -> StaticGeocoder {
        StaticGeocoder::new().with_places(self.places.iter().map(|(name, c)| (name, *c)))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EphemerisToml {
    #[serde(default)]
    data_path: Option<PathBuf>,
    #[serde(default)]
    node: NodeKind,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct TimezoneToml {
    #[serde(default)]
    mode: TimezoneMode,
    #[serde(default)]
    zone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DashaToml {
    #[serde(default)]
    reference: DashaAnchor,
    #[serde(default)]
    depth: DashaLevel,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartToml {
    #[serde(default = "default_navamsa")]
    navamsa: bool,
}

impl Default for ChartToml {
    fn default() -> Self {
        Self {
            navamsa: default_navamsa(),
        }
    }
}

fn default_navamsa() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    ephemeris: EphemerisToml,
    #[serde(default)]
    timezone: TimezoneToml,
    #[serde(default)]
    dasha: DashaToml,
    #[serde(default)]
    chart: ChartToml,
    #[serde(default)]
    places: BTreeMap<String, [f64; 2]>,
}

/// Find the config text: the explicit path, then `$KUNDALI_CONFIG`, then the
/// usual relative locations. An explicit or environment path that cannot be
/// read is an error; no file at the relative locations is not.
pub fn read_config_text(explicit: Option<&Path>) -> anyhow::Result<Option<(PathBuf, String)>> {
    if let Some(path) = explicit {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        return Ok(Some((path.to_path_buf(), text)));
    }
    if let Some(value) = std::env::var_os(CONFIG_ENV) {
        let path = PathBuf::from(value);
        let text = fs::read_to_string(&path)
            .with_context(|| format!("{CONFIG_ENV} points to unreadable file {}", path.display()))?;
        return Ok(Some((path, text)));
    }
    for p in &DEFAULT_PATHS {
        if let Ok(text) = fs::read_to_string(p) {
            return Ok(Some((PathBuf::from(p), text)));
        }
    }
    Ok(None)
}

/// Parse settings without touching the filesystem.
pub fn parse_settings(text: &str) -> anyhow::Result<KundaliSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse kundali config: {e}"))?;
    let RootConfigToml {
        ephemeris,
        timezone,
        dasha,
        chart,
        places,
    } = root;

    let zone = match timezone.zone {
        Some(zone) if zone.trim().is_empty() => {
            anyhow::bail!("timezone.zone is set but empty");
        }
        other => other,
    };

    let mut resolved = BTreeMap::new();
    for (name, [latitude, longitude]) in places {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            anyhow::bail!(
                "places.{name} has coordinates out of range: [{latitude}, {longitude}]"
            );
        }
        resolved.insert(name, Coordinates::new(latitude, longitude));
    }

    Ok(KundaliSettings {
        source: None,
        ephemeris: EphemerisConfig {
            data_path: ephemeris.data_path,
            node: ephemeris.node,
        },
        timezone_mode: timezone.mode,
        zone,
        dasha_anchor: dasha.reference,
        dasha_depth: dasha.depth,
        navamsa: chart.navamsa,
        places: resolved,
    })
}

/// The ephemeris data directory, when configured, must hold the planet,
/// moon and asteroid files.
pub fn validate_ephemeris_assets(settings: &KundaliSettings) -> anyhow::Result<()> {
    if let Some(path) = &settings.ephemeris.data_path {
        validate_data_path(path)
            .with_context(|| format!("ephemeris.data_path {} is unusable", path.display()))?;
    }
    Ok(())
}

pub fn load_settings(explicit: Option<&Path>) -> anyhow::Result<KundaliSettings> {
    let Some((path, text)) = read_config_text(explicit)? else {
        info!("no kundali config found, using defaults");
        return Ok(KundaliSettings::default());
    };
    let mut settings =
        parse_settings(&text).with_context(|| format!("in config file {}", path.display()))?;
    validate_ephemeris_assets(&settings)?;
    info!("loaded kundali config from {}", path.display());
    settings.source = Some(path);
    Ok(settings)
}
