//! TOML run configuration.
//!
//! ```toml
//! cutoff = "2011-09-30"     # optional, defaults to the wind data date
//! large_gap_hours = 11
//!
//! [wind]
//! station_id = "6831"
//! input = "data/wind.csv"
//! output = "forcing/wind.dat"
//! axis_rotation_deg = 0.0
//!
//! [meteo]
//! station_id = "889"
//! input = "data/climate.csv.gz"
//! cloud_fraction_mapping = "cloud_fraction_mapping.csv"
//!
//! [meteo.outputs]
//! air_temperature = "forcing/AT.dat"
//! relative_humidity = "forcing/Hum.dat"
//! cloud_fraction = "forcing/Cf.dat"
//!
//! [rivers.major]
//! station_id = "08MF005"
//! input = "data/major.csv"
//! output = "forcing/major.dat"
//! ```
//!
//! Every section is optional. Relative paths are resolved against the
//! directory holding the configuration file.

use anyhow::Context;
use chrono::NaiveDate;
use forcing_data::wind_gap::LARGE_GAP_HOURS;
use forcing_types::Quantity;
use serde::{de, Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

fn default_large_gap_hours() -> usize {
    LARGE_GAP_HOURS
}

/// Output table keyed by quantity name; only meteorological quantities.
fn meteo_outputs<'de, D>(deserializer: D) -> Result<BTreeMap<Quantity, PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    BTreeMap::<String, PathBuf>::deserialize(deserializer)?
        .into_iter()
        .map(|(name, path)| {
            let quantity: Quantity = name.parse().map_err(<D::Error as de::Error>::custom)?;
            if !Quantity::METEO.contains(&quantity) {
                return Err(<D::Error as de::Error>::custom(format!(
                    "{} is not a meteorological quantity",
                    quantity
                )));
            }
            Ok((quantity, path))
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Last day of data to use; when absent the wind data date is used
    pub cutoff: Option<NaiveDate>,
    #[serde(default = "default_large_gap_hours")]
    pub large_gap_hours: usize,
    pub wind: Option<WindConfig>,
    pub meteo: Option<MeteoConfig>,
    #[serde(default)]
    pub rivers: RiversConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindConfig {
    pub station_id: String,
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(default)]
    pub axis_rotation_deg: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeteoConfig {
    pub station_id: String,
    pub input: PathBuf,
    pub cloud_fraction_mapping: Option<PathBuf>,
    /// Forcing file per meteorological quantity
    #[serde(deserialize_with = "meteo_outputs")]
    pub outputs: BTreeMap<Quantity, PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RiversConfig {
    pub major: Option<RiverConfig>,
    pub minor: Option<RiverConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RiverConfig {
    pub station_id: String,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl RunConfig {
    pub fn parse(content: &str) -> anyhow::Result<RunConfig> {
        Ok(toml::from_str(content)?)
    }

    /// Read a configuration file and resolve its paths.
    pub fn load(path: &Path) -> anyhow::Result<RunConfig> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let mut config = RunConfig::parse(&content)
            .with_context(|| format!("Failed to parse TOML in '{}'", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.resolve_paths(base);
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        if let Some(wind) = self.wind.as_mut() {
            resolve(&mut wind.input);
            resolve(&mut wind.output);
        }
        if let Some(meteo) = self.meteo.as_mut() {
            resolve(&mut meteo.input);
            if let Some(mapping) = meteo.cloud_fraction_mapping.as_mut() {
                resolve(mapping);
            }
            meteo.outputs.values_mut().for_each(resolve);
        }
        for river in [self.rivers.major.as_mut(), self.rivers.minor.as_mut()]
            .into_iter()
            .flatten()
        {
            resolve(&mut river.input);
            resolve(&mut river.output);
        }
    }

    /// Configured rivers with the quantity each one feeds.
    pub fn rivers(&self) -> Vec<(Quantity, &RiverConfig)> {
        [
            (Quantity::MajorRiver, self.rivers.major.as_ref()),
            (Quantity::MinorRiver, self.rivers.minor.as_ref()),
        ]
        .into_iter()
        .filter_map(|(quantity, river)| river.map(|r| (quantity, r)))
        .collect()
    }
}
