//! Full forcing run driven by a TOML configuration.

use crate::config::RunConfig;
use crate::input::load_mapping;
use crate::meteo::run_meteo;
use crate::river::run_river;
use crate::wind::{run_wind, WindSettings};
use chrono::NaiveDate;
use forcing_utils::dates::default_cutoff;
use log::{error, info, warn};
use std::path::Path;

pub fn run_config(path: &Path) -> anyhow::Result<()> {
    let config = RunConfig::load(path)?;
    run_all(&config)?;
    Ok(())
}

/// Wind goes first: without an explicit cutoff, the day of its last
/// complete data becomes the cutoff for every other quantity. Each family
/// is attempted even when another fails.
pub fn run_all(config: &RunConfig) -> anyhow::Result<NaiveDate> {
    let mut cutoff = config.cutoff.unwrap_or_else(default_cutoff);
    let mut failed: Vec<String> = Vec::new();

    if let Some(wind) = &config.wind {
        let settings = WindSettings {
            large_gap_hours: config.large_gap_hours,
            axis_rotation_deg: wind.axis_rotation_deg,
        };
        match run_wind(&wind.input, &wind.output, cutoff, &settings) {
            Ok(data_date) if config.cutoff.is_none() => {
                info!("Data date from wind station {}: {}", wind.station_id, data_date);
                cutoff = data_date;
            }
            Ok(_) => {}
            Err(e) => {
                error!("wind forcing failed: {:#}", e);
                failed.push("wind".to_string());
            }
        }
    } else if config.cutoff.is_none() {
        warn!("No wind configured; using {} as data date", cutoff);
    }

    if let Some(meteo) = &config.meteo {
        let result = load_mapping(meteo.cloud_fraction_mapping.as_deref()).and_then(|mapping| {
            run_meteo(&meteo.station_id, &meteo.input, &meteo.outputs, &mapping, cutoff)
        });
        if let Err(e) = result {
            error!("meteo forcing failed: {:#}", e);
            failed.push("meteo".to_string());
        }
    }

    for (quantity, river) in config.rivers() {
        info!("{} station {}", quantity, river.station_id);
        if let Err(e) = run_river(quantity, &river.input, &river.output, cutoff) {
            error!("{} forcing failed: {:#}", quantity, e);
            failed.push(quantity.name().to_string());
        }
    }

    if !failed.is_empty() {
        anyhow::bail!("Forcing run failed for {}", failed.join(", "));
    }
    info!("Forcing run complete through {}", cutoff);
    Ok(cutoff)
}
