//! Meteorological forcing: one daily-record file per quantity.

use crate::input::read_climate_records;
use crate::output::write_lines;
use anyhow::Context;
use chrono::NaiveDate;
use forcing_data::format::meteo_lines;
use forcing_data::patch::PatchPolicy;
use forcing_data::pipeline::{meteo_series, reconstruct};
use forcing_types::category_mapping::CategoryMapping;
use forcing_types::{Family, Grid, Quantity, Scalar, Series};
use log::{error, info};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Reconstruct one raw meteorological series and write its file.
pub fn write_meteo_series(
    series: Series<Scalar>,
    station_id: &str,
    output: &Path,
) -> anyhow::Result<usize> {
    let quantity = series.quantity.clone();
    let done = reconstruct(series, Grid::Hourly, &PatchPolicy::default())
        .with_context(|| format!("Failed to reconstruct {}", quantity))?;
    write_lines(output, meteo_lines(&done.series, station_id))
}

/// Build every requested meteorological file from the climate data at
/// `input`. A failing quantity does not stop the others; the call fails
/// if any of them did.
pub fn run_meteo(
    station_id: &str,
    input: &Path,
    outputs: &BTreeMap<Quantity, PathBuf>,
    mapping: &CategoryMapping,
    cutoff: NaiveDate,
) -> anyhow::Result<()> {
    if outputs.is_empty() {
        anyhow::bail!("No meteorological output files requested");
    }
    if let Some(quantity) = outputs.keys().find(|q| q.family() != Family::Meteo) {
        anyhow::bail!("{} is not a meteorological quantity", quantity);
    }
    info!(
        "Processing {} meteorological quantities for station {} up to {}",
        outputs.len(),
        station_id,
        cutoff
    );
    let records = read_climate_records(input)?;
    let mut raw = meteo_series(&records, outputs.keys().copied(), mapping, cutoff);

    let mut failed = Vec::new();
    for (quantity, output) in outputs {
        let result = raw
            .remove(quantity.name())
            .with_context(|| format!("No {} series", quantity))
            .and_then(|series| write_meteo_series(series, station_id, output));
        match result {
            Ok(days) => info!("{} forcing: {} days written to {}", quantity, days, output.display()),
            Err(e) => {
                error!("{} forcing failed: {:#}", quantity, e);
                failed.push(quantity.name());
            }
        }
    }
    if !failed.is_empty() {
        anyhow::bail!("Meteorological forcing failed for {}", failed.join(", "));
    }
    Ok(())
}
