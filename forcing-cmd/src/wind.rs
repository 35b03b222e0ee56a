//! Hourly wind forcing.

use crate::input::read_climate_records;
use crate::output::write_lines;
use anyhow::Context;
use chrono::NaiveDate;
use forcing_data::format::wind_lines;
use forcing_data::patch::PatchPolicy;
use forcing_data::pipeline::{hourly_series, reconstruct};
use forcing_data::readers::{wind_components, WindAxes};
use forcing_data::wind_gap::LARGE_GAP_HOURS;
use forcing_types::{Grid, Quantity};
use log::info;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct WindSettings {
    pub large_gap_hours: usize,
    pub axis_rotation_deg: f64,
}

impl Default for WindSettings {
    fn default() -> Self {
        WindSettings {
            large_gap_hours: LARGE_GAP_HOURS,
            axis_rotation_deg: 0.0,
        }
    }
}

/// Build and write the wind forcing file.
///
/// Returns the data date: the day of the last hour in the trimmed series,
/// which is the latest day every other quantity can be trusted up to.
pub fn run_wind(
    input: &Path,
    output: &Path,
    cutoff: NaiveDate,
    settings: &WindSettings,
) -> anyhow::Result<NaiveDate> {
    info!("Processing wind from {} up to {}", input.display(), cutoff);
    let records = read_climate_records(input)?;
    let axes = WindAxes::rotated(settings.axis_rotation_deg);
    let series = hourly_series(Quantity::Wind.name(), &records, cutoff, |record| {
        wind_components(record, &axes)
    });
    let policy = PatchPolicy::with_large_gap_threshold(settings.large_gap_hours);
    let done = reconstruct(series, Grid::Hourly, &policy).context("Failed to reconstruct wind")?;

    let data_date = done
        .series
        .last()
        .map(|s| s.timestamp.date())
        .context("Wind series is empty")?;
    let written = write_lines(output, wind_lines(&done.series))?;

    info!(
        "wind forcing: {} hours written to {}, data date {}, {} long gaps",
        written,
        output.display(),
        data_date,
        done.report.warning_count()
    );
    Ok(data_date)
}
