//! Daily river flow forcing.

use crate::input::open_input;
use crate::output::write_lines;
use anyhow::Context;
use chrono::NaiveDate;
use forcing_data::aggregation::daily_means;
use forcing_data::format::river_lines;
use forcing_data::patch::PatchPolicy;
use forcing_data::pipeline::reconstruct;
use forcing_types::raw::flow_records;
use forcing_types::{Family, Grid, Quantity};
use log::info;
use std::path::Path;

/// Aggregate gauge readings at `input` into daily means up to `cutoff`,
/// reconstruct and write the river forcing file.
pub fn run_river(
    quantity: Quantity,
    input: &Path,
    output: &Path,
    cutoff: NaiveDate,
) -> anyhow::Result<()> {
    if quantity.family() != Family::River {
        anyhow::bail!("{} is not a river quantity", quantity);
    }
    info!("Processing {} flows from {} up to {}", quantity, input.display(), cutoff);

    let series = daily_means(quantity.name(), flow_records(open_input(input)?), cutoff)
        .with_context(|| format!("Failed to read {} flows from {}", quantity, input.display()))?;
    let done = reconstruct(series, Grid::Daily, &PatchPolicy::default())
        .with_context(|| format!("Failed to reconstruct {} flows", quantity))?;
    let written = write_lines(output, river_lines(&done.series))?;

    info!("{} forcing: {} days written to {}", quantity, written, output.display());
    Ok(())
}
