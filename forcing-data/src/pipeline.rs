//! The reconstruction sequence shared by every quantity.

use crate::grid::{drop_leading_partial_day, fill_missing_steps, pad_last_day};
use crate::patch::{patch_gaps, PatchPolicy, PatchReport};
use crate::readers::meteo_value;
use crate::trim::trim_tail;
use chrono::NaiveDate;
use forcing_types::{
    category_mapping::CategoryMapping, raw::ClimateRecord, Grid, Quantity, Reading, Result,
    Sample, Scalar, Series, SeriesMap,
};
use log::info;

/// A finished series and what it took to get there.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconstruction<V> {
    pub series: Series<V>,
    /// Missing samples inserted for absent grid steps, including the
    /// padding of the last day
    pub inserted: usize,
    /// Samples dropped from a partial first day
    pub dropped: usize,
    /// Samples removed from the tail
    pub trimmed: usize,
    pub report: PatchReport,
}

/// Regularize, trim and patch `series` on `grid`.
///
/// Sub-daily series are aligned to whole calendar days before trimming.
pub fn reconstruct<V: Reading>(
    mut series: Series<V>,
    grid: Grid,
    policy: &PatchPolicy,
) -> Result<Reconstruction<V>> {
    let mut inserted = fill_missing_steps(&mut series, grid.step())?;
    let dropped = drop_leading_partial_day(&mut series, grid);
    inserted += pad_last_day(&mut series, grid);
    let trimmed = trim_tail(&mut series, grid.block_len())?;
    let report = patch_gaps(&mut series, policy)?;
    info!(
        "{}: {} samples {} to {}, {} patched, {} trimmed",
        series.quantity,
        series.len(),
        series.first().map(|s| s.timestamp.to_string()).unwrap_or_default(),
        series.last().map(|s| s.timestamp.to_string()).unwrap_or_default(),
        report.patched.len(),
        trimmed
    );
    Ok(Reconstruction {
        series,
        inserted,
        dropped,
        trimmed,
        report,
    })
}

/// Build an hourly series from climate records dated on or before `cutoff`,
/// extracting one value per record with `reader`.
pub fn hourly_series<V, F>(
    quantity: &str,
    records: &[ClimateRecord],
    cutoff: NaiveDate,
    reader: F,
) -> Series<V>
where
    V: Reading,
    F: Fn(&ClimateRecord) -> V,
{
    let samples = records
        .iter()
        .take_while(|r| r.timestamp.date() <= cutoff)
        .map(|r| Sample::new(r.timestamp, reader(r)))
        .collect();
    Series::from_samples(quantity, samples)
}

/// Raw hourly series of each requested meteorological quantity, keyed by
/// quantity name.
pub fn meteo_series<I>(
    records: &[ClimateRecord],
    quantities: I,
    mapping: &CategoryMapping,
    cutoff: NaiveDate,
) -> SeriesMap<Scalar>
where
    I: IntoIterator<Item = Quantity>,
{
    quantities
        .into_iter()
        .map(|quantity| {
            let series = hourly_series(quantity.name(), records, cutoff, |record| {
                meteo_value(quantity, record, mapping)
            });
            (quantity.name().to_string(), series)
        })
        .collect()
}
