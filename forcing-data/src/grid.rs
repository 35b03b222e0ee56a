//! Regular grid enforcement: absent grid steps become missing samples.

use chrono::TimeDelta;
use forcing_types::{
    grid_range::GridRange, ForcingError, Grid, Reading, Result, Sample, Series,
};
use log::warn;

/// Insert a missing sample at every grid step absent between two
/// consecutive samples, so skipped days or hours are patched like any other
/// missing value. Returns the number of inserted samples.
///
/// Timestamps must strictly increase.
pub fn fill_missing_steps<V: Reading>(series: &mut Series<V>, step: TimeDelta) -> Result<usize> {
    let mut filled: Vec<Sample<V>> = Vec::with_capacity(series.len());
    let mut inserted = 0;

    for sample in &series.samples {
        if let Some(previous) = filled.last().map(|s| s.timestamp) {
            if sample.timestamp <= previous {
                return Err(ForcingError::OutOfOrder {
                    quantity: series.quantity.clone(),
                    previous,
                    timestamp: sample.timestamp,
                });
            }
            for timestamp in GridRange::new(previous + step, sample.timestamp, step) {
                filled.push(Sample::missing(timestamp));
                inserted += 1;
            }
        }
        filled.push(sample.clone());
    }

    series.samples = filled;
    Ok(inserted)
}

/// Drop the samples before the first midnight of a sub-daily series.
///
/// A feed that starts mid-day covers its first day only partly; keeping it
/// would shift every trimmer block off the calendar day. Returns the number
/// of samples dropped. Daily grids are left alone.
pub fn drop_leading_partial_day<V: Reading>(series: &mut Series<V>, grid: Grid) -> usize {
    if grid.block_len() <= 1 {
        return 0;
    }
    let dropped = series
        .iter()
        .take_while(|s| s.timestamp.hour() != 0)
        .count();
    if dropped > 0 {
        warn!(
            "{} starts at {}; dropped {} samples before the first full day",
            series.quantity,
            series.samples[0].timestamp.format_minutes(),
            dropped
        );
        series.samples.drain(..dropped);
    }
    dropped
}

/// Pad the last day of a sub-daily series with missing samples through its
/// final grid step, so a feed that simply stops publishing mid-day leaves a
/// partial block for the trimmer. Returns the number of samples added.
pub fn pad_last_day<V: Reading>(series: &mut Series<V>, grid: Grid) -> usize {
    if grid.block_len() <= 1 {
        return 0;
    }
    let Some(last) = series.last().map(|s| s.timestamp) else {
        return 0;
    };
    let step = grid.step();
    let end = last.start_of_day() + TimeDelta::days(1);
    let before = series.len();
    series
        .samples
        .extend(GridRange::new(last + step, end, step).map(Sample::missing));
    series.len() - before
}
