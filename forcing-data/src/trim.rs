//! Removal of the unusable tail of a near-real-time series.
//!
//! The live edge of a feed carries two kinds of noise: a stub day with no
//! values at all, and a partially published "today". Both are cut in whole
//! blocks (one block is one day of samples) so that gap patching only ever
//! sees interior gaps.

use forcing_types::{ForcingError, Reading, Result, Series};
use log::debug;

fn drop_last_block<V>(series: &mut Series<V>, block_len: usize) {
    let keep = series.samples.len().saturating_sub(block_len);
    series.samples.truncate(keep);
}

fn empty<V>(series: &Series<V>) -> ForcingError {
    ForcingError::EmptySeries {
        quantity: series.quantity.clone(),
    }
}

/// Trim trailing blocks of `block_len` samples; returns the number removed.
///
/// 1. While the last block holds no present value, drop it.
/// 2. While the very last sample is missing, drop the last block.
///
/// Fails with [`ForcingError::EmptySeries`] when nothing is left. Applying
/// it to its own output removes nothing.
pub fn trim_tail<V: Reading>(series: &mut Series<V>, block_len: usize) -> Result<usize> {
    let block_len = block_len.max(1);
    let before = series.len();

    while !series.is_empty() {
        let start = series.len().saturating_sub(block_len);
        if series.samples[start..].iter().any(|s| !s.is_missing()) {
            break;
        }
        drop_last_block(series, block_len);
    }
    if series.is_empty() {
        return Err(empty(series));
    }

    while series.last().is_some_and(|s| s.is_missing()) {
        drop_last_block(series, block_len);
    }
    if series.is_empty() {
        return Err(empty(series));
    }

    let removed = before - series.len();
    if removed > 0 {
        debug!(
            "{} trimmed {} trailing samples; latest {}",
            series.quantity,
            removed,
            series.last().map(|s| s.timestamp.to_string()).unwrap_or_default()
        );
    }
    Ok(removed)
}
