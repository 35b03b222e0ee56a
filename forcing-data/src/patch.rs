//! Linear interpolation over interior runs of missing values.

use crate::wind_gap::is_large_gap;
use forcing_types::{ForcingError, Reading, Result, Series, Timestamp};
use log::{debug, warn};

/// How gaps are reported while patching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatchPolicy {
    /// Gaps longer than this many samples get a warning record.
    /// `None` disables the report (scalar quantities).
    pub large_gap_threshold: Option<usize>,
}

impl PatchPolicy {
    pub fn with_large_gap_threshold(threshold: usize) -> Self {
        PatchPolicy {
            large_gap_threshold: Some(threshold),
        }
    }
}

/// A closed run of missing samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Gap {
    pub start: Timestamp,
    pub end: Timestamp,
    pub len: usize,
}

/// What patching did to a series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchReport {
    /// Every sample whose value was interpolated, in series order
    pub patched: Vec<Timestamp>,
    pub gaps: Vec<Gap>,
    /// Gaps over the policy threshold; one warning record each
    pub large_gaps: Vec<Gap>,
}

impl PatchReport {
    pub fn warning_count(&self) -> usize {
        self.large_gaps.len()
    }
}

/// Fill every interior gap of `series` by linear interpolation in sample
/// index between the values bracketing it.
///
/// A debug record is logged per missing sample. A gap touching either end
/// of the series cannot be bracketed and fails with
/// [`ForcingError::UnboundedGap`]; trim the series first.
pub fn patch_gaps<V: Reading>(series: &mut Series<V>, policy: &PatchPolicy) -> Result<PatchReport> {
    let mut report = PatchReport::default();
    let mut gap: Option<(usize, usize)> = None;

    for i in 0..series.samples.len() {
        let timestamp = series.samples[i].timestamp;
        if series.samples[i].is_missing() {
            let gap_start = gap.map_or(i, |(start, _)| start);
            if gap_start == 0 {
                return Err(ForcingError::UnboundedGap {
                    quantity: series.quantity.clone(),
                    start: timestamp,
                });
            }
            gap = Some((gap_start, i));
            debug!("{} data patched for {}", series.quantity, timestamp);
            report.patched.push(timestamp);
        } else if let Some((gap_start, gap_end)) = gap.take() {
            interpolate_values(series, gap_start, gap_end);
            let closed = Gap {
                start: series.samples[gap_start].timestamp,
                end: series.samples[gap_end].timestamp,
                len: gap_end - gap_start + 1,
            };
            if let Some(threshold) = policy.large_gap_threshold {
                if is_large_gap(closed.len, threshold) {
                    warn!(
                        "A {} forcing data gap > {} hr starting at {} has been patched by linear interpolation",
                        series.quantity,
                        threshold,
                        closed.start.format_minutes()
                    );
                    report.large_gaps.push(closed.clone());
                }
            }
            report.gaps.push(closed);
        }
    }

    if let Some((gap_start, _)) = gap {
        return Err(ForcingError::UnboundedGap {
            quantity: series.quantity.clone(),
            start: series.samples[gap_start].timestamp,
        });
    }
    Ok(report)
}

/// Replace samples `gap_start..=gap_end` with values on the straight line
/// from the sample before the gap to the sample after it.
fn interpolate_values<V: Reading>(series: &mut Series<V>, gap_start: usize, gap_end: usize) {
    let last = series.samples[gap_start - 1].value.clone();
    let next = series.samples[gap_end + 1].value.clone();
    let steps = gap_end - gap_start + 2;
    for (k, sample) in series.samples[gap_start..=gap_end].iter_mut().enumerate() {
        sample.value = V::interpolate(&last, &next, k, steps);
    }
}
