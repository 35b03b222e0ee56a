//! Data processing and interpolation for forcing observations.
//!
//! This crate turns raw observation records into complete, regularly
//! spaced series and renders them into the fixed-format lines the model
//! reads. Pipeline order per quantity:
//!
//! aggregation (rivers only) → grid → trim → patch → format

pub mod aggregation;
pub mod format;
pub mod grid;
pub mod patch;
pub mod pipeline;
pub mod readers;
pub mod trim;

/// Defaults for the wind large-gap report.
pub mod wind_gap {
    /// Gaps longer than this many hours are reported at warning level.
    pub const LARGE_GAP_HOURS: usize = 11;

    /// Check whether a gap of `len` hours should be reported.
    pub fn is_large_gap(len: usize, threshold: usize) -> bool {
        len > threshold
    }
}
