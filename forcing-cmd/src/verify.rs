//! Re-reading written forcing files.

use anyhow::Context;
use forcing_data::format::parse::record_timestamp;
use forcing_types::{Quantity, Timestamp};
use log::info;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct FileSummary {
    pub records: usize,
    pub first: Timestamp,
    pub last: Timestamp,
}

/// Parse every line of a forcing file in the layout of `quantity`.
///
/// Fails on the first unparseable line, on timestamps that do not strictly
/// increase, or on an empty file.
pub fn verify_content(quantity: Quantity, content: &str) -> anyhow::Result<FileSummary> {
    let mut summary: Option<FileSummary> = None;
    for (index, line) in content.lines().enumerate() {
        let timestamp = record_timestamp(quantity.family(), line)
            .with_context(|| format!("line {}", index + 1))?;
        summary = Some(match summary {
            None => FileSummary {
                records: 1,
                first: timestamp,
                last: timestamp,
            },
            Some(s) if timestamp > s.last => FileSummary {
                records: s.records + 1,
                last: timestamp,
                ..s
            },
            Some(s) => anyhow::bail!(
                "line {}: {} does not follow {}",
                index + 1,
                timestamp,
                s.last
            ),
        });
    }
    summary.context("no records")
}

pub fn run_verify(quantity: Quantity, path: &Path) -> anyhow::Result<FileSummary> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let summary = verify_content(quantity, &content)
        .with_context(|| format!("{} is not a valid {} forcing file", path.display(), quantity))?;
    info!(
        "{}: {} {} records from {} to {}",
        path.display(),
        summary.records,
        quantity,
        summary.first,
        summary.last
    );
    Ok(summary)
}
