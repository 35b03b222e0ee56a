//! Opening raw observation files.

use anyhow::Context;
use flate2::read::GzDecoder;
use forcing_types::category_mapping::CategoryMapping;
use forcing_types::raw::{climate_records, ClimateRecord};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

fn is_gzip(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// Open `path` for reading, decompressing `.gz` files on the fly.
pub fn open_input(path: &Path) -> anyhow::Result<Box<dyn Read>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    if is_gzip(path) {
        Ok(Box::new(GzDecoder::new(reader)))
    } else {
        Ok(Box::new(reader))
    }
}

/// Read every hourly climate record of `path`.
pub fn read_climate_records(path: &Path) -> anyhow::Result<Vec<ClimateRecord>> {
    climate_records(open_input(path)?)
        .collect::<forcing_types::Result<Vec<ClimateRecord>>>()
        .with_context(|| format!("Failed to read climate data from {}", path.display()))
}

/// The cloud fraction table at `path`, or the built-in one.
pub fn load_mapping(path: Option<&Path>) -> anyhow::Result<CategoryMapping> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            CategoryMapping::parse_csv(&content)
                .with_context(|| format!("Failed to parse mapping {}", path.display()))
        }
        None => Ok(CategoryMapping::default_cloud_fraction()?),
    }
}
