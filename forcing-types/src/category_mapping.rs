use crate::error::{ForcingError, Result};
use csv::{ReaderBuilder, Trim};
use std::collections::HashMap;

/// Embedded default mapping from weather descriptions to cloud fraction
/// (tenths of sky covered).
pub static CLOUD_FRACTION_CSV: &str = include_str!("../../fixtures/cloud_fraction_mapping.csv");

/// Read-only table turning a categorical reading into a number.
///
/// Each category maps either to a single value, or to twelve values of which
/// the one for the reading's month applies.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryMapping {
    entries: HashMap<String, Vec<f64>>,
}

impl CategoryMapping {
    /// The embedded default cloud fraction mapping.
    pub fn default_cloud_fraction() -> Result<CategoryMapping> {
        CategoryMapping::parse_csv(CLOUD_FRACTION_CSV)
    }

    /// Parse a mapping table.
    ///
    /// Expected CSV: a header row, then `category,value[,value...]` rows with
    /// either 1 or 12 values.
    pub fn parse_csv(csv_object: &str) -> Result<CategoryMapping> {
        let mut mapping = CategoryMapping::default();
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(csv_object.as_bytes());
        for row in rdr.records() {
            let record = row?;
            let category = record.get(0).unwrap_or_default();
            let values = record
                .iter()
                .skip(1)
                .filter(|s| !s.is_empty())
                .map(|s| {
                    s.parse::<f64>().map_err(|_| {
                        ForcingError::InvalidMapping(format!("{}: {:?} is not a number", category, s))
                    })
                })
                .collect::<Result<Vec<f64>>>()?;
            mapping.insert(category, values)?;
        }
        Ok(mapping)
    }

    /// Add one category. A category may only be listed once.
    pub fn insert(&mut self, category: &str, values: Vec<f64>) -> Result<()> {
        if category.is_empty() {
            return Err(ForcingError::InvalidMapping("empty category".to_string()));
        }
        if self.entries.contains_key(category) {
            return Err(ForcingError::InvalidMapping(format!(
                "{} is listed more than once",
                category
            )));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ForcingError::InvalidMapping(format!(
                "{} has a non-finite value",
                category
            )));
        }
        if values.len() != 1 && values.len() != 12 {
            return Err(ForcingError::InvalidMapping(format!(
                "{} has {} values, expected 1 or 12",
                category,
                values.len()
            )));
        }
        self.entries.insert(category.to_string(), values);
        Ok(())
    }

    /// Value for `category` in `month` (1-12), `None` for unknown categories.
    pub fn lookup(&self, category: &str, month: u32) -> Option<f64> {
        let values = self.entries.get(category.trim())?;
        match values.as_slice() {
            [single] => Some(*single),
            monthly => monthly.get(month.checked_sub(1)? as usize).copied(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
