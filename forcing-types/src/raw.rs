//! Raw observation records handed over by the retrieval side.
//!
//! Sources are normalized to CSV with a header row before they reach the
//! reconstruction engine:
//!
//! - river gauge readings: `timestamp,flow`
//! - hourly climate station data:
//!   `timestamp,temperature,humidity,weather,wind_speed,wind_direction`
//!
//! Empty cells are missing values. A row that cannot be parsed is an error,
//! never skipped: dropping a row would silently skew a daily mean.

use crate::error::{ForcingError, Result};
use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord, Trim};
use forcing_utils::dates::parse_timestamp;
use std::io::Read;

/// Expected number of columns in a river gauge CSV row.
pub const FLOW_ROW_LENGTH: usize = 2;

/// Expected number of columns in a climate CSV row.
pub const CLIMATE_ROW_LENGTH: usize = 6;

/// One sub-daily river flow reading.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowRecord {
    /// Line in the source file, for error reports
    pub row: usize,
    pub timestamp: NaiveDateTime,
    /// Discharge in m³/s
    pub flow: f64,
}

/// One hourly climate station record.
#[derive(Debug, Clone, PartialEq)]
pub struct ClimateRecord {
    pub row: usize,
    pub timestamp: NaiveDateTime,
    /// Air temperature in degrees Celsius
    pub temperature: Option<f64>,
    /// Relative humidity in percent
    pub humidity: Option<f64>,
    /// Free-text weather description, e.g. "Mostly Cloudy"
    pub weather: Option<String>,
    /// Wind speed in km/h
    pub wind_speed: Option<f64>,
    /// Direction the wind blows from, in tens of degrees
    pub wind_direction: Option<f64>,
}

fn malformed(row: usize, reason: impl Into<String>) -> ForcingError {
    ForcingError::MalformedRecord {
        row,
        reason: reason.into(),
    }
}

fn row_of(record: &StringRecord, fallback: usize) -> usize {
    record
        .position()
        .map(|p| p.line() as usize)
        .unwrap_or(fallback)
}

fn check_len(record: &StringRecord, row: usize, expected: usize) -> Result<()> {
    if record.len() != expected {
        return Err(malformed(
            row,
            format!("expected {} columns, found {}", expected, record.len()),
        ));
    }
    Ok(())
}

fn timestamp_field(record: &StringRecord, row: usize) -> Result<NaiveDateTime> {
    let raw = record.get(0).unwrap_or_default();
    parse_timestamp(raw).map_err(|e| malformed(row, e.to_string()))
}

fn optional_number(record: &StringRecord, index: usize, row: usize) -> Result<Option<f64>> {
    match record.get(index).map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => match s.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Some(value)),
            Ok(_) => Err(malformed(
                row,
                format!("column {}: {:?} is not a finite number", index + 1, s),
            )),
            Err(_) => Err(malformed(
                row,
                format!("column {}: {:?} is not a number", index + 1, s),
            )),
        },
    }
}

impl FlowRecord {
    pub fn from_record(record: &StringRecord, row: usize) -> Result<Self> {
        check_len(record, row, FLOW_ROW_LENGTH)?;
        let timestamp = timestamp_field(record, row)?;
        let flow = optional_number(record, 1, row)?
            .ok_or_else(|| malformed(row, "flow value is empty"))?;
        Ok(FlowRecord {
            row,
            timestamp,
            flow,
        })
    }
}

impl ClimateRecord {
    pub fn from_record(record: &StringRecord, row: usize) -> Result<Self> {
        check_len(record, row, CLIMATE_ROW_LENGTH)?;
        let weather = record
            .get(3)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);
        Ok(ClimateRecord {
            row,
            timestamp: timestamp_field(record, row)?,
            temperature: optional_number(record, 1, row)?,
            humidity: optional_number(record, 2, row)?,
            weather,
            wind_speed: optional_number(record, 4, row)?,
            wind_direction: optional_number(record, 5, row)?,
        })
    }
}

fn records<R: Read, T>(
    reader: R,
    parse: fn(&StringRecord, usize) -> Result<T>,
) -> impl Iterator<Item = Result<T>> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader)
        .into_records()
        .enumerate()
        .map(move |(index, result)| {
            let record = result?;
            // header is line 1
            let row = row_of(&record, index + 2);
            parse(&record, row)
        })
}

/// Lazily parse river gauge readings from CSV.
pub fn flow_records<R: Read>(reader: R) -> impl Iterator<Item = Result<FlowRecord>> {
    records(reader, FlowRecord::from_record)
}

/// Lazily parse hourly climate records from CSV.
pub fn climate_records<R: Read>(reader: R) -> impl Iterator<Item = Result<ClimateRecord>> {
    records(reader, ClimateRecord::from_record)
}
