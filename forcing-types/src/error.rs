/// Error types for forcing data reconstruction
use crate::timestamp::Timestamp;
use thiserror::Error;

/// Main error type for forcing series operations
#[derive(Error, Debug)]
pub enum ForcingError {
    /// Trimming removed every sample; the source has nothing usable yet
    #[error("{quantity} forcing data series is empty")]
    EmptySeries { quantity: String },

    /// A raw record could not be turned into a timestamp/value pair
    #[error("Malformed record at row {row}: {reason}")]
    MalformedRecord { row: usize, reason: String },

    /// Timestamps went backwards or repeated on a regular grid
    #[error("{quantity} sample at {timestamp} does not follow {previous}")]
    OutOfOrder {
        quantity: String,
        previous: Timestamp,
        timestamp: Timestamp,
    },

    /// A missing run touches the first or last sample of the series
    #[error("{quantity} data gap starting at {start} has no value on both sides")]
    UnboundedGap { quantity: String, start: Timestamp },

    /// A formatter met a value the patcher never filled
    #[error("{quantity} value at {timestamp} is missing")]
    UnpatchedValue {
        quantity: String,
        timestamp: Timestamp,
    },

    /// Daily records of hourly values need whole days
    #[error("{quantity} series ends with a partial day of {hours} hourly values at {start}")]
    PartialDay {
        quantity: String,
        start: Timestamp,
        hours: usize,
    },

    /// A forcing file line does not match its record layout
    #[error("Malformed forcing line {line:?}: {reason}")]
    MalformedLine { line: String, reason: String },

    /// Category mapping table problems
    #[error("Invalid category mapping: {0}")]
    InvalidMapping(String),

    /// Unknown quantity name
    #[error("Unknown quantity: {0}")]
    UnknownQuantity(String),

    /// Failed to read CSV data
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to read or write a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Results using ForcingError
pub type Result<T> = std::result::Result<T, ForcingError>;
