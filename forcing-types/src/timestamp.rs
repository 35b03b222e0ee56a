use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use core::ops::Add;
use std::fmt;

/// Date format used for daily timestamps: "YYYY-MM-DD"
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date-time format used for hourly timestamps: "YYYY-MM-DD HH:MM:SS"
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The time key of a sample.
///
/// Daily series (river flows) are keyed by calendar date, hourly series
/// (wind, meteorological quantities) by date-time. A series only ever holds
/// one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Timestamp {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Timestamp {
    /// Calendar date of the sample.
    pub fn date(&self) -> NaiveDate {
        match self {
            Timestamp::Date(date) => *date,
            Timestamp::DateTime(datetime) => datetime.date(),
        }
    }

    /// Hour of day; daily timestamps sit at hour 0.
    pub fn hour(&self) -> u32 {
        match self {
            Timestamp::Date(_) => 0,
            Timestamp::DateTime(datetime) => datetime.hour(),
        }
    }

    /// Midnight of the same day, keeping the timestamp kind.
    pub fn start_of_day(&self) -> Timestamp {
        match self {
            Timestamp::Date(date) => Timestamp::Date(*date),
            Timestamp::DateTime(datetime) => {
                Timestamp::DateTime(datetime.date().and_time(NaiveTime::MIN))
            }
        }
    }

    pub fn year(&self) -> i32 {
        self.date().year()
    }

    pub fn month(&self) -> u32 {
        self.date().month()
    }

    pub fn day(&self) -> u32 {
        self.date().day()
    }

    /// Render to minute precision, "YYYY-MM-DD HH:MM".
    pub fn format_minutes(&self) -> String {
        match self {
            Timestamp::Date(date) => date.format("%Y-%m-%d 00:00").to_string(),
            Timestamp::DateTime(datetime) => datetime.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            Timestamp::DateTime(datetime) => write!(f, "{}", datetime.format(DATETIME_FORMAT)),
        }
    }
}

impl From<NaiveDate> for Timestamp {
    fn from(value: NaiveDate) -> Self {
        Timestamp::Date(value)
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(value: NaiveDateTime) -> Self {
        Timestamp::DateTime(value)
    }
}

impl Add<TimeDelta> for Timestamp {
    type Output = Self;

    fn add(self, rhs: TimeDelta) -> Self::Output {
        match self {
            Timestamp::Date(date) => Timestamp::Date(date + rhs),
            Timestamp::DateTime(datetime) => Timestamp::DateTime(datetime + rhs),
        }
    }
}
