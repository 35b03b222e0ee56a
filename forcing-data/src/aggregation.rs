//! Daily means of sub-daily river gauge readings.

use chrono::NaiveDate;
use forcing_types::{
    raw::FlowRecord, ForcingError, Result, Sample, Scalar, Series,
};

/// Running sum for the day currently being read.
struct DayAccumulator {
    date: NaiveDate,
    sum: f64,
    count: u32,
}

impl DayAccumulator {
    fn new(date: NaiveDate, value: f64) -> Self {
        DayAccumulator {
            date,
            sum: value,
            count: 1,
        }
    }

    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn into_sample(self) -> Sample<Scalar> {
        Sample::new(self.date, Some(self.sum / self.count as f64))
    }
}

/// Collapse chronologically ordered readings into one mean per calendar day.
///
/// Reading stops at the first record dated after `cutoff`; that record and
/// everything behind it are never consumed. Records dated exactly on the
/// cutoff are included. A reading dated before the day being accumulated
/// is a [`ForcingError::MalformedRecord`].
pub fn daily_means<I>(quantity: &str, records: I, cutoff: NaiveDate) -> Result<Series<Scalar>>
where
    I: IntoIterator<Item = Result<FlowRecord>>,
{
    let mut series = Series::new(quantity);
    let mut current: Option<DayAccumulator> = None;

    for record in records {
        let record = record?;
        let date = record.timestamp.date();
        if date > cutoff {
            break;
        }
        if let Some(day) = current.as_mut() {
            if date == day.date {
                day.add(record.flow);
                continue;
            }
            if date < day.date {
                return Err(ForcingError::MalformedRecord {
                    row: record.row,
                    reason: format!("{} reading is dated before {}", date, day.date),
                });
            }
        }
        if let Some(day) = current.take() {
            series.push(day.into_sample());
        }
        current = Some(DayAccumulator::new(date, record.flow));
    }

    if let Some(day) = current {
        series.push(day.into_sample());
    }
    Ok(series)
}
