//! Fixed-format forcing records.
//!
//! Each formatter lazily turns a finished series into text lines, newline
//! included, one per model record. Lines are `Result`s: a value the patcher
//! never filled, or a meteorological day with fewer than 24 hours, becomes an
//! error item so the writer can abandon the file instead of truncating it.

pub mod parse;

use forcing_types::{
    quantity::HOURS_PER_DAY, ForcingError, Result, Scalar, Series, Timestamp, WindComponents,
};
use forcing_utils::numbers::format_scientific;

/// Fifth field of every meteorological record. The model skips it.
pub const METEO_QUANTITY_MARKER: u32 = 42;

/// Significand decimals of river flows.
pub const RIVER_PRECISION: usize = 6;

fn unpatched<V>(series: &Series<V>, timestamp: Timestamp) -> ForcingError {
    ForcingError::UnpatchedValue {
        quantity: series.quantity.clone(),
        timestamp,
    }
}

/// `YYYY MM DD <flow>` with the flow as `4.200000e+03`.
pub fn river_lines(series: &Series<Scalar>) -> impl Iterator<Item = Result<String>> + '_ {
    series.iter().map(move |sample| {
        let flow = sample.value.ok_or_else(|| unpatched(series, sample.timestamp))?;
        Ok(format!(
            "{} {}\n",
            sample.timestamp.date().format("%Y %m %d"),
            format_scientific(flow, RIVER_PRECISION)
        ))
    })
}

/// `DD MM YYYY H.H u v` with both components to six decimals.
pub fn wind_lines(series: &Series<WindComponents>) -> impl Iterator<Item = Result<String>> + '_ {
    series.iter().map(move |sample| {
        let [Some(u), Some(v)] = sample.value else {
            return Err(unpatched(series, sample.timestamp));
        };
        Ok(format!(
            "{} {:.1} {:.6} {:.6}\n",
            sample.timestamp.date().format("%d %m %Y"),
            sample.timestamp.hour() as f64,
            u,
            v
        ))
    })
}

/// `<station> YYYY MM DD 42` followed by the day's 24 hourly values to two
/// decimals. The series must start at midnight and hold whole days.
pub fn meteo_lines<'a>(
    series: &'a Series<Scalar>,
    station_id: &'a str,
) -> impl Iterator<Item = Result<String>> + 'a {
    series.samples.chunks(HOURS_PER_DAY).map(move |day| {
        let first = &day[0];
        if day.len() < HOURS_PER_DAY || first.timestamp.hour() != 0 {
            return Err(ForcingError::PartialDay {
                quantity: series.quantity.clone(),
                start: first.timestamp,
                hours: day.len(),
            });
        }
        let mut line = format!(
            "{} {} {}",
            station_id,
            first.timestamp.date().format("%Y %m %d"),
            METEO_QUANTITY_MARKER
        );
        for sample in day {
            let value = sample.value.ok_or_else(|| unpatched(series, sample.timestamp))?;
            line.push_str(&format!(" {:.2}", value));
        }
        line.push('\n');
        Ok(line)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
    use forcing_types::Sample;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2011, 9, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn hourly(start: NaiveDateTime, values: &[Scalar]) -> Series<Scalar> {
        let samples = values
            .iter()
            .enumerate()
            .map(|(i, v)| Sample::new(start + TimeDelta::hours(i as i64), *v))
            .collect();
        Series::from_samples("air_temperature", samples)
    }

    #[test]
    fn test_river_line() {
        let series = Series::from_samples(
            "major river",
            vec![Sample::new(NaiveDate::from_ymd_opt(2011, 9, 27).unwrap(), Some(4200.0))],
        );
        let lines: Vec<String> = river_lines(&series).collect::<Result<_>>().unwrap();
        assert_eq!(lines, vec!["2011 09 27 4.200000e+03\n"]);
    }

    #[test]
    fn test_river_small_flow() {
        let series = Series::from_samples(
            "minor river",
            vec![Sample::new(NaiveDate::from_ymd_opt(2011, 1, 2).unwrap(), Some(4.25))],
        );
        let line = river_lines(&series).next().unwrap().unwrap();
        assert_eq!(line, "2011 01 02 4.250000e+00\n");
    }

    #[test]
    fn test_wind_line() {
        let series = Series::from_samples(
            "wind",
            vec![Sample::new(at(25, 9), [Some(1.0), Some(2.0)])],
        );
        let line = wind_lines(&series).next().unwrap().unwrap();
        assert_eq!(line, "25 09 2011 9.0 1.000000 2.000000\n");
    }

    #[test]
    fn test_wind_negative_components() {
        let series = Series::from_samples(
            "wind",
            vec![Sample::new(at(25, 23), [Some(-1.5), Some(0.1234564)])],
        );
        let line = wind_lines(&series).next().unwrap().unwrap();
        assert_eq!(line, "25 09 2011 23.0 -1.500000 0.123456\n");
    }

    #[test]
    fn test_meteo_line() {
        let series = hourly(at(25, 0), &[Some(215.0); 24]);
        let lines: Vec<String> = meteo_lines(&series, "889").collect::<Result<_>>().unwrap();
        assert_eq!(lines.len(), 1);
        let expected = format!("889 2011 09 25 42{}\n", " 215.00".repeat(24));
        assert_eq!(lines[0], expected);
    }

    #[test]
    fn test_meteo_two_days() {
        let mut values = vec![Some(1.0); 24];
        values.extend(vec![Some(2.5); 24]);
        let series = hourly(at(25, 0), &values);
        let lines: Vec<String> = meteo_lines(&series, "889").collect::<Result<_>>().unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("889 2011 09 26 42 2.50 "));
    }

    #[test]
    fn test_meteo_partial_day_is_an_error() {
        let mut values = vec![Some(1.0); 24];
        values.extend(vec![Some(2.0); 5]);
        let series = hourly(at(25, 0), &values);
        let results: Vec<Result<String>> = meteo_lines(&series, "889").collect();
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(ForcingError::PartialDay { hours: 5, .. })
        ));
    }

    #[test]
    fn test_meteo_day_not_starting_at_midnight() {
        let series = hourly(at(25, 1), &[Some(1.0); 24]);
        let first = meteo_lines(&series, "889").next().unwrap();
        assert!(matches!(first, Err(ForcingError::PartialDay { .. })));
    }

    #[test]
    fn test_missing_value_is_an_error() {
        let mut values = vec![Some(1.0); 24];
        values[7] = None;
        let series = hourly(at(25, 0), &values);
        let first = meteo_lines(&series, "889").next().unwrap();
        assert!(matches!(first, Err(ForcingError::UnpatchedValue { .. })));

        let river = Series::from_samples(
            "major river",
            vec![Sample::missing(NaiveDate::from_ymd_opt(2011, 9, 27).unwrap())],
        );
        assert!(river_lines(&river).next().unwrap().is_err());

        let wind = Series::from_samples("wind", vec![Sample::new(at(25, 9), [Some(1.0), None])]);
        assert!(matches!(
            wind_lines(&wind).next().unwrap(),
            Err(ForcingError::UnpatchedValue { .. })
        ));
    }

    #[test]
    fn test_lines_are_lazy() {
        let series = hourly(at(25, 0), &[Some(1.0), None]);
        let mut lines = river_lines(&series);
        assert!(lines.next().unwrap().is_ok());
        assert!(lines.next().unwrap().is_err());
        assert!(lines.next().is_none());
    }
}
