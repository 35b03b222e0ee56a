//! Readers for written forcing files, the inverse of the line formatters.

use chrono::{NaiveDate, NaiveDateTime};
use forcing_types::{quantity::HOURS_PER_DAY, Family, ForcingError, Result, Timestamp};
use std::str::{FromStr, SplitWhitespace};

use super::METEO_QUANTITY_MARKER;

#[derive(Debug, Clone, PartialEq)]
pub struct RiverRecord {
    pub date: NaiveDate,
    pub flow: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindRecord {
    pub timestamp: NaiveDateTime,
    pub u: f64,
    pub v: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeteoRecord {
    pub station_id: String,
    pub date: NaiveDate,
    pub values: Vec<f64>,
}

struct Fields<'a> {
    line: &'a str,
    tokens: SplitWhitespace<'a>,
}

impl<'a> Fields<'a> {
    fn new(line: &'a str) -> Self {
        Fields {
            line,
            tokens: line.split_whitespace(),
        }
    }

    fn error(&self, reason: impl Into<String>) -> ForcingError {
        ForcingError::MalformedLine {
            line: self.line.trim_end().to_string(),
            reason: reason.into(),
        }
    }

    fn token(&mut self, name: &str) -> Result<&'a str> {
        self.tokens
            .next()
            .ok_or_else(|| self.error(format!("missing {}", name)))
    }

    fn number<T: FromStr>(&mut self, name: &str) -> Result<T> {
        let token = self.token(name)?;
        token
            .parse::<T>()
            .map_err(|_| self.error(format!("{} {:?} is not a number", name, token)))
    }

    fn date(&self, year: i32, month: u32, day: u32) -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| self.error(format!("{}-{}-{} is not a date", year, month, day)))
    }

    fn finish(mut self) -> Result<()> {
        match self.tokens.next() {
            Some(extra) => Err(self.error(format!("unexpected field {:?}", extra))),
            None => Ok(()),
        }
    }
}

/// Parse `YYYY MM DD <flow>`.
pub fn parse_river_line(line: &str) -> Result<RiverRecord> {
    let mut fields = Fields::new(line);
    let year = fields.number("year")?;
    let month = fields.number("month")?;
    let day = fields.number("day")?;
    let date = fields.date(year, month, day)?;
    let flow = fields.number("flow")?;
    fields.finish()?;
    Ok(RiverRecord { date, flow })
}

/// Parse `DD MM YYYY H.H u v`.
pub fn parse_wind_line(line: &str) -> Result<WindRecord> {
    let mut fields = Fields::new(line);
    let day = fields.number("day")?;
    let month = fields.number("month")?;
    let year = fields.number("year")?;
    let date = fields.date(year, month, day)?;
    let hour: f64 = fields.number("hour")?;
    if hour.fract() != 0.0 || !(0.0..24.0).contains(&hour) {
        return Err(fields.error(format!("{} is not an hour of the day", hour)));
    }
    let timestamp = date
        .and_hms_opt(hour as u32, 0, 0)
        .ok_or_else(|| fields.error("invalid hour"))?;
    let u = fields.number("u component")?;
    let v = fields.number("v component")?;
    fields.finish()?;
    Ok(WindRecord { timestamp, u, v })
}

/// Parse `<station> YYYY MM DD 42 v0 .. v23`.
pub fn parse_meteo_line(line: &str) -> Result<MeteoRecord> {
    let mut fields = Fields::new(line);
    let station_id = fields.token("station id")?.to_string();
    let year = fields.number("year")?;
    let month = fields.number("month")?;
    let day = fields.number("day")?;
    let date = fields.date(year, month, day)?;
    let marker: u32 = fields.number("quantity marker")?;
    if marker != METEO_QUANTITY_MARKER {
        return Err(fields.error(format!("quantity marker {} is not {}", marker, METEO_QUANTITY_MARKER)));
    }
    let values = (0..HOURS_PER_DAY)
        .map(|hour| fields.number(&format!("value for hour {}", hour)))
        .collect::<Result<Vec<f64>>>()?;
    fields.finish()?;
    Ok(MeteoRecord {
        station_id,
        date,
        values,
    })
}

/// Timestamp of the record on `line`, parsed with the layout of `family`.
pub fn record_timestamp(family: Family, line: &str) -> Result<Timestamp> {
    Ok(match family {
        Family::River => parse_river_line(line)?.date.into(),
        Family::Wind => parse_wind_line(line)?.timestamp.into(),
        Family::Meteo => parse_meteo_line(line)?.date.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{meteo_lines, river_lines, wind_lines};
    use chrono::TimeDelta;
    use forcing_types::{Sample, Scalar, Series, WindComponents};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_river_line() {
        let record = parse_river_line("2011 09 27 4.200000e+03\n").unwrap();
        assert_eq!(record.date, date(2011, 9, 27));
        assert_eq!(record.flow, 4200.0);
    }

    #[test]
    fn test_parse_wind_line() {
        let record = parse_wind_line("25 09 2011 9.0 1.000000 2.000000\n").unwrap();
        assert_eq!(record.timestamp, date(2011, 9, 25).and_hms_opt(9, 0, 0).unwrap());
        assert_eq!((record.u, record.v), (1.0, 2.0));
    }

    #[test]
    fn test_parse_meteo_line() {
        let line = format!("889 2011 09 25 42{}\n", " 215.00".repeat(24));
        let record = parse_meteo_line(&line).unwrap();
        assert_eq!(record.station_id, "889");
        assert_eq!(record.date, date(2011, 9, 25));
        assert_eq!(record.values, vec![215.0; 24]);
    }

    #[test]
    fn test_malformed_lines() {
        assert!(matches!(
            parse_river_line("2011 09 27"),
            Err(ForcingError::MalformedLine { .. })
        ));
        assert!(parse_river_line("2011 02 30 1.0e+00").is_err());
        assert!(parse_river_line("2011 09 27 4.2e+03 extra").is_err());
        assert!(parse_wind_line("25 09 2011 9.5 1.0 2.0").is_err());
        assert!(parse_wind_line("25 09 2011 24.0 1.0 2.0").is_err());
        let short = format!("889 2011 09 25 42{}", " 1.00".repeat(23));
        assert!(parse_meteo_line(&short).is_err());
        let marker = format!("889 2011 09 25 41{}", " 1.00".repeat(24));
        assert!(parse_meteo_line(&marker).is_err());
    }

    #[test]
    fn test_river_format_then_parse() {
        let series: Series<Scalar> = Series::from_samples(
            "major river",
            vec![
                Sample::new(date(2011, 12, 31), Some(4321.987654)),
                Sample::new(date(2012, 1, 1), Some(0.0421)),
            ],
        );
        for (line, sample) in river_lines(&series).zip(series.iter()) {
            let record = parse_river_line(&line.unwrap()).unwrap();
            let expected = sample.value.unwrap();
            assert_eq!(record.date, sample.timestamp.date());
            // six significand decimals
            assert!((record.flow - expected).abs() <= expected.abs() * 1e-6);
        }
    }

    #[test]
    fn test_wind_format_then_parse() {
        let start = date(2011, 9, 25).and_hms_opt(22, 0, 0).unwrap();
        let values: [WindComponents; 3] = [
            [Some(1.2345678), Some(-2.0)],
            [Some(0.0), Some(0.0)],
            [Some(-10.5), Some(3.1415926)],
        ];
        let series = Series::from_samples(
            "wind",
            values
                .iter()
                .enumerate()
                .map(|(i, v)| Sample::new(start + TimeDelta::hours(i as i64), *v))
                .collect(),
        );
        for (line, sample) in wind_lines(&series).zip(series.iter()) {
            let record = parse_wind_line(&line.unwrap()).unwrap();
            assert_eq!(Timestamp::from(record.timestamp), sample.timestamp);
            let [Some(u), Some(v)] = sample.value else {
                panic!("unpatched test value")
            };
            assert!((record.u - u).abs() <= 5e-7);
            assert!((record.v - v).abs() <= 5e-7);
        }
    }

    #[test]
    fn test_meteo_format_then_parse() {
        let start = date(2011, 9, 25).and_hms_opt(0, 0, 0).unwrap();
        let series: Series<Scalar> = Series::from_samples(
            "relative_humidity",
            (0..48)
                .map(|i| Sample::new(start + TimeDelta::hours(i), Some(60.0 + i as f64 / 3.0)))
                .collect(),
        );
        let records: Vec<MeteoRecord> = meteo_lines(&series, "889")
            .map(|line| parse_meteo_line(&line.unwrap()).unwrap())
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].date, date(2011, 9, 26));
        let parsed = records.iter().flat_map(|r| r.values.iter());
        for (value, sample) in parsed.zip(series.iter()) {
            assert!((value - sample.value.unwrap()).abs() <= 5e-3);
        }
    }

    #[test]
    fn test_record_timestamp() {
        let ts = record_timestamp(Family::Wind, "25 09 2011 13.0 1.0 2.0").unwrap();
        assert_eq!(ts.to_string(), "2011-09-25 13:00:00");
        let ts = record_timestamp(Family::River, "2011 09 27 4.200000e+03").unwrap();
        assert_eq!(ts.to_string(), "2011-09-27");
    }
}
