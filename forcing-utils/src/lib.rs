//! Shared utility functions for the forcing crates.

/// Date utility functions
pub mod dates {
    use chrono::{Local, NaiveDate, NaiveDateTime};

    /// Timestamp layouts accepted in raw observation files, tried in order.
    pub const TIMESTAMP_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")?)
    }

    /// Parse an observation timestamp in any of the [`TIMESTAMP_FORMATS`].
    ///
    /// A bare "YYYY-MM-DD" is accepted as midnight of that day.
    pub fn parse_timestamp(s: &str) -> anyhow::Result<NaiveDateTime> {
        let s = s.trim();
        for format in TIMESTAMP_FORMATS {
            if let Ok(timestamp) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(timestamp);
            }
        }
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| anyhow::anyhow!("unrecognized timestamp: {:?}", s))?;
        date.and_hms_opt(0, 0, 0)
            .ok_or_else(|| anyhow::anyhow!("invalid midnight for {}", date))
    }

    /// The day before `today`, the latest day a near-real-time feed can
    /// have published completely.
    pub fn yesterday_of(today: NaiveDate) -> NaiveDate {
        today.pred_opt().unwrap_or(today)
    }

    /// Default cutoff date for a run: yesterday in local time.
    pub fn default_cutoff() -> NaiveDate {
        yesterday_of(Local::now().naive_local().date())
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::{NaiveDate, Timelike};

        #[test]
        fn test_parse_timestamp_with_seconds() {
            let ts = parse_timestamp("2011-09-27 21:11:00").unwrap();
            assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2011, 9, 27).unwrap());
            assert_eq!(ts.hour(), 21);
            assert_eq!(ts.minute(), 11);
        }

        #[test]
        fn test_parse_timestamp_variants() {
            let expected = parse_timestamp("2011-09-27 21:11:00").unwrap();
            assert_eq!(parse_timestamp("2011-09-27 21:11").unwrap(), expected);
            assert_eq!(parse_timestamp("2011-09-27T21:11:00").unwrap(), expected);
            assert_eq!(parse_timestamp(" 2011-09-27T21:11 ").unwrap(), expected);
        }

        #[test]
        fn test_parse_bare_date_is_midnight() {
            let ts = parse_timestamp("2011-10-24").unwrap();
            assert_eq!(ts.hour(), 0);
            assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2011, 10, 24).unwrap());
        }

        #[test]
        fn test_parse_timestamp_rejects_garbage() {
            assert!(parse_timestamp("yesterday").is_err());
            assert!(parse_timestamp("").is_err());
            assert!(parse_timestamp("2011-13-01 00:00").is_err());
        }

        #[test]
        fn test_yesterday_rolls_over_month_and_year() {
            let jan1 = NaiveDate::from_ymd_opt(2012, 1, 1).unwrap();
            assert_eq!(
                yesterday_of(jan1),
                NaiveDate::from_ymd_opt(2011, 12, 31).unwrap()
            );
            let mar1 = NaiveDate::from_ymd_opt(2012, 3, 1).unwrap();
            assert_eq!(
                yesterday_of(mar1),
                NaiveDate::from_ymd_opt(2012, 2, 29).unwrap()
            );
        }

        #[test]
        fn test_parse_date() {
            let date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
            assert_eq!(parse_date(" 2023-06-15 ").unwrap(), date);
            assert!(parse_date("15/06/2023").is_err());
        }
    }
}

/// Number rendering helpers
pub mod numbers {
    /// Render `value` in scientific notation with `precision` significand
    /// decimals and a signed exponent of at least two digits,
    /// e.g. `4.200000e+03`.
    ///
    /// Rust's `{:e}` writes `4.200000e3`; fixed-format readers expect the
    /// C `printf("%e")` layout instead.
    pub fn format_scientific(value: f64, precision: usize) -> String {
        let formatted = format!("{:.*e}", precision, value);
        match formatted.split_once('e') {
            Some((mantissa, exponent)) => match exponent.parse::<i32>() {
                Ok(exponent) => {
                    let sign = if exponent < 0 { '-' } else { '+' };
                    format!("{}e{}{:02}", mantissa, sign, exponent.abs())
                }
                Err(_) => formatted,
            },
            // inf and NaN have no exponent
            None => formatted,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::format_scientific;

        #[test]
        fn test_positive_exponent() {
            assert_eq!(format_scientific(4200.0, 6), "4.200000e+03");
            assert_eq!(format_scientific(123456.789, 6), "1.234568e+05");
        }

        #[test]
        fn test_negative_and_zero_exponent() {
            assert_eq!(format_scientific(0.00042, 6), "4.200000e-04");
            assert_eq!(format_scientific(5.0, 6), "5.000000e+00");
            assert_eq!(format_scientific(0.0, 6), "0.000000e+00");
        }

        #[test]
        fn test_three_digit_exponent() {
            assert_eq!(format_scientific(1.5e120, 2), "1.50e+120");
        }

        #[test]
        fn test_parses_back() {
            let rendered = format_scientific(4321.5, 6);
            let parsed: f64 = rendered.parse().unwrap();
            assert!((parsed - 4321.5).abs() < 1e-2);
        }
    }
}
