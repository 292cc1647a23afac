//! Shared utility functions for CSG crates.

/// Date utility functions
pub mod dates {
    use crate::error::DateError;
    use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

    /// Date-time formats a CoCoRaHS report may use for `ObservationDate`.
    /// `%.f` also matches a missing fraction.
    pub const DATE_TIME_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%m/%d/%Y %I:%M %p",
    ];

    /// Date-only formats, interpreted at midnight.
    pub const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y%m%d"];

    /// Format a NaiveDateTime as "YYYY-MM-DDTHH:MM:SS"
    pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
        timestamp.format("%Y-%m-%dT%H:%M:%S").to_string()
    }

    /// Parse an observation date in any of the accepted report formats.
    ///
    /// Surrounding whitespace is ignored. Date-only values map to midnight.
    /// Zoned RFC 3339 values (`Z` or `+hh:mm`) keep their local wall-clock time.
    pub fn parse_observation_date(s: &str) -> Result<NaiveDateTime, DateError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DateError(String::from("empty date")));
        }
        for format in DATE_TIME_FORMATS {
            if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(timestamp);
            }
        }
        if let Ok(zoned) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(zoned.naive_local());
        }
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return Ok(date.and_time(NaiveTime::MIN));
            }
        }
        Err(DateError(format!("unrecognized date '{}'", trimmed)))
    }

    /// Seconds elapsed since the first timestamp, for each timestamp.
    ///
    /// Produces a monotonic real axis when the input is sorted.
    pub fn elapsed_seconds(timestamps: &[NaiveDateTime]) -> Vec<f64> {
        let Some(origin) = timestamps.first() else {
            return Vec::new();
        };
        timestamps
            .iter()
            .map(|t| {
                let delta = *t - *origin;
                delta.num_milliseconds() as f64 / 1000.0
            })
            .collect()
    }

    /// `count` evenly spaced values over `[start, stop]`, both ends included.
    pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let step = (stop - start) / (count - 1) as f64;
                let mut values: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
                // Pin the end point so rounding never overshoots the range
                values[count - 1] = stop;
                values
            }
        }
    }

    /// `count` evenly spaced timestamps from `first` to `last` inclusive,
    /// at millisecond resolution.
    pub fn evenly_spaced_timestamps(
        first: NaiveDateTime,
        last: NaiveDateTime,
        count: usize,
    ) -> Vec<NaiveDateTime> {
        if count == 0 {
            return Vec::new();
        }
        let span_ms = (last - first).num_milliseconds() as f64;
        let mut result: Vec<NaiveDateTime> = linspace(0.0, span_ms, count)
            .into_iter()
            .map(|offset| first + TimeDelta::milliseconds(offset.round() as i64))
            .collect();
        if count > 1 {
            result[count - 1] = last;
        }
        result
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        }

        #[test]
        fn test_parse_observation_date_formats() {
            let expected = midnight(2023, 1, 15);
            assert_eq!(parse_observation_date("2023-01-15").unwrap(), expected);
            assert_eq!(parse_observation_date(" 01/15/2023 ").unwrap(), expected);
            assert_eq!(parse_observation_date("20230115").unwrap(), expected);
            assert_eq!(
                parse_observation_date("2023-01-15T00:00:00").unwrap(),
                expected
            );
            let seven_am = NaiveDate::from_ymd_opt(2023, 1, 15)
                .unwrap()
                .and_hms_opt(7, 0, 0)
                .unwrap();
            assert_eq!(
                parse_observation_date("01/15/2023 07:00 AM").unwrap(),
                seven_am
            );
            assert_eq!(parse_observation_date("2023-01-15 07:00").unwrap(), seven_am);
        }

        #[test]
        fn test_parse_observation_date_iso_variants() {
            let seven_am = NaiveDate::from_ymd_opt(2023, 1, 1)
                .unwrap()
                .and_hms_opt(7, 0, 0)
                .unwrap();
            assert_eq!(
                parse_observation_date("2023-01-01T07:00:00.000").unwrap(),
                seven_am
            );
            assert_eq!(
                parse_observation_date("2023-01-01T07:00:00Z").unwrap(),
                seven_am
            );
            assert_eq!(
                parse_observation_date("2023-01-01T07:00:00-07:00").unwrap(),
                seven_am
            );
            assert_eq!(
                parse_observation_date("2023-01-01T07:00:00.250+02:00").unwrap(),
                seven_am + TimeDelta::milliseconds(250)
            );
            assert_eq!(
                parse_observation_date("2023-01-01 07:00:00.5").unwrap(),
                seven_am + TimeDelta::milliseconds(500)
            );
        }

        #[test]
        fn test_parse_observation_date_rejects_garbage() {
            assert!(parse_observation_date("").is_err());
            assert!(parse_observation_date("yesterday").is_err());
            assert!(parse_observation_date("2023-02-30").is_err());
        }

        #[test]
        fn test_elapsed_seconds() {
            let stamps = vec![midnight(2023, 1, 1), midnight(2023, 1, 2), midnight(2023, 1, 4)];
            assert_eq!(elapsed_seconds(&stamps), vec![0.0, 86_400.0, 259_200.0]);
            assert!(elapsed_seconds(&[]).is_empty());
        }

        #[test]
        fn test_linspace() {
            assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
            assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
            assert!(linspace(0.0, 1.0, 0).is_empty());
            let values = linspace(0.0, 0.3, 300);
            assert_eq!(values.len(), 300);
            assert_eq!(values[299], 0.3);
        }

        #[test]
        fn test_evenly_spaced_timestamps() {
            let first = midnight(2023, 1, 1);
            let last = midnight(2023, 1, 5);
            let stamps = evenly_spaced_timestamps(first, last, 9);
            assert_eq!(stamps.len(), 9);
            assert_eq!(stamps[0], first);
            assert_eq!(stamps[8], last);
            assert_eq!(stamps[1] - stamps[0], TimeDelta::hours(12));
            assert_eq!(stamps[5] - stamps[4], TimeDelta::hours(12));
        }

        #[test]
        fn test_format_timestamp() {
            let stamp = midnight(2023, 6, 15);
            assert_eq!(format_timestamp(&stamp), "2023-06-15T00:00:00");
        }
    }
}

/// Error types
pub mod error {
    use std::fmt;

    #[derive(Debug, Clone, PartialEq)]
    pub struct DateError(pub String);

    impl fmt::Display for DateError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Date error: {}", self.0)
        }
    }

    impl std::error::Error for DateError {}
}
