//! Parsing of date/time arguments.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// A parsed `--start`/`--end`/`--to` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum When {
    /// A full instant
    At(DateTime<Utc>),
    /// A calendar day with no time given
    Day(NaiveDate),
}

impl When {
    /// The instant, using midnight for a bare day.
    pub fn to_utc(self) -> DateTime<Utc> {
        match self {
            When::At(dt) => dt,
            When::Day(d) => d.and_time(NaiveTime::MIN).and_utc(),
        }
    }
}

/// Parse RFC 3339, `YYYY-MM-DDTHH:MM[:SS]` (UTC) or `YYYY-MM-DD`.
pub fn parse_when(input: &str) -> Result<When> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(When::At(dt.with_timezone(&Utc)));
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(When::At(dt.and_utc()));
        }
    }

    if let Ok(d) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(When::Day(d));
    }

    anyhow::bail!(
        "Could not parse date/time: \"{}\". Expected YYYY-MM-DD, YYYY-MM-DDTHH:MM or RFC 3339",
        input
    )
}

pub fn parse_datetime(input: &str) -> Result<DateTime<Utc>> {
    parse_when(input).map(When::to_utc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339_converts_to_utc() {
        assert_eq!(
            parse_datetime("2024-01-01T09:00:00+02:00").unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 7, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_local_style_datetime() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        assert_eq!(parse_when("2024-01-01T09:00").unwrap(), When::At(expected));
        assert_eq!(parse_when("2024-01-01 09:00:00").unwrap(), When::At(expected));
    }

    #[test]
    fn test_parse_bare_day() {
        let when = parse_when("2024-02-29").unwrap();
        assert_eq!(when, When::Day(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
        assert_eq!(when.to_utc(), Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_when("next tuesday").is_err());
        assert!(parse_when("2023-02-29").is_err());
    }
}
