//! Day-first timestamp parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date-with-time layouts, day-first before ISO.
///
/// Two-digit-year layouts come first: `%Y` would otherwise read `75` as the
/// year 75.
const DATETIME_FORMATS: [&str; 18] = [
    "%d.%m.%y %H:%M:%S%.f",
    "%d.%m.%y %H:%M",
    "%d.%m.%Y %H:%M:%S%.f",
    "%d.%m.%Y %H:%M",
    "%d/%m/%y %H:%M:%S%.f",
    "%d/%m/%y %H:%M",
    "%d/%m/%Y %H:%M:%S%.f",
    "%d/%m/%Y %H:%M",
    "%d-%m-%y %H:%M:%S%.f",
    "%d-%m-%y %H:%M",
    "%d-%m-%Y %H:%M:%S%.f",
    "%d-%m-%Y %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
];

/// Date-only layouts; these resolve to midnight.
const DATE_FORMATS: [&str; 8] = [
    "%d.%m.%y", "%d.%m.%Y", "%d/%m/%y", "%d/%m/%Y", "%d-%m-%y", "%d-%m-%Y", "%Y-%m-%d",
    "%Y/%m/%d",
];

/// Parse a date cell, returning `None` when no calendar date can be read.
///
/// Numeric dates are day-first: `02.01.1975` is 2 January 1975. Timestamps
/// carrying a UTC offset keep their wall-clock time and drop the offset.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let text = normalize_whitespace(raw);
    if text.is_empty() {
        return None;
    }

    if let Some(parsed) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&text, format).ok())
    {
        return Some(parsed);
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&text, format).ok())
    {
        return date.and_hms_opt(0, 0, 0);
    }

    DateTime::parse_from_rfc3339(&text)
        .ok()
        .map(|dt| dt.naive_local())
}

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_day_first_date() {
        assert_eq!(parse_date("02.01.1975"), Some(at(1975, 1, 2, 0, 0, 0)));
    }

    #[test]
    fn test_date_with_time() {
        assert_eq!(
            parse_date("31.12.2020 23:59"),
            Some(at(2020, 12, 31, 23, 59, 0))
        );
        assert_eq!(
            parse_date("31.12.2020 23:59:30"),
            Some(at(2020, 12, 31, 23, 59, 30))
        );
    }

    #[test]
    fn test_two_digit_year() {
        assert_eq!(parse_date("02.01.75"), Some(at(1975, 1, 2, 0, 0, 0)));
        assert_eq!(parse_date("02.01.05"), Some(at(2005, 1, 2, 0, 0, 0)));
        assert_eq!(parse_date("02/01/75"), Some(at(1975, 1, 2, 0, 0, 0)));
        assert_eq!(parse_date("02-01-75"), Some(at(1975, 1, 2, 0, 0, 0)));
        assert_eq!(
            parse_date("02-01-75 06:30"),
            Some(at(1975, 1, 2, 6, 30, 0))
        );
    }

    #[test]
    fn test_day_first_fractional_seconds() {
        let expected = NaiveDate::from_ymd_opt(2020, 12, 31)
            .unwrap()
            .and_hms_milli_opt(23, 59, 30, 500)
            .unwrap();
        assert_eq!(parse_date("31.12.2020 23:59:30.5"), Some(expected));
        assert_eq!(parse_date("31-12-2020 23:59:30.5"), Some(expected));
        assert_eq!(
            parse_date("31.12.2020 23:59:30"),
            Some(at(2020, 12, 31, 23, 59, 30))
        );
    }

    #[test]
    fn test_slash_and_dash_are_day_first() {
        assert_eq!(parse_date("02/01/1975"), Some(at(1975, 1, 2, 0, 0, 0)));
        assert_eq!(parse_date("02-01-1975"), Some(at(1975, 1, 2, 0, 0, 0)));
    }

    #[test]
    fn test_iso_forms() {
        assert_eq!(parse_date("1975-01-02"), Some(at(1975, 1, 2, 0, 0, 0)));
        assert_eq!(
            parse_date("1975-01-02T06:30:00"),
            Some(at(1975, 1, 2, 6, 30, 0))
        );
        assert_eq!(
            parse_date("1975-01-02 06:30"),
            Some(at(1975, 1, 2, 6, 30, 0))
        );
    }

    #[test]
    fn test_offset_is_dropped() {
        assert_eq!(
            parse_date("2020-12-31T23:59:00+01:00"),
            Some(at(2020, 12, 31, 23, 59, 0))
        );
    }

    #[test]
    fn test_extra_whitespace() {
        assert_eq!(
            parse_date("  31.12.2020   23:59 "),
            Some(at(2020, 12, 31, 23, 59, 0))
        );
    }

    #[test]
    fn test_invalid_dates() {
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("invalid"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("31.02.2020"), None);
        assert_eq!(parse_date("12,5"), None);
    }
}
