//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Parse a front-matter date string in the formats authors actually write
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    // RFC 3339 / ISO 8601 with offset, normalized to UTC
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// Format a date the way en-US long dates read ("January 1, 2024")
pub fn long_date(date: &NaiveDateTime) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Format a date in W3C datetime form for sitemaps and feeds
pub fn date_xml<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

/// Interpret a naive front-matter date as UTC
pub fn as_utc(date: &NaiveDateTime) -> DateTime<Utc> {
    Utc.from_utc_datetime(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_only() {
        let dt = parse_date_string("2024-01-15").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-01-15 00:00");
    }

    #[test]
    fn test_parse_datetime_and_rfc3339() {
        let dt = parse_date_string("2024/01/15 10:30").unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "10:30");

        let dt = parse_date_string("2024-01-15T10:30:00+02:00").unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "08:30");
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_date_string("last tuesday").is_none());
        assert!(parse_date_string("").is_none());
    }

    #[test]
    fn test_long_date() {
        let dt = parse_date_string("2024-01-01").unwrap();
        assert_eq!(long_date(&dt), "January 1, 2024");
        let dt = parse_date_string("2023-11-23").unwrap();
        assert_eq!(long_date(&dt), "November 23, 2023");
    }

    #[test]
    fn test_date_xml() {
        let dt = as_utc(&parse_date_string("2024-03-05 07:08:09").unwrap());
        assert_eq!(date_xml(&dt), "2024-03-05T07:08:09+00:00");
    }
}
