use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

// `%y` must come before `%Y`: chrono's `%Y` takes any digit count, so "9/25/21"
// would otherwise land in year 21.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Shortest year an export can carry in a `%Y` field
const MIN_YEAR: i32 = 1000;

/// Lenient parse of an export date cell. "Unknown", blanks and anything
/// unrecognised yield None.
pub fn parse_export_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    let parsed = DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        });

    parsed.filter(|date| date.year() >= MIN_YEAR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_parse_export_date_formats() {
        assert_eq!(parse_export_date("2021-09-25"), ymd(2021, 9, 25));
        assert_eq!(parse_export_date("2021-09-25 14:03:00"), ymd(2021, 9, 25));
        assert_eq!(parse_export_date("2021-09-25T14:03:00"), ymd(2021, 9, 25));
        assert_eq!(parse_export_date("2021-09-25T14:03:00+02:00"), ymd(2021, 9, 25));
        assert_eq!(parse_export_date("09/25/2021"), ymd(2021, 9, 25));
        assert_eq!(parse_export_date("September 25, 2021"), ymd(2021, 9, 25));
        assert_eq!(parse_export_date(" August 4, 2017"), ymd(2017, 8, 4));
        assert_eq!(parse_export_date("Sep 25, 2021"), ymd(2021, 9, 25));
    }

    #[test]
    fn test_parse_export_date_two_digit_years() {
        assert_eq!(parse_export_date("9/25/21"), ymd(2021, 9, 25));
        assert_eq!(parse_export_date("12/1/19"), ymd(2019, 12, 1));
        assert_eq!(parse_export_date("9/25/2021"), ymd(2021, 9, 25));
        assert_eq!(parse_export_date("0021-09-25"), None);
        assert_eq!(parse_export_date("9/25/0021"), None);
    }

    #[test]
    fn test_parse_export_date_fractional_seconds() {
        assert_eq!(parse_export_date("2021-09-25 14:03:00.123"), ymd(2021, 9, 25));
        assert_eq!(parse_export_date("2021-09-25T14:03:00.5"), ymd(2021, 9, 25));
    }

    #[test]
    fn test_parse_export_date_rejects_garbage() {
        assert_eq!(parse_export_date("Unknown"), None);
        assert_eq!(parse_export_date(""), None);
        assert_eq!(parse_export_date("   "), None);
        assert_eq!(parse_export_date("2021-13-40"), None);
        assert_eq!(parse_export_date("yesterday"), None);
    }
}
