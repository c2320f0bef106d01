//! Date-time group extraction from the bulletin body

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

// e.g. "16 OCT 1030 UTC", matched against the upper-cased line
static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{1,2})\s+([A-Z]{3,9})\s+([0-9]{4})\s+UTC").unwrap()
});

const MONTH_NAMES: [&str; 12] = [
    "JANUARY",
    "FEBRUARY",
    "MARCH",
    "APRIL",
    "MAY",
    "JUNE",
    "JULY",
    "AUGUST",
    "SEPTEMBER",
    "OCTOBER",
    "NOVEMBER",
    "DECEMBER",
];

/// Month number for a full or three-letter English month name (upper case)
fn month_number(name: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .position(|month| *month == name || month[..3] == *name)
        .map(|index| index as u32 + 1)
}

/// Resolve day, month name and `HHMM` into a timestamp in the reference year
fn resolve(day: &str, month: &str, hour_minute: &str, year: i32) -> Option<DateTime<Utc>> {
    let day = day.parse::<u32>().ok()?;
    let month = month_number(month)?;
    let hour_minute = hour_minute.parse::<u32>().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::from_hms_opt(hour_minute / 100, hour_minute % 100, 0)?;
    Some(date.and_time(time).and_utc())
}

/// Find the first resolvable date-time group in the body lines.
///
/// Each line contributes at most one candidate, its first structural match.
/// Candidates with an unknown month or an impossible date or time are
/// skipped and the scan continues with the next line. Bulletins carry no
/// year; the year of `reference` is used.
pub fn extract_timestamp(lines: &[&str], reference: &DateTime<Utc>) -> Option<DateTime<Utc>> {
    lines.iter().find_map(|line| {
        let upper = line.to_uppercase();
        let caps = DATE_PATTERN.captures(&upper)?;
        let resolved = resolve(&caps[1], &caps[2], &caps[3], reference.year());
        if resolved.is_none() {
            debug!("Discarding unresolvable date-time group: {}", &caps[0]);
        }
        resolved
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn abbreviated_month() {
        let ts = extract_timestamp(&["WEATHER 16 OCT 1030 UTC"], &reference()).unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 10, 16, 10, 30, 0).unwrap());
    }

    #[test]
    fn full_month_lower_case() {
        let ts = extract_timestamp(&["issued 3 september 0005 utc"], &reference()).unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 9, 3, 0, 5, 0).unwrap());
    }

    #[test]
    fn year_follows_reference() {
        let reference = Utc.with_ymd_and_hms(2031, 1, 1, 0, 0, 0).unwrap();
        let ts = extract_timestamp(&["01 JAN 1200 UTC"], &reference).unwrap();
        assert_eq!(ts.year(), 2031);
        assert_eq!(ts.hour(), 12);
    }

    #[test]
    fn first_valid_line_wins() {
        let lines = ["01 FEB 0100 UTC", "02 MAR 0200 UTC"];
        let ts = extract_timestamp(&lines, &reference()).unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 2, 1, 1, 0, 0).unwrap());
    }

    #[test]
    fn invalid_month_is_skipped() {
        let lines = ["NAVAREA", "12 XYZ 1200 UTC", "14 NOV 2359 UTC"];
        let ts = extract_timestamp(&lines, &reference()).unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 11, 14, 23, 59, 0).unwrap());
    }

    #[test]
    fn invalid_time_is_skipped() {
        let lines = ["12 DEC 2460 UTC", "12 DEC 1261 UTC", "12 DEC 0000 UTC"];
        let ts = extract_timestamp(&lines, &reference()).unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 12, 12, 0, 0, 0).unwrap());
    }

    #[test]
    fn impossible_date_is_skipped() {
        let lines = ["31 APR 1200 UTC", "30 APR 1200 UTC"];
        let ts = extract_timestamp(&lines, &reference()).unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 4, 30, 12, 0, 0).unwrap());
    }

    #[test]
    fn no_date_group() {
        let lines = ["GALE WARNING", "NORTH UTSIRE", "161030 UTC OCT"];
        assert_eq!(extract_timestamp(&lines, &reference()), None);
        assert_eq!(extract_timestamp(&[], &reference()), None);
    }

    #[test]
    fn month_lookup() {
        assert_eq!(month_number("JAN"), Some(1));
        assert_eq!(month_number("MAY"), Some(5));
        assert_eq!(month_number("SEPTEMBER"), Some(9));
        assert_eq!(month_number("SEPT"), None);
        assert_eq!(month_number("DECEMBERS"), None);
    }
}
