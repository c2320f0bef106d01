//! Degree-minute positions in free text

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Coordinate;

// Latitude then longitude, e.g. "55-12.34N 003-30.12W", "55°12.34N 003°30.12W"
// or "5512.34N 00330.12W"
static COORDINATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"([0-9]{2,3})[-°]?([0-9]{2,3}\.[0-9]+)([NS])\s+([0-9]{2,3})[-°]?([0-9]{2,3}\.[0-9]+)([EW])",
    )
    .unwrap()
});

fn decimal_degrees(degrees: &str, minutes: &str, negative: bool) -> Option<f64> {
    let value = degrees.parse::<f64>().ok()? + minutes.parse::<f64>().ok()? / 60.0;
    Some(if negative { -value } else { value })
}

/// Extract all positions in order of appearance, as `(lon, lat)`.
///
/// Repeated positions are kept.
pub fn extract_coordinates(text: &str) -> Vec<Coordinate> {
    COORDINATE_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            let lat = decimal_degrees(&caps[1], &caps[2], &caps[3] == "S")?;
            let lon = decimal_degrees(&caps[4], &caps[5], &caps[6] == "W")?;
            Some(Coordinate::new(lon, lat))
        })
        .collect()
}
