//! Data models.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::NavtexError;
use crate::geometry::Geometry;
use serde_helpers::*;

/// Check that a code is exactly one uppercase ASCII letter
fn validate_code(value: char) -> Result<char, NavtexError> {
    if value.is_ascii_uppercase() {
        Ok(value)
    } else {
        Err(NavtexError::InvalidCode(value.to_string()))
    }
}

fn single_char(value: &str) -> Result<char, NavtexError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(NavtexError::InvalidCode(value.to_string())),
    }
}

/// Transmitting station identity (B1 character)
///
/// NAVTEX stations are assigned a single letter A-Z within each NAVAREA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StationId(char);

impl TryFrom<char> for StationId {
    type Error = NavtexError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        validate_code(value).map(Self)
    }
}

impl TryFrom<&str> for StationId {
    type Error = NavtexError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_from(single_char(value)?)
    }
}

impl StationId {
    pub fn value(&self) -> char {
        self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message category (B2 character)
///
/// - A = navigational warnings
/// - B = meteorological warnings
/// - D = search and rescue information
/// - E = weather forecasts
/// - L = navigational warnings, additional to A
///
/// Only the syntactic role is enforced here, not the assignment table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SubjectId(char);

impl TryFrom<char> for SubjectId {
    type Error = NavtexError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        validate_code(value).map(Self)
    }
}

impl TryFrom<&str> for SubjectId {
    type Error = NavtexError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_from(single_char(value)?)
    }
}

impl SubjectId {
    pub fn value(&self) -> char {
        self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Geographic position in WGS84 decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    /// Longitude, negative west of Greenwich
    pub lon: f64,
    /// Latitude, negative south of the equator
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

/// A NAVTEX bulletin parsed into structured fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedMessage {
    pub station_id: StationId,
    pub subject_id: SubjectId,
    /// Serial number from the two-digit B3B4 field
    pub serial_number: u32,
    /// Date-time group from the body; the year is not broadcast and is
    /// taken from the parse time.
    pub timestamp_utc: Option<DateTime<Utc>>,
    /// Body between the sentinel lines, trimmed
    pub message_text: String,
    /// Whole bulletin as received, trimmed
    pub raw_text: String,
    /// Positions in order of appearance in the body
    pub coordinates: Vec<Coordinate>,
}

impl ParsedMessage {
    /// Geometry derived from the coordinates, None if there are none
    pub fn geometry(&self) -> Option<Geometry> {
        Geometry::from_coordinates(&self.coordinates)
    }

    /// Message identifier as broadcast, e.g. `GB08`
    pub fn identifier(&self) -> String {
        format!(
            "{}{}{:02}",
            self.station_id, self.subject_id, self.serial_number
        )
    }
}

/// Structured fields as returned by a language model extractor
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExtractedMessage {
    pub station_id: String,
    pub subject_id: String,
    pub serial_number: u32,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp_utc: Option<DateTime<Utc>>,
    pub message_text: String,
    #[serde(deserialize_with = "deserialize_coordinates")]
    pub coordinates: Vec<Coordinate>,
}

impl ExtractedMessage {
    /// Validate codes and build a message carrying the original raw text
    pub fn into_parsed(self, raw_text: &str) -> Result<ParsedMessage, NavtexError> {
        if i32::try_from(self.serial_number).is_err() {
            return Err(NavtexError::InvalidSerialNumber(self.serial_number));
        }
        Ok(ParsedMessage {
            station_id: StationId::try_from(self.station_id.as_str())?,
            subject_id: SubjectId::try_from(self.subject_id.as_str())?,
            serial_number: self.serial_number,
            timestamp_utc: self.timestamp_utc,
            message_text: self.message_text.trim().to_string(),
            raw_text: raw_text.trim().to_string(),
            coordinates: self.coordinates,
        })
    }
}

/// Custom deserializers
mod serde_helpers {
    use super::Coordinate;
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{self, de::Error, Deserialize, Deserializer};

    /// RFC 3339 timestamp, or a naive ISO-8601 one which is taken as UTC
    pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(value) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        if let Ok(dt) = DateTime::parse_from_rfc3339(&value) {
            return Ok(Some(dt.with_timezone(&Utc)));
        }
        NaiveDateTime::parse_from_str(&value, "%Y-%m-%dT%H:%M:%S")
            .map(|naive| Some(naive.and_utc()))
            .map_err(|_| D::Error::custom(format!("invalid timestamp: {value}")))
    }

    /// Array of `[lon, lat]` pairs
    pub fn deserialize_coordinates<'de, D>(deserializer: D) -> Result<Vec<Coordinate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let pairs = Vec::<[f64; 2]>::deserialize(deserializer)?;
        Ok(pairs.into_iter().map(Coordinate::from).collect())
    }
}
