//! Parsing the `ZCZC B1B2B3B4` identifier line

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ParseError;
use crate::models::{StationId, SubjectId};

static HEADER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ZCZC\s+([A-Z])([A-Z])([0-9]{2})").unwrap());

/// Message identity from the start line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub station_id: StationId,
    pub subject_id: SubjectId,
    pub serial_number: u32,
}

/// Recover station, subject and serial from the start line.
///
/// Content after the two serial digits is ignored.
pub fn parse_header(line: &str) -> Result<Header, ParseError> {
    let mismatch = || ParseError::HeaderMismatch(line.to_string());
    let caps = HEADER_PATTERN.captures(line).ok_or_else(mismatch)?;

    let station_id = StationId::try_from(&caps[1]).map_err(|_| mismatch())?;
    let subject_id = SubjectId::try_from(&caps[2]).map_err(|_| mismatch())?;
    let serial_number = caps[3].parse::<u32>().map_err(|_| mismatch())?;

    Ok(Header {
        station_id,
        subject_id,
        serial_number,
    })
}
