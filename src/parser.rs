//! NAVTEX bulletin parser
//!
//! Turns the text of one bulletin into a [`ParsedMessage`]:
//!
//! ```text
//! raw text ─► block locator ─► header parser (ZCZC line)
//!                          └─► timestamp extractor (body lines)
//!                          └─► coordinate extractor (body text)
//! ```
//!
//! Parsing is pure: no I/O and no shared state.

pub mod block;
pub mod coordinates;
pub mod header;
pub mod timestamp;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::{errors::ParseError, models::ParsedMessage};

pub use block::{locate_block, MessageBlock};
pub use coordinates::extract_coordinates;
pub use header::{parse_header, Header};
pub use timestamp::extract_timestamp;

/// Parse one bulletin, taking the current UTC year for its date-time group
pub fn parse_message(raw: &str) -> Result<ParsedMessage, ParseError> {
    parse_message_at(raw, Utc::now())
}

/// Parse one bulletin relative to `reference`, which supplies the year.
///
/// Fails only when the block or header cannot be found. A body without a
/// date-time group or without positions still yields a message.
pub fn parse_message_at(
    raw: &str,
    reference: DateTime<Utc>,
) -> Result<ParsedMessage, ParseError> {
    let raw_text = raw.trim();
    let lines: Vec<&str> = raw_text.lines().collect();

    let block = locate_block(&lines)?;
    debug!(
        "Found message block at lines {}..={}:\n{}",
        block.start, block.end, block.text
    );

    let header = parse_header(lines[block.start])?;

    let body_lines = &lines[block.start + 1..block.end];
    let message_text = body_lines.join("\n").trim().to_string();
    let timestamp_utc = extract_timestamp(body_lines, &reference);
    let coordinates = extract_coordinates(&message_text);

    Ok(ParsedMessage {
        station_id: header.station_id,
        subject_id: header.subject_id,
        serial_number: header.serial_number,
        timestamp_utc,
        message_text,
        raw_text: raw_text.to_string(),
        coordinates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GeometryType;
    use chrono::{Datelike, TimeZone};

    const GALE_WARNING: &str = "
        ZCZC GB08
        161030 UTC OCT
        GALE WARNING
        ISSUED 16 OCT 1030 UTC
        FORTIES 5700.00N 00200.00E
        NNNN
    ";

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 17, 0, 0, 0).unwrap()
    }

    #[test]
    fn parse_with_line_geometry() {
        let raw = "Received 12:00\n\
                   ZCZC AB12\n\
                   NAVIGATIONAL WARNING 01 JAN 1200 UTC\n\
                   CABLE OPERATIONS BETWEEN 55-12.34N 003-30.12W\n\
                   AND 56-00.00N 002-00.00W\n\
                   NNNN\n";
        let message = parse_message_at(raw, reference()).unwrap();

        assert_eq!(message.station_id.value(), 'A');
        assert_eq!(message.subject_id.value(), 'B');
        assert_eq!(message.serial_number, 12);
        assert_eq!(
            message.timestamp_utc,
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap())
        );
        assert_eq!(message.coordinates.len(), 2);
        assert!(message.message_text.starts_with("NAVIGATIONAL WARNING"));
        assert!(message.message_text.ends_with("002-00.00W"));
        assert_eq!(message.raw_text, raw.trim());

        let geometry = message.geometry().unwrap();
        assert_eq!(geometry.geometry_type(), GeometryType::LineString);
        assert_eq!(geometry.coordinates(), message.coordinates.as_slice());
    }

    #[test]
    fn parse_indented_bulletin() {
        let message = parse_message_at(GALE_WARNING, reference()).unwrap();
        assert_eq!(message.identifier(), "GB08");
        assert!(message.raw_text.starts_with("ZCZC GB08"));
        assert!(message.raw_text.ends_with("NNNN"));
        assert_eq!(
            message.timestamp_utc,
            Some(Utc.with_ymd_and_hms(2024, 10, 16, 10, 30, 0).unwrap())
        );
        assert_eq!(
            message.geometry().unwrap().geometry_type(),
            GeometryType::Point
        );

        // Leading whitespace on an inner start line defeats the prefix match
        let raw = format!("HEADER\n{GALE_WARNING}");
        assert_eq!(
            parse_message_at(&raw, reference()),
            Err(ParseError::NoMessageBlock)
        );
    }

    #[test]
    fn message_text_excludes_sentinels() {
        let raw = "ZCZC KA01\n\n  BODY LINE  \n\nNNNN";
        let message = parse_message_at(raw, reference()).unwrap();
        assert_eq!(message.message_text, "BODY LINE");
        assert_eq!(message.timestamp_utc, None);
        assert!(message.coordinates.is_empty());
        assert!(message.geometry().is_none());
    }

    #[test]
    fn empty_body() {
        let message = parse_message_at("ZCZC KA01\nNNNN", reference()).unwrap();
        assert_eq!(message.message_text, "");
    }

    #[test]
    fn polygon_area() {
        let raw = "ZCZC OA55\n\
                   FIRING EXERCISE IN AREA BOUNDED BY\n\
                   50-00.0N 001-00.0W\n\
                   50-00.0N 000-30.0W\n\
                   49-30.0N 000-30.0W\n\
                   NNNN";
        let message = parse_message_at(raw, reference()).unwrap();
        assert_eq!(message.coordinates.len(), 3);

        let geometry = message.geometry().unwrap();
        assert_eq!(geometry.geometry_type(), GeometryType::Polygon);
        assert_eq!(geometry.coordinates().len(), 4);
        assert_eq!(message.coordinates.len(), 3);
    }

    #[test]
    fn missing_sentinels() {
        assert_eq!(
            parse_message_at("GALE WARNING\nNNNN", reference()),
            Err(ParseError::NoMessageBlock)
        );
        assert_eq!(
            parse_message_at("ZCZC GB08\nGALE WARNING", reference()),
            Err(ParseError::NoMessageBlock)
        );
        assert_eq!(parse_message_at("", reference()), Err(ParseError::NoMessageBlock));
    }

    #[test]
    fn malformed_header() {
        assert_eq!(
            parse_message_at("ZCZC 1B08\nBODY\nNNNN", reference()),
            Err(ParseError::HeaderMismatch("ZCZC 1B08".to_string()))
        );
    }

    #[test]
    fn current_year_by_default() {
        let message = parse_message("ZCZC GE01\n05 MAY 0600 UTC\nNNNN").unwrap();
        assert_eq!(message.timestamp_utc.unwrap().year(), Utc::now().year());
    }
}
