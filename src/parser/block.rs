//! Locating the ZCZC...NNNN block of a bulletin

use crate::errors::ParseError;

/// Start-of-message marker, followed by the B1B2B3B4 identifier
pub const START_SENTINEL: &str = "ZCZC";
/// End-of-message marker, alone on its line
pub const END_SENTINEL: &str = "NNNN";

/// Position of one sentinel-delimited block within the bulletin lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBlock {
    /// Index of the `ZCZC` line
    pub start: usize,
    /// Index of the `NNNN` line, inclusive
    pub end: usize,
    /// Lines `start..=end` joined with newlines
    pub text: String,
}

/// Find the first start line and the first end line at or after it.
///
/// Only one block is located. A bulletin carrying several blocks yields the
/// first `ZCZC` line paired with the first `NNNN` line following it.
pub fn locate_block(lines: &[&str]) -> Result<MessageBlock, ParseError> {
    let start = lines
        .iter()
        .position(|line| line.starts_with(START_SENTINEL))
        .ok_or(ParseError::NoMessageBlock)?;

    let end = lines[start..]
        .iter()
        .position(|line| line.trim() == END_SENTINEL)
        .map(|offset| start + offset)
        .ok_or(ParseError::NoMessageBlock)?;

    Ok(MessageBlock {
        start,
        end,
        text: lines[start..=end].join("\n"),
    })
}
