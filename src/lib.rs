//! NAVTEX bulletin recorder
//!
//! Parses NAVTEX maritime safety bulletins into structured, geometry-tagged
//! records and stores them in PostGIS.

pub mod archive;
pub mod config;
pub mod database;
pub mod errors;
pub mod extractor;
pub mod geometry;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod sink;

#[cfg(test)]
mod test_server;

pub use errors::{NavtexError, ParseError};
pub use models::ParsedMessage;
pub use parser::parse_message;
