//! Errors for NAVTEX recorder
use thiserror::Error;

/// Terminal failures of parsing a single bulletin
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("No ZCZC...NNNN message block found")]
    NoMessageBlock,

    #[error("Header line does not match station/subject/serial pattern: {0}")]
    HeaderMismatch(String),
}

#[derive(Error, Debug)]
pub enum NavtexError {
    #[error("Message parse error: {0}")]
    ParseError(#[from] ParseError),

    #[error("Serialization error")]
    SerdeError(#[from] serde_json::Error),

    #[error("Configuration error")]
    ConfigError(#[from] config::ConfigError),

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("IO error")]
    IoError(#[from] std::io::Error),

    #[error("Invalid station or subject code: {0}")]
    InvalidCode(String),

    #[error("Serial number out of range: {0}")]
    InvalidSerialNumber(u32),

    #[error("HTTP error")]
    HttpError(#[from] reqwest::Error),

    #[error("HTTP status {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Malformed extractor output: {0}")]
    MalformedExternalOutput(String),

    #[error("Database connection error: {0}")]
    DatabaseConnectionError(String),

    #[error("Database migration error")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),
}
