// src/database/models.rs
use chrono::{DateTime, Utc};

/// Stored bulletin as read back from `navtex_messages`
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct StoredMessage {
    pub id: i64,
    pub station_id: String,
    pub subject_id: String,
    pub serial_number: i32,
    pub timestamp_utc: Option<DateTime<Utc>>,
    pub message_text: String,
    pub raw_text: String,
    pub source_url: String,
    pub error_code: String,
    /// `geom` rendered with `ST_AsText`
    pub geom_wkt: Option<String>,
    pub geom_srid: Option<i32>,
    pub geom_type: Option<String>,
}
