//! Destinations for parsed bulletins

use async_trait::async_trait;
use tracing::info;

use crate::{errors::NavtexError, models::ParsedMessage};

/// Stores one parsed bulletin together with the URL it was fetched from
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn store(&self, message: &ParsedMessage, source_url: &str) -> Result<(), NavtexError>;
}

/// Sink that only logs, for dry runs
#[derive(Debug, Default)]
pub struct LogSink;

#[async_trait]
impl MessageSink for LogSink {
    async fn store(&self, message: &ParsedMessage, source_url: &str) -> Result<(), NavtexError> {
        let geometry = message.geometry();
        let json = serde_json::to_string(message)?;
        info!(
            id = %message.identifier(),
            timestamp = ?message.timestamp_utc,
            geom_type = geometry.as_ref().map(|g| g.geometry_type().as_str()),
            source_url,
            "{}",
            json
        );
        Ok(())
    }
}
