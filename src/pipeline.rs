//! Daily ingest: fetch, extract, store

use chrono::NaiveDate;
use tracing::{error, info, warn};

use crate::{
    archive::ArchiveSource,
    errors::NavtexError,
    extractor::MessageExtractor,
    sink::MessageSink,
};

/// Outcome counts for one ingest run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Message URLs listed in the index
    pub found: usize,
    /// Messages parsed and stored
    pub stored: usize,
    /// Messages that could not be parsed
    pub skipped: usize,
    /// Messages lost to fetch, extractor request or storage errors
    pub failed: usize,
}

/// Ingest every bulletin published on `date`.
///
/// Messages are processed one at a time. A failure affects only its own
/// message; the run continues with the next URL. Only a failure to list the
/// day's messages aborts the run.
pub async fn ingest_day<A, E, S>(
    source: &A,
    extractor: &E,
    sink: &S,
    date: NaiveDate,
) -> Result<IngestSummary, NavtexError>
where
    A: ArchiveSource + ?Sized,
    E: MessageExtractor + ?Sized,
    S: MessageSink + ?Sized,
{
    let urls = source.message_urls(date).await?;
    let mut summary = IngestSummary {
        found: urls.len(),
        ..Default::default()
    };

    if urls.is_empty() {
        warn!("No messages found for {}", date);
        return Ok(summary);
    }
    info!("Found {} messages for {}", urls.len(), date);

    for url in &urls {
        let raw = match source.fetch_message(url).await {
            Ok(raw) => raw,
            Err(e) => {
                error!("Error fetching {}: {}", url, e);
                summary.failed += 1;
                continue;
            }
        };

        let message = match extractor.extract(&raw).await {
            Ok(message) => message,
            Err(e @ (NavtexError::HttpError(_) | NavtexError::HttpStatus { .. })) => {
                error!("Extractor request failed for {}: {}", url, e);
                summary.failed += 1;
                continue;
            }
            Err(e) => {
                warn!("Could not parse message from {}: {}", url, e);
                summary.skipped += 1;
                continue;
            }
        };

        match sink.store(&message, url).await {
            Ok(()) => {
                info!("Inserted message {}", message.identifier());
                summary.stored += 1;
            }
            Err(e) => {
                error!("Error storing {} from {}: {}", message.identifier(), url, e);
                summary.failed += 1;
            }
        }
    }

    info!(
        "Ingest for {} finished: {} found, {} stored, {} skipped, {} failed",
        date, summary.found, summary.stored, summary.skipped, summary.failed
    );
    Ok(summary)
}
