//! NAVTEX archive fetcher

use async_trait::async_trait;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;
use tracing::{debug, info, warn};

use crate::{config::ArchiveConfig, errors::NavtexError};

static HREF_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)href\s*=\s*["']([^"']+)["']"#).unwrap());

/// Source of raw bulletins for a day
#[async_trait]
pub trait ArchiveSource: Send + Sync {
    /// URLs of the bulletins published on `date`; empty if there are none
    async fn message_urls(&self, date: NaiveDate) -> Result<Vec<String>, NavtexError>;

    /// Raw text of one bulletin
    async fn fetch_message(&self, url: &str) -> Result<String, NavtexError>;
}

/// HTTP client for a directory-style archive with one index page per day
pub struct NavtexArchive {
    client: reqwest::Client,
    base_url: String,
}

impl NavtexArchive {
    pub fn new(config: &ArchiveConfig) -> Result<Self, NavtexError> {
        config.validate()?;
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(client, &config.base_url))
    }

    pub(crate) fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Index page URL for a day, e.g. `.../Navtex_Archive/2024-10-16/`
    pub fn index_url(&self, date: NaiveDate) -> String {
        format!("{}/{}/", self.base_url, date.format("%Y-%m-%d"))
    }
}

#[async_trait]
impl ArchiveSource for NavtexArchive {
    async fn message_urls(&self, date: NaiveDate) -> Result<Vec<String>, NavtexError> {
        let index_url = self.index_url(date);
        info!("Fetching index: {}", index_url);

        let response = self.client.get(&index_url).send().await?;
        if !response.status().is_success() {
            warn!(
                "No index found for {} (status {})",
                date,
                response.status()
            );
            return Ok(Vec::new());
        }

        let html = response.text().await?;
        let base = Url::parse(&index_url).map_err(|e| NavtexError::ConfigurationError {
            message: format!("Invalid archive URL {}: {}", index_url, e),
        })?;
        let urls = text_links(&base, &html);
        debug!("Index for {} lists {} messages", date, urls.len());
        Ok(urls)
    }

    async fn fetch_message(&self, url: &str) -> Result<String, NavtexError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NavtexError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?.trim().to_string())
    }
}

/// Links to `.txt` files in an index page, resolved against `base`
pub fn text_links(base: &Url, html: &str) -> Vec<String> {
    HREF_PATTERN
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().trim()))
        .filter(|href| href.ends_with(".txt"))
        .filter_map(|href| match base.join(href) {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                warn!("Skipping unresolvable link {}: {}", href, e);
                None
            }
        })
        .collect()
}
