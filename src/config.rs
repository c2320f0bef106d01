//! Application configuration

use std::path::Path;
use std::time::Duration;

use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use serde_with::serde_as;

use crate::errors::NavtexError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub extractor: ExtractorKind,
    pub llm: Option<LlmConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[serde_as]
#[derive(Debug, Deserialize, Clone)]
pub struct ArchiveConfig {
    pub base_url: String,
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    pub timeout: Duration,
}

/// Which extractor turns bulletin text into structured fields
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorKind {
    #[default]
    Rules,
    Llm,
}

#[serde_as]
#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    /// OpenAI-compatible chat completions URL
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    #[serde(default = "default_llm_timeout")]
    pub timeout: Duration,
}

fn default_llm_timeout() -> Duration {
    Duration::from_secs(60)
}

impl AppConfig {
    /// Load from `config/default` (optional) and `NAVTEX__` environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder(File::with_name("config/default").required(false))?
            .build()?
            .try_deserialize()
    }

    /// Load from the given file and `NAVTEX__` environment variables
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::builder(File::from(path))?.build()?.try_deserialize()
    }

    fn builder<S>(file: S) -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        Ok(Config::builder()
            .set_default("database.max_connections", 5)?
            .set_default("archive.base_url", "https://www.navtex.net/Navtex_Archive")?
            .set_default("archive.timeout", 30)?
            .add_source(file)
            .add_source(
                Environment::with_prefix("NAVTEX")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            ))
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), NavtexError> {
        self.database.validate()?;
        self.archive.validate()?;
        match (&self.extractor, &self.llm) {
            (ExtractorKind::Llm, None) => Err(NavtexError::ConfigurationError {
                message: "LLM extractor selected but no llm section configured".to_string(),
            }),
            (_, Some(llm)) => llm.validate(),
            (ExtractorKind::Rules, None) => Ok(()),
        }
    }
}

fn require_non_empty(value: &str, name: &str) -> Result<(), NavtexError> {
    if value.trim().is_empty() {
        return Err(NavtexError::ConfigurationError {
            message: format!("{} cannot be empty", name),
        });
    }
    Ok(())
}

fn require_non_zero(value: Duration, name: &str) -> Result<(), NavtexError> {
    if value.is_zero() {
        return Err(NavtexError::ConfigurationError {
            message: format!("{} must be greater than zero", name),
        });
    }
    Ok(())
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<(), NavtexError> {
        require_non_empty(&self.url, "Database URL")?;
        if self.max_connections == 0 {
            return Err(NavtexError::ConfigurationError {
                message: "Database max_connections must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

impl ArchiveConfig {
    pub fn validate(&self) -> Result<(), NavtexError> {
        require_non_empty(&self.base_url, "Archive base URL")?;
        require_non_zero(self.timeout, "Archive timeout")
    }
}

impl LlmConfig {
    pub fn validate(&self) -> Result<(), NavtexError> {
        require_non_empty(&self.endpoint, "LLM endpoint")?;
        require_non_empty(&self.model, "LLM model")?;
        require_non_zero(self.timeout, "LLM timeout")
    }
}
