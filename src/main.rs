//! NAVTEX recorder utility

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use clap::Parser;
use tokio::signal;
use tracing::{error, info};

use navtex_recorder::{
    archive::NavtexArchive,
    config::{AppConfig, ExtractorKind},
    database::Database,
    errors::NavtexError,
    extractor::{LlmExtractor, MessageExtractor, RuleExtractor},
    pipeline::ingest_day,
    sink::{LogSink, MessageSink},
};

/// Fetch one day of NAVTEX bulletins and store them
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Archive day to ingest (YYYY-MM-DD), defaults to today in UTC
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Configuration file, instead of config/default
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured extractor
    #[arg(long, value_enum)]
    extractor: Option<ExtractorKind>,

    /// Log parsed messages instead of storing them
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), NavtexError> {
    #[cfg(feature = "dotenv")]
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    if let Some(kind) = args.extractor {
        config.extractor = kind;
    }
    config.validate()?;

    let date = args.date.unwrap_or_else(|| Utc::now().date_naive());
    let archive = NavtexArchive::new(&config.archive)?;

    let extractor: Box<dyn MessageExtractor> = match (config.extractor, config.llm.clone()) {
        (ExtractorKind::Llm, Some(llm)) => Box::new(LlmExtractor::new(llm)?),
        _ => Box::new(RuleExtractor),
    };

    // Pool lives for the whole run and is closed explicitly below
    let database = if args.dry_run {
        None
    } else {
        Some(Database::connect(&config.database).await?)
    };
    let log_sink = LogSink;
    let sink: &dyn MessageSink = match &database {
        Some(db) => db,
        None => &log_sink,
    };

    let outcome = tokio::select! {
        result = ingest_day(&archive, extractor.as_ref(), sink, date) => {
            match &result {
                Ok(summary) => info!("Ingest completed: {:?}", summary),
                Err(e) => error!("Ingest failed: {}", e),
            }
            result.map(|_| ())
        }
        _ = signal::ctrl_c() => {
            info!("Received shutdown signal");
            Ok(())
        }
    };

    if let Some(db) = database {
        db.close().await;
    }

    outcome
}
