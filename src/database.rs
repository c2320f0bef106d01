// src/database.rs
pub mod models;

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::{debug, error, info};

use crate::{
    config::DatabaseConfig,
    errors::NavtexError,
    models::ParsedMessage,
    sink::MessageSink,
};

pub use models::StoredMessage;

/// Error code recorded for every bulletin parsed successfully
pub const ERROR_CODE_OK: &str = "A000";

/// SRID of all stored geometries (WGS84)
pub const SRID: i32 = 4326;

/// PostGIS storage for parsed bulletins
///
/// Owns the connection pool; open it once at startup and [`Database::close`]
/// it at shutdown.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect using the given configuration and run migrations
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, NavtexError> {
        config.validate()?;
        info!(
            "Connecting to database with max {} connections",
            config.max_connections
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await
            .map_err(|e| {
                error!("Failed to connect to database: {}", e);
                NavtexError::DatabaseConnectionError(e.to_string())
            })?;

        Self::new(pool).await
    }

    /// Wrap an existing pool and run migrations
    pub async fn new(pool: PgPool) -> Result<Self, NavtexError> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    /// Insert one parsed bulletin
    pub async fn insert_message(
        &self,
        message: &ParsedMessage,
        source_url: &str,
    ) -> Result<i64, NavtexError> {
        let serial_number = i32::try_from(message.serial_number)
            .map_err(|_| NavtexError::InvalidSerialNumber(message.serial_number))?;
        let geometry = message.geometry();
        let wkt = geometry.as_ref().map(|g| g.to_wkt());
        let geom_type = geometry.as_ref().map(|g| g.geometry_type().as_str());

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO navtex_messages (
                station_id, subject_id, serial_number,
                timestamp_utc, message_text, raw_text,
                source_url, error_code, geom, geom_type
            ) VALUES (
                $1, $2, $3,
                $4, $5, $6,
                $7, $8, ST_GeomFromText($9, $10), $11
            )
            RETURNING id",
        )
        .bind(message.station_id.to_string())
        .bind(message.subject_id.to_string())
        .bind(serial_number)
        .bind(message.timestamp_utc)
        .bind(&message.message_text)
        .bind(&message.raw_text)
        .bind(source_url)
        .bind(ERROR_CODE_OK)
        .bind(wkt)
        .bind(SRID)
        .bind(geom_type)
        .fetch_one(&self.pool)
        .await?;

        debug!("Inserted message {} as row {}", message.identifier(), id);
        Ok(id)
    }

    /// Stored bulletins fetched from `source_url`, oldest first
    pub async fn find_by_source_url(
        &self,
        source_url: &str,
    ) -> Result<Vec<StoredMessage>, NavtexError> {
        let rows = sqlx::query_as::<_, StoredMessage>(
            "SELECT id, station_id, subject_id, serial_number,
                    timestamp_utc, message_text, raw_text,
                    source_url, error_code,
                    ST_AsText(geom) AS geom_wkt, ST_SRID(geom) AS geom_srid,
                    geom_type
             FROM navtex_messages
             WHERE source_url = $1
             ORDER BY id",
        )
        .bind(source_url)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Close all pooled connections
    pub async fn close(&self) {
        info!("Closing database connections");
        self.pool.close().await;
    }
}

#[async_trait]
impl MessageSink for Database {
    async fn store(&self, message: &ParsedMessage, source_url: &str) -> Result<(), NavtexError> {
        self.insert_message(message, source_url).await.map(|_| ())
    }
}
