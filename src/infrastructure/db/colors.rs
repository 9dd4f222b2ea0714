//! PostgreSQL persistence for color frequencies.
//!
//! Each call opens a single connection, inserts one row per distinct color
//! inside one transaction and commits once. Rows are appended; there is no
//! upsert, so repeated runs produce duplicate rows.

use crate::domain::color::FrequencyTable;
use crate::domain::db_config::DbConfig;
use crate::domain::error::{AppError, Result};
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;
use std::time::Duration;
use tracing::{debug, info};

const COLORS_SCHEMA: &str = "CREATE TABLE IF NOT EXISTS colors (
    color TEXT NOT NULL,
    frequency INTEGER NOT NULL
)";

const INSERT_COLOR: &str = "INSERT INTO colors (color, frequency) VALUES ($1, $2)";

const CONNECT_TIMEOUT_SECS: u64 = 10;

pub struct ColorRepository {
    config: DbConfig,
}

impl ColorRepository {
    pub fn new(config: DbConfig) -> Self {
        Self { config }
    }

    fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.config.host)
            .port(self.config.port)
            .username(&self.config.user)
            .database(&self.config.name);

        if self.config.password.is_empty() {
            options
        } else {
            options.password(&self.config.password)
        }
    }

    async fn connect(&self) -> Result<PgConnection> {
        let options = self.connect_options();
        let connect = PgConnection::connect_with(&options);

        let conn = tokio::time::timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS), connect)
            .await
            .map_err(|_| {
                AppError::DatabaseError(format!(
                    "Connection to {}:{} timed out after {} seconds",
                    self.config.host, self.config.port, CONNECT_TIMEOUT_SECS
                ))
            })?
            .map_err(|e| {
                AppError::DatabaseError(format!("Failed to connect to PostgreSQL: {}", e))
            })?;

        debug!(
            host = %self.config.host,
            port = self.config.port,
            database = %self.config.name,
            "Connected to PostgreSQL"
        );
        Ok(conn)
    }

    /// Create the `colors` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        let mut conn = self.connect().await?;

        sqlx::query(COLORS_SCHEMA)
            .execute(&mut conn)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to create table: {}", e)))?;

        conn.close()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to close connection: {}", e)))
    }

    /// Append one `(color, frequency)` row per entry and return the number of rows written.
    ///
    /// An error leaves the transaction uncommitted; it is discarded when the
    /// connection drops.
    pub async fn save_frequencies(&self, frequencies: &FrequencyTable) -> Result<u64> {
        let mut conn = self.connect().await?;
        let mut tx = conn
            .begin()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to begin transaction: {}", e)))?;

        let mut inserted = 0u64;
        for (color, count) in frequencies.iter() {
            let frequency = i32::try_from(count).map_err(|_| {
                AppError::DatabaseError(format!(
                    "Frequency {} for '{}' does not fit an INTEGER column",
                    count, color
                ))
            })?;

            let result = sqlx::query(INSERT_COLOR)
                .bind(color)
                .bind(frequency)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::DatabaseError(format!("Failed to insert color '{}': {}", color, e))
                })?;
            inserted += result.rows_affected();
        }

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to commit colors: {}", e)))?;

        conn.close()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to close connection: {}", e)))?;

        info!(rows = inserted, database = %self.config.name, "Saved color frequencies");
        Ok(inserted)
    }
}
