use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::DatabaseConfig;

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Could not connect to database after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Maps a unique-index violation to `UniqueViolation`, anything else to `Sqlx`.
    pub fn from_write(err: sqlx::Error, what: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                DatabaseError::UniqueViolation(what.to_string())
            }
            _ => DatabaseError::Sqlx(err),
        }
    }
}

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        username VARCHAR(30) NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS ads (
        id BIGSERIAL PRIMARY KEY,
        title VARCHAR(100) NOT NULL,
        description VARCHAR(1000) NOT NULL,
        image_url VARCHAR(255),
        price DOUBLE PRECISION NOT NULL CHECK (price > 0),
        user_id BIGINT NOT NULL REFERENCES users(id),
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        deleted_at TIMESTAMPTZ
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_ads_deleted_at ON ads (deleted_at)",
];

/// Owns the process-wide connection pool. Built once in `main` and handed to
/// the repositories.
#[derive(Clone)]
pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    pub fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.name)
            .ssl_mode(config.ssl_mode())
    }

    /// Tries to open and ping a pool `connect_attempts` times, sleeping
    /// `retry_delay` between attempts.
    pub async fn connect_with_retry(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let options = Self::connect_options(config);
        let attempts = config.connect_attempts.max(1);
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            match Self::try_connect(config, options.clone()).await {
                Ok(pool) => {
                    info!(
                        "Connected to database {} at {}:{}",
                        config.name, config.host, config.port
                    );
                    return Ok(Self { pool });
                }
                Err(e) => {
                    warn!("Database connection attempt {}/{} failed: {}", attempt, attempts, e);
                    last_error = e.to_string();
                }
            }

            if attempt < attempts {
                tokio::time::sleep(config.retry_delay()).await;
            }
        }

        Err(DatabaseError::RetriesExhausted { attempts, last_error })
    }

    async fn try_connect(config: &DatabaseConfig, options: PgConnectOptions) -> Result<PgPool, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await?;
        sqlx::query("SELECT 1").execute(&pool).await?;
        Ok(pool)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Idempotent table bootstrap for a fresh database.
    pub async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("Database schema ready");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}
