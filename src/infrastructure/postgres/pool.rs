//! PostgreSQL connection pool for the company directory.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use thiserror::Error;

use crate::config::DatabaseConfig;

/// Errors that can occur with the PostgreSQL pool.
#[derive(Debug, Error)]
pub enum PostgresPoolError {
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Database URL is not configured")]
    MissingUrl,
}

/// PostgreSQL connection pool.
#[derive(Clone)]
pub struct PostgresPool {
    pool: PgPool,

    /// Database URL (for logging purposes)
    database_url: String,
}

impl PostgresPool {
    /// Create a new PostgreSQL pool from configuration.
    ///
    /// Connections are opened lazily, so an unreachable database does not
    /// prevent the service from starting.
    pub fn new(config: &DatabaseConfig) -> Result<Self, PostgresPoolError> {
        let url = config
            .url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or(PostgresPoolError::MissingUrl)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.pool_size)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect_lazy(url)?;

        tracing::info!(
            pool_size = config.pool_size,
            url = %mask_database_url(url),
            "PostgreSQL connection pool created"
        );

        Ok(Self {
            pool,
            database_url: url.to_string(),
        })
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run a trivial query to check connectivity.
    pub async fn is_healthy(&self) -> bool {
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "PostgreSQL health check failed");
                false
            }
        }
    }

    /// Get the database URL (masked for logging).
    pub fn database_url_masked(&self) -> String {
        mask_database_url(&self.database_url)
    }

    /// Close the pool gracefully.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("PostgreSQL connection pool closed");
    }
}

/// Replace the password of a connection URL with `***`
pub fn mask_database_url(url: &str) -> String {
    let authority_start = url.find("://").map(|pos| pos + 3).unwrap_or(0);
    let authority = &url[authority_start..];

    if let Some(at_pos) = authority.find('@') {
        if let Some(colon_pos) = authority[..at_pos].rfind(':') {
            let prefix = &url[..authority_start + colon_pos + 1];
            let suffix = &authority[at_pos..];
            return format!("{}***{}", prefix, suffix);
        }
    }
    url.to_string()
}
