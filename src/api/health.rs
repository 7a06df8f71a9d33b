//! Health check endpoint.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub templates: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postgres: Option<PostgresHealthResponse>,
    pub external_api: ExternalApiHealthResponse,
    pub mail_provider: String,
}

#[derive(Debug, Serialize)]
pub struct PostgresHealthResponse {
    pub connected: bool,
    pub url: String,
    pub pool_size: u32,
    pub idle_connections: u32,
}

#[derive(Debug, Serialize)]
pub struct ExternalApiHealthResponse {
    pub enabled: bool,
    pub url: String,
}

/// GET /health
///
/// Reports `degraded` when a configured database cannot be reached. The
/// external directory is not probed: campaigns tolerate its absence.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let postgres = match state.postgres_pool {
        Some(ref pool) => {
            let inner = pool.pool();
            Some(PostgresHealthResponse {
                connected: pool.is_healthy().await,
                url: pool.database_url_masked(),
                pool_size: inner.size(),
                idle_connections: inner.num_idle() as u32,
            })
        }
        None => None,
    };

    let healthy = postgres.as_ref().map(|pg| pg.connected).unwrap_or(true);
    let status = if healthy { "healthy" } else { "degraded" };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        templates: state.template_store.count(),
        postgres,
        external_api: ExternalApiHealthResponse {
            enabled: state.settings.external_api.enabled,
            url: state.settings.external_api.url.clone(),
        },
        mail_provider: state.settings.mail.provider.clone(),
    })
}
