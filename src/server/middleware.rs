use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::AppState;
use crate::error::AppError;

/// API Key authentication middleware
/// Validates X-API-Key header against configured api.key
pub async fn api_key_auth(State(state): State<AppState>, req: Request<Body>, next: Next) -> Response {
    // If no API key is configured, allow all requests (development mode)
    let Some(expected_key) = state.settings.api.key.as_deref().filter(|k| !k.is_empty()) else {
        return next.run(req).await;
    };

    let api_key = req
        .headers()
        .get("X-API-Key")
        .and_then(|v| v.to_str().ok());

    match api_key {
        Some(key) if key == expected_key => next.run(req).await,
        Some(_) => AppError::Auth("Invalid API key".to_string()).into_response(),
        None => AppError::Auth("Missing X-API-Key header".to_string()).into_response(),
    }
}
