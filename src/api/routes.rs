use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::server::{api_key_auth, AppState};

use super::campaign::{list_campaign_recipients, send_company_campaign};
use super::health::health;
use super::metrics::prometheus_metrics;
use super::template::{get_template, list_templates, preview_template};

pub fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        // Health & Metrics
        .route("/health", get(health))
        .route("/metrics", get(prometheus_metrics))
        .nest(
            "/api/v1",
            Router::new()
                // Campaigns
                .route("/campaigns/companies", post(send_company_campaign))
                .route("/campaigns/recipients", get(list_campaign_recipients))
                // Templates
                .route("/templates", get(list_templates))
                .route("/templates/{name}", get(get_template))
                .route("/templates/{name}/preview", post(preview_template))
                .route_layer(middleware::from_fn_with_state(state.clone(), api_key_auth)),
        )
}
