//! Company campaign endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::campaign::{CampaignRequest, CampaignResult};
use crate::error::{AppError, Result};
use crate::recipients::RecipientDirectory;
use crate::server::AppState;

use super::response::ApiResponse;

/// POST /api/v1/campaigns/companies - Send a campaign to companies and custom addresses
///
/// Responds only after every message has been attempted.
#[tracing::instrument(name = "http.send_company_campaign", skip(state, payload))]
pub async fn send_company_campaign(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CampaignRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<CampaignResult>>> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let result = state.campaign_service.run(request).await?;

    tracing::info!(
        sent = result.sent,
        failed = result.failed,
        "Campaign request completed"
    );

    Ok(Json(ApiResponse::ok(result)))
}

/// GET /api/v1/campaigns/recipients - Every company a campaign can target
#[tracing::instrument(name = "http.list_campaign_recipients", skip(state))]
pub async fn list_campaign_recipients(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<RecipientDirectory>>> {
    let directory = state.campaign_service.directory().await?;
    Ok(Json(ApiResponse::ok(directory)))
}
