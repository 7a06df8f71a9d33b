//! Read-only template endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::server::AppState;
use crate::template::{RenderedTemplate, TemplateData, TemplateListResponse, TemplateRecord};

use super::response::ApiResponse;

/// GET /api/v1/templates - List template names
#[tracing::instrument(name = "http.list_templates", skip(state))]
pub async fn list_templates(State(state): State<AppState>) -> Json<TemplateListResponse> {
    let templates = state.template_store.names();
    let total = templates.len();

    Json(TemplateListResponse { templates, total })
}

/// GET /api/v1/templates/{name} - Get a template's source
#[tracing::instrument(name = "http.get_template", skip(state))]
pub async fn get_template(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<TemplateRecord>> {
    let record = state.template_store.get(&name)?;
    Ok(Json(record.clone()))
}

/// POST /api/v1/templates/{name}/preview - Render a template with the given data
#[tracing::instrument(name = "http.preview_template", skip(state, payload))]
pub async fn preview_template(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse<RenderedTemplate>>> {
    let Json(body) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let data: TemplateData = match body {
        Value::Object(map) => map,
        Value::Null => TemplateData::new(),
        _ => {
            return Err(AppError::Validation(
                "Preview data must be a JSON object".to_string(),
            ))
        }
    };

    let rendered = state.template_store.render(&name, &data)?;
    Ok(Json(ApiResponse::ok(rendered)))
}
