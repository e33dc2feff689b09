use super::permits::{pdf_filename, pdf_response};
use crate::error::{ServiceError, ServiceResult};
use crate::record::PermitRecord;
use crate::render::{self, RenderOptions};
use crate::signing;
use crate::state::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    #[serde(default)]
    pub permit_number: Option<String>,
}

/// Validate a permit number against the current record set
///
/// An unknown number is a successful response with `valid: false`, not an
/// error; the caller is asking a question, not fetching a resource.
pub async fn validate_permit(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ValidateRequest>,
) -> ServiceResult<impl IntoResponse> {
    let Some(number) = request.permit_number.filter(|n| !n.is_empty()) else {
        return Ok(Json(json!({
            "success": true,
            "valid": false,
            "message": "Permit not found"
        })));
    };

    match state.cache.find_by_number(&number).await {
        Some(record) => Ok(Json(json!({
            "success": true,
            "valid": true,
            "permit": record
        }))),
        None => Ok(Json(json!({
            "success": true,
            "valid": false,
            "message": "Permit not found"
        }))),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePdfRequest {
    #[serde(default)]
    pub permit_data: Option<PermitRecord>,
}

/// Render a caller-supplied record as a PDF, bypassing the cache
///
/// The QR encodes the public portal URL since the posted record has no
/// stable id on this service.
pub async fn generate_pdf(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GeneratePdfRequest>,
) -> ServiceResult<impl IntoResponse> {
    let record = request
        .permit_data
        .ok_or_else(|| ServiceError::BadRequest("No permit data provided".to_string()))?;

    let verify_url = signing::public_verification_url(&record, &state.config.public_verify_base);
    let pdf = render::render_pdf(&record, &state.assets, &verify_url, RenderOptions::default())?;
    Ok(pdf_response(pdf_filename(&record), pdf))
}
