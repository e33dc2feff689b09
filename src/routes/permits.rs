use crate::error::{ServiceError, ServiceResult};
use crate::record::PermitRecord;
use crate::render::{self, RenderOptions};
use crate::signing;
use crate::state::AppState;
use crate::verify;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::sync::Arc;

/// Download filename: document type with non-alphanumerics collapsed to
/// underscores, then the primary reference (record id when none exists).
pub(crate) fn pdf_filename(record: &PermitRecord) -> String {
    let sanitized_type: String = record
        .document_type
        .as_str()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let reference = record
        .primary_reference()
        .map(str::to_string)
        .unwrap_or_else(|| record.id.to_string());
    format!("{sanitized_type}_{reference}.pdf")
}

pub(crate) fn pdf_response(filename: String, pdf: Vec<u8>) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        pdf,
    )
}

/// List the full record set
pub async fn list_permits(State(state): State<Arc<AppState>>) -> ServiceResult<impl IntoResponse> {
    let set = state.cache.records(false).await;
    Ok(Json(json!({
        "success": true,
        "count": set.records.len(),
        "provenance": set.provenance.as_str(),
        "permits": &*set.records,
    })))
}

/// Fetch one record by id
pub async fn get_permit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> ServiceResult<impl IntoResponse> {
    let record = state
        .cache
        .find_by_id(id)
        .await
        .ok_or(ServiceError::NotFound)?;
    Ok(Json(json!({ "success": true, "permit": record })))
}

/// Render one record as a downloadable PDF document
pub async fn permit_pdf(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> ServiceResult<impl IntoResponse> {
    let record = state
        .cache
        .find_by_id(id)
        .await
        .ok_or(ServiceError::NotFound)?;

    let verify_url =
        signing::document_verification_url(record.id, &state.config.verify_base_url);
    let pdf = render::render_pdf(&record, &state.assets, &verify_url, RenderOptions::default())?;
    Ok(pdf_response(pdf_filename(&record), pdf))
}

/// Verification QR code for one record, as PNG
pub async fn permit_qr(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> ServiceResult<impl IntoResponse> {
    let record = state
        .cache
        .find_by_id(id)
        .await
        .ok_or(ServiceError::NotFound)?;

    let verify_url =
        signing::document_verification_url(record.id, &state.config.verify_base_url);
    let png = render::qr::qr_png(&verify_url)?;
    Ok(([(header::CONTENT_TYPE, "image/png")], png))
}

/// Verification metadata as JSON, including the document signature
pub async fn verify_permit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> ServiceResult<impl IntoResponse> {
    let record = state
        .cache
        .find_by_id(id)
        .await
        .ok_or(ServiceError::NotFound)?;

    let today = chrono::Utc::now().date_naive();
    let status = record.validity_status(today);
    let reference = record
        .primary_reference()
        .map(str::to_string)
        .or_else(|| record.identity_number.clone());
    let document_url =
        signing::document_verification_url(record.id, &state.config.verify_base_url);

    Ok(Json(json!({
        "success": true,
        "verification": {
            "dhaUrl": document_url,
            "qrUrl": format!("/permits/{}/qr", record.id),
            "reference": reference,
            "type": record.document_type.as_str(),
            "status": status.as_str(),
            "issueDate": record.issue_date,
            "expiryDate": record.expiry_date,
            "name": record.full_name(),
            "signature": signing::compute_signature(&record, &state.config.signing_key),
            "verificationEmail": record
                .verification_email
                .clone()
                .unwrap_or_else(|| "asmverifications@dha.gov.za".to_string()),
            "message": "Document can be verified on official DHA website",
        }
    })))
}

/// Browser-facing verification page. Misses get a branded HTML page, not
/// the JSON envelope.
pub async fn verify_document(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Response {
    match state.cache.find_by_id(id).await {
        Some(record) => Html(verify::verification_page(
            &record,
            &state.config.verify_base_url,
            chrono::Utc::now().date_naive(),
        ))
        .into_response(),
        None => (StatusCode::NOT_FOUND, Html(verify::not_found_page())).into_response(),
    }
}
