//! API route handlers
//!
//! Routes are organized by functionality:
//!
//! - `health`: Health check with record count and provenance
//! - `permits`: Record collection, per-record PDF/QR/verification endpoints
//! - `generate`: Validation and ad hoc PDF generation for posted records

pub mod generate;
pub mod health;
pub mod permits;

use crate::error::{ServiceError, ServiceResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// Root endpoint (GET /); lists the available endpoints.
pub async fn api_info() -> ServiceResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "Permit Office Service",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/health",
            "/permits",
            "/permits/{id}",
            "/permits/{id}/pdf",
            "/permits/{id}/qr",
            "/permits/{id}/verify",
            "/permits/{id}/verify-document",
            "/validate",
            "/generate-pdf"
        ]
    })))
}

/// 404 Not Found handler for undefined routes.
pub async fn not_found() -> ServiceError {
    ServiceError::NotFound
}
