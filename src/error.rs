use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error types
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Permit not found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Document rendering failed: {0}")]
    Render(#[from] crate::render::RenderError),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::Render(_)
            | ServiceError::Internal(_)
            | ServiceError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing error text; internal causes stay out of release builds.
    fn public_message(&self) -> String {
        match self {
            ServiceError::NotFound => "Permit not found".to_string(),
            ServiceError::BadRequest(message) => message.clone(),
            ServiceError::Render(_) => "Failed to generate PDF".to_string(),
            ServiceError::Internal(_) | ServiceError::Config(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        #[allow(unused_mut)]
        let mut body = json!({
            "success": false,
            "error": self.public_message(),
        });
        #[cfg(debug_assertions)]
        {
            body["message"] = json!(self.to_string());
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(ServiceError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ServiceError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn render_causes_stay_generic() {
        let err = ServiceError::Render(crate::render::RenderError::Backend("font table".into()));
        assert_eq!(err.public_message(), "Failed to generate PDF");
    }
}
