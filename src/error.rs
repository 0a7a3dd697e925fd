use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::core::HitError;
use crate::models::ErrorResponse;
use crate::services::EsError;

/// Request-level error taxonomy, mapped onto HTTP status codes at the
/// handler boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid credentials")]
    Unauthorized,

    #[error("Elasticsearch unavailable")]
    BackendUnavailable,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    Backend(String),
}

impl From<EsError> for ApiError {
    fn from(e: EsError) -> Self {
        ApiError::Backend(e.to_string())
    }
}

impl From<HitError> for ApiError {
    fn from(e: HitError) -> Self {
        ApiError::Backend(e.to_string())
    }
}

impl ApiError {
    fn kind(&self) -> &'static str {
        match self {
            ApiError::Unauthorized => "unauthorized",
            ApiError::BackendUnavailable => "backend_unavailable",
            ApiError::Validation(_) => "validation_failed",
            ApiError::Backend(_) => "backend_error",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::BackendUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let mut builder = HttpResponse::build(status);

        // Failed Basic auth must carry a challenge, without revealing
        // which credential was wrong.
        if matches!(self, ApiError::Unauthorized) {
            builder.insert_header(("WWW-Authenticate", "Basic"));
        }

        builder.json(ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::BackendUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::Validation("uids".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Backend("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unauthorized_response_carries_challenge() {
        let response = ApiError::Unauthorized.error_response();
        let challenge = response
            .headers()
            .get("WWW-Authenticate")
            .and_then(|v| v.to_str().ok());
        assert_eq!(challenge, Some("Basic"));
    }
}
