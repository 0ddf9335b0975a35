//! HTTP mapping for service errors

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::warn;

use crate::api::dto::ApiResponse;
use crate::domain::{BackendError, GatewayError};

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::NotFound { .. } => StatusCode::NOT_FOUND,
            GatewayError::Backend(BackendError::Transport(err)) if err.is_timeout() => {
                StatusCode::GATEWAY_TIMEOUT
            }
            GatewayError::Backend(BackendError::InvalidBaseUrl(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            GatewayError::Backend(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            warn!(error = %self, status = status.as_u16(), "Request failed");
        }
        (status, Json(ApiResponse::<()>::error(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_is_bad_request() {
        let err = GatewayError::Validation("Query must not be empty".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_session_is_not_found() {
        assert_eq!(
            GatewayError::session_not_found("x").status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn upstream_status_is_bad_gateway() {
        let err = GatewayError::from(BackendError::Status(503));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn misconfigured_backend_is_internal() {
        let err = GatewayError::from(BackendError::InvalidBaseUrl("nope".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
