//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use orgsync_domain::error::OrgsyncError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`OrgsyncError`] to an HTTP response with appropriate status code.
pub struct ApiError(OrgsyncError);

impl From<OrgsyncError> for ApiError {
    fn from(err: OrgsyncError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            OrgsyncError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            OrgsyncError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            OrgsyncError::AlreadyExists(err) => (StatusCode::CONFLICT, err.to_string()),
            OrgsyncError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            OrgsyncError::Rpc(err) => {
                tracing::error!(error = %err, "rpc transport error");
                (
                    StatusCode::BAD_GATEWAY,
                    "upstream silo unavailable".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
