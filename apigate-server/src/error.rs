//! Error types for the server crate.

use apigate_core::AuthenticationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors that terminate a single request.
///
/// Messages are safe to return to the caller; none carry key material.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ServerError {
    /// The `X-API-Key` header was absent or did not match.
    #[error(transparent)]
    Auth(#[from] AuthenticationError),

    /// No route matched the request path.
    #[error("not found")]
    NotFound,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::Auth(_) => StatusCode::FORBIDDEN,
            ServerError::NotFound => StatusCode::NOT_FOUND,
        };
        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}
