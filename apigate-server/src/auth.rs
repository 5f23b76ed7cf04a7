//! Axum extractor that runs the API key guard.

use std::sync::Arc;

use apigate_core::{check_api_key, Settings, API_KEY_HEADER};
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::debug;

use crate::error::ServerError;

/// Proof that the request carried the configured API key.
///
/// Taking this as a handler argument rejects the request with 403 before the
/// handler body runs. A header that is not visible ASCII counts as absent.
#[derive(Debug, Clone)]
pub struct ApiKeyAuth(pub String);

impl<S> FromRequestParts<S> for ApiKeyAuth
where
    Arc<Settings>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let settings = Arc::<Settings>::from_ref(state);
        let header = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok());

        match check_api_key(&settings, header) {
            Ok(token) => Ok(Self(token.to_owned())),
            Err(e) => {
                debug!(
                    path = %parts.uri.path(),
                    header_present = header.is_some(),
                    "rejected request with invalid API key"
                );
                Err(e.into())
            }
        }
    }
}
