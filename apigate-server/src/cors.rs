//! CORS policy built from the configured allow-list.

use apigate_core::AllowedOrigin;
use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

/// Builds a layer admitting exactly `origins`, with any method and header.
///
/// An empty list admits no cross-origin callers.
#[must_use]
pub fn cors_layer(origins: &[AllowedOrigin]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| {
            let origin = o.origin();
            match HeaderValue::from_str(&origin) {
                Ok(v) => Some(v),
                Err(e) => {
                    warn!(origin = %origin, error = %e, "skipping origin");
                    None
                }
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}
