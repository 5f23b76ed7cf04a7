//! Axum route handlers for the apigate API.

use std::sync::Arc;

use apigate_core::Settings;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::{auth::ApiKeyAuth, cors::cors_layer, error::ServerError};

// ── Shared state ─────────────────────────────────────────────────────────────

type SharedSettings = Arc<Settings>;

// ── Response types ────────────────────────────────────────────────────────────

/// Body of the guarded index route.
#[derive(Debug, Serialize)]
pub struct ProjectInfo {
    pub name: String,
    pub version: String,
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router from loaded settings.
///
/// Guarded routes are mounted under `settings.api_prefix()`. CORS admits the
/// origins in `settings.allowed_origins()`.
pub fn create_router(settings: SharedSettings) -> Router {
    let index = api_path(settings.api_prefix(), "");
    let whoami_path = api_path(settings.api_prefix(), "/whoami");
    let cors = cors_layer(settings.allowed_origins());

    Router::new()
        .route("/health", get(health))
        .route(&index, get(project_info))
        .route(&whoami_path, get(whoami))
        .fallback(not_found)
        .with_state(settings)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Joins the configured prefix and a route suffix into an absolute path.
///
/// Surrounding slashes on the prefix are ignored, so `"api/v1/"` and
/// `"/api/v1"` mount at the same place. An empty result maps to `/`.
fn api_path(prefix: &str, suffix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    let path = if trimmed.is_empty() {
        suffix.to_owned()
    } else {
        format!("/{trimmed}{suffix}")
    };
    if path.is_empty() {
        "/".to_owned()
    } else {
        path
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /health`: liveness probe, no key required.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

/// `GET {prefix}`: project name and version.
pub async fn project_info(
    _auth: ApiKeyAuth,
    State(settings): State<SharedSettings>,
) -> Json<ProjectInfo> {
    Json(ProjectInfo {
        name: settings.project_name().to_owned(),
        version: settings.project_version().to_owned(),
    })
}

/// `GET {prefix}/whoami`: confirms the caller's key was accepted.
pub async fn whoami(_auth: ApiKeyAuth) -> impl IntoResponse {
    Json(serde_json::json!({"authenticated": true}))
}

async fn not_found() -> ServerError {
    ServerError::NotFound
}
