//! Entry point for the `apigate-server` HTTP server.

use std::sync::Arc;

use apigate_core::Settings;
use apigate_server::routes::create_router;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = match Settings::from_env() {
        Ok(s) => Arc::new(s),
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };
    info!(
        project = settings.project_name(),
        version = settings.project_version(),
        api_prefix = settings.api_prefix(),
        origins = settings.allowed_origins().len(),
        "settings loaded"
    );

    let addr = std::env::var("APIGATE_LISTEN_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:8000".to_owned());

    let app = create_router(settings);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %addr, "apigate-server listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
