//! Route configuration and setup

use crate::constants::{API_PREFIX, PUBLIC_UPLOADS_PATH};
use crate::handlers::{image_upload::upload_image, video_upload::upload_video};
use crate::middleware::hide_incomplete_uploads;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use clipnote_core::Config;
use serde::Serialize;
use std::sync::Arc;
use tower::{limit::ConcurrencyLimitLayer, Layer};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    tracing::info!(
        http_concurrency_limit = config.http_concurrency_limit(),
        "HTTP concurrency limit layer enabled"
    );

    let app = Router::new()
        .route("/health", get(health_check))
        .merge(upload_routes())
        .nest_service(
            PUBLIC_UPLOADS_PATH,
            axum::middleware::from_fn_with_state(
                Arc::new(config.upload_root().to_path_buf()),
                hide_incomplete_uploads,
            )
            .layer(ServeDir::new(config.upload_root())),
        )
        .layer(ConcurrencyLimitLayer::new(config.http_concurrency_limit()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// Upload routes. The channel ceiling is enforced while the body streams,
/// so axum's buffered-body limit is disabled here.
fn upload_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/uploads/images", API_PREFIX),
            post(upload_image),
        )
        .route(
            &format!("{}/uploads/videos", API_PREFIX),
            post(upload_video),
        )
        .layer(DefaultBodyLimit::disable())
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
