use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use axum::http::StatusCode;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;

use crate::TripPlanner;
use crate::api;
use crate::config::ServerConfig;

/// The full application: API routes under `/api` plus cross-cutting layers
pub fn app(planner: Arc<TripPlanner>, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api::router(planner))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(cors)
}

pub async fn run(planner: TripPlanner, config: &ServerConfig) -> Result<()> {
    let app = app(
        Arc::new(planner),
        Duration::from_secs(config.request_timeout_seconds),
    );

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Cannot bind to {addr}"))?;
    tracing::info!("Web server running at http://{}", addr);

    axum::serve(listener, app)
        .await
        .with_context(|| "Server error")?;
    Ok(())
}
