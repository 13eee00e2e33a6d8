//! `api` crate — HTTP REST API layer.
//!
//! Exposes:
//!   POST   /api/v1/pets
//!   GET    /api/v1/pets?page=&size=
//!   GET    /api/v1/pets/{id}
//!   PUT    /api/v1/pets/{id}
//!   DELETE /api/v1/pets/{id}
//!   GET    /health

pub mod config;
pub mod error;
pub mod handlers;

use axum::{http::HeaderValue, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use config::ServerConfig;
pub use error::{ApiError, ErrorCode, ErrorResponseBody};
pub use handlers::AppState;

/// Base path of the pet resource.
pub const PETS_PATH: &str = "/api/v1/pets";

/// Build the application router.
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    let pets = Router::new()
        .route("/", get(handlers::pets::list).post(handlers::pets::create))
        .route(
            "/:id",
            get(handlers::pets::get)
                .put(handlers::pets::update)
                .delete(handlers::pets::delete),
        );

    let router = Router::new()
        .route("/health", get(handlers::health))
        .nest(PETS_PATH, pets)
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    match cors_layer(&config.cors_origins) {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    if origins.is_empty() {
        return None;
    }
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {origin:?}");
                None
            }
        })
        .collect();
    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(Any)
            .allow_headers(Any),
    )
}

/// Bind `config.bind` and serve until Ctrl-C.
pub async fn serve(config: &ServerConfig, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(&config.bind).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state, config))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
