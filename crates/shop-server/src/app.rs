//! Router

use std::path::PathBuf;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::handlers::{create_checkout, get_product, health_check, list_paths};
use crate::state::AppState;

/// Build the application router
///
/// Unknown paths fall through to the WASM frontend; client routes such as
/// `/product/{id}` resolve to its `index.html`.
pub fn router(state: AppState) -> Router {
    let static_dir = PathBuf::from(&state.config.static_dir);
    let frontend =
        ServeDir::new(&static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/health", get(health_check))
        // Product page data
        .route("/api/paths", get(list_paths))
        .route("/api/products/{id}", get(get_product))
        // Payments
        .route("/api/checkout", post(create_checkout))
        .fallback_service(frontend)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
