pub mod v1;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    routing::get,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{AppState, handlers};

/// Build the full application router: health probe, versioned API,
/// tracing, CORS and the upload body limit.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state);
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/v1", v1::create_v1_router(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(body_limit)
        .with_state(state)
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
