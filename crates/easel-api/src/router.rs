use std::path::Path;
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::logging;
use crate::routes::{generate, health, images};
use crate::state::AppState;

/// Assemble the full application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let frontend_dir = state.config.storage.frontend_dir.clone();
    let index = Path::new(&frontend_dir).join("index.html");

    // Unknown paths fall back to the SPA entry document so client-side
    // routes survive a page reload.
    let frontend = ServeDir::new(&frontend_dir).not_found_service(ServeFile::new(index));

    let api_routes = Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Generation & history
        .route("/generate", post(generate::generate_image))
        .route("/generate/history", get(generate::get_history))
        .route("/generate/clear", post(generate::clear_history))
        .route("/generate/stats", get(generate::get_stats))
        // Images
        .route("/image/download-all", get(images::download_all))
        .route("/image/:filename", get(images::get_image));

    // Build full router with middleware
    Router::new()
        .merge(api_routes)
        .fallback_service(frontend)
        .layer(middleware::from_fn(logging::log_request))
        .layer(TimeoutLayer::new(std::time::Duration::from_secs(300))) // generation can take minutes
        .layer(CompressionLayer::new())
        .layer(build_cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    if config.cors.enabled {
        let cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers(Any);

        if config.cors.origins.iter().any(|o| o == "*") {
            cors.allow_origin(Any)
        } else {
            let parsed_origins: Vec<axum::http::HeaderValue> = config
                .cors
                .origins
                .iter()
                .filter_map(|o| o.parse::<axum::http::HeaderValue>().ok())
                .collect();

            cors.allow_origin(parsed_origins)
        }
    } else {
        CorsLayer::permissive()
    }
}
