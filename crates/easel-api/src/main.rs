use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use easel_api::{config::Config, router::build_router, state::AppState};
use easel_gateway::{HttpImageGenerator, ImageGenerator};
use easel_store::{HistoryStore, ImageStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config =
        Config::load().map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    // Initialize logging
    init_logging(&config);

    tracing::info!("Starting Easel API server");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);

    // Client for the remote generation service
    tracing::info!("Generation service: {}", config.generator.base_url);
    let generator: Arc<dyn ImageGenerator> = Arc::new(HttpImageGenerator::new(
        config.generator.base_url.clone(),
        Some(Duration::from_secs(config.generator.timeout_secs)),
    )?);

    // Local stores
    let history = HistoryStore::new(&config.storage.history_path);
    let images = ImageStore::new(&config.storage.output_dir);
    images.ensure_dir().await?;
    tracing::info!("Output directory ready: {}", config.storage.output_dir);

    // Create application state
    let state = Arc::new(AppState::new(config, history, images, generator));

    // Build router
    let app = build_router(state.clone());

    // Start server
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
