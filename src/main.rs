use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use avatar_talks::controllers::{catalog::CatalogController, video::VideoController};
use avatar_talks::domain::video::VideoService;
use avatar_talks::infrastructure::clock::TokioSleeper;
use avatar_talks::infrastructure::config::{Config, LogFormat};
use avatar_talks::infrastructure::http::{build_router, start_http_server};
use avatar_talks::infrastructure::repositories::HttpTalksRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting avatar-talks on {}:{}",
        config.host,
        config.port
    );

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Talks API repository (owns the credential)
    let talks_repo = Arc::new(HttpTalksRepository::new(
        &config.talks_api_base_url,
        &config.bearer_token,
    ));

    // 2. Video service
    let poll_settings = config.poll_settings();
    tracing::info!(
        max_attempts = poll_settings.max_attempts,
        interval_secs = poll_settings.interval.as_secs(),
        default_voice = %config.default_voice_id,
        catalog_cache = config.catalog_cache_enabled,
        "Video service settings"
    );
    let video_service = Arc::new(VideoService::new(
        talks_repo,
        Arc::new(TokioSleeper),
        config.default_voice_id.clone(),
        poll_settings,
        config.catalog_cache_enabled,
    ));

    // 3. Controllers
    let video_controller = Arc::new(VideoController::new(video_service.clone()));
    let catalog_controller = Arc::new(CatalogController::new(video_service));

    let app = build_router(video_controller, catalog_controller);
    start_http_server(&config, app)
        .await
        .context("HTTP server failed")?;

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "avatar_talks=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
