use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{catalog::CatalogController, health, video::VideoController};
use crate::infrastructure::auth::request_id_middleware;
use crate::infrastructure::config::Config;

/// Assemble all routes
pub fn build_router(
    video_controller: Arc<VideoController>,
    catalog_controller: Arc<CatalogController>,
) -> Router {
    let video_routes = Router::new()
        .route("/api/videos", post(VideoController::generate))
        .route(
            "/api/voices/default",
            get(VideoController::get_default_voice).put(VideoController::set_default_voice),
        )
        .with_state(video_controller);

    let catalog_routes = Router::new()
        .route("/api/voices", get(CatalogController::list_voices))
        .route("/api/presenters", get(CatalogController::list_presenters))
        .route("/api/credits", get(CatalogController::get_credits))
        .with_state(catalog_controller);

    Router::new()
        .route("/health", get(health::health))
        .merge(video_routes)
        .merge(catalog_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_id_middleware))
                .layer(CorsLayer::permissive()),
        )
}

/// Bind and serve until the process stops
pub async fn start_http_server(config: &Config, app: Router) -> anyhow::Result<()> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
