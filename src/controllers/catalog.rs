use axum::{extract::State, Json};
use serde_json::Value;
use std::sync::Arc;

use crate::{
    domain::video::{VideoService, VideoServiceApi},
    error::AppResult,
};

/// Read-only passthrough of the provider's catalogs
pub struct CatalogController {
    video_service: Arc<VideoService>,
}

impl CatalogController {
    pub fn new(video_service: Arc<VideoService>) -> Self {
        Self { video_service }
    }

    /// GET /api/voices
    pub async fn list_voices(
        State(controller): State<Arc<CatalogController>>,
    ) -> AppResult<Json<Value>> {
        let voices = controller.video_service.list_voices().await?;
        Ok(Json(voices))
    }

    /// GET /api/presenters
    pub async fn list_presenters(
        State(controller): State<Arc<CatalogController>>,
    ) -> AppResult<Json<Value>> {
        let presenters = controller.video_service.list_presenters().await?;
        Ok(Json(presenters))
    }

    /// GET /api/credits
    pub async fn get_credits(
        State(controller): State<Arc<CatalogController>>,
    ) -> AppResult<Json<Value>> {
        let credits = controller.video_service.credits().await?;
        Ok(Json(credits))
    }
}
