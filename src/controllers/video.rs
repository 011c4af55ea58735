use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    domain::video::{looks_like_markup, RenderRequest, RenderedVideo, VideoService, VideoServiceApi},
    error::{AppError, AppResult},
};

/// Request for POST /api/videos
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateVideoRequest {
    pub script: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// When absent, markup mode is inferred from the script text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_markup: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presenter_id: Option<String>,
}

impl From<GenerateVideoRequest> for RenderRequest {
    fn from(request: GenerateVideoRequest) -> Self {
        let use_markup = request
            .use_markup
            .unwrap_or_else(|| looks_like_markup(&request.script));

        RenderRequest {
            script_text: request.script,
            voice_id: request.voice_id,
            style: request.style,
            use_markup,
            image_url: request.image_url,
            presenter_id: request.presenter_id,
        }
    }
}

/// Body of GET/PUT /api/voices/default
#[derive(Debug, Serialize, Deserialize)]
pub struct DefaultVoice {
    pub voice_id: String,
}

pub struct VideoController {
    video_service: Arc<VideoService>,
    job_gate: Mutex<()>,
}

impl VideoController {
    pub fn new(video_service: Arc<VideoService>) -> Self {
        Self {
            video_service,
            job_gate: Mutex::new(()),
        }
    }

    /// POST /api/videos - Render a talking-avatar video and wait for its URL.
    /// Jobs run one at a time; later requests queue behind the gate.
    pub async fn generate(
        State(controller): State<Arc<VideoController>>,
        Json(request): Json<GenerateVideoRequest>,
    ) -> AppResult<Json<RenderedVideo>> {
        let request = RenderRequest::from(request);
        request.validate()?;

        let _job = controller.job_gate.lock().await;
        let video = controller.video_service.generate(&request).await?;

        Ok(Json(video))
    }

    /// GET /api/voices/default
    pub async fn get_default_voice(
        State(controller): State<Arc<VideoController>>,
    ) -> Json<DefaultVoice> {
        Json(DefaultVoice {
            voice_id: controller.video_service.default_voice().await,
        })
    }

    /// PUT /api/voices/default - Applies to the next submission; a job already
    /// polling keeps the voice it was submitted with
    pub async fn set_default_voice(
        State(controller): State<Arc<VideoController>>,
        Json(request): Json<DefaultVoice>,
    ) -> AppResult<StatusCode> {
        let voice_id = request.voice_id.trim();
        if voice_id.is_empty() {
            return Err(AppError::BadRequest("voice_id cannot be empty".to_string()));
        }

        controller.video_service.set_default_voice(voice_id).await;

        Ok(StatusCode::NO_CONTENT)
    }
}
