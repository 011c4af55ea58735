use super::error::{PollFailure, VideoServiceError};
use super::model::{Job, JobStatus, RenderRequest, RenderedVideo};
use super::script::ScriptPayload;
use crate::infrastructure::clock::Sleeper;
use crate::infrastructure::repositories::{TalksApiError, TalksRepository};
use async_trait::async_trait;
use moka::future::Cache;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

pub const DEFAULT_VOICE_ID: &str = "en-US-JennyNeural";
pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Fixed polling cadence: at most `max_attempts` status checks, `interval` apart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Catalog {
    Voices,
    Presenters,
}

/// Submits rendering jobs and waits for them to finish.
///
/// The default voice is read once per submission, so changing it never
/// waits on a job that is already polling.
pub struct VideoService {
    talks_repo: Arc<dyn TalksRepository>,
    sleeper: Arc<dyn Sleeper>,
    poll_settings: PollSettings,
    default_voice: RwLock<String>,
    catalog_cache: Option<Cache<Catalog, Value>>,
}

impl VideoService {
    pub fn new(
        talks_repo: Arc<dyn TalksRepository>,
        sleeper: Arc<dyn Sleeper>,
        default_voice: String,
        poll_settings: PollSettings,
        catalog_cache_enabled: bool,
    ) -> Self {
        let catalog_cache = if catalog_cache_enabled {
            Some(
                Cache::builder()
                    .max_capacity(2)
                    .time_to_live(Duration::from_secs(30 * 60))
                    .build(),
            )
        } else {
            None
        };

        Self {
            talks_repo,
            sleeper,
            poll_settings,
            default_voice: RwLock::new(default_voice),
            catalog_cache,
        }
    }

    pub async fn default_voice(&self) -> String {
        self.default_voice.read().await.clone()
    }

    /// Voice used by later submissions that don't name one
    pub async fn set_default_voice(&self, voice_id: impl Into<String>) {
        let voice_id = voice_id.into();
        tracing::info!(voice = %voice_id, "Default voice changed");
        *self.default_voice.write().await = voice_id;
    }

    pub fn poll_settings(&self) -> PollSettings {
        self.poll_settings
    }
}

#[async_trait]
pub trait VideoServiceApi: Send + Sync {
    /// Validate the request, shape the script and create a rendering job.
    ///
    /// Invalid requests are rejected before any network call. A failed
    /// creation call is never retried.
    async fn submit(&self, request: &RenderRequest) -> Result<Job, VideoServiceError>;

    /// Check the job's status at a fixed cadence until it is terminal or the
    /// attempt budget runs out. The first transport or HTTP error ends polling.
    async fn poll(&self, job: &mut Job) -> Result<RenderedVideo, VideoServiceError>;

    /// `submit` followed by `poll`
    async fn generate(&self, request: &RenderRequest) -> Result<RenderedVideo, VideoServiceError>;

    async fn list_voices(&self) -> Result<Value, VideoServiceError>;

    async fn list_presenters(&self) -> Result<Value, VideoServiceError>;

    async fn credits(&self) -> Result<Value, VideoServiceError>;
}

#[async_trait]
impl VideoServiceApi for VideoService {
    async fn submit(&self, request: &RenderRequest) -> Result<Job, VideoServiceError> {
        let source = request.validate()?;

        let voice_id = match request.voice_override() {
            Some(voice) => voice.to_string(),
            None => self.default_voice().await,
        };
        let script = ScriptPayload::from_request(request, &voice_id);

        tracing::info!(
            voice = %script.voice_id,
            ssml = script.ssml,
            text_length = script.input.len(),
            style = request.style_tag().unwrap_or("none"),
            "Submitting talk"
        );

        let response = self
            .talks_repo
            .create_talk(&script, &source)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Talk submission failed");
                VideoServiceError::Submission {
                    status: e.status(),
                    message: e.to_string(),
                }
            })?;

        let id = response
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| VideoServiceError::Submission {
                status: None,
                message: "talks API response did not include an id".to_string(),
            })?;

        tracing::info!(job_id = %id, "Talk created");

        Ok(Job::created(id))
    }

    async fn poll(&self, job: &mut Job) -> Result<RenderedVideo, VideoServiceError> {
        let PollSettings {
            max_attempts,
            interval,
        } = self.poll_settings;

        for attempt in 1..=max_attempts {
            if attempt > 1 {
                self.sleeper.sleep(interval).await;
            }

            tracing::info!(
                job_id = %job.id,
                attempt,
                max_attempts,
                "Checking talk status"
            );
            job.attempts = attempt;

            let response = self
                .talks_repo
                .get_talk(&job.id)
                .await
                .map_err(|e| poll_error(job, poll_failure_from(e)))?;

            let status = response
                .status
                .as_deref()
                .map(JobStatus::parse)
                .ok_or_else(|| poll_error(job, PollFailure::MissingStatus))?;

            tracing::info!(job_id = %job.id, status = %status, "Talk status");
            job.status = status.clone();

            if !status.is_terminal() {
                continue;
            }

            if status == JobStatus::Done {
                job.result_url = response.result_url.filter(|url| !url.is_empty());
                return match &job.result_url {
                    Some(url) => Ok(RenderedVideo {
                        job_id: job.id.clone(),
                        result_url: url.clone(),
                        attempts: attempt,
                    }),
                    None => Err(poll_error(job, PollFailure::MissingResultUrl)),
                };
            }

            job.error_detail = response.error.clone();
            return Err(poll_error(
                job,
                PollFailure::Failed {
                    status,
                    detail: response.error,
                },
            ));
        }

        tracing::warn!(
            job_id = %job.id,
            attempts = max_attempts,
            last_status = %job.status,
            "Talk did not finish in time"
        );

        Err(VideoServiceError::Timeout {
            job_id: job.id.clone(),
            attempts: max_attempts,
            last_status: job.status.clone(),
        })
    }

    async fn generate(&self, request: &RenderRequest) -> Result<RenderedVideo, VideoServiceError> {
        let mut job = self.submit(request).await?;
        let video = self.poll(&mut job).await?;

        tracing::info!(
            job_id = %video.job_id,
            attempts = video.attempts,
            result_url = %video.result_url,
            "Talk rendered"
        );

        Ok(video)
    }

    async fn list_voices(&self) -> Result<Value, VideoServiceError> {
        self.catalog(Catalog::Voices).await
    }

    async fn list_presenters(&self) -> Result<Value, VideoServiceError> {
        self.catalog(Catalog::Presenters).await
    }

    async fn credits(&self) -> Result<Value, VideoServiceError> {
        self.talks_repo.get_credits().await.map_err(catalog_error)
    }
}

impl VideoService {
    async fn catalog(&self, catalog: Catalog) -> Result<Value, VideoServiceError> {
        if let Some(cache) = &self.catalog_cache {
            if let Some(cached) = cache.get(&catalog).await {
                tracing::debug!(catalog = ?catalog, "Catalog cache hit");
                return Ok(cached);
            }
        }

        let result = match catalog {
            Catalog::Voices => self.talks_repo.list_voices().await,
            Catalog::Presenters => self.talks_repo.list_presenters().await,
        }
        .map_err(catalog_error)?;

        if let Some(cache) = &self.catalog_cache {
            cache.insert(catalog, result.clone()).await;
        }

        Ok(result)
    }
}

fn poll_failure_from(err: TalksApiError) -> PollFailure {
    match err {
        TalksApiError::Status { status, body } => PollFailure::Http { status, body },
        other => PollFailure::Transport(other.to_string()),
    }
}

fn poll_error(job: &Job, reason: PollFailure) -> VideoServiceError {
    tracing::error!(job_id = %job.id, reason = %reason, "Talk polling failed");
    VideoServiceError::Poll {
        job_id: job.id.clone(),
        reason,
    }
}

fn catalog_error(err: TalksApiError) -> VideoServiceError {
    VideoServiceError::Catalog {
        status: err.status(),
        message: err.to_string(),
    }
}
