use super::error::VideoServiceError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Style name that means "no speaking style"
pub const DEFAULT_STYLE: &str = "default";

/// The avatar a talk is rendered with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisualSource {
    /// Caller-supplied image URL
    Image(String),
    /// Library presenter identifier
    Presenter(String),
}

/// Everything needed to submit one rendering job.
///
/// Exactly one of `image_url` / `presenter_id` must be set; blank strings count as unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderRequest {
    pub script_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default)]
    pub use_markup: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presenter_id: Option<String>,
}

impl RenderRequest {
    pub fn new(script_text: impl Into<String>) -> Self {
        Self {
            script_text: script_text.into(),
            ..Default::default()
        }
    }

    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn with_presenter(mut self, presenter_id: impl Into<String>) -> Self {
        self.presenter_id = Some(presenter_id.into());
        self
    }

    pub fn with_voice(mut self, voice_id: impl Into<String>) -> Self {
        self.voice_id = Some(voice_id.into());
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_markup(mut self, use_markup: bool) -> Self {
        self.use_markup = use_markup;
        self
    }

    /// Speaking style, if one other than the default was requested
    pub fn style_tag(&self) -> Option<&str> {
        non_blank(&self.style).filter(|style| !style.eq_ignore_ascii_case(DEFAULT_STYLE))
    }

    /// Voice override, if any
    pub fn voice_override(&self) -> Option<&str> {
        non_blank(&self.voice_id)
    }

    /// Resolve the image/presenter pair into a single source
    pub fn visual_source(&self) -> Result<VisualSource, VideoServiceError> {
        match (non_blank(&self.image_url), non_blank(&self.presenter_id)) {
            (Some(url), None) => Ok(VisualSource::Image(url.to_string())),
            (None, Some(id)) => Ok(VisualSource::Presenter(id.to_string())),
            (None, None) => Err(VideoServiceError::Invalid(
                "Either an image URL or a presenter id is required".to_string(),
            )),
            (Some(_), Some(_)) => Err(VideoServiceError::Invalid(
                "Provide an image URL or a presenter id, not both".to_string(),
            )),
        }
    }

    /// Check the request can be submitted; nothing here touches the network
    pub fn validate(&self) -> Result<VisualSource, VideoServiceError> {
        if self.script_text.trim().is_empty() {
            return Err(VideoServiceError::Invalid(
                "Script text cannot be empty".to_string(),
            ));
        }
        self.visual_source()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Lifecycle state reported by the talks API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Created,
    Processing,
    Done,
    Error,
    Rejected,
    /// Any state the API reports that we don't model (e.g. "started")
    Other(String),
}

impl JobStatus {
    pub fn parse(status: &str) -> Self {
        match status {
            "created" => JobStatus::Created,
            "processing" => JobStatus::Processing,
            "done" => JobStatus::Done,
            "error" => JobStatus::Error,
            "rejected" => JobStatus::Rejected,
            other => JobStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Created => "created",
            JobStatus::Processing => "processing",
            JobStatus::Done => "done",
            JobStatus::Error => "error",
            JobStatus::Rejected => "rejected",
            JobStatus::Other(status) => status,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Done | JobStatus::Error | JobStatus::Rejected
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A submitted rendering job, updated in place while polling
#[derive(Debug, Clone)]
pub struct Job {
    pub id: String,
    pub status: JobStatus,
    pub result_url: Option<String>,
    pub error_detail: Option<Value>,
    /// Status queries issued so far
    pub attempts: u32,
}

impl Job {
    pub fn created(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: JobStatus::Created,
            result_url: None,
            error_detail: None,
            attempts: 0,
        }
    }
}

/// Successful outcome of a job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedVideo {
    pub job_id: String,
    pub result_url: String,
    pub attempts: u32,
}
