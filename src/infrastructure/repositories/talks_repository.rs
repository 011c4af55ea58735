use crate::domain::video::{ScriptPayload, VisualSource};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Body returned by the talks API for both creation and status calls.
/// Every field is optional; callers decide which ones they require.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TalkResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub result_url: Option<String>,
    #[serde(default)]
    pub error: Option<Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum TalksApiError {
    #[error("talks API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("request to talks API failed: {0}")]
    Transport(String),
    #[error("could not decode talks API response: {0}")]
    Decode(String),
}

impl TalksApiError {
    /// HTTP status of the failed call, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            TalksApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Remote talking-avatar rendering service.
///
/// Implementations own the credential and send the same `authorization`
/// header on every call. No call is retried.
#[async_trait]
pub trait TalksRepository: Send + Sync {
    /// Create a rendering job
    async fn create_talk(
        &self,
        script: &ScriptPayload,
        source: &VisualSource,
    ) -> Result<TalkResponse, TalksApiError>;

    /// Fetch the current state of a job
    async fn get_talk(&self, talk_id: &str) -> Result<TalkResponse, TalksApiError>;

    /// Raw voice catalog
    async fn list_voices(&self) -> Result<Value, TalksApiError>;

    /// Raw presenter catalog
    async fn list_presenters(&self) -> Result<Value, TalksApiError>;

    /// Remaining and used credits for the account
    async fn get_credits(&self) -> Result<Value, TalksApiError>;
}
