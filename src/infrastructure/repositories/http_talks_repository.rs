use super::talks_repository::{TalkResponse, TalksApiError, TalksRepository};
use crate::domain::video::{ScriptPayload, VisualSource};
use crate::infrastructure::auth::{select_auth_header, AuthHeader};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

const TALKS_PATH: &str = "/talks";
const VOICES_PATH: &str = "/tts/voices";
const PRESENTERS_PATH: &str = "/clips/presenters";
const CREDITS_PATH: &str = "/credits";

/// Voices are synthesized by the provider's neural voices
const VOICE_PROVIDER: &str = "microsoft";

/// Wire body of a talk creation call
#[derive(Debug, Serialize)]
pub struct TalkPayload<'a> {
    pub script: ScriptBlock<'a>,
    pub config: ConfigBlock,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presenter_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct ScriptBlock<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub subtitles: bool,
    pub provider: VoiceProvider<'a>,
    pub ssml: bool,
    pub input: &'a str,
}

#[derive(Debug, Serialize)]
pub struct VoiceProvider<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub voice_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ConfigBlock {
    pub fluent: bool,
    pub pad_audio: f32,
}

impl<'a> TalkPayload<'a> {
    pub fn new(script: &'a ScriptPayload, source: &'a VisualSource) -> Self {
        let (source_url, presenter_id) = match source {
            VisualSource::Image(url) => (Some(url.as_str()), None),
            VisualSource::Presenter(id) => (None, Some(id.as_str())),
        };

        Self {
            script: ScriptBlock {
                kind: "text",
                subtitles: false,
                provider: VoiceProvider {
                    kind: VOICE_PROVIDER,
                    voice_id: &script.voice_id,
                },
                ssml: script.ssml,
                input: &script.input,
            },
            config: ConfigBlock {
                fluent: false,
                pad_audio: 0.0,
            },
            source_url,
            presenter_id,
        }
    }
}

/// Talks API client over reqwest
pub struct HttpTalksRepository {
    http_client: reqwest::Client,
    base_url: String,
    auth: AuthHeader,
}

impl HttpTalksRepository {
    pub fn new(base_url: &str, credential: &str) -> Self {
        let auth = select_auth_header(credential);
        tracing::info!(
            scheme = %auth.scheme(),
            base_url = %base_url,
            "Talks API client configured"
        );

        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, TalksApiError> {
        let response = self
            .http_client
            .get(url)
            .header("accept", "application/json")
            .header("authorization", self.auth.value())
            .send()
            .await
            .map_err(|e| TalksApiError::Transport(e.to_string()))?;

        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, TalksApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(TalksApiError::Status {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| TalksApiError::Decode(e.to_string()))
}

#[async_trait]
impl TalksRepository for HttpTalksRepository {
    async fn create_talk(
        &self,
        script: &ScriptPayload,
        source: &VisualSource,
    ) -> Result<TalkResponse, TalksApiError> {
        let url = self.url(TALKS_PATH);
        let payload = TalkPayload::new(script, source);

        tracing::info!(
            scheme = %self.auth.scheme(),
            endpoint = %url,
            voice = %script.voice_id,
            ssml = script.ssml,
            text_length = script.input.len(),
            "Creating talk"
        );

        let response = self
            .http_client
            .post(&url)
            .header("accept", "application/json")
            .header("content-type", "application/json")
            .header("authorization", self.auth.value())
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, endpoint = %url, "Talk creation request failed");
                TalksApiError::Transport(e.to_string())
            })?;

        tracing::info!(status = response.status().as_u16(), "Talk creation responded");

        read_json(response).await
    }

    async fn get_talk(&self, talk_id: &str) -> Result<TalkResponse, TalksApiError> {
        let url = format!(
            "{}/{}",
            self.url(TALKS_PATH),
            urlencoding::encode(talk_id)
        );
        self.get_json(&url).await
    }

    async fn list_voices(&self) -> Result<Value, TalksApiError> {
        self.get_json(&self.url(VOICES_PATH)).await
    }

    async fn list_presenters(&self) -> Result<Value, TalksApiError> {
        self.get_json(&self.url(PRESENTERS_PATH)).await
    }

    async fn get_credits(&self) -> Result<Value, TalksApiError> {
        self.get_json(&self.url(CREDITS_PATH)).await
    }
}
