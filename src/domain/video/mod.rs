pub mod error;
pub mod model;
pub mod script;
pub mod service;

pub use error::{PollFailure, VideoServiceError};
pub use model::{Job, JobStatus, RenderRequest, RenderedVideo, VisualSource, DEFAULT_STYLE};
pub use script::{looks_like_markup, ScriptPayload};
pub use service::{PollSettings, VideoService, VideoServiceApi, DEFAULT_VOICE_ID};
