use super::model::JobStatus;
use crate::error::AppError;
use serde_json::Value;

/// Why polling a job stopped without a video
#[derive(Debug, thiserror::Error)]
pub enum PollFailure {
    #[error("status request returned {status}: {body}")]
    Http { status: u16, body: String },
    #[error("status request failed: {0}")]
    Transport(String),
    #[error("status response did not include a status")]
    MissingStatus,
    #[error("job ended with status '{status}'{}", detail_suffix(.detail))]
    Failed {
        status: JobStatus,
        detail: Option<Value>,
    },
    #[error("job finished without a result url")]
    MissingResultUrl,
}

fn detail_suffix(detail: &Option<Value>) -> String {
    match detail {
        Some(detail) => format!(": {}", detail),
        None => String::new(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum VideoServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("submission failed: {message}")]
    Submission {
        status: Option<u16>,
        message: String,
    },
    #[error("polling job {job_id} failed: {reason}")]
    Poll { job_id: String, reason: PollFailure },
    #[error("job {job_id} still '{last_status}' after {attempts} status checks")]
    Timeout {
        job_id: String,
        attempts: u32,
        last_status: JobStatus,
    },
    #[error("catalog request failed: {message}")]
    Catalog {
        status: Option<u16>,
        message: String,
    },
}

impl From<VideoServiceError> for AppError {
    fn from(err: VideoServiceError) -> Self {
        let message = err.to_string();
        match err {
            VideoServiceError::Invalid(msg) => AppError::BadRequest(msg),
            VideoServiceError::Submission { status, .. }
            | VideoServiceError::Catalog { status, .. } => match status {
                Some(401) | Some(403) => AppError::Unauthorized(message),
                Some(402) => AppError::PaymentRequired(message),
                Some(400) => AppError::BadRequest(message),
                _ => AppError::ExternalService(message),
            },
            VideoServiceError::Poll { .. } => AppError::ExternalService(message),
            VideoServiceError::Timeout { .. } => AppError::GatewayTimeout(message),
        }
    }
}
