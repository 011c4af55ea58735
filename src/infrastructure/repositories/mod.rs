pub mod http_talks_repository;
pub mod talks_repository;

pub use http_talks_repository::{HttpTalksRepository, TalkPayload};
pub use talks_repository::{TalkResponse, TalksApiError, TalksRepository};
