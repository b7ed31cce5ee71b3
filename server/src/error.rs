use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use this_life_scraper::ArchiveError;
use tokio::task::JoinError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to list episodes: {0}")]
    Archive(#[from] ArchiveError),

    #[error("episode listing task failed: {0}")]
    Task(#[from] JoinError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        log::error!("{}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
