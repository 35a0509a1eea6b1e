use crate::storage::StorageError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Invalid body")]
    InvalidBody,

    #[error("Please choose a different name.")]
    NameRejected,

    #[error("Leaderboard not configured. Set GIST_ID and GITHUB_TOKEN.")]
    NotConfigured,

    #[error("Failed to load leaderboard")]
    Load(#[source] StorageError),

    #[error("Failed to save leaderboard")]
    Save(#[source] StorageError),
}

impl SubmitError {
    pub fn status(&self) -> StatusCode {
        match self {
            SubmitError::InvalidBody | SubmitError::NameRejected => StatusCode::BAD_REQUEST,
            SubmitError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            SubmitError::Load(source) | SubmitError::Save(source) => match source {
                StorageError::Rejected { .. } => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for SubmitError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            SubmitError::Load(StorageError::Rejected { status: upstream, detail })
            | SubmitError::Save(StorageError::Rejected { status: upstream, detail }) => {
                tracing::warn!(upstream = *upstream, %detail, "leaderboard storage rejected request");
                ErrorResponse {
                    error: self.to_string(),
                    detail: Some(detail.clone()),
                }
            }
            SubmitError::Load(source) | SubmitError::Save(source) => {
                tracing::error!(error = %source, "leaderboard storage failed");
                ErrorResponse {
                    error: source.to_string(),
                    detail: None,
                }
            }
            other => ErrorResponse {
                error: other.to_string(),
                detail: None,
            },
        };
        (status, Json(body)).into_response()
    }
}
