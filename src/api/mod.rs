mod error;
mod submission;

use error::{ErrorResponse, SubmitError};
use submission::Submission;

use crate::leaderboard::{Leaderboard, ScoreEntry};
use crate::moderation::ModerationGate;
use crate::storage::LeaderboardStore;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::Instrument;

pub struct AppState {
    /// Absent when storage credentials were not configured.
    store: Option<Arc<dyn LeaderboardStore>>,
    moderation: ModerationGate,
}

#[derive(Debug, Serialize)]
struct OkResponse {
    ok: bool,
}

impl AppState {
    pub fn new(store: Option<Arc<dyn LeaderboardStore>>, moderation: ModerationGate) -> Self {
        Self { store, moderation }
    }

    fn store(&self) -> Result<&Arc<dyn LeaderboardStore>, SubmitError> {
        self.store.as_ref().ok_or(SubmitError::NotConfigured)
    }

    /// Validates a raw submission body and merges it into the stored board.
    pub async fn submit(&self, body: &[u8]) -> Result<Leaderboard, SubmitError> {
        let store = self.store()?;
        let submission = Submission::from_body(body)?;

        let verdict = self.moderation.review(&submission.name).await;
        if !verdict.is_accepted() {
            tracing::info!(?verdict, "submission rejected");
            return Err(SubmitError::NameRejected);
        }

        let current = store.read().await.map_err(SubmitError::Load)?;
        let entry = ScoreEntry::new(submission.name, submission.score);
        let board = current.merge(entry);
        store.write(&board).await.map_err(SubmitError::Save)?;

        tracing::info!(
            score = submission.score,
            entries = board.len(),
            "leaderboard updated"
        );
        Ok(board)
    }

    pub async fn current(&self) -> Result<Leaderboard, SubmitError> {
        self.store()?.read().await.map_err(SubmitError::Load)
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/health", get(health))
        .route("/api/leaderboard", get(leaderboard_get))
        .route(
            "/api/submit-score",
            post(submit_score).fallback(method_not_allowed),
        )
        .layer(cors)
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(OkResponse { ok: true })
}

async fn leaderboard_get(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.current().await {
        Ok(board) => (StatusCode::OK, Json(board)).into_response(),
        Err(error) => error.into_response(),
    }
}

async fn submit_score(State(state): State<Arc<AppState>>, body: Bytes) -> impl IntoResponse {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("submit_score", %request_id);
    match state.submit(&body).instrument(span).await {
        Ok(board) => (StatusCode::OK, Json(board)).into_response(),
        Err(error) => error.into_response(),
    }
}

async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse {
            error: "Method not allowed".to_string(),
            detail: None,
        }),
    )
}
