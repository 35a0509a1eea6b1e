use super::{LeaderboardStore, StorageError};
use crate::leaderboard::Leaderboard;
use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::collections::HashMap;

pub const DEFAULT_GIST_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_GIST_FILENAME: &str = "highscore.json";
const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("leaderboard-backend/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct GistStoreConfig {
    pub api_base: String,
    pub gist_id: String,
    pub token: String,
    pub filename: String,
}

/// Keeps the leaderboard as one JSON file inside a GitHub gist.
#[derive(Clone)]
pub struct GistStore {
    http: reqwest::Client,
    config: GistStoreConfig,
}

#[derive(Debug, Deserialize)]
struct Gist {
    #[serde(default)]
    files: Option<HashMap<String, Option<GistFile>>>,
}

#[derive(Debug, Deserialize)]
struct GistFile {
    #[serde(default)]
    content: Option<String>,
}

impl GistStore {
    pub fn new(http: reqwest::Client, config: GistStoreConfig) -> Self {
        Self { http, config }
    }

    fn gist_url(&self) -> String {
        format!(
            "{}/gists/{}",
            self.config.api_base.trim_end_matches('/'),
            self.config.gist_id
        )
    }

    async fn send(
        &self,
        method: Method,
        body: Option<Value>,
    ) -> Result<reqwest::Response, StorageError> {
        let mut request = self
            .http
            .request(method, self.gist_url())
            .bearer_auth(&self.config.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .header("User-Agent", USER_AGENT);
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await?;
        ensure_success(response).await
    }
}

#[async_trait]
impl LeaderboardStore for GistStore {
    async fn read(&self) -> Result<Leaderboard, StorageError> {
        let response = self.send(Method::GET, None).await?;
        let gist: Gist = decode_json(response).await?;
        let files = gist.files.unwrap_or_default();
        let content = files
            .get(&self.config.filename)
            .and_then(|file| file.as_ref())
            .and_then(|file| file.content.as_deref());
        match content {
            Some(content) => Ok(Leaderboard::from_document(content)),
            None => {
                tracing::info!(
                    filename = %self.config.filename,
                    "gist has no leaderboard file yet, starting empty"
                );
                Ok(Leaderboard::default())
            }
        }
    }

    async fn write(&self, leaderboard: &Leaderboard) -> Result<(), StorageError> {
        let content = leaderboard.to_document()?;
        let mut files = Map::new();
        files.insert(self.config.filename.clone(), json!({ "content": content }));
        let body = json!({ "files": files });
        self.send(Method::PATCH, Some(body)).await?;
        Ok(())
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StorageError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let detail = response.text().await.unwrap_or_default();
    Err(StorageError::Rejected {
        status: status.as_u16(),
        detail,
    })
}

async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, StorageError> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|error| StorageError::Decode(error.to_string()))
}
