use crate::shared::names::Blocklist;
use anyhow::{bail, Context};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

pub const DEFAULT_MODERATION_URL: &str = "https://vector.profanity.dev";
const MAX_MODERATED_LENGTH: usize = 1000;

/// Remote text classifier.
#[async_trait]
pub trait ModerationService: Send + Sync {
    async fn is_profane(&self, text: &str) -> anyhow::Result<bool>;
}

#[derive(Debug, Serialize)]
struct ProfanityRequest<'a> {
    message: &'a str,
}

#[derive(Clone)]
pub struct ProfanityApiClient {
    http: reqwest::Client,
    url: String,
}

impl ProfanityApiClient {
    pub fn new(http: reqwest::Client, url: String) -> Self {
        Self { http, url }
    }
}

#[async_trait]
impl ModerationService for ProfanityApiClient {
    async fn is_profane(&self, text: &str) -> anyhow::Result<bool> {
        let response = self
            .http
            .post(&self.url)
            .json(&ProfanityRequest { message: text })
            .send()
            .await
            .with_context(|| format!("moderation request failed for {}", self.url))?;
        let status = response.status();
        if !status.is_success() {
            bail!("moderation service returned {}", status.as_u16());
        }
        let body: Value = response
            .json()
            .await
            .context("failed to decode moderation response")?;
        Ok(body.get("isProfanity") == Some(&Value::Bool(true)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Blocklisted,
    Flagged,
}

impl Verdict {
    pub fn is_accepted(self) -> bool {
        self == Verdict::Accepted
    }
}

/// Local blocklist first, then the remote service; remote failures let the name through.
#[derive(Clone)]
pub struct ModerationGate {
    blocklist: Blocklist,
    service: Arc<dyn ModerationService>,
}

impl ModerationGate {
    pub fn new(blocklist: Blocklist, service: Arc<dyn ModerationService>) -> Self {
        Self { blocklist, service }
    }

    pub async fn review(&self, name: &str) -> Verdict {
        if name.is_empty() || name.chars().count() > MAX_MODERATED_LENGTH {
            return Verdict::Accepted;
        }
        if self.blocklist.matches(name) {
            tracing::info!("name rejected by blocklist");
            return Verdict::Blocklisted;
        }
        match self.service.is_profane(name).await {
            Ok(true) => {
                tracing::info!("name flagged by moderation service");
                Verdict::Flagged
            }
            Ok(false) => Verdict::Accepted,
            Err(error) => {
                tracing::warn!(?error, "moderation unavailable, accepting name");
                Verdict::Accepted
            }
        }
    }
}
