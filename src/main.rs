use anyhow::Context;
use std::env;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod leaderboard;
mod moderation;
mod shared;
mod storage;

use api::AppState;
use config::{LeaderboardConfig, StoreBackend};
use moderation::{ModerationGate, ProfanityApiClient};
use storage::{GistStore, LeaderboardStore, MemoryStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  init_tracing();

  let config = LeaderboardConfig::from_env().context("invalid leaderboard configuration")?;
  let http = reqwest::Client::new();

  let store: Option<Arc<dyn LeaderboardStore>> = match (config.backend, config.gist.clone()) {
    (StoreBackend::Memory, _) => {
      tracing::warn!("using in-memory leaderboard store, scores are lost on restart");
      Some(Arc::new(MemoryStore::new()))
    }
    (StoreBackend::Gist, Some(gist)) => {
      tracing::info!(gist_id = %gist.gist_id, filename = %gist.filename, "using gist leaderboard store");
      Some(Arc::new(GistStore::new(http.clone(), gist)))
    }
    (StoreBackend::Gist, None) => {
      tracing::warn!("GIST_ID or GITHUB_TOKEN missing, submissions will fail until configured");
      None
    }
  };

  tracing::info!(
    blocked_words = config.blocklist.len(),
    moderation_url = %config.moderation_url,
    "name moderation ready"
  );
  let moderation = ModerationGate::new(
    config.blocklist.clone(),
    Arc::new(ProfanityApiClient::new(http, config.moderation_url.clone())),
  );

  let app = api::router(Arc::new(AppState::new(store, moderation)));

  let address = format!("0.0.0.0:{}", config.port);
  tracing::info!("listening on {address}");

  let listener = tokio::net::TcpListener::bind(&address).await?;
  axum::serve(listener, app).await?;

  Ok(())
}

fn init_tracing() {
  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new("leaderboard_backend=info"));
  let json = env::var("LOG_FORMAT")
    .map(|value| value.eq_ignore_ascii_case("json"))
    .unwrap_or(false);

  if json {
    tracing_subscriber::fmt()
      .with_env_filter(filter)
      .with_target(false)
      .json()
      .init();
  } else {
    tracing_subscriber::fmt().with_env_filter(filter).init();
  }
}
