mod gist;
mod memory;

pub use gist::{GistStore, GistStoreConfig, DEFAULT_GIST_API_BASE, DEFAULT_GIST_FILENAME};
pub use memory::MemoryStore;

use crate::leaderboard::Leaderboard;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage responded with status {status}")]
    Rejected { status: u16, detail: String },

    #[error("storage request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("storage response could not be decoded: {0}")]
    Decode(String),

    #[error("leaderboard could not be serialized: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persistence for the single leaderboard document.
#[async_trait]
pub trait LeaderboardStore: Send + Sync {
    async fn read(&self) -> Result<Leaderboard, StorageError>;
    async fn write(&self, leaderboard: &Leaderboard) -> Result<(), StorageError>;
}
