use super::{LeaderboardStore, StorageError};
use crate::leaderboard::Leaderboard;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Process-local store for development runs and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    board: Mutex<Leaderboard>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_board(board: Leaderboard) -> Self {
        Self {
            board: Mutex::new(board),
        }
    }
}

#[async_trait]
impl LeaderboardStore for MemoryStore {
    async fn read(&self) -> Result<Leaderboard, StorageError> {
        Ok(self.board.lock().await.clone())
    }

    async fn write(&self, leaderboard: &Leaderboard) -> Result<(), StorageError> {
        *self.board.lock().await = leaderboard.clone();
        Ok(())
    }
}
