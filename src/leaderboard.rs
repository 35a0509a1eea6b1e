use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

pub const LEADERBOARD_MAX: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    #[serde(deserialize_with = "whole_score")]
    pub score: u64,
}

/// Accepts any non-negative whole number, including float spellings like `5.0`.
fn whole_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let number = Number::deserialize(deserializer)?;
    if let Some(score) = number.as_u64() {
        return Ok(score);
    }
    match number.as_f64() {
        Some(score) if score >= 0.0 && score.fract() == 0.0 && score <= u64::MAX as f64 => {
            Ok(score as u64)
        }
        _ => Err(de::Error::custom(format!(
            "score {number} is not a non-negative whole number"
        ))),
    }
}

impl ScoreEntry {
    pub fn new(name: impl Into<String>, score: u64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Top scores, highest first. Also the shape of the stored document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Leaderboard {
    pub scores: Vec<ScoreEntry>,
}

impl Leaderboard {
    pub fn new(scores: Vec<ScoreEntry>) -> Self {
        Self { scores }
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Parses stored document content. Anything unusable yields an empty board.
    pub fn from_document(content: &str) -> Self {
        if content.trim().is_empty() {
            return Self::default();
        }
        let document = match serde_json::from_str::<Value>(content) {
            Ok(document) => document,
            Err(error) => {
                tracing::warn!(%error, "stored leaderboard is not valid json, starting empty");
                return Self::default();
            }
        };
        let Some(Value::Array(items)) = document.get("scores") else {
            tracing::warn!("stored leaderboard has no scores array, starting empty");
            return Self::default();
        };

        let scores = items
            .iter()
            .filter_map(|item| match ScoreEntry::deserialize(item) {
                Ok(entry) => Some(entry),
                Err(error) => {
                    tracing::warn!(%error, %item, "dropping malformed stored score entry");
                    None
                }
            })
            .collect();
        Self { scores }
    }

    /// Pretty-printed document written back to storage.
    pub fn to_document(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Inserts `entry`, keeps the order stable for equal scores and caps the board.
    pub fn merge(mut self, entry: ScoreEntry) -> Self {
        self.scores.push(entry);
        self.scores.sort_by(|a, b| b.score.cmp(&a.score));
        self.scores.truncate(LEADERBOARD_MAX);
        self
    }
}
