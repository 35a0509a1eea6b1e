use crate::moderation::DEFAULT_MODERATION_URL;
use crate::shared::names::Blocklist;
use crate::storage::{GistStoreConfig, DEFAULT_GIST_API_BASE, DEFAULT_GIST_FILENAME};
use anyhow::bail;
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Gist,
    Memory,
}

#[derive(Debug, Clone)]
pub struct LeaderboardConfig {
    pub port: u16,
    pub backend: StoreBackend,
    /// `None` when the gist id or token is missing; submissions then answer 500.
    pub gist: Option<GistStoreConfig>,
    pub blocklist: Blocklist,
    pub moderation_url: String,
}

impl LeaderboardConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let backend = match var("LEADERBOARD_STORE").as_deref() {
            None | Some("gist") => StoreBackend::Gist,
            Some("memory") => StoreBackend::Memory,
            Some(other) => bail!("LEADERBOARD_STORE must be 'gist' or 'memory', got '{other}'"),
        };

        let gist_id = var("GIST_ID").or_else(|| var("LEADERBOARD_GIST_ID"));
        let token = var("GITHUB_TOKEN").or_else(|| var("GIST_TOKEN"));
        let gist = match (gist_id, token) {
            (Some(gist_id), Some(token)) => Some(GistStoreConfig {
                api_base: var("GITHUB_API_URL")
                    .unwrap_or_else(|| DEFAULT_GIST_API_BASE.to_string()),
                gist_id,
                token,
                filename: var("LEADERBOARD_FILENAME")
                    .unwrap_or_else(|| DEFAULT_GIST_FILENAME.to_string()),
            }),
            _ => None,
        };

        Ok(Self {
            port: var("PORT")
                .and_then(|value| value.parse::<u16>().ok())
                .unwrap_or(8787),
            backend,
            gist,
            blocklist: var("LEADERBOARD_BLOCKLIST")
                .map(|raw| Blocklist::parse(&raw))
                .unwrap_or_default(),
            moderation_url: var("MODERATION_URL")
                .unwrap_or_else(|| DEFAULT_MODERATION_URL.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<LeaderboardConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        LeaderboardConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_without_credentials_leave_gist_unconfigured() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8787);
        assert_eq!(config.backend, StoreBackend::Gist);
        assert!(config.gist.is_none());
        assert!(config.blocklist.is_empty());
        assert_eq!(config.moderation_url, DEFAULT_MODERATION_URL);
    }

    #[test]
    fn gist_credentials_accept_fallback_names() {
        let config = config_from(&[("LEADERBOARD_GIST_ID", "g1"), ("GIST_TOKEN", "t1")]).unwrap();
        let gist = config.gist.expect("gist should be configured");
        assert_eq!(gist.gist_id, "g1");
        assert_eq!(gist.token, "t1");
        assert_eq!(gist.filename, "highscore.json");
        assert_eq!(gist.api_base, "https://api.github.com");
    }

    #[test]
    fn primary_names_win_and_blank_values_count_as_unset() {
        let config = config_from(&[
            ("GIST_ID", "primary"),
            ("LEADERBOARD_GIST_ID", "secondary"),
            ("GITHUB_TOKEN", "  "),
            ("GIST_TOKEN", "fallback"),
        ])
        .unwrap();
        let gist = config.gist.expect("gist should be configured");
        assert_eq!(gist.gist_id, "primary");
        assert_eq!(gist.token, "fallback");
    }

    #[test]
    fn missing_token_leaves_gist_unconfigured() {
        let config = config_from(&[("GIST_ID", "g1")]).unwrap();
        assert!(config.gist.is_none());
    }

    #[test]
    fn blocklist_and_backend_are_parsed() {
        let config = config_from(&[
            ("LEADERBOARD_BLOCKLIST", "Foo, bar"),
            ("LEADERBOARD_STORE", "memory"),
            ("PORT", "9000"),
        ])
        .unwrap();
        assert_eq!(config.blocklist.len(), 2);
        assert!(config.blocklist.matches("f00"));
        assert_eq!(config.backend, StoreBackend::Memory);
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let error = config_from(&[("LEADERBOARD_STORE", "redis")])
            .expect_err("unknown backend should fail");
        assert!(error.to_string().contains("LEADERBOARD_STORE"));
    }
}
