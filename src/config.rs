// src/config.rs
//! Runtime configuration read from environment variables.
//!
//! Every variable may also be given with a `VITE_` prefix so an existing
//! web-client `.env` file can be reused unchanged.

use std::path::PathBuf;

use crate::error::{ChatError, Result};

pub const DEFAULT_DIFY_API_URL: &str = "https://api.dify.ai/v1";
pub const DEFAULT_HISTORY_LIMIT: usize = 100;
pub const DEFAULT_CONVERSATION_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct DifyConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

/// Where message history goes, if anywhere.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreConfig {
    Supabase(SupabaseConfig),
    Sqlite(PathBuf),
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub dify: DifyConfig,
    pub store: StoreConfig,
    pub user_id: String,
    pub history_limit: usize,
    pub conversation_limit: usize,
    pub log_dir: PathBuf,
    pub debug: bool,
}

impl AppConfig {
    /// Load `.env` (if present) and read the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| -> Option<String> {
            lookup(key)
                .or_else(|| lookup(&format!("VITE_{}", key)))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let base_url = get("DIFY_API_URL")
            .unwrap_or_else(|| DEFAULT_DIFY_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let dify = DifyConfig {
            base_url,
            api_key: get("DIFY_API_KEY"),
        };

        let store = match (get("SUPABASE_URL"), get("SUPABASE_ANON_KEY")) {
            (Some(url), Some(anon_key)) => StoreConfig::Supabase(SupabaseConfig {
                url: url.trim_end_matches('/').to_string(),
                anon_key,
            }),
            _ => match get("CHAT_SQLITE_PATH") {
                Some(path) => StoreConfig::Sqlite(PathBuf::from(path)),
                None => StoreConfig::None,
            },
        };

        let user_id = get("CHAT_USER_ID").unwrap_or_else(|| {
            format!("tui-user-{}", chrono::Utc::now().timestamp_millis())
        });

        Ok(Self {
            dify,
            store,
            user_id,
            history_limit: parse_limit(
                get("CHAT_HISTORY_LIMIT"),
                "CHAT_HISTORY_LIMIT",
                DEFAULT_HISTORY_LIMIT,
            )?,
            conversation_limit: parse_limit(
                get("CHAT_CONVERSATION_LIMIT"),
                "CHAT_CONVERSATION_LIMIT",
                DEFAULT_CONVERSATION_LIMIT,
            )?,
            log_dir: PathBuf::from(
                get("CHAT_LOG_DIR").unwrap_or_else(|| "./logs".to_string()),
            ),
            debug: get("DEBUG").as_deref() == Some("true"),
        })
    }

    pub fn persistence_enabled(&self) -> bool {
        !matches!(self.store, StoreConfig::None)
    }
}

fn parse_limit(value: Option<String>, name: &str, default: usize) -> Result<usize> {
    match value {
        None => Ok(default),
        Some(raw) => match raw.parse::<usize>() {
            Ok(0) | Err(_) => Err(ChatError::Config(format!(
                "{} must be a positive integer, got '{}'",
                name, raw
            ))),
            Ok(n) => Ok(n),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_without_any_variables() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.dify.base_url, DEFAULT_DIFY_API_URL);
        assert!(config.dify.api_key.is_none());
        assert_eq!(config.store, StoreConfig::None);
        assert!(!config.persistence_enabled());
        assert!(config.user_id.starts_with("tui-user-"));
        assert_eq!(config.history_limit, 100);
        assert_eq!(config.conversation_limit, 20);
    }

    #[test]
    fn vite_prefixed_names_are_accepted() {
        let config = config_from(&[
            ("VITE_DIFY_API_URL", "http://localhost:5001/v1/"),
            ("VITE_DIFY_API_KEY", "app-123"),
            ("VITE_SUPABASE_URL", "https://example.supabase.co"),
            ("VITE_SUPABASE_ANON_KEY", "anon"),
        ])
        .unwrap();
        assert_eq!(config.dify.base_url, "http://localhost:5001/v1");
        assert_eq!(config.dify.api_key.as_deref(), Some("app-123"));
        assert!(matches!(config.store, StoreConfig::Supabase(_)));
    }

    #[test]
    fn blank_supabase_credentials_disable_persistence() {
        let config = config_from(&[("SUPABASE_URL", "https://x.supabase.co"), ("SUPABASE_ANON_KEY", "   ")]).unwrap();
        assert_eq!(config.store, StoreConfig::None);
    }

    #[test]
    fn sqlite_path_used_when_hosted_store_missing() {
        let config = config_from(&[("CHAT_SQLITE_PATH", "/tmp/chat.db")]).unwrap();
        assert_eq!(config.store, StoreConfig::Sqlite(PathBuf::from("/tmp/chat.db")));
        assert!(config.persistence_enabled());
    }

    #[test]
    fn invalid_limit_is_a_config_error() {
        let err = config_from(&[("CHAT_HISTORY_LIMIT", "zero")]).unwrap_err();
        assert!(err.to_string().contains("CHAT_HISTORY_LIMIT"));
    }
}
