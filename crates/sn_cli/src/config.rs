//! Runtime configuration read from environment variables.
//!
//! Every setting has a default, so the binary starts offline with demo
//! credentials and falls back to demo articles and demo translations.

use std::net::SocketAddr;

use sn_news::client::{DEFAULT_BASE_URL, DEMO_API_TOKEN};
use sn_translate::providers::libre::DEFAULT_LIBRETRANSLATE_URL;

pub const DEFAULT_BIND: &str = "0.0.0.0:5000";
pub const DEFAULT_DATABASE: &str = "sportnews.db";

#[derive(Clone)]
pub struct AppConfig {
    pub bind_address: String,
    pub database_path: String,
    pub log_level: String,
    pub news_api_key: String,
    pub news_api_url: String,
    pub google_api_key: Option<String>,
    pub google_url: Option<String>,
    pub libretranslate_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. Empty values count as
    /// unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_owned());

        Self {
            bind_address: or("SPORTNEWS_BIND", DEFAULT_BIND),
            database_path: or("SPORTNEWS_DATABASE", DEFAULT_DATABASE),
            log_level: or("SPORTNEWS_LOG", "info"),
            news_api_key: or("NEWS_API_KEY", DEMO_API_TOKEN),
            news_api_url: or("NEWS_API_URL", DEFAULT_BASE_URL),
            google_api_key: get("GOOGLE_TRANSLATE_API_KEY"),
            google_url: get("GOOGLE_TRANSLATE_URL"),
            libretranslate_url: or("LIBRETRANSLATE_URL", DEFAULT_LIBRETRANSLATE_URL),
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        self.bind_address
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid bind address {}: {}", self.bind_address, e))
    }

    pub fn translation(&self) -> sn_translate::Config {
        sn_translate::Config {
            google_api_key: self.google_api_key.clone(),
            google_url: self.google_url.clone(),
            libretranslate_url: Some(self.libretranslate_url.clone()),
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_address", &self.bind_address)
            .field("database_path", &self.database_path)
            .field("log_level", &self.log_level)
            .field("news_api_key", &"<redacted>")
            .field("news_api_url", &self.news_api_url)
            .field("google_api_key", &self.google_api_key.as_ref().map(|_| "<redacted>"))
            .field("google_url", &self.google_url)
            .field("libretranslate_url", &self.libretranslate_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_work_offline() {
        let config = config_from(&[]);
        assert_eq!(config.bind_address, DEFAULT_BIND);
        assert_eq!(config.database_path, DEFAULT_DATABASE);
        assert_eq!(config.news_api_key, "demo_key");
        assert_eq!(config.news_api_url, "https://api.thenewsapi.com/v1/news");
        assert!(config.google_api_key.is_none());
        assert_eq!(config.socket_addr().unwrap().port(), 5000);
    }

    #[test]
    fn test_overrides_and_blank_values() {
        let config = config_from(&[
            ("SPORTNEWS_BIND", "127.0.0.1:8080"),
            ("NEWS_API_KEY", "live"),
            ("GOOGLE_TRANSLATE_API_KEY", "  "),
            ("LIBRETRANSLATE_URL", "http://localhost:5001"),
        ]);
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(config.news_api_key, "live");
        assert!(config.google_api_key.is_none());
        assert_eq!(
            config.translation().libretranslate_url.as_deref(),
            Some("http://localhost:5001")
        );
    }

    #[test]
    fn test_debug_hides_keys() {
        let config = config_from(&[("NEWS_API_KEY", "hunter2"), ("GOOGLE_TRANSLATE_API_KEY", "g-key")]);
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("g-key"));
    }

    #[test]
    fn test_invalid_bind_is_an_error() {
        assert!(config_from(&[("SPORTNEWS_BIND", "nowhere")]).socket_addr().is_err());
    }
}
