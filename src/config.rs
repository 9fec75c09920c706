// src/config.rs
//! Client configuration and token resolution.

use crate::constants::{
    API_BASE_URL, API_VERSION, DEFAULT_RETRIES, DEFAULT_TIMEOUT_SECS, TOKEN_ENV_VAR,
};
use crate::error::{AppError, Result};
use log::LevelFilter;
use serde::Deserialize;
use url::Url;

/// How a [`NotionClient`](crate::api::NotionClient) reaches the API.
///
/// Deserializes from a partial record; missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_version: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Extra attempts after a connection failure or timeout.
    pub retries: u32,
    /// When set, the client installs a console logger at this level.
    /// Otherwise whatever logger the application installed is used.
    pub log_level: Option<LevelFilter>,
    /// Environment variable read when no token is passed explicitly.
    pub token_env_var: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
            api_version: API_VERSION.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retries: DEFAULT_RETRIES,
            log_level: None,
            token_env_var: TOKEN_ENV_VAR.to_string(),
        }
    }
}

impl ClientConfig {
    /// Parses the base URL, making sure it ends in `/` so endpoint paths
    /// join below it rather than replacing its last segment.
    pub fn validate(&self) -> Result<Url> {
        let mut raw = self.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let url = Url::parse(&raw)
            .map_err(|e| AppError::Config(format!("Invalid base URL '{}': {}", self.base_url, e)))?;
        if url.cannot_be_a_base() {
            return Err(AppError::Config(format!(
                "Base URL '{}' cannot have paths joined onto it",
                self.base_url
            )));
        }
        if self.api_version.trim().is_empty() {
            return Err(AppError::Config("API version must not be empty".to_string()));
        }
        Ok(url)
    }

    /// The explicit token if given, else the configured environment variable.
    pub fn resolve_token(&self, explicit: Option<&str>) -> Result<String> {
        if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
            return Ok(token.to_string());
        }
        match std::env::var(&self.token_env_var) {
            Ok(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
            _ => Err(AppError::Config(format!(
                "No API token given and environment variable {} is not set",
                self.token_env_var
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://api.notion.com/v1/");
        assert_eq!(config.api_version, "2022-06-28");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.retries, 0);
        assert_eq!(config.log_level, None);
        assert_eq!(config.token_env_var, "NOTION_TOKEN");
    }

    #[test]
    fn test_partial_record_fills_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"timeout_secs": 30, "log_level": "debug"}"#).unwrap();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.log_level, Some(LevelFilter::Debug));
        assert_eq!(config.api_version, API_VERSION);
    }

    #[test]
    fn test_validate_normalises_trailing_slash() {
        let config = ClientConfig {
            base_url: "http://localhost:8080/v1".to_string(),
            ..Default::default()
        };
        let url = config.validate().unwrap();
        assert_eq!(url.join("users/me").unwrap().as_str(), "http://localhost:8080/v1/users/me");
    }

    #[test]
    fn test_validate_rejects_garbage() {
        let config = ClientConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_explicit_token_wins() {
        let config = ClientConfig {
            token_env_var: "NOTIONKIT_TEST_UNSET_TOKEN_A".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_token(Some("secret_abc")).unwrap(), "secret_abc");
    }

    #[test]
    fn test_missing_token_is_config_error() {
        let config = ClientConfig {
            token_env_var: "NOTIONKIT_TEST_UNSET_TOKEN_B".to_string(),
            ..Default::default()
        };
        let err = config.resolve_token(None).unwrap_err();
        assert!(matches!(err, AppError::Config(ref msg) if msg.contains("NOTIONKIT_TEST_UNSET_TOKEN_B")));
        assert!(config.resolve_token(Some("  ")).is_err());
    }
}
