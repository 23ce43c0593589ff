//! Advisor configuration
//!
//! Settings come from an optional TOML file in the platform data directory,
//! overlaid by environment variables. The file is entirely optional; with no
//! configuration at all the advisor simply runs in local-fallback mode.
//!
//! `~/.local/share/kharcha/config/advisor.toml`:
//!
//! ```toml
//! api_url = "https://api-inference.example.com/models/fin-advisor"
//! model = "fin-advisor"
//! max_new_tokens = 256
//! temperature = 0.7
//! top_p = 0.9
//! timeout_secs = 30
//! ```
//!
//! Environment variables: `ADVISOR_API_URL`, `ADVISOR_API_TOKEN`,
//! `ADVISOR_MODEL`, `ADVISOR_TIMEOUT_SECS`. The token is env-only so it
//! never lands in a config file.

use std::path::PathBuf;

use serde::Deserialize;
use tracing::warn;

/// Advisor backend settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Hosted inference endpoint; the advisor is remote-capable only when set
    pub api_url: Option<String>,
    /// Bearer token for the hosted endpoint (env-only, never in the file)
    #[serde(skip)]
    pub api_token: Option<String>,
    /// Model name, for logging and the answer metadata
    pub model: String,
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub timeout_secs: u64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_token: None,
            model: "gpt2".to_string(),
            max_new_tokens: 256,
            temperature: 0.7,
            top_p: 0.9,
            timeout_secs: 30,
        }
    }
}

impl AdvisorConfig {
    /// Load the config file (if any) and overlay environment variables
    pub fn load() -> Self {
        let mut config = Self::from_file().unwrap_or_default();
        config.apply_env();
        config
    }

    /// Build purely from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("ADVISOR_API_URL") {
            if !url.trim().is_empty() {
                self.api_url = Some(url);
            }
        }
        if let Ok(token) = std::env::var("ADVISOR_API_TOKEN") {
            if !token.trim().is_empty() {
                self.api_token = Some(token);
            }
        }
        if let Ok(model) = std::env::var("ADVISOR_MODEL") {
            if !model.trim().is_empty() {
                self.model = model;
            }
        }
        if let Ok(timeout) = std::env::var("ADVISOR_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => self.timeout_secs = secs,
                Err(_) => warn!("Ignoring invalid ADVISOR_TIMEOUT_SECS: {}", timeout),
            }
        }
    }

    fn from_file() -> Option<Self> {
        let path = Self::config_path()?;
        let content = std::fs::read_to_string(&path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Failed to parse {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Platform config path, e.g. ~/.local/share/kharcha/config/advisor.toml
    fn config_path() -> Option<PathBuf> {
        Some(dirs::data_dir()?.join("kharcha").join("config").join("advisor.toml"))
    }

    /// Whether remote generation is possible at all
    pub fn remote_capable(&self) -> bool {
        self.api_url.is_some() && self.api_token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AdvisorConfig::default();
        assert!(!config.remote_capable());
        assert_eq!(config.max_new_tokens, 256);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_parse_toml() {
        let config: AdvisorConfig = toml::from_str(
            r#"
            api_url = "https://inference.example.com/models/m"
            model = "m"
            max_new_tokens = 128
            "#,
        )
        .unwrap();
        assert_eq!(config.api_url.as_deref(), Some("https://inference.example.com/models/m"));
        assert_eq!(config.model, "m");
        assert_eq!(config.max_new_tokens, 128);
        // Unspecified fields keep their defaults
        assert_eq!(config.timeout_secs, 30);
        // Token never comes from the file
        assert!(config.api_token.is_none());
    }
}
