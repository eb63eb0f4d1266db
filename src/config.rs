//! Configuration system for the `critique` tool.

use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::openrouter::OPENROUTER_API_URL;

/// Default model requested from OpenRouter
pub const DEFAULT_MODEL: &str = "mistralai/mistral-7b-instruct:free";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 90;

/// API request settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    /// Model identifier sent with each request
    pub model: String,
    /// Seconds to wait for a response before giving up
    pub timeout_secs: u64,
    /// Endpoint override for OpenAI-compatible gateways
    pub base_url: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            base_url: None,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
}

impl Config {
    /// Load config from file, returning default config if file doesn't exist
    pub fn load() -> Self {
        Self::load_from_path(Self::config_path())
    }

    /// Load config from a specific path
    pub fn load_from_path(path: Option<PathBuf>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        std::fs::read_to_string(&path)
            .ok()
            .and_then(|contents| toml::from_str(&contents).ok())
            .unwrap_or_default()
    }

    /// Get the config file path (~/.config/critique/config.toml)
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("critique").join("config.toml"))
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(model) = env::var("CRITIQUE_MODEL") {
            if !model.is_empty() {
                self.api.model = model;
            }
        }

        if let Ok(secs) = env::var("CRITIQUE_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse::<u64>() {
                self.api.timeout_secs = secs;
            }
        }
    }

    /// Endpoint to talk to, honoring the base URL override.
    pub fn endpoint(&self) -> String {
        self.api
            .base_url
            .clone()
            .unwrap_or_else(|| OPENROUTER_API_URL.to_string())
    }
}

/// Generate default config as TOML string
pub fn generate_default_config() -> String {
    r#"# critique - AI code review configuration
# Place this file at ~/.config/critique/config.toml

[api]
# Model identifier sent with each request
model = "mistralai/mistral-7b-instruct:free"

# Seconds to wait for a response before giving up
timeout_secs = 90

# Endpoint override for OpenAI-compatible gateways (rarely needed)
# base_url = "https://openrouter.ai/api/v1/chat/completions"

# Environment variable overrides:
# CRITIQUE_MODEL         - model identifier
# CRITIQUE_TIMEOUT_SECS  - request timeout in seconds
# OPENROUTER_API_KEY     - API key (wins over the credential file)
"#
    .to_string()
}

/// Print the default config to stdout
pub fn print_default_config() {
    print!("{}", generate_default_config());
}
