//! Configuration loading and environment resolution
//!
//! The base URL resolves through an explicit prioritized lookup: the
//! `--base-url` flag, then `$RAGENGINE_URL`, then `http://$INGRESS_IP`,
//! then the config file; the first non-empty value wins and is passed
//! explicitly down the call chain. The model resolves the same way through
//! `$RAGENGINE_MODEL`.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::chunker::{DEFAULT_MAX_CHARS, DEFAULT_OVERLAP_CHARS};
use ragclient::client::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_RETRIES, DEFAULT_TIMEOUT_SECS};

/// Environment variable holding the full base URL
pub const BASE_URL_ENV: &str = "RAGENGINE_URL";

/// Environment variable holding the ingress IP the base URL derives from
pub const INGRESS_IP_ENV: &str = "INGRESS_IP";

/// Environment variable holding the default chat model
pub const MODEL_ENV: &str = "RAGENGINE_MODEL";

/// Compatibility model identifier used when nothing else is configured
pub const DEFAULT_MODEL: &str = "example_model";

/// Optional YAML config file supplying defaults that flags override
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the RagEngine service (lowest-priority source)
    #[serde(rename = "base-url")]
    pub base_url: Option<String>,

    /// Default chat model identifier
    pub model: Option<String>,

    /// Max characters per chunk
    #[serde(rename = "max-chars")]
    pub max_chars: usize,

    /// Overlap characters between chunks
    #[serde(rename = "overlap-chars")]
    pub overlap_chars: usize,

    /// Total HTTP timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// HTTP connect timeout in seconds
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Total HTTP attempts per request
    pub retries: u32,

    /// Default system message for chat mode
    pub system: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            model: None,
            max_chars: DEFAULT_MAX_CHARS,
            overlap_chars: DEFAULT_OVERLAP_CHARS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            retries: DEFAULT_RETRIES,
            system: "You are a helpful assistant.".to_string(),
        }
    }
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            return Self::load_from_file(config_path)
                .context(format!("Failed to load config from {}", config_path.display()));
        }

        let default_paths = [
            Some(PathBuf::from(".ragingest.yml")),
            dirs::config_dir().map(|p| p.join("ragingest").join("ragingest.yml")),
        ];

        for candidate in default_paths.iter().flatten() {
            if candidate.exists() {
                return Self::load_from_file(candidate)
                    .context(format!("Failed to load config from {}", candidate.display()));
            }
        }

        Ok(Config::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        tracing::debug!(path = %path.as_ref().display(), "loaded config");
        Ok(config)
    }
}

/// Resolve the service base URL: flag, then `$RAGENGINE_URL`, then
/// `http://$INGRESS_IP`, then the config file. Returns `None` when every
/// source is empty.
pub fn resolve_base_url(flag: Option<&str>, config: &Config) -> Option<String> {
    resolve_base_url_with(flag, config, |name| std::env::var(name).ok())
}

/// Same as [`resolve_base_url`] with an injectable environment lookup
pub fn resolve_base_url_with<F>(flag: Option<&str>, config: &Config, env: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(flag.map(str::to_string))
        .or_else(|| non_empty(env(BASE_URL_ENV)))
        .or_else(|| non_empty(env(INGRESS_IP_ENV)).map(|ip| format!("http://{}", ip)))
        .or_else(|| non_empty(config.base_url.clone()))
}

/// Resolve the chat model: flag, then `$RAGENGINE_MODEL`, then the config
/// file, then [`DEFAULT_MODEL`]
pub fn resolve_model(flag: Option<&str>, config: &Config) -> String {
    resolve_model_with(flag, config, |name| std::env::var(name).ok())
}

/// Same as [`resolve_model`] with an injectable environment lookup
pub fn resolve_model_with<F>(flag: Option<&str>, config: &Config, env: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(flag.map(str::to_string))
        .or_else(|| non_empty(env(MODEL_ENV)))
        .or_else(|| non_empty(config.model.clone()))
        .unwrap_or_else(|| DEFAULT_MODEL.to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
