//! Runtime configuration.
//!
//! Values come from the process environment, after an optional `.env` file
//! has been loaded. Every variable has a default so the assistant starts with
//! no configuration at all.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::actors::llm::OllamaConfig;
use crate::error::AppError;
use crate::models::LlmModel;
use crate::website::{DEFAULT_SCRAPE_TIMEOUT, DEFAULT_SITE_URL};

pub const ENV_DATA_FILE: &str = "GARJE_DATA_FILE";
pub const ENV_OLLAMA_URL: &str = "OLLAMA_BASE_URL";
pub const ENV_MODEL: &str = "GARJE_MODEL";
pub const ENV_SITE_URL: &str = "GARJE_SITE_URL";
pub const ENV_SCRAPE_TIMEOUT: &str = "GARJE_SCRAPE_TIMEOUT_SECS";
pub const ENV_LLM_TIMEOUT: &str = "GARJE_LLM_TIMEOUT_SECS";
pub const ENV_HOST: &str = "GARJE_HOST";
pub const ENV_PORT: &str = "GARJE_PORT";

const DEFAULT_DATA_FILE: &str = "almashines_data.json";
const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    /// Path of the JSON snapshot with `users` and `jobs`.
    pub data_file: PathBuf,
    pub ollama_url: String,
    /// Model used when a request does not name one.
    pub default_model: LlmModel,
    pub site_url: String,
    pub scrape_timeout: Duration,
    /// `None` lets the LLM call run as long as the server takes.
    pub llm_timeout: Option<Duration>,
    pub host: String,
    pub port: u16,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            default_model: LlmModel::default(),
            site_url: DEFAULT_SITE_URL.to_string(),
            scrape_timeout: DEFAULT_SCRAPE_TIMEOUT,
            llm_timeout: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl AgentConfig {
    /// Reads the configuration from the current environment only.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let config = Self {
            data_file: var(ENV_DATA_FILE)
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
            ollama_url: match var(ENV_OLLAMA_URL) {
                Some(raw) => parse_url(ENV_OLLAMA_URL, &raw)?,
                None => defaults.ollama_url,
            },
            default_model: match var(ENV_MODEL) {
                Some(raw) => raw
                    .parse()
                    .map_err(|e| AppError::Config(format!("{}: {}", ENV_MODEL, e)))?,
                None => defaults.default_model,
            },
            site_url: match var(ENV_SITE_URL) {
                Some(raw) => parse_url(ENV_SITE_URL, &raw)?,
                None => defaults.site_url,
            },
            scrape_timeout: match var(ENV_SCRAPE_TIMEOUT) {
                Some(raw) => Duration::from_secs(parse_number(ENV_SCRAPE_TIMEOUT, &raw)?),
                None => defaults.scrape_timeout,
            },
            llm_timeout: var(ENV_LLM_TIMEOUT)
                .map(|raw| parse_number(ENV_LLM_TIMEOUT, &raw).map(Duration::from_secs))
                .transpose()?,
            host: var(ENV_HOST).unwrap_or(defaults.host),
            port: match var(ENV_PORT) {
                Some(raw) => parse_number(ENV_PORT, &raw)?,
                None => defaults.port,
            },
        };

        Ok(config)
    }

    pub fn ollama(&self) -> OllamaConfig {
        OllamaConfig {
            base_url: self.ollama_url.clone(),
            timeout: self.llm_timeout,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Loads variables from `path`, or from the nearest `.env` when `None`.
/// Variables already set in the process win. Returns whether a file was read.
pub fn load_env_file(path: Option<&Path>) -> bool {
    match path {
        Some(path) => dotenv::from_path(path).is_ok(),
        None => dotenv::dotenv().is_ok(),
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validates a base URL and drops any trailing slash.
fn parse_url(key: &str, raw: &str) -> Result<String, AppError> {
    let url = Url::parse(raw).map_err(|e| AppError::Config(format!("{}: {}", key, e)))?;
    Ok(url.as_str().trim_end_matches('/').to_string())
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, AppError> {
    raw.parse()
        .map_err(|_| AppError::Config(format!("{} must be a non-negative integer, got '{}'", key, raw)))
}
