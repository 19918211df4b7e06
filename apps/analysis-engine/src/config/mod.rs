//! Configuration for the analysis engine.
//!
//! Analysis parameters and provider endpoints load from YAML; anything
//! omitted falls back to its default. Credentials are never read from
//! the file, only from environment variables.
//!
//! # Usage
//!
//! ```rust,ignore
//! use analysis_engine::config::load_config;
//!
//! // Load from the default path (config.yaml), falling back to defaults
//! let config = load_config(None)?;
//!
//! // Load from a custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//! ```

use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::ports::HistorySpan;
use crate::application::use_cases::AnalysisSettings;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Missing required environment variable.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Analysis parameters.
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Provider endpoints.
    #[serde(default)]
    pub providers: ProvidersConfig,
}

/// Analysis parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Hypothetical percentage moves to simulate, in order.
    #[serde(default = "default_percent_changes")]
    pub percent_changes: Vec<Decimal>,
    /// Trailing window for the daily-change analysis, in days.
    #[serde(default = "default_history_window_days")]
    pub history_window_days: i64,
    /// Span requested from the historical price feed.
    #[serde(default)]
    pub history_span: HistorySpan,
    /// Horizon for put/call volume aggregation, in days.
    #[serde(default = "default_put_call_horizon_days")]
    pub put_call_horizon_days: i64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            percent_changes: default_percent_changes(),
            history_window_days: default_history_window_days(),
            history_span: HistorySpan::default(),
            put_call_horizon_days: default_put_call_horizon_days(),
        }
    }
}

impl AnalysisConfig {
    /// Convert into the use case's settings.
    #[must_use]
    pub fn settings(&self) -> AnalysisSettings {
        AnalysisSettings {
            percent_changes: self.percent_changes.clone(),
            history_window_days: self.history_window_days,
            history_span: self.history_span,
            put_call_horizon_days: self.put_call_horizon_days,
        }
    }
}

fn default_percent_changes() -> Vec<Decimal> {
    vec![dec!(1), dec!(10), dec!(20)]
}

const fn default_history_window_days() -> i64 {
    90
}

const fn default_put_call_horizon_days() -> i64 {
    60
}

/// Provider endpoint configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Brokerage API.
    #[serde(default)]
    pub brokerage: BrokerageProviderConfig,
    /// Supplementary market data API.
    #[serde(default)]
    pub market: MarketProviderConfig,
    /// News search API.
    #[serde(default)]
    pub news: NewsProviderConfig,
    /// Language-model advisor API.
    #[serde(default)]
    pub advisor: AdvisorProviderConfig,
}

/// Brokerage API endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerageProviderConfig {
    /// Base URL.
    #[serde(default = "default_brokerage_url")]
    pub api_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BrokerageProviderConfig {
    fn default() -> Self {
        Self {
            api_url: default_brokerage_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl BrokerageProviderConfig {
    /// Request timeout as a `Duration`.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Supplementary market data API endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketProviderConfig {
    /// Base URL.
    #[serde(default = "default_market_url")]
    pub api_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for MarketProviderConfig {
    fn default() -> Self {
        Self {
            api_url: default_market_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl MarketProviderConfig {
    /// Request timeout as a `Duration`.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// News search API endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsProviderConfig {
    /// Base URL.
    #[serde(default = "default_news_url")]
    pub api_url: String,
    /// Number of articles to fetch.
    #[serde(default = "default_news_results")]
    pub results: u8,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for NewsProviderConfig {
    fn default() -> Self {
        Self {
            api_url: default_news_url(),
            results: default_news_results(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl NewsProviderConfig {
    /// Request timeout as a `Duration`.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Language-model advisor API endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorProviderConfig {
    /// Base URL.
    #[serde(default = "default_advisor_url")]
    pub api_url: String,
    /// Model name.
    #[serde(default = "default_advisor_model")]
    pub model: String,
    /// Token budget for the narrative completion.
    #[serde(default = "default_advisor_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature.
    #[serde(default = "default_advisor_temperature")]
    pub temperature: f32,
    /// Request timeout in seconds.
    #[serde(default = "default_advisor_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AdvisorProviderConfig {
    fn default() -> Self {
        Self {
            api_url: default_advisor_url(),
            model: default_advisor_model(),
            max_tokens: default_advisor_max_tokens(),
            temperature: default_advisor_temperature(),
            timeout_secs: default_advisor_timeout_secs(),
        }
    }
}

impl AdvisorProviderConfig {
    /// Request timeout as a `Duration`.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_brokerage_url() -> String {
    "https://api.robinhood.com".to_string()
}

fn default_market_url() -> String {
    "https://query1.finance.yahoo.com".to_string()
}

fn default_news_url() -> String {
    "https://www.googleapis.com".to_string()
}

fn default_advisor_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_advisor_model() -> String {
    "gpt-4".to_string()
}

const fn default_advisor_max_tokens() -> u32 {
    600
}

const fn default_advisor_temperature() -> f32 {
    0.7
}

const fn default_timeout_secs() -> u64 {
    15
}

const fn default_advisor_timeout_secs() -> u64 {
    60
}

const fn default_news_results() -> u8 {
    5
}

/// Load configuration from a YAML file.
///
/// With no explicit path, a missing `config.yaml` is not an error: the
/// defaults are used. An explicit path must exist.
///
/// # Errors
///
/// Returns error if the file cannot be read (when required) or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let (path, required) = match path {
        Some(p) => (p, true),
        None => (DEFAULT_CONFIG_PATH, false),
    };

    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(source) if !required && source.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path, "no config file, using defaults");
            return Ok(Config::default());
        }
        Err(source) => {
            return Err(ConfigError::ReadError {
                path: path.to_string(),
                source,
            });
        }
    };

    let config: Config = serde_yaml_bw::from_str(&raw)?;
    Ok(config)
}

/// Read a required environment variable.
///
/// # Errors
///
/// Returns [`ConfigError::MissingEnvVar`] when unset or empty.
pub fn require_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}
