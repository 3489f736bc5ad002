//! Configuration types and loading
//!
//! Configuration is a TOML file with environment-variable overrides for the
//! sink credentials, so container deployments can inject secrets without
//! modifying the file.

use crate::constants::export;
use anyhow::Result;
use serde::{Deserialize, Serialize};

fn default_source() -> String {
    "pizza-service".to_string()
}

fn default_interval_secs() -> u64 {
    export::DEFAULT_INTERVAL_SECS
}

fn default_timeout_secs() -> u64 {
    export::DEFAULT_TIMEOUT_SECS
}

/// Top-level service configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// Monitoring sink configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Monitoring sink configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricsConfig {
    /// Sink endpoint URL metric samples are POSTed to
    #[serde(default)]
    pub url: String,

    /// Source label attached to every sample
    #[serde(default = "default_source")]
    pub source: String,

    /// First half of the bearer credential pair
    #[serde(default)]
    pub user_id: String,

    /// Second half of the bearer credential pair
    #[serde(default)]
    pub api_key: String,

    /// Seconds between export ticks
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Per-push request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            source: default_source(),
            user_id: String::new(),
            api_key: String::new(),
            interval_secs: default_interval_secs(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Validate the loaded configuration
    pub fn validate(&self) -> Result<()> {
        if self.metrics.interval_secs == 0 {
            anyhow::bail!("metrics.interval_secs must be greater than zero");
        }
        if self.metrics.timeout_secs == 0 {
            anyhow::bail!("metrics.timeout_secs must be greater than zero");
        }
        if self.metrics.url.is_empty() {
            tracing::warn!("metrics.url is empty; metric pushes will fail until it is set");
        }
        Ok(())
    }
}

/// Load configuration from a TOML file, with environment variable overrides
///
/// Sink settings take precedence from the environment:
/// `PIZZA_METRICS_URL`, `PIZZA_METRICS_SOURCE`, `PIZZA_METRICS_USER_ID`,
/// `PIZZA_METRICS_API_KEY`.
pub fn load_config(config_path: &str) -> Result<Config> {
    let config_content = std::fs::read_to_string(config_path)
        .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", config_path, e))?;

    let mut config: Config = toml::from_str(&config_content)
        .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", config_path, e))?;

    apply_env_overrides(&mut config.metrics);
    config.validate()?;

    Ok(config)
}

fn apply_env_overrides(metrics: &mut MetricsConfig) {
    if let Ok(url) = std::env::var("PIZZA_METRICS_URL") {
        tracing::info!("using metrics sink URL from environment");
        metrics.url = url;
    }
    if let Ok(source) = std::env::var("PIZZA_METRICS_SOURCE") {
        metrics.source = source;
    }
    if let Ok(user_id) = std::env::var("PIZZA_METRICS_USER_ID") {
        metrics.user_id = user_id;
    }
    if let Ok(api_key) = std::env::var("PIZZA_METRICS_API_KEY") {
        metrics.api_key = api_key;
    }
}

/// Create a default configuration for examples/testing
#[must_use]
pub fn create_default_config() -> Config {
    Config {
        metrics: MetricsConfig {
            url: "https://otlp.example.com/v1/metrics".to_string(),
            source: "pizza-service-dev".to_string(),
            ..Default::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.metrics.interval_secs, 10);
        assert_eq!(config.metrics.timeout_secs, 5);
        assert_eq!(config.metrics.source, "pizza-service");
        assert!(config.metrics.url.is_empty());
    }

    #[test]
    fn test_toml_round_trip() -> Result<()> {
        let config = create_default_config();
        let serialized = toml::to_string_pretty(&config)?;
        let parsed: Config = toml::from_str(&serialized)?;
        assert_eq!(parsed, config);
        Ok(())
    }

    #[test]
    fn test_partial_file_fills_defaults() -> Result<()> {
        let config: Config = toml::from_str(
            r#"
[metrics]
url = "https://sink.example.com/v1/metrics"
user_id = "123"
api_key = "secret"
"#,
        )?;

        assert_eq!(config.metrics.url, "https://sink.example.com/v1/metrics");
        assert_eq!(config.metrics.user_id, "123");
        assert_eq!(config.metrics.interval_secs, 10);
        assert_eq!(config.metrics.source, "pizza-service");
        Ok(())
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config: Config = toml::from_str(
            r#"
[metrics]
interval_secs = 0
"#,
        )
        .expect("parse");

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("interval_secs"));
    }
}
