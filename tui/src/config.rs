//! Configuration for the todo client

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use todo_core::CancelBehavior;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the todo API
    pub api_url: String,
    /// What Esc does on an open update surface
    pub cancel_behavior: CancelBehavior,
    /// Clear the creation form after submitting
    pub clear_on_submit: bool,
    /// Extra attempts for the first list fetch
    pub initial_fetch_retries: u32,
    /// Pause between initial fetch attempts (milliseconds)
    pub retry_delay_ms: u64,
    /// Log file used in interactive mode
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            cancel_behavior: CancelBehavior::Discard,
            clear_on_submit: false,
            initial_fetch_retries: 2,
            retry_delay_ms: 500,
            log_file: PathBuf::from("todo_tui.log"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let cancel_behavior = match std::env::var("TODO_CANCEL_BEHAVIOR") {
            Ok(val) => val
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))
                .context("Failed to parse environment variable TODO_CANCEL_BEHAVIOR")?,
            Err(_) => defaults.cancel_behavior,
        };

        Ok(Config {
            api_url: std::env::var("TODO_API_URL").unwrap_or(defaults.api_url),
            cancel_behavior,
            clear_on_submit: parse_env_var("TODO_CLEAR_ON_SUBMIT")?
                .unwrap_or(defaults.clear_on_submit),
            initial_fetch_retries: parse_env_var("TODO_INITIAL_FETCH_RETRIES")?
                .unwrap_or(defaults.initial_fetch_retries),
            retry_delay_ms: parse_env_var("TODO_RETRY_DELAY_MS")?
                .unwrap_or(defaults.retry_delay_ms),
            log_file: std::env::var("TODO_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
        })
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = self.api_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "API URL must start with http:// or https://, got '{}'",
                self.api_url
            ));
        }
        if url.trim_end_matches('/').ends_with("://") {
            return Err(anyhow::anyhow!("API URL has no host: '{}'", self.api_url));
        }
        Ok(())
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.cancel_behavior, CancelBehavior::Discard);
        assert!(!config.clear_on_submit);
        assert_eq!(config.initial_fetch_retries, 2);
        assert_eq!(config.retry_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_config_validation() {
        Config::default().validate().unwrap();

        let config = Config {
            api_url: "https://todo.example.com/".to_string(),
            ..Config::default()
        };
        config.validate().unwrap();
    }

    #[test]
    fn test_config_rejects_bad_urls() {
        for url in ["localhost:8000", "ftp://x", "http://", ""] {
            let config = Config {
                api_url: url.to_string(),
                ..Config::default()
            };
            assert!(config.validate().is_err(), "{url}");
        }
    }

    #[test]
    fn test_parse_env_var_reports_name() {
        std::env::set_var("TODO_TEST_BAD_NUMBER", "many");
        let err = parse_env_var::<u32>("TODO_TEST_BAD_NUMBER").unwrap_err();
        assert!(err.to_string().contains("TODO_TEST_BAD_NUMBER"));
        std::env::remove_var("TODO_TEST_BAD_NUMBER");
    }
}
