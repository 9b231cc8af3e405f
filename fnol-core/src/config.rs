use std::time::Duration;

use crate::analyzer::DEFAULT_MODEL;
use crate::error::{FnolError, Result};
use crate::webhook::DEFAULT_WEBHOOK_TIMEOUT;

pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";
pub const WEBHOOK_URL_VAR: &str = "WEBHOOK_URL";

const DEFAULT_PORT: u16 = 3000;

/// Settings read from the process environment once at startup
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    pub api_key: Option<String>,
    pub model: String,
    pub completion_base_url: Option<String>,
    pub webhook_url: Option<String>,
    pub webhook_timeout: Duration,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any variable source; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| FnolError::Config(format!("invalid PORT '{}': {}", raw, e)))?,
            None => DEFAULT_PORT,
        };

        let webhook_timeout = match var("WEBHOOK_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(raw.parse::<u64>().map_err(|e| {
                FnolError::Config(format!("invalid WEBHOOK_TIMEOUT_SECS '{}': {}", raw, e))
            })?),
            None => DEFAULT_WEBHOOK_TIMEOUT,
        };

        Ok(Self {
            port,
            api_key: var(API_KEY_VAR),
            model: var("FNOL_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            completion_base_url: var("OPENROUTER_BASE_URL"),
            webhook_url: var(WEBHOOK_URL_VAR),
            webhook_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServiceConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServiceConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.model, "openai/gpt-4");
        assert_eq!(config.webhook_timeout, Duration::from_secs(60));
        assert!(config.api_key.is_none());
        assert!(config.completion_base_url.is_none());
        assert!(config.webhook_url.is_none());
    }

    #[test]
    fn test_reads_overrides_and_ignores_blank_values() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("OPENROUTER_API_KEY", "sk-test"),
            ("FNOL_MODEL", "anthropic/claude-3.5-sonnet"),
            ("OPENROUTER_BASE_URL", "http://localhost:8000/api/v1"),
            ("WEBHOOK_URL", "  "),
            ("WEBHOOK_TIMEOUT_SECS", "120"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.model, "anthropic/claude-3.5-sonnet");
        assert_eq!(
            config.completion_base_url.as_deref(),
            Some("http://localhost:8000/api/v1")
        );
        assert!(config.webhook_url.is_none());
        assert_eq!(config.webhook_timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_rejects_invalid_numbers() {
        assert!(matches!(
            config_from(&[("PORT", "eighty")]),
            Err(FnolError::Config(_))
        ));
        assert!(matches!(
            config_from(&[("WEBHOOK_TIMEOUT_SECS", "-1")]),
            Err(FnolError::Config(_))
        ));
    }
}
