use secrecy::Secret;
use service_core::config::{self as core_config, get_env, get_env_parsed, get_optional_env};
use service_core::error::AppError;
use std::str::FromStr;

use crate::services::providers::gemini::GEMINI_API_BASE;

/// Default model every quiz is generated with.
pub const DEFAULT_QUIZ_MODEL: &str = "gemini-2.5-flash";

/// Default cap on concurrently processed quiz requests.
pub const DEFAULT_MAX_INSTANCES: usize = 10;

const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct QuizConfig {
    pub common: core_config::Config,
    pub google: GoogleConfig,
    pub model: ModelConfig,
    pub host: HostConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub api_key: Secret<String>,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Model for quiz generation (e.g., gemini-2.5-flash)
    pub quiz_model: String,
    pub provider: ProviderKind,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Maximum number of quiz requests processed at the same time.
    pub max_instances: usize,
}

#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

/// Which generation backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    Mock,
}

impl FromStr for ProviderKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "mock" => Ok(ProviderKind::Mock),
            other => Err(AppError::ConfigError(anyhow::anyhow!(
                "QUIZ_PROVIDER must be 'gemini' or 'mock', got '{}'",
                other
            ))),
        }
    }
}

impl QuizConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = core_config::is_production();

        let provider: ProviderKind = get_env("QUIZ_PROVIDER", Some("gemini"), is_prod)?.parse()?;

        // The mock backend never talks to Google, so the key is optional there.
        let api_key = match provider {
            ProviderKind::Gemini => get_env("GOOGLE_API_KEY", None, is_prod)?,
            ProviderKind::Mock => get_optional_env("GOOGLE_API_KEY").unwrap_or_default(),
        };

        let max_instances = get_env_parsed("QUIZ_MAX_INSTANCES", DEFAULT_MAX_INSTANCES, is_prod)?;
        if max_instances == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "QUIZ_MAX_INSTANCES must be at least 1"
            )));
        }

        Ok(QuizConfig {
            common: common_config,
            google: GoogleConfig {
                api_key: Secret::new(api_key),
                api_base: get_env("GEMINI_API_BASE", Some(GEMINI_API_BASE), is_prod)?,
            },
            model: ModelConfig {
                quiz_model: get_env("QUIZ_MODEL", Some(DEFAULT_QUIZ_MODEL), is_prod)?,
                provider,
                timeout_secs: get_env_parsed(
                    "PROVIDER_TIMEOUT_SECS",
                    DEFAULT_PROVIDER_TIMEOUT_SECS,
                    is_prod,
                )?,
            },
            host: HostConfig { max_instances },
            observability: ObservabilityConfig {
                log_level: get_optional_env("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
                otlp_endpoint: get_optional_env("OTLP_ENDPOINT"),
            },
        })
    }

    /// Offline configuration backed by the mock provider.
    pub fn for_mock(port: u16) -> Self {
        QuizConfig {
            common: core_config::Config { port },
            google: GoogleConfig {
                api_key: Secret::new(String::new()),
                api_base: GEMINI_API_BASE.to_string(),
            },
            model: ModelConfig {
                quiz_model: DEFAULT_QUIZ_MODEL.to_string(),
                provider: ProviderKind::Mock,
                timeout_secs: DEFAULT_PROVIDER_TIMEOUT_SECS,
            },
            host: HostConfig {
                max_instances: DEFAULT_MAX_INSTANCES,
            },
            observability: ObservabilityConfig {
                log_level: "info".to_string(),
                otlp_endpoint: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_kind_parses_case_insensitively() {
        assert_eq!("Gemini".parse::<ProviderKind>().unwrap(), ProviderKind::Gemini);
        assert_eq!(" mock ".parse::<ProviderKind>().unwrap(), ProviderKind::Mock);
        assert!("openai".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn api_key_is_redacted_in_debug_output() {
        let mut config = QuizConfig::for_mock(0);
        config.google.api_key = Secret::new("super-secret-key".to_string());
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-key"));
    }
}
