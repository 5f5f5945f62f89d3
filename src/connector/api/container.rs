use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use crate::application::{ChatClient, GenerateAdviceUseCase};
use crate::cli::Provider;
use crate::connector::adapter::{anthropic_client, gemini_client};
use crate::{AnthropicClient, DomainError, GeminiClient};

/// Resolved settings for the completion client.
///
/// Values come from CLI flags first, then environment variables, then the
/// provider defaults:
///
/// | Provider    | Key                             | Model             | Base URL             |
/// |-------------|---------------------------------|-------------------|----------------------|
/// | `gemini`    | `API_KEY` / `GEMINI_API_KEY`    | `GEMINI_MODEL`    | `GEMINI_BASE_URL`    |
/// | `anthropic` | `ANTHROPIC_API_KEY`             | `ANTHROPIC_MODEL` | `ANTHROPIC_BASE_URL` |
///
/// The provider itself falls back to `VOLTBOT_PROVIDER`, then `gemini`.
#[derive(Clone)]
pub struct ContainerConfig {
    pub provider: Provider,
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ContainerConfig {
    pub fn from_env(
        provider: Option<Provider>,
        model: Option<String>,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        Self::resolve(provider, model, base_url, timeout, |key| {
            std::env::var(key).ok()
        })
    }

    /// Like [`from_env`](Self::from_env) with an injectable variable lookup.
    pub fn resolve(
        provider: Option<Provider>,
        model: Option<String>,
        base_url: Option<String>,
        timeout: Duration,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, DomainError> {
        let var = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let provider = match provider {
            Some(p) => p,
            None => match var("VOLTBOT_PROVIDER") {
                Some(name) => Provider::parse(&name).ok_or_else(|| {
                    DomainError::configuration(format!("unknown VOLTBOT_PROVIDER '{name}'"))
                })?,
                None => Provider::Gemini,
            },
        };

        let (api_key, env_model, env_base, default_model, default_base) = match provider {
            Provider::Gemini => (
                var("API_KEY").or_else(|| var("GEMINI_API_KEY")),
                var("GEMINI_MODEL"),
                var("GEMINI_BASE_URL"),
                gemini_client::DEFAULT_MODEL,
                gemini_client::DEFAULT_BASE_URL,
            ),
            Provider::Anthropic => (
                var("ANTHROPIC_API_KEY"),
                var("ANTHROPIC_MODEL"),
                var("ANTHROPIC_BASE_URL"),
                anthropic_client::DEFAULT_MODEL,
                anthropic_client::DEFAULT_BASE_URL,
            ),
        };

        Ok(Self {
            provider,
            api_key: api_key.unwrap_or_default(),
            model: model
                .or(env_model)
                .unwrap_or_else(|| default_model.to_string()),
            base_url: base_url
                .or(env_base)
                .unwrap_or_else(|| default_base.to_string()),
            timeout,
        })
    }
}

pub struct Container {
    advisor: Arc<GenerateAdviceUseCase>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let client: Arc<dyn ChatClient> = match config.provider {
            Provider::Gemini => {
                debug!("Using Gemini at {} (model {})", config.base_url, config.model);
                Arc::new(GeminiClient::new(
                    config.api_key.clone(),
                    config.model.clone(),
                    config.base_url.clone(),
                    config.timeout,
                )?)
            }
            Provider::Anthropic => {
                debug!(
                    "Using Anthropic-compatible API at {} (model {})",
                    config.base_url, config.model
                );
                Arc::new(AnthropicClient::new(
                    config.api_key.clone(),
                    config.model.clone(),
                    config.base_url.clone(),
                    config.timeout,
                )?)
            }
        };

        Ok(Self::with_client(client, config))
    }

    /// Wire the container around an already-built client.
    pub fn with_client(client: Arc<dyn ChatClient>, config: ContainerConfig) -> Self {
        let advisor = Arc::new(GenerateAdviceUseCase::new(client).with_timeout(config.timeout));
        Self { advisor, config }
    }

    pub fn advice_use_case(&self) -> Arc<GenerateAdviceUseCase> {
        Arc::clone(&self.advisor)
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_gemini_with_api_key() {
        let config = ContainerConfig::resolve(
            None,
            None,
            None,
            Duration::from_secs(30),
            lookup(&[("API_KEY", "secret")]),
        )
        .unwrap();

        assert_eq!(config.provider, Provider::Gemini);
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.model, gemini_client::DEFAULT_MODEL);
        assert_eq!(config.base_url, gemini_client::DEFAULT_BASE_URL);
    }

    #[test]
    fn gemini_key_falls_back_to_gemini_api_key() {
        let config = ContainerConfig::resolve(
            None,
            None,
            None,
            Duration::from_secs(30),
            lookup(&[("API_KEY", " "), ("GEMINI_API_KEY", "other")]),
        )
        .unwrap();
        assert_eq!(config.api_key, "other");
    }

    #[test]
    fn flags_override_environment() {
        let config = ContainerConfig::resolve(
            Some(Provider::Anthropic),
            Some("local-model".to_string()),
            Some("http://localhost:1234".to_string()),
            Duration::from_secs(5),
            lookup(&[
                ("VOLTBOT_PROVIDER", "gemini"),
                ("ANTHROPIC_MODEL", "ignored"),
                ("ANTHROPIC_BASE_URL", "http://ignored"),
            ]),
        )
        .unwrap();

        assert_eq!(config.provider, Provider::Anthropic);
        assert_eq!(config.model, "local-model");
        assert_eq!(config.base_url, "http://localhost:1234");
        assert_eq!(config.api_key, "");
    }

    #[test]
    fn provider_from_environment() {
        let config = ContainerConfig::resolve(
            None,
            None,
            None,
            Duration::from_secs(30),
            lookup(&[("VOLTBOT_PROVIDER", "Anthropic")]),
        )
        .unwrap();
        assert_eq!(config.provider, Provider::Anthropic);
        assert_eq!(config.model, anthropic_client::DEFAULT_MODEL);
    }

    #[test]
    fn unknown_provider_is_configuration_error() {
        let err = ContainerConfig::resolve(
            None,
            None,
            None,
            Duration::from_secs(30),
            lookup(&[("VOLTBOT_PROVIDER", "openai")]),
        )
        .err()
        .expect("error");
        assert!(matches!(err, DomainError::Configuration(_)));
    }

    #[test]
    fn gemini_without_key_fails_to_build() {
        let config = ContainerConfig::resolve(
            None,
            None,
            None,
            Duration::from_secs(30),
            lookup(&[]),
        )
        .unwrap();
        assert!(Container::new(config).is_err());
    }
}
