//! Provider families and their wiring.
//!
//! A provider is a pair: a [`ProtocolAdapter`] that speaks the family's JSON
//! format and a [`ProviderTransport`] that carries it. [`build_provider`]
//! assembles both from configuration.

pub mod anthropic;
pub mod http;
pub mod openai;

#[cfg(test)]
pub(crate) mod testing;

pub use anthropic::AnthropicAdapter;
pub use http::HttpTransport;
pub use openai::OpenAiAdapter;

use crate::config::FileConfig;
use lisa_application::{GatewayError, ProtocolAdapter, ProviderTransport};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Supported provider families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Chat-completions style (OpenAI and compatible endpoints)
    #[default]
    OpenAi,
    /// Messages API with typed content blocks
    Anthropic,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "anthropic" => Ok(ProviderKind::Anthropic),
            other => Err(GatewayError::Config(format!("unknown provider '{}'", other))),
        }
    }
}

/// Everything the orchestration loop needs to talk to one provider.
pub struct ProviderSetup {
    pub kind: ProviderKind,
    pub adapter: Arc<dyn ProtocolAdapter>,
    pub transport: Arc<dyn ProviderTransport>,
    pub model: String,
    pub max_tokens: u32,
}

impl fmt::Debug for ProviderSetup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSetup")
            .field("kind", &self.kind)
            .field("family", &self.adapter.family())
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

/// Resolve an API key: explicit value first, then the named environment variable.
pub fn resolve_api_key(
    explicit: Option<&str>,
    env_name: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, GatewayError> {
    if let Some(key) = explicit.filter(|k| !k.trim().is_empty()) {
        return Ok(key.to_string());
    }
    lookup(env_name)
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| {
            GatewayError::Config(format!(
                "no API key configured: set {} or providers.<name>.api_key",
                env_name
            ))
        })
}

/// Build the adapter/transport pair for `kind` from configuration.
pub fn build_provider(kind: ProviderKind, config: &FileConfig) -> Result<ProviderSetup, GatewayError> {
    build_provider_with_env(kind, config, |name| std::env::var(name).ok())
}

fn build_provider_with_env(
    kind: ProviderKind,
    config: &FileConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ProviderSetup, GatewayError> {
    let timeout = Duration::from_secs(config.provider.timeout_seconds);

    let setup = match kind {
        ProviderKind::OpenAi => {
            let family = &config.providers.openai;
            let api_key = resolve_api_key(family.api_key.as_deref(), &family.api_key_env, lookup)?;
            ProviderSetup {
                kind,
                adapter: Arc::new(OpenAiAdapter::new()),
                transport: Arc::new(HttpTransport::openai(&family.base_url, &api_key, timeout)?),
                model: config
                    .provider
                    .model
                    .clone()
                    .unwrap_or_else(|| family.default_model.clone()),
                max_tokens: config.provider.max_tokens.unwrap_or(family.max_tokens),
            }
        }
        ProviderKind::Anthropic => {
            let family = &config.providers.anthropic;
            let api_key = resolve_api_key(family.api_key.as_deref(), &family.api_key_env, lookup)?;
            ProviderSetup {
                kind,
                adapter: Arc::new(AnthropicAdapter::new()),
                transport: Arc::new(HttpTransport::anthropic(
                    &family.base_url,
                    &api_key,
                    &family.api_version,
                    timeout,
                )?),
                model: config
                    .provider
                    .model
                    .clone()
                    .unwrap_or_else(|| family.default_model.clone()),
                max_tokens: config.provider.max_tokens.unwrap_or(family.max_tokens),
            }
        }
    };

    debug!(provider = %kind, model = %setup.model, "Provider configured");
    Ok(setup)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_provider_kind_parse() {
        assert_eq!("openai".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert_eq!(" Anthropic ".parse::<ProviderKind>().unwrap(), ProviderKind::Anthropic);
        assert!(matches!(
            "gemini".parse::<ProviderKind>(),
            Err(GatewayError::Config(_))
        ));
        assert_eq!(ProviderKind::Anthropic.to_string(), "anthropic");
    }

    #[test]
    fn test_resolve_api_key_precedence() {
        let env = |name: &str| (name == "KEY").then(|| "from-env".to_string());

        assert_eq!(resolve_api_key(Some("direct"), "KEY", env).unwrap(), "direct");
        assert_eq!(resolve_api_key(None, "KEY", env).unwrap(), "from-env");
        assert_eq!(resolve_api_key(Some(""), "KEY", env).unwrap(), "from-env");
        assert!(matches!(
            resolve_api_key(None, "OTHER", env),
            Err(GatewayError::Config(_))
        ));
    }

    #[test]
    fn test_build_openai_defaults() {
        let mut config = FileConfig::default();
        config.providers.openai.api_key = Some("sk-test".to_string());

        let setup = build_provider_with_env(ProviderKind::OpenAi, &config, no_env).unwrap();
        assert_eq!(setup.adapter.family(), "openai");
        assert_eq!(setup.model, "gpt-4o-mini");
        assert_eq!(setup.max_tokens, 1024);
    }

    #[test]
    fn test_build_anthropic_with_overrides() {
        let mut config = FileConfig::default();
        config.provider.model = Some("claude-sonnet-4-5".to_string());
        config.provider.max_tokens = Some(4096);
        let env = |name: &str| (name == "ANTHROPIC_API_KEY").then(|| "key".to_string());

        let setup = build_provider_with_env(ProviderKind::Anthropic, &config, env).unwrap();
        assert_eq!(setup.adapter.family(), "anthropic");
        assert_eq!(setup.model, "claude-sonnet-4-5");
        assert_eq!(setup.max_tokens, 4096);
    }

    #[test]
    fn test_build_without_key_fails() {
        let result = build_provider_with_env(ProviderKind::Anthropic, &FileConfig::default(), no_env);
        assert!(matches!(result, Err(GatewayError::Config(_))));
    }
}
