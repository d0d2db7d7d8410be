//! Provider configuration from TOML (`[provider]` and `[providers]` sections)

use serde::{Deserialize, Serialize};

/// Active provider selection (`[provider]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Provider family: "openai" or "anthropic".
    pub default: String,
    /// Model id; falls back to the family's `default_model`.
    pub model: Option<String>,
    /// Sampling temperature (0.0 - 2.0).
    pub temperature: Option<f32>,
    /// Max tokens per response; falls back to the family's `max_tokens`.
    pub max_tokens: Option<u32>,
    /// HTTP request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            default: "openai".to_string(),
            model: None,
            temperature: None,
            max_tokens: None,
            timeout_seconds: 60,
        }
    }
}

/// Anthropic API provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnthropicConfig {
    /// Environment variable name for the API key (default: "ANTHROPIC_API_KEY").
    pub api_key_env: String,
    /// Direct API key (prefer the env var).
    pub api_key: Option<String>,
    /// Base URL for the Anthropic API.
    pub base_url: String,
    /// Default max tokens per response.
    pub max_tokens: u32,
    /// Model used when `[provider].model` is unset.
    pub default_model: String,
    /// Anthropic API version header.
    pub api_version: String,
}

impl Default for FileAnthropicConfig {
    fn default() -> Self {
        Self {
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.anthropic.com".to_string(),
            max_tokens: 1024,
            default_model: "claude-3-5-haiku-latest".to_string(),
            api_version: "2023-06-01".to_string(),
        }
    }
}

/// OpenAI API provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (prefer the env var).
    pub api_key: Option<String>,
    /// Base URL for the OpenAI API (override for compatible endpoints).
    pub base_url: String,
    /// Default max tokens per response.
    pub max_tokens: u32,
    /// Model used when `[provider].model` is unset.
    pub default_model: String,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            max_tokens: 1024,
            default_model: "gpt-4o-mini".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Anthropic API settings.
    pub anthropic: FileAnthropicConfig,
    /// OpenAI API settings.
    pub openai: FileOpenAiConfig,
}

#[cfg(test)]
mod tests {
    use super::super::FileConfig;

    #[test]
    fn test_providers_section() {
        let toml_str = r#"
[provider]
default = "anthropic"
model = "claude-sonnet-4-5"
timeout_seconds = 30

[providers.anthropic]
api_key_env = "MY_KEY"
max_tokens = 2048

[providers.openai]
base_url = "http://localhost:11434"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider.default, "anthropic");
        assert_eq!(config.provider.model.as_deref(), Some("claude-sonnet-4-5"));
        assert_eq!(config.provider.timeout_seconds, 30);
        assert_eq!(config.providers.anthropic.api_key_env, "MY_KEY");
        assert_eq!(config.providers.anthropic.max_tokens, 2048);
        // Unset fields keep defaults
        assert_eq!(config.providers.anthropic.api_version, "2023-06-01");
        assert_eq!(config.providers.openai.base_url, "http://localhost:11434");
        assert_eq!(config.providers.openai.api_key_env, "OPENAI_API_KEY");
    }
}
