//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section defaults, so a partial file (or none at all) is valid.

mod orchestration;
mod providers;

pub use orchestration::{FileLoggingConfig, FileOrchestrationConfig};
pub use providers::{FileAnthropicConfig, FileOpenAiConfig, FileProviderConfig, FileProvidersConfig};

use crate::providers::ProviderKind;
use serde::{Deserialize, Serialize};

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("provider.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("provider.model cannot be empty")]
    EmptyModelName,

    #[error("unknown provider '{0}' (expected \"openai\" or \"anthropic\")")]
    UnknownProvider(String),

    #[error("provider.temperature must be between 0.0 and 2.0, got {0}")]
    TemperatureOutOfRange(f32),

    #[error("orchestration.max_iterations must be at least 1")]
    ZeroIterations,

    #[error("max_tokens cannot be 0")]
    ZeroMaxTokens,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Active provider selection
    pub provider: FileProviderConfig,
    /// Per-family endpoint and credential settings
    pub providers: FileProvidersConfig,
    /// Loop settings
    pub orchestration: FileOrchestrationConfig,
    /// Audit log settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        // Same parser the wiring uses, so both accept the same names
        if self.provider.default.parse::<ProviderKind>().is_err() {
            issues.push(ConfigValidationError::UnknownProvider(
                self.provider.default.clone(),
            ));
        }

        if self.provider.timeout_seconds == 0 {
            issues.push(ConfigValidationError::InvalidTimeout);
        }

        if let Some(model) = &self.provider.model
            && model.trim().is_empty()
        {
            issues.push(ConfigValidationError::EmptyModelName);
        }

        if let Some(t) = self.provider.temperature
            && !(0.0..=2.0).contains(&t)
        {
            issues.push(ConfigValidationError::TemperatureOutOfRange(t));
        }

        if self.provider.max_tokens == Some(0)
            || self.providers.openai.max_tokens == 0
            || self.providers.anthropic.max_tokens == 0
        {
            issues.push(ConfigValidationError::ZeroMaxTokens);
        }

        if self.orchestration.max_iterations == 0 {
            issues.push(ConfigValidationError::ZeroIterations);
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[provider]
default = "openai"
model = "gpt-4o"
temperature = 0.3

[orchestration]
max_iterations = 8
system_prompt = "You are Lisa."
scopes = ["read:clock", "read:text"]

[logging]
conversation_log = "/tmp/lisa.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider.model.as_deref(), Some("gpt-4o"));
        assert_eq!(config.provider.temperature, Some(0.3));
        assert_eq!(config.orchestration.max_iterations, 8);
        assert_eq!(config.orchestration.scopes, vec!["read:clock", "read:text"]);
        assert_eq!(
            config.logging.conversation_log.as_deref(),
            Some(std::path::Path::new("/tmp/lisa.jsonl"))
        );
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.provider.default, "openai");
        assert_eq!(config.provider.timeout_seconds, 60);
        assert_eq!(config.orchestration.max_iterations, 5);
        assert!(config.orchestration.scopes.is_empty());
        assert!(config.logging.conversation_log.is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(FileConfig::default().validate().is_empty());
    }

    #[test]
    fn test_validate_collects_all_issues() {
        let mut config = FileConfig::default();
        config.provider.default = "gemini".to_string();
        config.provider.timeout_seconds = 0;
        config.provider.model = Some("  ".to_string());
        config.provider.temperature = Some(3.5);
        config.orchestration.max_iterations = 0;

        let issues = config.validate();
        assert_eq!(issues.len(), 5);
        assert!(issues.contains(&ConfigValidationError::UnknownProvider("gemini".to_string())));
        assert!(issues.contains(&ConfigValidationError::InvalidTimeout));
        assert!(issues.contains(&ConfigValidationError::EmptyModelName));
        assert!(issues.contains(&ConfigValidationError::TemperatureOutOfRange(3.5)));
        assert!(issues.contains(&ConfigValidationError::ZeroIterations));
    }

    #[test]
    fn test_provider_name_is_case_insensitive() {
        let mut config = FileConfig::default();
        config.provider.default = "Anthropic".to_string();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_provider_name_surrounding_whitespace_accepted() {
        let mut config = FileConfig::default();
        config.provider.default = " anthropic\n".to_string();
        assert!(config.validate().is_empty());
        assert_eq!(
            config.provider.default.parse::<ProviderKind>().unwrap(),
            ProviderKind::Anthropic
        );

        config.provider.default = "gemini".to_string();
        assert_eq!(
            config.validate(),
            vec![ConfigValidationError::UnknownProvider("gemini".to_string())]
        );
    }
}
