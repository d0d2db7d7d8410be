//! Orchestration and logging configuration (`[orchestration]`, `[logging]`)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Loop settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOrchestrationConfig {
    /// Provider calls allowed per run.
    pub max_iterations: usize,
    /// System prompt prepended to every run.
    pub system_prompt: Option<String>,
    /// Scopes granted to every session at startup.
    pub scopes: Vec<String>,
}

impl Default for FileOrchestrationConfig {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            system_prompt: None,
            scopes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving run events. Disabled when unset.
    pub conversation_log: Option<PathBuf>,
}
