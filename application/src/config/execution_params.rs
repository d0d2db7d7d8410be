//! Execution parameters: orchestration loop control.
//!
//! [`ExecutionParams`] groups the static parameters of one run of
//! [`ExecuteWithToolsUseCase`](crate::use_cases::execute_with_tools::ExecuteWithToolsUseCase).
//! These are application-layer concerns, not domain policy.

use crate::ports::provider::RequestOptions;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_ITERATIONS: usize = 5;
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Orchestration loop control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Maximum number of tool rounds before the run fails.
    pub max_iterations: usize,
    /// Model identifier sent to the provider.
    pub model: String,
    /// Sampling temperature (provider default when absent).
    pub temperature: Option<f32>,
    /// Token limit for each provider response.
    pub max_tokens: u32,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            model: String::new(),
            temperature: None,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl ExecutionParams {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Per-request settings handed to the protocol adapter.
    pub fn request_options(&self) -> RequestOptions {
        RequestOptions {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}
