//! Provider ports
//!
//! Two seams separate the orchestration loop from a model provider:
//!
//! - [`ProtocolAdapter`] translates between the provider-neutral conversation
//!   and one provider family's JSON wire format. Pure, no I/O.
//! - [`ProviderTransport`] moves one JSON request to the provider and returns
//!   its JSON response.
//!
//! Implementations of both live in the infrastructure layer.

use async_trait::async_trait;
use lisa_domain::{AssistantTurn, Message, ToolCallRecord, ToolDefinition};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while talking to a provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    Connection(String),

    /// The provider answered with a non-success status
    #[error("Provider error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The provider answered, but not in a shape the adapter understands
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Per-request model settings
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: u32,
}

impl RequestOptions {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: None,
            max_tokens: 1024,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Transport for one provider endpoint
///
/// The only suspension point of an orchestration run.
#[async_trait]
pub trait ProviderTransport: Send + Sync {
    /// Send a request body and return the decoded response body
    async fn send(&self, request: &Value) -> Result<Value, GatewayError>;
}

/// Wire-format adapter for one provider family
pub trait ProtocolAdapter: Send + Sync {
    /// Family identifier used in logs (e.g. "openai", "anthropic")
    fn family(&self) -> &'static str;

    /// Provider-specific description of one tool
    fn build_descriptor(&self, tool: &ToolDefinition) -> Value;

    /// Build the request body. `tools` holds only the tools the session may
    /// call, in the order they should be described.
    fn build_request(
        &self,
        messages: &[Message],
        tools: &[&ToolDefinition],
        options: &RequestOptions,
    ) -> Value;

    /// Reduce a provider response to a final answer or a batch of tool calls
    fn parse_response(&self, response: &Value) -> Result<AssistantTurn, GatewayError>;

    /// Record the assistant's turn in the conversation
    fn append_assistant_turn(&self, messages: &mut Vec<Message>, turn: &AssistantTurn) {
        match turn {
            AssistantTurn::Final { text, .. } => messages.push(Message::assistant(text.clone())),
            AssistantTurn::ToolInvocations { text, calls } => messages.push(
                Message::assistant_with_tool_calls(text.clone(), calls.clone()),
            ),
        }
    }

    /// Record a batch of tool results in the shape the provider expects
    fn append_tool_results(&self, messages: &mut Vec<Message>, records: &[ToolCallRecord]);
}
