//! OpenAI chat-completions wire types and conversions.
//!
//! Tool invocations arrive as a flat `tool_calls` array on one assistant
//! message, with arguments as a JSON-encoded *string*. Results go back as
//! independent `role: "tool"` messages tagged by `tool_call_id`.

use lisa_domain::{Message, Role, StopReason, ToolCall};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// OpenAI chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct OpenAIRequest {
    pub model: String,
    pub messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<OpenAITool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// OpenAI message format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<OpenAIToolCall>>,
}

/// OpenAI tool call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIToolCall {
    pub id: String,
    #[serde(rename = "type", default = "function_type")]
    pub call_type: String,
    pub function: OpenAIFunctionCall,
}

/// OpenAI function call details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIFunctionCall {
    pub name: String,
    /// JSON-encoded argument object
    #[serde(default)]
    pub arguments: String,
}

/// OpenAI tool definition.
#[derive(Debug, Clone, Serialize)]
pub struct OpenAITool {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: OpenAIFunction,
}

/// OpenAI function definition.
#[derive(Debug, Clone, Serialize)]
pub struct OpenAIFunction {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// OpenAI chat completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAIResponse {
    pub choices: Vec<OpenAIChoice>,
}

/// OpenAI response choice.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAIChoice {
    pub message: OpenAIMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

fn function_type() -> String {
    "function".to_string()
}

// ─── Domain → OpenAI ─────────────────────────────────────────────

/// Convert the conversation to OpenAI messages.
///
/// A user message carrying a batch of tool results becomes one `tool`
/// message per result.
pub fn convert_messages(messages: &[Message]) -> Vec<OpenAIMessage> {
    let mut out = Vec::with_capacity(messages.len());
    for message in messages {
        match message.role {
            Role::User if !message.tool_results.is_empty() => {
                out.extend(message.tool_results.iter().map(|block| OpenAIMessage {
                    role: "tool".to_string(),
                    content: Some(block.content.clone()),
                    tool_call_id: Some(block.tool_call_id.clone()),
                    tool_calls: None,
                }));
            }
            Role::Assistant if message.has_tool_calls() => out.push(OpenAIMessage {
                role: "assistant".to_string(),
                content: (!message.content.is_empty()).then(|| message.content.clone()),
                tool_call_id: None,
                tool_calls: Some(message.tool_calls.iter().map(convert_tool_call).collect()),
            }),
            role => out.push(OpenAIMessage {
                role: role.as_str().to_string(),
                content: Some(message.content.clone()),
                tool_call_id: message.tool_call_id.clone(),
                tool_calls: None,
            }),
        }
    }
    out
}

/// Convert a domain ToolCall to its wire form (arguments JSON-encoded).
pub fn convert_tool_call(call: &ToolCall) -> OpenAIToolCall {
    OpenAIToolCall {
        id: call.id.clone(),
        call_type: function_type(),
        function: OpenAIFunctionCall {
            name: call.name.clone(),
            arguments: Value::Object(call.arguments.clone()).to_string(),
        },
    }
}

// ─── OpenAI → Domain ─────────────────────────────────────────────

/// Convert an OpenAI finish reason to domain StopReason.
pub fn convert_finish_reason(reason: Option<&str>) -> StopReason {
    match reason {
        None | Some("stop") => StopReason::EndTurn,
        Some("tool_calls") => StopReason::ToolUse,
        Some("length") => StopReason::MaxTokens,
        Some(other) => StopReason::Other(other.to_string()),
    }
}

/// Decode one wire tool call. An empty argument string means no arguments.
///
/// Arguments that are not a JSON object are kept on the call as an
/// `argument_error`, so only this call fails validation.
pub fn parse_tool_call(call: &OpenAIToolCall) -> ToolCall {
    let parsed = ToolCall::new(call.id.clone(), call.function.name.clone());
    let raw = call.function.arguments.trim();
    if raw.is_empty() {
        return parsed;
    }

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => parsed.with_arguments(map),
        Ok(other) => {
            warn!(tool_call_id = %call.id, "Tool call arguments are not an object");
            parsed.with_argument_error(format!("expected a JSON object, got {}", other))
        }
        Err(e) => {
            warn!(tool_call_id = %call.id, "Tool call arguments are not valid JSON");
            parsed.with_argument_error(format!("not valid JSON: {}", e))
        }
    }
}
