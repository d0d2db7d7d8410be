//! Anthropic messages-API wire types and conversions.
//!
//! Tool invocations arrive as typed `tool_use` blocks in the assistant
//! message's content array. Results go back as ONE user message whose content
//! is an array of `tool_result` blocks. System prompts are not messages here;
//! they live in the top-level `system` field.

use lisa_domain::{Message, Role, StopReason, ToolCall, ToolResultBlock};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Anthropic messages request.
#[derive(Debug, Clone, Serialize)]
pub struct AnthropicRequest {
    pub model: String,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<AnthropicMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<AnthropicTool>,
}

/// Anthropic message format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicMessage {
    pub role: String,
    pub content: AnthropicMessageContent,
}

/// Plain text or an array of content blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnthropicMessageContent {
    Text(String),
    Blocks(Vec<AnthropicContent>),
}

/// Anthropic content block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnthropicContent {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        #[serde(default)]
        input: Value,
    },
    ToolResult {
        tool_use_id: String,
        content: String,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        is_error: bool,
    },
    /// Block types this adapter does not consume (e.g. thinking)
    #[serde(other)]
    Unknown,
}

/// Anthropic tool definition.
#[derive(Debug, Clone, Serialize)]
pub struct AnthropicTool {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Anthropic messages response.
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicResponse {
    pub content: Vec<AnthropicContent>,
    #[serde(default)]
    pub stop_reason: Option<String>,
}

// ─── Domain → Anthropic ──────────────────────────────────────────

/// Convert the conversation to Anthropic's shape.
///
/// Returns the lifted system prompt (all system messages joined) and the
/// remaining messages. Consecutive tool results are merged into a single
/// user message.
pub fn convert_messages(messages: &[Message]) -> (Option<String>, Vec<AnthropicMessage>) {
    let mut system: Vec<&str> = Vec::new();
    let mut out: Vec<AnthropicMessage> = Vec::with_capacity(messages.len());

    for message in messages {
        match message.role {
            Role::System => system.push(&message.content),
            Role::User if !message.tool_results.is_empty() => {
                push_tool_results(&mut out, message.tool_results.iter().map(convert_tool_result));
            }
            Role::Tool if !message.tool_results.is_empty() => {
                push_tool_results(&mut out, message.tool_results.iter().map(convert_tool_result));
            }
            // A bare tool message carries no error flag
            Role::Tool => {
                let block = ToolResultBlock::new(
                    message.tool_call_id.clone().unwrap_or_default(),
                    message.content.clone(),
                    false,
                );
                push_tool_results(&mut out, std::iter::once(convert_tool_result(&block)));
            }
            Role::Assistant if message.has_tool_calls() => {
                let mut blocks = Vec::with_capacity(message.tool_calls.len() + 1);
                if !message.content.is_empty() {
                    blocks.push(AnthropicContent::Text {
                        text: message.content.clone(),
                    });
                }
                blocks.extend(message.tool_calls.iter().map(convert_tool_call));
                out.push(AnthropicMessage {
                    role: "assistant".to_string(),
                    content: AnthropicMessageContent::Blocks(blocks),
                });
            }
            Role::User | Role::Assistant => out.push(AnthropicMessage {
                role: message.role.as_str().to_string(),
                content: AnthropicMessageContent::Text(message.content.clone()),
            }),
        }
    }

    let system = (!system.is_empty()).then(|| system.join("\n\n"));
    (system, out)
}

fn push_tool_results(
    out: &mut Vec<AnthropicMessage>,
    blocks: impl Iterator<Item = AnthropicContent>,
) {
    if let Some(AnthropicMessage {
        role,
        content: AnthropicMessageContent::Blocks(existing),
    }) = out.last_mut()
        && role.as_str() == "user"
        && existing
            .iter()
            .all(|b| matches!(b, AnthropicContent::ToolResult { .. }))
    {
        existing.extend(blocks);
        return;
    }

    out.push(AnthropicMessage {
        role: "user".to_string(),
        content: AnthropicMessageContent::Blocks(blocks.collect()),
    });
}

/// Convert a domain ToolCall to a `tool_use` block.
pub fn convert_tool_call(call: &ToolCall) -> AnthropicContent {
    AnthropicContent::ToolUse {
        id: call.id.clone(),
        name: call.name.clone(),
        input: Value::Object(call.arguments.clone()),
    }
}

/// Convert a tool result to a `tool_result` block.
pub fn convert_tool_result(block: &ToolResultBlock) -> AnthropicContent {
    AnthropicContent::ToolResult {
        tool_use_id: block.tool_call_id.clone(),
        content: block.content.clone(),
        is_error: block.is_error,
    }
}

// ─── Anthropic → Domain ──────────────────────────────────────────

/// Convert an Anthropic stop reason to domain StopReason.
pub fn convert_stop_reason(reason: Option<&str>) -> StopReason {
    match reason {
        None | Some("end_turn") | Some("stop_sequence") => StopReason::EndTurn,
        Some("tool_use") => StopReason::ToolUse,
        Some("max_tokens") => StopReason::MaxTokens,
        Some(other) => StopReason::Other(other.to_string()),
    }
}

/// Decode a `tool_use` block.
///
/// A missing input means no arguments. Any other non-object input is kept
/// on the call as an `argument_error`, so only this call fails validation.
pub fn parse_tool_use(id: &str, name: &str, input: &Value) -> ToolCall {
    let call = ToolCall::new(id, name);
    match input {
        Value::Object(map) => call.with_arguments(map.clone()),
        Value::Null => call,
        other => {
            warn!(tool_call_id = %id, "tool_use input is not an object");
            call.with_argument_error(format!("expected a JSON object, got {}", other))
        }
    }
}
