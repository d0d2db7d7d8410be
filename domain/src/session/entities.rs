//! Session domain entities
//!
//! The conversation is kept in one provider-neutral shape. Each protocol
//! adapter translates it to its own wire format when building a request, so
//! the loop never needs to know which provider family it is talking to.

use crate::tool::entities::ToolCall;
use serde::{Deserialize, Serialize};

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    /// Result of one tool call (OpenAI-style conversations only)
    Tool,
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A tool result embedded in a user message (Anthropic-style conversations).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResultBlock {
    pub tool_call_id: String,
    pub content: String,
    #[serde(default)]
    pub is_error: bool,
}

impl ToolResultBlock {
    pub fn new(tool_call_id: impl Into<String>, content: impl Into<String>, is_error: bool) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            content: content.into(),
            is_error,
        }
    }
}

/// A message in a conversation (Entity)
///
/// Append-only within a run. Which of the optional parts are populated
/// depends on the role:
///
/// - assistant: `tool_calls` when the model requested tools
/// - tool: `tool_call_id` naming the call it answers, and optionally the
///   single `tool_results` block it was built from (carries the error flag)
/// - user: `tool_results` when carrying a batch of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_results: Vec<ToolResultBlock>,
}

impl Message {
    fn with_role(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
            tool_results: Vec::new(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::with_role(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::with_role(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::with_role(Role::Assistant, content)
    }

    /// An assistant turn that requests tool invocations, with optional
    /// accompanying text.
    pub fn assistant_with_tool_calls(text: Option<String>, calls: Vec<ToolCall>) -> Self {
        let mut message = Self::with_role(Role::Assistant, text.unwrap_or_default());
        message.tool_calls = calls;
        message
    }

    /// One tool result answering `tool_call_id`.
    pub fn tool(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        let mut message = Self::with_role(Role::Tool, content);
        message.tool_call_id = Some(tool_call_id.into());
        message
    }

    /// One tool result built from a result block, keeping its error flag.
    pub fn tool_result(block: ToolResultBlock) -> Self {
        let mut message = Self::tool(block.tool_call_id.clone(), block.content.clone());
        message.tool_results = vec![block];
        message
    }

    /// Whether this message reports a failed tool call.
    pub fn is_tool_error(&self) -> bool {
        self.tool_results.iter().any(|block| block.is_error)
    }

    /// A user message carrying a whole batch of tool results.
    pub fn user_tool_results(results: Vec<ToolResultBlock>) -> Self {
        let mut message = Self::with_role(Role::User, "");
        message.tool_results = results;
        message
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_constructors() {
        assert_eq!(Message::system("be brief").role, Role::System);
        assert_eq!(Message::user("hi").content, "hi");
        assert!(!Message::assistant("hello").has_tool_calls());
    }

    #[test]
    fn test_assistant_with_tool_calls() {
        let call = ToolCall::new("call_1", "getWeather").with_arg("city", "Paris");
        let message = Message::assistant_with_tool_calls(None, vec![call]);

        assert_eq!(message.role, Role::Assistant);
        assert_eq!(message.content, "");
        assert!(message.has_tool_calls());
    }

    #[test]
    fn test_tool_message() {
        let message = Message::tool("call_1", "18C");
        assert_eq!(message.role, Role::Tool);
        assert_eq!(message.tool_call_id.as_deref(), Some("call_1"));
    }

    #[test]
    fn test_tool_result_message_keeps_error_flag() {
        let failed = Message::tool_result(ToolResultBlock::new("call_2", "Error: boom", true));
        assert_eq!(failed.role, Role::Tool);
        assert_eq!(failed.tool_call_id.as_deref(), Some("call_2"));
        assert_eq!(failed.content, "Error: boom");
        assert!(failed.is_tool_error());

        let ok = Message::tool_result(ToolResultBlock::new("call_1", "18C", false));
        assert!(!ok.is_tool_error());
        assert!(!Message::tool("call_3", "x").is_tool_error());
    }

    #[test]
    fn test_user_tool_results() {
        let message = Message::user_tool_results(vec![
            ToolResultBlock::new("toolu_1", "ok", false),
            ToolResultBlock::new("toolu_2", "Error: boom", true),
        ]);
        assert_eq!(message.role, Role::User);
        assert_eq!(message.tool_results.len(), 2);
        assert!(message.tool_results[1].is_error);
    }

    #[test]
    fn test_serialization_skips_empty_parts() {
        let json = serde_json::to_value(Message::user("hi")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "user", "content": "hi"}));
    }
}
