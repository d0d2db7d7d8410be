//! Normalized assistant turns.
//!
//! Every provider family answers in its own shape. Protocol adapters reduce a
//! response to one of two terminal shapes:
//!
//! ```text
//! no tool invocation + stop  →  AssistantTurn::Final
//! tool invocation requested  →  AssistantTurn::ToolInvocations
//! ```

use crate::tool::entities::ToolCall;
use serde::{Deserialize, Serialize};

/// Reason the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural end of response.
    EndTurn,
    /// The model wants to call tools.
    ToolUse,
    /// Hit the token limit; the text may be truncated.
    MaxTokens,
    /// Provider-specific stop reason.
    Other(String),
}

impl StopReason {
    pub fn is_truncated(&self) -> bool {
        matches!(self, StopReason::MaxTokens)
    }
}

/// One parsed assistant turn.
#[derive(Debug, Clone, PartialEq)]
pub enum AssistantTurn {
    /// The model answered without requesting tools.
    Final { text: String, stop_reason: StopReason },
    /// The model requested one or more tool invocations, in order.
    ToolInvocations {
        text: Option<String>,
        calls: Vec<ToolCall>,
    },
}

impl AssistantTurn {
    pub fn final_text(text: impl Into<String>) -> Self {
        AssistantTurn::Final {
            text: text.into(),
            stop_reason: StopReason::EndTurn,
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, AssistantTurn::Final { .. })
    }

    /// Requested calls; empty for a final turn.
    pub fn tool_calls(&self) -> &[ToolCall] {
        match self {
            AssistantTurn::Final { .. } => &[],
            AssistantTurn::ToolInvocations { calls, .. } => calls,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_turn_has_no_calls() {
        let turn = AssistantTurn::final_text("It is 18C in Paris.");
        assert!(turn.is_final());
        assert!(turn.tool_calls().is_empty());
    }

    #[test]
    fn tool_invocations_keep_order() {
        let turn = AssistantTurn::ToolInvocations {
            text: None,
            calls: vec![
                ToolCall::new("a", "getWeather"),
                ToolCall::new("b", "getTime"),
            ],
        };
        assert!(!turn.is_final());
        let names: Vec<&str> = turn.tool_calls().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["getWeather", "getTime"]);
    }

    #[test]
    fn only_max_tokens_is_truncation() {
        assert!(StopReason::MaxTokens.is_truncated());
        assert!(!StopReason::EndTurn.is_truncated());
        assert!(!StopReason::Other("length".to_string()).is_truncated());
    }
}
