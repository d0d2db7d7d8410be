//! Run state machine
//!
//! ```text
//! AwaitingProviderResponse ──final──▶ Done
//!        ▲        │
//!        │     tool calls
//!        │        ▼
//!        └── ExecutingTools
//!
//! (budget exhausted / provider error / cancelled) ──▶ Failed
//! ```

use serde::{Deserialize, Serialize};

/// State of one orchestration run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    #[default]
    AwaitingProviderResponse,
    ExecutingTools,
    Done,
    Failed,
}

impl RunState {
    pub fn as_str(&self) -> &str {
        match self {
            RunState::AwaitingProviderResponse => "awaiting_provider_response",
            RunState::ExecutingTools => "executing_tools",
            RunState::Done => "done",
            RunState::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Done | RunState::Failed)
    }

    /// Whether moving from `self` to `next` is a legal transition.
    pub fn can_transition_to(&self, next: RunState) -> bool {
        use RunState::*;
        matches!(
            (self, next),
            (AwaitingProviderResponse, ExecutingTools)
                | (AwaitingProviderResponse, Done)
                | (AwaitingProviderResponse, Failed)
                | (ExecutingTools, AwaitingProviderResponse)
                | (ExecutingTools, Failed)
        )
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
