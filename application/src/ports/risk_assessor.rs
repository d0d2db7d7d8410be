//! Risk assessor port for high-risk tool calls.
//!
//! [`RiskAssessor`] is an optional hook consulted after the permission check
//! and before argument validation, only for tools whose
//! [`RiskLevel`](lisa_domain::RiskLevel) requires assessment. This allows
//! different strategies (a critic model, human approval, a static policy) to
//! be plugged in.

use async_trait::async_trait;
use lisa_domain::{RiskLevel, ToolCall, ToolDefinition};

/// Decision from the risk assessment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskAssessment {
    pub approved: bool,
    /// Risk level the assessor attributes to this call
    pub level: RiskLevel,
    pub reason: Option<String>,
}

impl RiskAssessment {
    pub fn approve(level: RiskLevel) -> Self {
        Self {
            approved: true,
            level,
            reason: None,
        }
    }

    pub fn reject(level: RiskLevel, reason: impl Into<String>) -> Self {
        Self {
            approved: false,
            level,
            reason: Some(reason.into()),
        }
    }
}

/// Port for assessing high-risk tool calls before execution.
#[async_trait]
pub trait RiskAssessor: Send + Sync {
    /// Assess one call. The call has already passed the permission check.
    async fn assess(&self, definition: &ToolDefinition, call: &ToolCall) -> RiskAssessment;
}
