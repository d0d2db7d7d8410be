//! Tool domain value objects: immutable result and error types
//!
//! Every tool invocation produces exactly one [`ToolResult`], whether the tool
//! ran, was refused, or failed. The error code in [`ToolError`] says which
//! stage of the executor stopped it:
//!
//! | Code | Stage |
//! |------|-------|
//! | `TOOL_NOT_FOUND` | lookup |
//! | `PERMISSION_DENIED` | scope check |
//! | `RISK_REJECTED` | optional risk assessment |
//! | `VALIDATION_ERROR` | argument validation |
//! | `HANDLER_ERROR` | handler returned an error or panicked |

use crate::core::trace::TraceId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const TOOL_NOT_FOUND: &str = "TOOL_NOT_FOUND";
pub const PERMISSION_DENIED: &str = "PERMISSION_DENIED";
pub const RISK_REJECTED: &str = "RISK_REJECTED";
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const HANDLER_ERROR: &str = "HANDLER_ERROR";

/// Error that stopped a tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "TOOL_NOT_FOUND", "PERMISSION_DENIED")
    pub code: String,
    /// Human-readable error message, shown to the model
    pub message: String,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(tool_name: &str) -> Self {
        Self::new(TOOL_NOT_FOUND, format!("tool not found: {}", tool_name))
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(PERMISSION_DENIED, message)
    }

    pub fn risk_rejected(message: impl Into<String>) -> Self {
        Self::new(RISK_REJECTED, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(VALIDATION_ERROR, message)
    }

    pub fn handler(message: impl Into<String>) -> Self {
        Self::new(HANDLER_ERROR, message)
    }

    pub fn is_code(&self, code: &str) -> bool {
        self.code == code
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ToolError {}

/// Outcome of one tool invocation.
///
/// Immutable once produced. `timestamp` is the UTC completion time and
/// serializes as ISO-8601.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
    pub timestamp: DateTime<Utc>,
    pub duration_ms: u64,
    pub trace_id: TraceId,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(data: Value, trace_id: TraceId) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now(),
            duration_ms: 0,
            trace_id,
        }
    }

    /// Create a failed result
    pub fn failure(error: ToolError, trace_id: TraceId) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            timestamp: Utc::now(),
            duration_ms: 0,
            trace_id,
        }
    }

    /// Add duration metadata
    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn error(&self) -> Option<&ToolError> {
        self.error.as_ref()
    }

    /// Text handed back to the model for this result.
    ///
    /// Successful string data is passed through unquoted, other data is JSON
    /// encoded. Failures carry the error message.
    pub fn model_content(&self) -> String {
        match (&self.data, &self.error) {
            (_, Some(error)) => format!("Error: {}", error.message),
            (Some(Value::String(s)), None) => s.clone(),
            (Some(data), None) => data.to_string(),
            (None, None) => String::new(),
        }
    }
}
