//! Orchestration value objects - immutable outputs of a run.
//!
//! - [`ToolCallRecord`] - one executed call and its result
//! - [`NativeToolCallResponse`] - everything a run produced

use crate::core::trace::TraceId;
use crate::session::entities::ToolResultBlock;
use crate::tool::value_objects::ToolResult;
use serde::{Deserialize, Serialize};

/// One executed tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRecord {
    /// Provider-assigned id of the originating call
    pub tool_call_id: String,
    /// Tool name as requested by the model
    pub name: String,
    pub result: ToolResult,
}

impl ToolCallRecord {
    pub fn new(tool_call_id: impl Into<String>, name: impl Into<String>, result: ToolResult) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            name: name.into(),
            result,
        }
    }

    pub fn to_result_block(&self) -> ToolResultBlock {
        ToolResultBlock::new(
            self.tool_call_id.clone(),
            self.result.model_content(),
            !self.result.is_success(),
        )
    }
}

/// Outcome of an orchestration run
///
/// `final_text` is absent when the run ended without a final answer; the
/// records executed so far are still carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeToolCallResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_text: Option<String>,
    /// Every executed call, in execution order
    pub tool_calls: Vec<ToolCallRecord>,
    /// Total wall-clock duration of the run
    pub duration_ms: u64,
    pub trace_id: TraceId,
}

impl NativeToolCallResponse {
    pub fn is_complete(&self) -> bool {
        self.final_text.is_some()
    }

    pub fn failed_calls(&self) -> impl Iterator<Item = &ToolCallRecord> {
        self.tool_calls.iter().filter(|r| !r.result.is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::value_objects::ToolError;
    use serde_json::json;

    #[test]
    fn test_record_to_result_block() {
        let ok = ToolCallRecord::new(
            "toolu_1",
            "getWeather",
            ToolResult::success(json!({"temp": 18}), TraceId::new("t")),
        );
        let block = ok.to_result_block();
        assert_eq!(block.tool_call_id, "toolu_1");
        assert_eq!(block.content, r#"{"temp":18}"#);
        assert!(!block.is_error);

        let failed = ToolCallRecord::new(
            "toolu_2",
            "takePhoto",
            ToolResult::failure(ToolError::handler("camera offline"), TraceId::new("t")),
        );
        let block = failed.to_result_block();
        assert!(block.is_error);
        assert_eq!(block.content, "Error: camera offline");
    }

    #[test]
    fn test_response_helpers() {
        let trace = TraceId::new("t");
        let response = NativeToolCallResponse {
            final_text: None,
            tool_calls: vec![
                ToolCallRecord::new("a", "x", ToolResult::success(json!(1), trace.clone())),
                ToolCallRecord::new(
                    "b",
                    "y",
                    ToolResult::failure(ToolError::not_found("y"), trace.clone()),
                ),
            ],
            duration_ms: 3,
            trace_id: trace,
        };

        assert!(!response.is_complete());
        assert_eq!(response.failed_calls().count(), 1);
    }
}
