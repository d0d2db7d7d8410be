//! Anthropic-style protocol adapter.

use super::types::{
    AnthropicContent, AnthropicRequest, AnthropicResponse, AnthropicTool, convert_messages,
    convert_stop_reason, parse_tool_use,
};
use crate::tools::schema::object_schema;
use lisa_application::{GatewayError, ProtocolAdapter, RequestOptions};
use lisa_domain::{AssistantTurn, Message, ToolCallRecord, ToolDefinition};
use serde_json::{Value, json};

/// Adapter for the Anthropic messages API.
#[derive(Debug, Clone, Default)]
pub struct AnthropicAdapter;

impl AnthropicAdapter {
    pub fn new() -> Self {
        Self
    }

    fn tool(&self, tool: &ToolDefinition) -> AnthropicTool {
        AnthropicTool {
            name: tool.name.clone(),
            description: tool.description.clone(),
            input_schema: object_schema(&tool.input_schema),
        }
    }
}

impl ProtocolAdapter for AnthropicAdapter {
    fn family(&self) -> &'static str {
        "anthropic"
    }

    fn build_descriptor(&self, tool: &ToolDefinition) -> Value {
        json!(self.tool(tool))
    }

    fn build_request(
        &self,
        messages: &[Message],
        tools: &[&ToolDefinition],
        options: &RequestOptions,
    ) -> Value {
        let (system, messages) = convert_messages(messages);
        let request = AnthropicRequest {
            model: options.model.clone(),
            max_tokens: options.max_tokens,
            system,
            messages,
            temperature: options.temperature,
            tools: tools.iter().map(|t| self.tool(t)).collect(),
        };
        json!(request)
    }

    fn parse_response(&self, response: &Value) -> Result<AssistantTurn, GatewayError> {
        let response: AnthropicResponse = serde_json::from_value(response.clone())
            .map_err(|e| GatewayError::InvalidResponse(format!("unexpected response shape: {}", e)))?;

        let stop_reason = convert_stop_reason(response.stop_reason.as_deref());
        let mut text_parts: Vec<String> = Vec::new();
        let mut calls = Vec::new();

        for block in &response.content {
            match block {
                AnthropicContent::Text { text } => text_parts.push(text.clone()),
                AnthropicContent::ToolUse { id, name, input } => {
                    calls.push(parse_tool_use(id, name, input))
                }
                AnthropicContent::ToolResult { .. } | AnthropicContent::Unknown => {}
            }
        }

        let text = text_parts.concat();
        if !calls.is_empty() {
            return Ok(AssistantTurn::ToolInvocations {
                text: (!text.is_empty()).then_some(text),
                calls,
            });
        }

        if response.content.is_empty() && !stop_reason.is_truncated() {
            return Err(GatewayError::InvalidResponse(
                "response has no content blocks".to_string(),
            ));
        }

        Ok(AssistantTurn::Final { text, stop_reason })
    }

    fn append_tool_results(&self, messages: &mut Vec<Message>, records: &[ToolCallRecord]) {
        if records.is_empty() {
            return;
        }
        messages.push(Message::user_tool_results(
            records.iter().map(ToolCallRecord::to_result_block).collect(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::testing::{ScriptedTransport, adapter, weather_input, weather_registry};
    use lisa_application::{ExecuteWithToolsUseCase, RunError};
    use lisa_domain::tool::value_objects::VALIDATION_ERROR;
    use lisa_domain::{
        InputShape, ObjectShape, Role, StopReason, ToolCall, ToolError, ToolResult, TraceId,
    };

    fn weather() -> ToolDefinition {
        ToolDefinition::new("getWeather", "Current weather")
            .with_scope("read:device")
            .with_input(ObjectShape::new().required("city", "City name", InputShape::String))
    }

    fn options() -> RequestOptions {
        RequestOptions::new("claude-3-5-haiku-latest").with_max_tokens(512)
    }

    #[test]
    fn test_descriptor_shape() {
        let descriptor = AnthropicAdapter.build_descriptor(&weather());

        assert_eq!(descriptor["name"], "getWeather");
        assert_eq!(descriptor["description"], "Current weather");
        assert_eq!(descriptor["input_schema"]["type"], "object");
        assert_eq!(descriptor["input_schema"]["required"], json!(["city"]));
        assert!(descriptor.get("type").is_none());
    }

    #[test]
    fn test_request_lifts_system_prompt() {
        let tool = weather();
        let request = AnthropicAdapter.build_request(
            &[Message::system("be brief"), Message::user("weather?")],
            &[&tool],
            &options(),
        );

        assert_eq!(request["system"], "be brief");
        assert_eq!(request["max_tokens"], 512);
        assert_eq!(request["messages"].as_array().unwrap().len(), 1);
        assert_eq!(request["messages"][0]["role"], "user");
        assert_eq!(request["tools"][0]["name"], "getWeather");
        assert!(request.get("temperature").is_none());
    }

    #[test]
    fn test_request_without_tools_omits_tools() {
        let request = AnthropicAdapter.build_request(&[Message::user("hi")], &[], &options());
        assert!(request.get("tools").is_none());
        assert!(request.get("system").is_none());
    }

    #[test]
    fn test_parse_final_text() {
        let turn = AnthropicAdapter
            .parse_response(&json!({
                "content": [{"type": "text", "text": "It's 18°C"}],
                "stop_reason": "end_turn"
            }))
            .unwrap();

        assert_eq!(turn, AssistantTurn::final_text("It's 18°C"));
    }

    #[test]
    fn test_parse_tool_use_blocks() {
        let turn = AnthropicAdapter
            .parse_response(&json!({
                "content": [
                    {"type": "text", "text": "Let me check."},
                    {"type": "tool_use", "id": "toolu_1", "name": "getWeather", "input": {"city": "Paris"}},
                    {"type": "tool_use", "id": "toolu_2", "name": "getTime", "input": {}}
                ],
                "stop_reason": "tool_use"
            }))
            .unwrap();

        match turn {
            AssistantTurn::ToolInvocations { text, calls } => {
                assert_eq!(text.as_deref(), Some("Let me check."));
                assert_eq!(calls.len(), 2);
                assert_eq!(calls[0].get_string("city"), Some("Paris"));
                assert_eq!(calls[1].id, "toolu_2");
            }
            other => panic!("expected tool invocations, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_truncated_response() {
        let turn = AnthropicAdapter
            .parse_response(&json!({
                "content": [{"type": "text", "text": "It is"}],
                "stop_reason": "max_tokens"
            }))
            .unwrap();

        assert_eq!(
            turn,
            AssistantTurn::Final {
                text: "It is".to_string(),
                stop_reason: StopReason::MaxTokens
            }
        );
    }

    #[test]
    fn test_parse_malformed_responses() {
        let missing = AnthropicAdapter.parse_response(&json!({"stop_reason": "end_turn"}));
        assert!(matches!(missing, Err(GatewayError::InvalidResponse(_))));

        let empty = AnthropicAdapter.parse_response(&json!({"content": [], "stop_reason": "end_turn"}));
        assert!(matches!(empty, Err(GatewayError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_keeps_tool_use_with_bad_input() {
        let turn = AnthropicAdapter
            .parse_response(&json!({
                "content": [
                    {"type": "tool_use", "id": "t1", "name": "x", "input": {}},
                    {"type": "tool_use", "id": "t2", "name": "x", "input": [1]}
                ],
                "stop_reason": "tool_use"
            }))
            .unwrap();

        let calls = turn.tool_calls();
        assert_eq!(calls.len(), 2);
        assert!(!calls[0].has_argument_error());
        assert!(calls[1].has_argument_error());
    }

    #[test]
    fn test_append_tool_results_single_user_message() {
        let trace = TraceId::new("t");
        let mut messages = vec![Message::assistant_with_tool_calls(
            None,
            vec![ToolCall::new("toolu_1", "getWeather"), ToolCall::new("toolu_2", "nope")],
        )];
        let records = vec![
            ToolCallRecord::new(
                "toolu_1",
                "getWeather",
                ToolResult::success(json!("18C"), trace.clone()),
            ),
            ToolCallRecord::new(
                "toolu_2",
                "nope",
                ToolResult::failure(ToolError::not_found("nope"), trace),
            ),
        ];

        AnthropicAdapter.append_tool_results(&mut messages, &records);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].tool_results.len(), 2);
        assert!(messages[1].tool_results[1].is_error);

        let request = AnthropicAdapter.build_request(&messages, &[], &options());
        let blocks = &request["messages"][1]["content"];
        assert_eq!(blocks[0]["type"], "tool_result");
        assert_eq!(blocks[0]["tool_use_id"], "toolu_1");
        assert_eq!(blocks[0]["content"], "18C");
        assert_eq!(blocks[1]["is_error"], true);
        assert_eq!(blocks[1]["content"], "Error: tool not found: nope");
    }

    #[test]
    fn test_append_empty_batch_is_noop() {
        let mut messages = vec![Message::user("hi")];
        AnthropicAdapter.append_tool_results(&mut messages, &[]);
        assert_eq!(messages.len(), 1);
    }

    // ─── Full runs through the orchestration loop ────────────────

    fn tool_use_response(blocks: Value) -> Value {
        json!({"content": blocks, "stop_reason": "tool_use"})
    }

    fn weather_use(id: &str, input: Value) -> Value {
        json!({"type": "tool_use", "id": id, "name": "getWeather", "input": input})
    }

    fn final_response(text: &str) -> Value {
        json!({"content": [{"type": "text", "text": text}], "stop_reason": "end_turn"})
    }

    #[tokio::test]
    async fn test_run_tool_round_then_final_answer() {
        let transport = ScriptedTransport::new(vec![
            tool_use_response(json!([
                {"type": "text", "text": "Checking."},
                weather_use("toolu_1", json!({"city": "Paris"}))
            ])),
            final_response("It's 18°C in Paris."),
        ]);
        let use_case = ExecuteWithToolsUseCase::new(adapter(AnthropicAdapter), transport.clone());

        let response = use_case
            .execute(&weather_registry(), weather_input(5))
            .await
            .unwrap();

        assert_eq!(response.final_text.as_deref(), Some("It's 18°C in Paris."));
        assert_eq!(response.tool_calls.len(), 1);

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1]["system"], "Answer briefly.");

        let messages = requests[1]["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1]["role"], "assistant");
        assert_eq!(messages[1]["content"][0]["text"], "Checking.");
        assert_eq!(messages[1]["content"][1]["type"], "tool_use");
        assert_eq!(messages[1]["content"][1]["input"], json!({"city": "Paris"}));
        assert_eq!(messages[2]["role"], "user");
        assert_eq!(
            messages[2]["content"],
            json!([{"type": "tool_result", "tool_use_id": "toolu_1", "content": "{\"temp\":18}"}])
        );
    }

    #[tokio::test]
    async fn test_run_malformed_input_fails_only_that_call() {
        let transport = ScriptedTransport::new(vec![
            tool_use_response(json!([
                weather_use("toolu_1", json!({"city": "Paris"})),
                weather_use("toolu_2", json!("Berlin"))
            ])),
            final_response("Paris is 18°C."),
        ]);
        let use_case = ExecuteWithToolsUseCase::new(adapter(AnthropicAdapter), transport.clone());

        let response = use_case
            .execute(&weather_registry(), weather_input(5))
            .await
            .unwrap();

        assert_eq!(response.final_text.as_deref(), Some("Paris is 18°C."));
        assert_eq!(response.tool_calls.len(), 2);
        assert!(response.tool_calls[0].result.is_success());
        assert!(response.tool_calls[1].result.error().unwrap().is_code(VALIDATION_ERROR));

        let requests = transport.requests();
        let messages = requests[1]["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        let results = messages[2]["content"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].get("is_error").is_none());
        assert_eq!(results[1]["tool_use_id"], "toolu_2");
        assert_eq!(results[1]["is_error"], true);
        assert!(results[1]["content"].as_str().unwrap().contains("could not be decoded"));
    }

    #[tokio::test]
    async fn test_run_third_request_alternates_roles() {
        let transport = ScriptedTransport::new(vec![
            tool_use_response(json!([weather_use("toolu_1", json!({"city": "Paris"}))])),
            tool_use_response(json!([weather_use("toolu_2", json!({"city": "Rome"}))])),
            final_response("Both are mild."),
        ]);
        let use_case = ExecuteWithToolsUseCase::new(adapter(AnthropicAdapter), transport.clone());

        let response = use_case
            .execute(&weather_registry(), weather_input(5))
            .await
            .unwrap();
        assert_eq!(response.tool_calls.len(), 2);

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        let messages = requests[2]["messages"].as_array().unwrap();
        let roles: Vec<&str> = messages.iter().map(|m| m["role"].as_str().unwrap()).collect();
        assert_eq!(roles, vec!["user", "assistant", "user", "assistant", "user"]);
        assert_eq!(messages[2]["content"][0]["tool_use_id"], "toolu_1");
        assert_eq!(messages[4]["content"][0]["tool_use_id"], "toolu_2");
        assert_eq!(messages[4]["content"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_run_stops_at_iteration_budget() {
        let transport = ScriptedTransport::new(vec![
            tool_use_response(json!([weather_use("toolu_1", json!({"city": "Paris"}))])),
            final_response("never sent"),
        ]);
        let use_case = ExecuteWithToolsUseCase::new(adapter(AnthropicAdapter), transport.clone());

        let err = use_case
            .execute(&weather_registry(), weather_input(1))
            .await
            .unwrap_err();

        assert!(matches!(err, RunError::BudgetExceeded { max_iterations: 1, .. }));
        assert_eq!(err.partial().unwrap().tool_calls.len(), 1);
        assert_eq!(transport.requests().len(), 1);
    }
}
