//! OpenAI-style protocol adapter.

use super::types::{
    OpenAIFunction, OpenAIRequest, OpenAIResponse, OpenAITool, convert_finish_reason,
    convert_messages, parse_tool_call,
};
use crate::tools::schema::object_schema;
use lisa_application::{GatewayError, ProtocolAdapter, RequestOptions};
use lisa_domain::{AssistantTurn, Message, StopReason, ToolCallRecord, ToolDefinition};
use serde_json::{Value, json};

/// Adapter for chat-completions style providers (OpenAI and compatible APIs).
#[derive(Debug, Clone, Default)]
pub struct OpenAiAdapter;

impl OpenAiAdapter {
    pub fn new() -> Self {
        Self
    }

    fn tool(&self, tool: &ToolDefinition) -> OpenAITool {
        OpenAITool {
            tool_type: "function".to_string(),
            function: OpenAIFunction {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: object_schema(&tool.input_schema),
            },
        }
    }
}

impl ProtocolAdapter for OpenAiAdapter {
    fn family(&self) -> &'static str {
        "openai"
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
        let tools: Vec<OpenAITool> = tools.iter().map(|t| self.tool(t)).collect();
        let tool_choice = (!tools.is_empty()).then(|| "auto".to_string());

        let request = OpenAIRequest {
            model: options.model.clone(),
            messages: convert_messages(messages),
            tools,
            tool_choice,
            temperature: options.temperature,
            max_tokens: Some(options.max_tokens),
        };
        json!(request)
    }

    fn parse_response(&self, response: &Value) -> Result<AssistantTurn, GatewayError> {
        let response: OpenAIResponse = serde_json::from_value(response.clone())
            .map_err(|e| GatewayError::InvalidResponse(format!("unexpected response shape: {}", e)))?;

        let Some(choice) = response.choices.into_iter().next() else {
            return Err(GatewayError::InvalidResponse(
                "response contains no choices".to_string(),
            ));
        };

        let stop_reason = convert_finish_reason(choice.finish_reason.as_deref());
        let message = choice.message;
        let wire_calls = message.tool_calls.unwrap_or_default();

        if !wire_calls.is_empty() {
            let calls = wire_calls.iter().map(parse_tool_call).collect();
            return Ok(AssistantTurn::ToolInvocations {
                text: message.content.filter(|c| !c.is_empty()),
                calls,
            });
        }

        match message.content {
            Some(text) => Ok(AssistantTurn::Final { text, stop_reason }),
            None if stop_reason == StopReason::MaxTokens => Ok(AssistantTurn::Final {
                text: String::new(),
                stop_reason,
            }),
            None => Err(GatewayError::InvalidResponse(
                "choice has neither content nor tool calls".to_string(),
            )),
        }
    }

    fn append_tool_results(&self, messages: &mut Vec<Message>, records: &[ToolCallRecord]) {
        messages.extend(
            records
                .iter()
                .map(|record| Message::tool_result(record.to_result_block())),
        );
    }
}
