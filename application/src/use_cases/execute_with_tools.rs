//! Execute With Tools use case
//!
//! Drives one conversation to a final answer through any provider family:
//!
//! 1. Describe the tools the session may call (scope-filtered)
//! 2. Send the conversation through the [`ProtocolAdapter`] and transport
//! 3. Final text → done
//! 4. Tool calls → execute each in order, append all results, go to 2
//!
//! The number of tool rounds is bounded by
//! [`ExecutionParams::max_iterations`]. Tool failures are returned to the
//! model as failed results; provider errors, cancellation and an exhausted
//! budget end the run.

use crate::config::ExecutionParams;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::ports::provider::{GatewayError, ProtocolAdapter, ProviderTransport};
use crate::use_cases::execute_tool::ToolExecutor;
use crate::use_cases::shared::check_cancelled;
use lisa_domain::{
    AssistantTurn, CapabilityRegistry, Message, NativeToolCallResponse, RunState, ToolCallRecord,
    TraceId,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that end an orchestration run
#[derive(Error, Debug)]
pub enum RunError {
    /// The provider call failed; surfaced unchanged
    #[error(transparent)]
    Provider(#[from] GatewayError),

    /// The iteration budget ran out before the model produced final text.
    /// `partial` carries every tool call executed so far.
    #[error("maximum iterations ({max_iterations}) reached without final response")]
    BudgetExceeded {
        max_iterations: usize,
        partial: Box<NativeToolCallResponse>,
    },

    #[error("Run cancelled")]
    Cancelled,
}

impl RunError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunError::Cancelled)
    }

    /// Tool calls executed before the run failed, if the error carries them.
    pub fn partial(&self) -> Option<&NativeToolCallResponse> {
        match self {
            RunError::BudgetExceeded { partial, .. } => Some(partial),
            _ => None,
        }
    }
}

/// Input for the ExecuteWithTools use case
#[derive(Debug, Clone)]
pub struct ExecuteWithToolsInput {
    /// Conversation so far (system prompt, user request, ...)
    pub messages: Vec<Message>,
    pub params: ExecutionParams,
    /// Correlation id stamped on every tool result of this run
    pub trace_id: TraceId,
}

impl ExecuteWithToolsInput {
    pub fn new(messages: Vec<Message>, params: ExecutionParams) -> Self {
        Self {
            messages,
            params,
            trace_id: TraceId::generate(),
        }
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = trace_id;
        self
    }
}

/// Use case for running the tool-calling loop against one provider family.
pub struct ExecuteWithToolsUseCase {
    adapter: Arc<dyn ProtocolAdapter>,
    transport: Arc<dyn ProviderTransport>,
    executor: ToolExecutor,
    conversation_logger: Arc<dyn ConversationLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl ExecuteWithToolsUseCase {
    pub fn new(adapter: Arc<dyn ProtocolAdapter>, transport: Arc<dyn ProviderTransport>) -> Self {
        Self {
            adapter,
            transport,
            executor: ToolExecutor::new(),
            conversation_logger: Arc::new(NoConversationLogger),
            cancellation_token: None,
        }
    }

    pub fn with_executor(mut self, executor: ToolExecutor) -> Self {
        self.executor = executor;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Run the loop on a fresh conversation.
    pub async fn execute(
        &self,
        registry: &CapabilityRegistry,
        input: ExecuteWithToolsInput,
    ) -> Result<NativeToolCallResponse, RunError> {
        let ExecuteWithToolsInput {
            mut messages,
            params,
            trace_id,
        } = input;
        self.execute_with_messages(registry, &mut messages, &params, trace_id)
            .await
    }

    /// Run the loop, appending every turn and tool result to `messages`.
    ///
    /// The registry is borrowed for the whole run, so the session's grants
    /// cannot change while it is in flight.
    pub async fn execute_with_messages(
        &self,
        registry: &CapabilityRegistry,
        messages: &mut Vec<Message>,
        params: &ExecutionParams,
        trace_id: TraceId,
    ) -> Result<NativeToolCallResponse, RunError> {
        let started = Instant::now();
        let tools = registry.allowed_tools();

        info!(
            trace_id = %trace_id,
            provider = self.adapter.family(),
            model = %params.model,
            tools = tools.len(),
            max_iterations = params.max_iterations,
            "Starting tool-calling run"
        );
        self.conversation_logger.log(ConversationEvent::new(
            "run_started",
            json!({
                "trace_id": trace_id.as_str(),
                "provider": self.adapter.family(),
                "model": params.model,
                "tools": tools.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
                "max_iterations": params.max_iterations,
            }),
        ));

        let options = params.request_options();
        let mut records: Vec<ToolCallRecord> = Vec::new();
        let mut state = RunState::default();
        let mut iterations = 0;

        while iterations < params.max_iterations {
            if let Err(e) = check_cancelled(&self.cancellation_token) {
                transition(&mut state, RunState::Failed, &trace_id);
                return Err(self.fail(e, &trace_id, records.len()));
            }

            let request = self.adapter.build_request(messages, &tools, &options);
            let turn = match self.send(&request).await {
                Ok(turn) => turn,
                Err(e) => {
                    transition(&mut state, RunState::Failed, &trace_id);
                    return Err(self.fail(e.into(), &trace_id, records.len()));
                }
            };
            self.adapter.append_assistant_turn(messages, &turn);

            match turn {
                AssistantTurn::Final { text, stop_reason } => {
                    if stop_reason.is_truncated() {
                        warn!(trace_id = %trace_id, "Final response was truncated by the token limit");
                    }
                    transition(&mut state, RunState::Done, &trace_id);

                    let response = NativeToolCallResponse {
                        final_text: Some(text),
                        tool_calls: records,
                        duration_ms: started.elapsed().as_millis() as u64,
                        trace_id,
                    };
                    info!(
                        trace_id = %response.trace_id,
                        iterations,
                        tool_calls = response.tool_calls.len(),
                        duration_ms = response.duration_ms,
                        "Run completed"
                    );
                    self.conversation_logger.log(ConversationEvent::new(
                        "run_completed",
                        json!({
                            "trace_id": response.trace_id.as_str(),
                            "iterations": iterations,
                            "tool_calls": response.tool_calls.len(),
                            "duration_ms": response.duration_ms,
                            "final_text": response.final_text,
                        }),
                    ));
                    return Ok(response);
                }
                AssistantTurn::ToolInvocations { calls, .. } => {
                    transition(&mut state, RunState::ExecutingTools, &trace_id);

                    let mut batch = Vec::with_capacity(calls.len());
                    for call in &calls {
                        debug!(trace_id = %trace_id, tool = %call.name, id = %call.id, "Executing tool call");
                        let result = self.executor.execute(registry, call, &trace_id).await;
                        self.conversation_logger.log(ConversationEvent::new(
                            "tool_result",
                            json!({
                                "trace_id": trace_id.as_str(),
                                "iteration": iterations,
                                "tool_call_id": call.id,
                                "tool": call.name,
                                "success": result.is_success(),
                                "error_code": result.error().map(|e| e.code.as_str()),
                                "duration_ms": result.duration_ms,
                            }),
                        ));
                        batch.push(ToolCallRecord::new(call.id.clone(), call.name.clone(), result));
                    }

                    self.adapter.append_tool_results(messages, &batch);
                    records.extend(batch);
                    iterations += 1;
                    transition(&mut state, RunState::AwaitingProviderResponse, &trace_id);
                }
            }
        }

        transition(&mut state, RunState::Failed, &trace_id);
        warn!(
            trace_id = %trace_id,
            max_iterations = params.max_iterations,
            "Iteration budget exhausted without final response"
        );
        let tool_calls = records.len();
        let partial = NativeToolCallResponse {
            final_text: None,
            tool_calls: records,
            duration_ms: started.elapsed().as_millis() as u64,
            trace_id: trace_id.clone(),
        };
        Err(self.fail(
            RunError::BudgetExceeded {
                max_iterations: params.max_iterations,
                partial: Box::new(partial),
            },
            &trace_id,
            tool_calls,
        ))
    }

    async fn send(&self, request: &serde_json::Value) -> Result<AssistantTurn, GatewayError> {
        let response = self.transport.send(request).await?;
        self.adapter.parse_response(&response)
    }

    fn fail(&self, error: RunError, trace_id: &TraceId, tool_calls: usize) -> RunError {
        warn!(trace_id = %trace_id, "Run failed: {}", error);
        self.conversation_logger.log(ConversationEvent::new(
            "run_failed",
            json!({
                "trace_id": trace_id.as_str(),
                "error": error.to_string(),
                "tool_calls": tool_calls,
                "partial": error.partial(),
            }),
        ));
        error
    }
}

fn transition(state: &mut RunState, next: RunState, trace_id: &TraceId) {
    debug_assert!(
        state.can_transition_to(next),
        "illegal run state transition {} -> {}",
        state,
        next
    );
    debug!(trace_id = %trace_id, from = %state, to = %next, "Run state transition");
    *state = next;
}
