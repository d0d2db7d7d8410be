//! Execute Tool use case.
//!
//! Runs one model-requested tool call through the fixed gate sequence:
//!
//! ```text
//! lookup ─▶ permission ─▶ risk (high-risk only) ─▶ validation ─▶ handler
//! ```
//!
//! Every path ends in a [`ToolResult`]. Handler errors and handler panics are
//! both converted to `HANDLER_ERROR` results, so a misbehaving tool can never
//! abort the orchestration loop.

use crate::ports::risk_assessor::RiskAssessor;
use futures::FutureExt;
use lisa_domain::tool::value_objects::ToolError;
use lisa_domain::{
    CapabilityRegistry, DefaultToolValidator, ToolCall, ToolResult, ToolValidator, TraceId,
};
use serde_json::{Map, Value};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Executes tool calls against a session's [`CapabilityRegistry`].
pub struct ToolExecutor {
    validator: Arc<dyn ToolValidator>,
    risk_assessor: Option<Arc<dyn RiskAssessor>>,
}

impl Default for ToolExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolExecutor {
    pub fn new() -> Self {
        Self {
            validator: Arc::new(DefaultToolValidator),
            risk_assessor: None,
        }
    }

    /// Consult `assessor` before running high-risk tools.
    pub fn with_risk_assessor(mut self, assessor: Arc<dyn RiskAssessor>) -> Self {
        self.risk_assessor = Some(assessor);
        self
    }

    pub fn with_validator(mut self, validator: Arc<dyn ToolValidator>) -> Self {
        self.validator = validator;
        self
    }

    /// Execute a tool by name with decoded arguments.
    pub async fn execute_tool(
        &self,
        registry: &CapabilityRegistry,
        name: &str,
        arguments: Map<String, Value>,
        trace_id: &TraceId,
    ) -> ToolResult {
        let call = ToolCall::new("", name).with_arguments(arguments);
        self.execute(registry, &call, trace_id).await
    }

    /// Execute a model-requested call. Never panics outward.
    pub async fn execute(
        &self,
        registry: &CapabilityRegistry,
        call: &ToolCall,
        trace_id: &TraceId,
    ) -> ToolResult {
        let started = Instant::now();
        let result = self.execute_internal(registry, call, trace_id).await;
        let duration_ms = started.elapsed().as_millis() as u64;

        match result.error() {
            None => debug!(tool = %call.name, duration_ms, "Tool succeeded"),
            Some(error) => debug!(
                tool = %call.name,
                code = %error.code,
                duration_ms,
                "Tool failed: {}",
                error.message
            ),
        }

        result.with_duration(duration_ms)
    }

    async fn execute_internal(
        &self,
        registry: &CapabilityRegistry,
        call: &ToolCall,
        trace_id: &TraceId,
    ) -> ToolResult {
        // Check if tool exists
        let Some(registered) = registry.get(&call.name) else {
            return ToolResult::failure(ToolError::not_found(&call.name), trace_id.clone());
        };
        let definition = &registered.definition;

        // Permission before anything that could reveal the input schema
        if !registry.is_tool_allowed(&call.name) {
            let required: Vec<&str> = definition.scopes.iter().map(|s| s.as_str()).collect();
            let missing: Vec<&str> = registry
                .missing_scopes(&call.name)
                .into_iter()
                .map(|s| s.as_str())
                .collect();
            return ToolResult::failure(
                ToolError::permission_denied(format!(
                    "tool `{}` requires scopes [{}]; missing [{}]",
                    call.name,
                    required.join(", "),
                    missing.join(", ")
                )),
                trace_id.clone(),
            );
        }

        if definition.is_high_risk()
            && let Some(assessor) = &self.risk_assessor
        {
            let assessment = assessor.assess(definition, call).await;
            if !assessment.approved {
                warn!(tool = %call.name, level = %assessment.level, "Risk assessment rejected tool call");
                let reason = assessment
                    .reason
                    .unwrap_or_else(|| "no reason given".to_string());
                return ToolResult::failure(
                    ToolError::risk_rejected(format!(
                        "tool `{}` rejected by risk assessment (risk: {}): {}",
                        call.name, assessment.level, reason
                    )),
                    trace_id.clone(),
                );
            }
        }

        // Validate the call
        if let Err(e) = self.validator.validate(call, definition) {
            return ToolResult::failure(
                ToolError::validation(format!("invalid arguments for `{}`: {}", call.name, e)),
                trace_id.clone(),
            );
        }

        let arguments = definition.input_schema.retain_declared(&call.arguments);

        // The handler future is created inside the guard too
        let outcome = AssertUnwindSafe(async { registered.handler.call(&arguments).await })
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(data)) => ToolResult::success(data, trace_id.clone()),
            Ok(Err(e)) => ToolResult::failure(ToolError::handler(e.to_string()), trace_id.clone()),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!(tool = %call.name, "Tool handler panicked: {}", message);
                ToolResult::failure(
                    ToolError::handler(format!("handler panicked: {}", message)),
                    trace_id.clone(),
                )
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
