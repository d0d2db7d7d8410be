//! Shared fixtures for driving the orchestration loop through a real
//! adapter without a network.

use async_trait::async_trait;
use lisa_application::{
    ExecuteWithToolsInput, ExecutionParams, GatewayError, ProtocolAdapter, ProviderTransport,
};
use lisa_domain::{
    CapabilityRegistry, HandlerError, InputShape, Message, ObjectShape, SyncFnHandler,
    ToolDefinition,
};
use serde_json::{Map, Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Replays canned provider responses and records every request body.
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Value>>,
    requests: Mutex<Vec<Value>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Value>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProviderTransport for ScriptedTransport {
    async fn send(&self, request: &Value) -> Result<Value, GatewayError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| GatewayError::InvalidResponse("script exhausted".to_string()))
    }
}

/// Registry with a granted `getWeather(city)` tool answering `{"temp": 18}`.
pub fn weather_registry() -> CapabilityRegistry {
    let mut registry = CapabilityRegistry::new().with_tool(
        ToolDefinition::new("getWeather", "Current weather")
            .with_scope("read:device")
            .with_input(ObjectShape::new().required("city", "City name", InputShape::String)),
        Arc::new(SyncFnHandler::new(|_args: &Map<String, Value>| {
            Ok::<_, HandlerError>(json!({"temp": 18}))
        })),
    );
    registry.grant_scopes(["read:device"]);
    registry
}

pub fn weather_input(max_iterations: usize) -> ExecuteWithToolsInput {
    ExecuteWithToolsInput::new(
        vec![
            Message::system("Answer briefly."),
            Message::user("What's the weather in Paris?"),
        ],
        ExecutionParams::new("test-model").with_max_iterations(max_iterations),
    )
}

pub fn adapter<A: ProtocolAdapter + 'static>(adapter: A) -> Arc<dyn ProtocolAdapter> {
    Arc::new(adapter)
}
