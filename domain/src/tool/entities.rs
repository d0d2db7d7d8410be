//! Tool domain entities

use super::schema::ObjectShape;
use super::scope::Scope;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Risk level of a tool operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Low risk - read-only operations (e.g., reading memory, clock, sensors)
    #[default]
    Low,
    /// High risk - operations that change external state (device control, writes)
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::High => "high",
        }
    }

    pub fn requires_assessment(&self) -> bool {
        matches!(self, RiskLevel::High)
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Definition of a tool that the model may request
///
/// The handler is not part of the definition; it is held next to it in the
/// [`CapabilityRegistry`](super::registry::CapabilityRegistry).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "get_weather")
    pub name: String,
    /// Human-readable description, forwarded to the model
    pub description: String,
    /// Scopes that must all be granted before the tool is callable
    pub scopes: BTreeSet<Scope>,
    /// Declarative shape of the argument object
    pub input_schema: ObjectShape,
    /// Risk level of this tool
    #[serde(default)]
    pub risk_level: RiskLevel,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            scopes: BTreeSet::new(),
            input_schema: ObjectShape::new(),
            risk_level: RiskLevel::Low,
        }
    }

    pub fn with_scope(mut self, scope: impl Into<Scope>) -> Self {
        self.scopes.insert(scope.into());
        self
    }

    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Scope>,
    {
        self.scopes.extend(scopes.into_iter().map(Into::into));
        self
    }

    pub fn with_input(mut self, input_schema: ObjectShape) -> Self {
        self.input_schema = input_schema;
        self
    }

    pub fn with_risk_level(mut self, risk_level: RiskLevel) -> Self {
        self.risk_level = risk_level;
        self
    }

    pub fn is_high_risk(&self) -> bool {
        self.risk_level.requires_assessment()
    }
}

/// One model-requested invocation of a tool
///
/// `id` is assigned by the provider and is used to correlate the result.
/// When the provider sent arguments that could not be decoded into an object,
/// `arguments` is empty and `argument_error` says why; validation then fails
/// for this call only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument_error: Option<String>,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: Map::new(),
            argument_error: None,
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    pub fn with_arguments(mut self, arguments: Map<String, Value>) -> Self {
        self.arguments = arguments;
        self
    }

    /// Mark the arguments as undecodable
    pub fn with_argument_error(mut self, error: impl Into<String>) -> Self {
        self.arguments.clear();
        self.argument_error = Some(error.into());
        self
    }

    pub fn has_argument_error(&self) -> bool {
        self.argument_error.is_some()
    }

    /// Get a string argument
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }
}
