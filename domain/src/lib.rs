//! Domain layer for lisa
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Capability Registry
//!
//! Tools are host capabilities the model may invoke. Each declares the
//! permission scopes it needs; a session grants scopes, and only tools whose
//! scopes are fully granted are described to the model or executed.
//!
//! ## Provider-neutral conversation
//!
//! The conversation is a list of [`Message`]s and provider responses are
//! reduced to an [`AssistantTurn`]. Provider wire formats live in the
//! infrastructure crate.

pub mod core;
pub mod orchestration;
pub mod session;
pub mod tool;

// Re-export commonly used types
pub use crate::core::trace::TraceId;
pub use orchestration::{
    state::RunState,
    value_objects::{NativeToolCallResponse, ToolCallRecord},
};
pub use session::{
    entities::{Message, Role, ToolResultBlock},
    response::{AssistantTurn, StopReason},
};
pub use tool::{
    entities::{RiskLevel, ToolCall, ToolDefinition},
    handler::{FnHandler, HandlerError, SyncFnHandler, ToolHandler},
    registry::{CapabilityRegistry, RegisteredTool},
    schema::{FieldShape, InputShape, ObjectShape, ValidationError},
    scope::{GrantedScopes, Scope},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult},
};
