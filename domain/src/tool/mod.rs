//! Tool domain module
//!
//! This module defines how the model reaches host capabilities: every tool is
//! a [`ToolDefinition`] (name, description, required scopes, input shape,
//! risk level) held next to its [`ToolHandler`] in a [`CapabilityRegistry`].
//! The model requests a [`ToolCall`]; the executor answers with exactly one
//! [`ToolResult`].
//!
//! ```text
//! ┌────────────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ CapabilityRegistry │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (catalog + grants) │    │ (invocation) │    │ (output)     │
//! └─────────┬──────────┘    └──────────────┘    └──────────────┘
//!           │
//!           ├─ tools:   "getWeather" → ToolDefinition + ToolHandler
//!           └─ granted: {"read:device", ...}
//! ```
//!
//! # Permission Scopes
//!
//! A tool is callable iff every [`Scope`] it requires has been granted to the
//! session. Only callable tools are described to the model, and the executor
//! re-checks the grant on every call.
//!
//! # Risk-Based Execution
//!
//! Each tool has a [`RiskLevel`](entities::RiskLevel). High-risk tools are
//! passed to an optional risk assessor before they run:
//!
//! | Risk | Examples | Assessment |
//! |------|----------|------------|
//! | **Low** | read memory, read clock | No (direct execution) |
//! | **High** | device control, writes | Yes (when an assessor is configured) |
//!
//! # Key Types
//!
//! - [`CapabilityRegistry`]: tool catalog + granted scopes for one session
//! - [`ToolDefinition`]: name, description, scopes, input shape, risk level
//! - [`InputShape`] / [`ObjectShape`]: declarative argument schema
//! - [`ToolCall`]: an invocation request with arguments
//! - [`ToolResult`]: execution outcome, success or a coded [`ToolError`]
//! - [`ToolHandler`]: the business logic behind a tool
//! - [`ToolValidator`]: pure domain trait for argument validation

pub mod entities;
pub mod handler;
pub mod registry;
pub mod schema;
pub mod scope;
pub mod traits;
pub mod value_objects;

pub use entities::{RiskLevel, ToolCall, ToolDefinition};
pub use handler::{FnHandler, HandlerError, SyncFnHandler, ToolHandler};
pub use registry::{CapabilityRegistry, RegisteredTool};
pub use schema::{FieldShape, InputShape, ObjectShape, ValidationError};
pub use scope::{GrantedScopes, Scope};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{ToolError, ToolResult};
