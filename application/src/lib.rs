//! Application layer for lisa
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    provider::{GatewayError, ProtocolAdapter, ProviderTransport, RequestOptions},
    risk_assessor::{RiskAssessment, RiskAssessor},
};
pub use use_cases::execute_tool::ToolExecutor;
pub use use_cases::execute_with_tools::{ExecuteWithToolsInput, ExecuteWithToolsUseCase, RunError};
