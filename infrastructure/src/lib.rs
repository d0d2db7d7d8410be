//! Infrastructure layer for lisa
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: provider protocol adapters, the HTTP
//! transport, configuration file loading, and the JSONL run log.

pub mod config;
pub mod logging;
pub mod providers;
pub mod tools;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use logging::JsonlConversationLogger;
pub use providers::{
    AnthropicAdapter, HttpTransport, OpenAiAdapter, ProviderKind, ProviderSetup, build_provider,
};
pub use tools::register_builtin_tools;
