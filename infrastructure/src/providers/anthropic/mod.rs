//! Anthropic messages API protocol family
//!
//! Tool use arrives as typed content blocks; results return as a single user
//! message of `tool_result` blocks.

mod adapter;
pub mod types;

pub use adapter::AnthropicAdapter;
