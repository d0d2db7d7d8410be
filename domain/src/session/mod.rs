//! Conversation domain.
//!
//! - [`entities::Message`]: a single provider-neutral conversation message
//! - [`response::AssistantTurn`]: a provider response reduced to final text
//!   or a batch of tool calls

pub mod entities;
pub mod response;

pub use entities::{Message, Role, ToolResultBlock};
pub use response::{AssistantTurn, StopReason};
