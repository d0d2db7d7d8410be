//! Orchestration domain
//!
//! State and outputs of the tool-calling loop. The loop itself lives in the
//! application layer, since it drives I/O through ports.

pub mod state;
pub mod value_objects;

pub use state::RunState;
pub use value_objects::{NativeToolCallResponse, ToolCallRecord};
