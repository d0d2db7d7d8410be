//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod execute_tool;
pub mod execute_with_tools;
pub(crate) mod shared;
