//! Tool support for the infrastructure layer
//!
//! - [`schema`]: JSON Schema rendering of tool input shapes, shared by both
//!   provider families
//! - [`builtin`]: the tools the binary registers by default

pub mod builtin;
pub mod schema;

pub use builtin::register_builtin_tools;
