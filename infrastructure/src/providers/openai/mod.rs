//! OpenAI chat-completions provider family.
//!
//! Also covers OpenAI-compatible endpoints (local servers, proxies) that
//! accept the same request shape.

pub mod adapter;
pub mod types;

pub use adapter::OpenAiAdapter;
