//! Core domain primitives shared across subdomains.
//!
//! - [`trace::TraceId`]: run correlation id stamped on every tool result

pub mod trace;
