//! Tool handler abstraction
//!
//! A [`ToolHandler`] is the business logic behind a tool (memory store,
//! scheduler, device control, ...). Handlers receive arguments that have
//! already been permission-checked, validated against the tool's
//! [`ObjectShape`](super::schema::ObjectShape) and reduced to its declared
//! keys. They report failure by
//! returning [`HandlerError`] rather than panicking.
//!
//! # Example
//!
//! ```
//! use lisa_domain::tool::handler::{HandlerError, SyncFnHandler};
//! use serde_json::json;
//!
//! let handler = SyncFnHandler::new(|args: &serde_json::Map<String, serde_json::Value>| {
//!     let city = args.get("city").and_then(|v| v.as_str()).unwrap_or_default();
//!     if city.is_empty() {
//!         return Err(HandlerError::failed("empty city"));
//!     }
//!     Ok(json!({ "city": city, "temp": 18 }))
//! });
//! # let _ = handler;
//! ```

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::future::Future;
use thiserror::Error;

/// Error reported by a tool handler
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// The operation ran and failed
    #[error("{0}")]
    Failed(String),

    /// A resource the handler depends on is not reachable
    #[error("resource unavailable: {0}")]
    Unavailable(String),
}

impl HandlerError {
    pub fn failed(message: impl Into<String>) -> Self {
        HandlerError::Failed(message.into())
    }

    pub fn unavailable(resource: impl Into<String>) -> Self {
        HandlerError::Unavailable(resource.into())
    }
}

/// Business logic behind a tool.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Run the tool with validated arguments.
    async fn call(&self, args: &Map<String, Value>) -> Result<Value, HandlerError>;
}

/// Adapts an async closure into a [`ToolHandler`].
pub struct FnHandler<F> {
    f: F,
}

impl<F> FnHandler<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F, Fut> ToolHandler for FnHandler<F>
where
    F: Fn(Map<String, Value>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, HandlerError>> + Send,
{
    async fn call(&self, args: &Map<String, Value>) -> Result<Value, HandlerError> {
        (self.f)(args.clone()).await
    }
}

/// Adapts a synchronous closure into a [`ToolHandler`].
pub struct SyncFnHandler<F> {
    f: F,
}

impl<F> SyncFnHandler<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F> ToolHandler for SyncFnHandler<F>
where
    F: Fn(&Map<String, Value>) -> Result<Value, HandlerError> + Send + Sync,
{
    async fn call(&self, args: &Map<String, Value>) -> Result<Value, HandlerError> {
        (self.f)(args)
    }
}
