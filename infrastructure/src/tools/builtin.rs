//! Built-in tools: current_time, word_count
//!
//! Small read-only tools so the binary has something to call out of the box.
//! Each tool is a definition function plus a handler function, registered
//! together by [`register_builtin_tools`].

use chrono::{Local, SecondsFormat, Utc};
use lisa_domain::{
    CapabilityRegistry, HandlerError, InputShape, ObjectShape, SyncFnHandler, ToolDefinition,
};
use serde_json::{Map, Value, json};
use std::sync::Arc;

/// Tool name constants
pub const CURRENT_TIME: &str = "current_time";
pub const WORD_COUNT: &str = "word_count";

/// Scope tags the built-in tools require
pub const SCOPE_CLOCK: &str = "read:clock";
pub const SCOPE_TEXT: &str = "read:text";

/// Get the tool definition for current_time
pub fn current_time_definition() -> ToolDefinition {
    ToolDefinition::new(CURRENT_TIME, "Get the current date and time")
        .with_scope(SCOPE_CLOCK)
        .with_input(ObjectShape::new().optional(
            "zone",
            "Which clock to read (default: utc)",
            InputShape::one_of(["utc", "local"]),
        ))
}

/// Get the tool definition for word_count
pub fn word_count_definition() -> ToolDefinition {
    ToolDefinition::new(WORD_COUNT, "Count words, characters, and lines in a text")
        .with_scope(SCOPE_TEXT)
        .with_input(ObjectShape::new().required("text", "Text to analyze", InputShape::String))
}

/// Execute current_time
pub fn current_time(args: &Map<String, Value>) -> Result<Value, HandlerError> {
    let zone = args.get("zone").and_then(Value::as_str).unwrap_or("utc");
    let now = match zone {
        "local" => Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
        _ => Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    };
    Ok(json!({ "zone": zone, "now": now }))
}

/// Execute word_count
pub fn word_count(args: &Map<String, Value>) -> Result<Value, HandlerError> {
    let text = args
        .get("text")
        .and_then(Value::as_str)
        .ok_or_else(|| HandlerError::failed("missing text"))?;

    Ok(json!({
        "words": text.split_whitespace().count(),
        "characters": text.chars().count(),
        "lines": text.lines().count(),
    }))
}

/// Register every built-in tool. Scopes are not granted here.
pub fn register_builtin_tools(registry: &mut CapabilityRegistry) {
    registry.register(current_time_definition(), Arc::new(SyncFnHandler::new(current_time)));
    registry.register(word_count_definition(), Arc::new(SyncFnHandler::new(word_count)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_word_count() {
        let out = word_count(&args(json!({"text": "one two\nthree"}))).unwrap();
        assert_eq!(out["words"], 3);
        assert_eq!(out["characters"], 13);
        assert_eq!(out["lines"], 2);
    }

    #[test]
    fn test_word_count_empty_text() {
        let out = word_count(&args(json!({"text": ""}))).unwrap();
        assert_eq!(out["words"], 0);
        assert_eq!(out["lines"], 0);
    }

    #[test]
    fn test_current_time_defaults_to_utc() {
        let out = current_time(&Map::new()).unwrap();
        assert_eq!(out["zone"], "utc");
        let now = out["now"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(now).is_ok());
        assert!(now.ends_with('Z'));
    }

    #[test]
    fn test_registration_requires_grants() {
        let mut registry = CapabilityRegistry::new();
        register_builtin_tools(&mut registry);

        assert_eq!(registry.len(), 2);
        assert!(registry.allowed_tools().is_empty());

        registry.grant_scopes([SCOPE_TEXT]);
        let allowed: Vec<&str> = registry
            .allowed_tools()
            .into_iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(allowed, vec![WORD_COUNT]);
    }
}
