//! Capability registry
//!
//! The [`CapabilityRegistry`] is the catalog of tools a session knows about
//! plus the scopes that session has been granted. It answers one question for
//! the rest of the system: *is tool X callable right now?*
//!
//! # Session scoping
//!
//! A registry is a value owned by one session. Cloning it is cheap (handlers
//! are shared through [`Arc`]), so concurrent sessions each keep their own
//! copy with their own grants. An orchestration run borrows the registry
//! immutably for its whole duration; grant and revoke need `&mut self`, so
//! they can only happen between runs.

use super::entities::ToolDefinition;
use super::handler::ToolHandler;
use super::scope::{GrantedScopes, Scope};
use std::collections::HashMap;
use std::sync::Arc;

/// A tool definition together with the handler that implements it.
#[derive(Clone)]
pub struct RegisteredTool {
    pub definition: ToolDefinition,
    pub handler: Arc<dyn ToolHandler>,
}

impl std::fmt::Debug for RegisteredTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredTool")
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}

/// Tool catalog plus granted scopes for one session.
#[derive(Debug, Clone, Default)]
pub struct CapabilityRegistry {
    tools: HashMap<String, RegisteredTool>,
    granted: GrantedScopes,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tool by name. Registering the same name again overwrites the
    /// previous definition and handler.
    pub fn register(&mut self, definition: ToolDefinition, handler: Arc<dyn ToolHandler>) {
        self.tools.insert(
            definition.name.clone(),
            RegisteredTool {
                definition,
                handler,
            },
        );
    }

    /// Register a tool (builder pattern)
    pub fn with_tool(mut self, definition: ToolDefinition, handler: Arc<dyn ToolHandler>) -> Self {
        self.register(definition, handler);
        self
    }

    pub fn grant_scopes<I, S>(&mut self, scopes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<Scope>,
    {
        self.granted.grant(scopes);
    }

    pub fn revoke_scopes<I, S>(&mut self, scopes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<Scope>,
    {
        self.granted.revoke(scopes);
    }

    pub fn revoke_all(&mut self) {
        self.granted.revoke_all();
    }

    pub fn granted_scopes(&self) -> &GrantedScopes {
        &self.granted
    }

    /// Look up a tool by exact name.
    pub fn get(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.get(name)
    }

    pub fn definition(&self, name: &str) -> Option<&ToolDefinition> {
        self.get(name).map(|t| &t.definition)
    }

    /// False if the tool is unknown or any of its required scopes is missing.
    pub fn is_tool_allowed(&self, name: &str) -> bool {
        self.definition(name)
            .is_some_and(|d| self.granted.covers(&d.scopes))
    }

    /// Required scopes of `name` that are not granted. Empty for unknown tools.
    pub fn missing_scopes(&self, name: &str) -> Vec<&Scope> {
        self.definition(name)
            .map(|d| self.granted.missing(&d.scopes))
            .unwrap_or_default()
    }

    /// Every callable tool, sorted by name.
    pub fn allowed_tools(&self) -> Vec<&ToolDefinition> {
        let mut allowed: Vec<&ToolDefinition> = self
            .tools
            .values()
            .map(|t| &t.definition)
            .filter(|d| self.is_tool_allowed(&d.name))
            .collect();
        allowed.sort_by(|a, b| a.name.cmp(&b.name));
        allowed
    }

    /// Every registered tool, sorted by name.
    pub fn all_tools(&self) -> Vec<&ToolDefinition> {
        let mut all: Vec<&ToolDefinition> = self.tools.values().map(|t| &t.definition).collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
