//! Permission scopes
//!
//! A [`Scope`] is an opaque capability tag such as `read:memory` or
//! `sensors:camera`. Tools declare the scopes they require; a session holds
//! the [`GrantedScopes`] it has been given. Grants are additive and never
//! partial: a tool is callable only when *every* scope it requires is granted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An opaque capability tag.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scope(String);

impl Scope {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Scope {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for Scope {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

/// The set of scopes granted to one session.
///
/// Created empty. All mutations are idempotent: granting an already-granted
/// scope or revoking an absent one is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantedScopes {
    scopes: BTreeSet<Scope>,
}

impl GrantedScopes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant<I, S>(&mut self, scopes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<Scope>,
    {
        self.scopes.extend(scopes.into_iter().map(Into::into));
    }

    pub fn revoke<I, S>(&mut self, scopes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<Scope>,
    {
        for scope in scopes {
            self.scopes.remove(&scope.into());
        }
    }

    pub fn revoke_all(&mut self) {
        self.scopes.clear();
    }

    pub fn contains(&self, scope: &Scope) -> bool {
        self.scopes.contains(scope)
    }

    /// True iff `required ⊆ granted`.
    pub fn covers(&self, required: &BTreeSet<Scope>) -> bool {
        required.is_subset(&self.scopes)
    }

    /// Required scopes that are not granted, in sorted order.
    pub fn missing<'a>(&'a self, required: &'a BTreeSet<Scope>) -> Vec<&'a Scope> {
        required.difference(&self.scopes).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.iter()
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}
