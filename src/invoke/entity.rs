//! The entity reference collaborator interface.
//!
//! Persistence adapters supply the implementation; the core only needs to
//! read the current state, drop cached data, and get/set the identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque entity identity, supplied and interpreted by the persistence
/// adapter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

/// A reference to one persisted entity, backed by a data source outside the
/// core.
///
/// The core assumes at most one concurrent transition per entity identity;
/// enforcing that (row lock, optimistic-concurrency token) is the backing
/// store's responsibility.
pub trait EntityRef {
    /// The entity's current state name. The sentinel empty state means the
    /// entity does not exist (yet, or any more).
    fn current_state(&self) -> String;

    /// Drop any cached data so the next read hits the backing store.
    fn invalidate(&mut self);

    /// The entity's identity, if it has one.
    fn id(&self) -> Option<EntityId>;

    /// Update the entity's identity, e.g. after a create-like transition
    /// signaled a new id.
    fn set_id(&mut self, id: EntityId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_converts_from_common_types() {
        assert_eq!(EntityId::from(42u64).as_str(), "42");
        assert_eq!(EntityId::from("abc").as_str(), "abc");
        assert_eq!(EntityId::from(-7i64).to_string(), "-7");
    }

    #[test]
    fn entity_id_serializes_transparently() {
        let id = EntityId::from(42u64);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");
    }
}
