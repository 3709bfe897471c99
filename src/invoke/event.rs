//! The per-invocation transition event.

use crate::invoke::entity::{EntityId, EntityRef};
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

/// Invocation-scoped record passed to the business-logic handler.
///
/// Created per call and discarded afterwards. The handler reads the targeted
/// entity and the call arguments through it, and may signal an identity
/// change (for create-like transitions) or set a return value for the
/// caller.
pub struct TransitionEvent<'a> {
    entity: &'a mut dyn EntityRef,
    transition: String,
    args: Vec<Value>,
    new_id: Option<EntityId>,
    return_value: Option<Value>,
    event_id: Uuid,
    started_at: DateTime<Utc>,
}

impl<'a> TransitionEvent<'a> {
    pub(crate) fn new(entity: &'a mut dyn EntityRef, transition: String, args: Vec<Value>) -> Self {
        Self {
            entity,
            transition,
            args,
            new_id: None,
            return_value: None,
            event_id: Uuid::new_v4(),
            started_at: Utc::now(),
        }
    }

    pub fn entity(&self) -> &dyn EntityRef {
        self.entity
    }

    pub fn entity_mut(&mut self) -> &mut dyn EntityRef {
        self.entity
    }

    /// Name of the transition being invoked.
    pub fn transition(&self) -> &str {
        &self.transition
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Signal that the invocation changed the entity's identity.
    ///
    /// The invoker propagates the new id to the entity reference before
    /// reloading its state.
    pub fn set_new_id(&mut self, id: impl Into<EntityId>) {
        self.new_id = Some(id.into());
    }

    pub fn new_id(&self) -> Option<&EntityId> {
        self.new_id.as_ref()
    }

    /// Set the value returned to the invoking caller.
    pub fn set_return_value(&mut self, value: Value) {
        self.return_value = Some(value);
    }

    pub fn return_value(&self) -> Option<&Value> {
        self.return_value.as_ref()
    }

    /// Correlation id of this invocation, unique per event.
    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub(crate) fn into_outcome(self) -> (Option<EntityId>, Option<Value>, Uuid, DateTime<Utc>) {
        (self.new_id, self.return_value, self.event_id, self.started_at)
    }
}
