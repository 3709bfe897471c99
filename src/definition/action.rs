//! Immutable action definitions.

use crate::definition::transition::TransitionDefinition;
use std::collections::HashMap;
use std::sync::Arc;

/// A named input symbol of the machine (e.g. "create", "publish").
///
/// An action groups at most one transition per source state sharing its
/// name; this is the determinism invariant: from a given state, a given
/// action has exactly one applicable transition, even though that transition
/// may lead to multiple possible target states.
#[derive(Clone, Debug)]
pub struct ActionDefinition {
    name: String,
    transitions_by_source_state: HashMap<String, Arc<TransitionDefinition>>,
}

impl ActionDefinition {
    pub(crate) fn new(
        name: String,
        transitions_by_source_state: HashMap<String, Arc<TransitionDefinition>>,
    ) -> Self {
        Self {
            name,
            transitions_by_source_state,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The transition this action performs from `source_state`, if any.
    pub fn transition_from(&self, source_state: &str) -> Option<&Arc<TransitionDefinition>> {
        self.transitions_by_source_state.get(source_state)
    }

    pub fn transitions_by_source_state(&self) -> &HashMap<String, Arc<TransitionDefinition>> {
        &self.transitions_by_source_state
    }

    pub fn source_state_names(&self) -> impl Iterator<Item = &str> {
        self.transitions_by_source_state.keys().map(String::as_str)
    }
}
