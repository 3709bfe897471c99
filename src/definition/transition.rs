//! Immutable transition definitions.

use crate::definition::state::StateDefinition;
use std::sync::Arc;

/// A declared transition: one source state, one or more permissible target
/// states, named after its owning action.
///
/// Non-determinism is expressed in the target set: the declaration only
/// bounds the *possible* outcomes, the actual outcome is decided by business
/// logic at invocation time and verified afterwards. A transition may target
/// the state it starts from.
#[derive(Clone, Debug)]
pub struct TransitionDefinition {
    name: String,
    source_state: Arc<StateDefinition>,
    target_states: Vec<Arc<StateDefinition>>,
}

impl TransitionDefinition {
    pub(crate) fn new(
        name: String,
        source_state: Arc<StateDefinition>,
        target_states: Vec<Arc<StateDefinition>>,
    ) -> Self {
        Self {
            name,
            source_state,
            target_states,
        }
    }

    /// The transition's name, equal to its owning action's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_state(&self) -> &StateDefinition {
        &self.source_state
    }

    /// Permissible target states, in declaration order, without duplicates.
    pub fn target_states(&self) -> &[Arc<StateDefinition>] {
        &self.target_states
    }

    pub fn target_names(&self) -> impl Iterator<Item = &str> {
        self.target_states.iter().map(|s| s.name())
    }

    /// Whether `state_name` is among the declared target states.
    pub fn allows_target(&self, state_name: &str) -> bool {
        self.target_states.iter().any(|s| s.name() == state_name)
    }

    /// A creating transition starts from the sentinel empty state.
    pub fn is_creation(&self) -> bool {
        self.source_state.is_sentinel()
    }

    /// A deleting transition may end in the sentinel empty state.
    pub fn is_deletion(&self) -> bool {
        self.target_states.iter().any(|s| s.is_sentinel())
    }
}
