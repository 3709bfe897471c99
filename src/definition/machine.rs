//! The immutable, validated state machine definition.

use crate::definition::action::ActionDefinition;
use crate::definition::graph::StateMachineGraph;
use crate::definition::state::StateDefinition;
use crate::definition::transition::TransitionDefinition;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// The validated output of
/// [`StateMachineDefinitionBuilder`](crate::builder::StateMachineDefinitionBuilder).
///
/// Invariants are enforced once at build time and never revisited: every
/// transition's source and target state names exist in `states`, every
/// transition's name exists in `actions`, and no two states, actions or
/// transitions share a name within their collection. A definition is frozen
/// after construction and may be shared across threads (typically behind an
/// `Arc`) without synchronization.
///
/// # Example
///
/// ```rust
/// use stateline::builder::StateMachineDefinitionBuilder;
/// use stateline::definition::EMPTY_STATE;
///
/// let mut builder = StateMachineDefinitionBuilder::new("Document");
/// builder.add_state("Draft").unwrap();
/// builder.add_state("Published").unwrap();
/// builder.add_transition("create", EMPTY_STATE, ["Draft"]).unwrap();
/// builder.add_transition("publish", "Draft", ["Published"]).unwrap();
///
/// let definition = builder.build().unwrap();
/// let publish = definition.transition_for("publish", "Draft").unwrap();
/// assert!(publish.allows_target("Published"));
/// ```
#[derive(Debug)]
pub struct StateMachineDefinition {
    machine_type: String,
    states: HashMap<String, Arc<StateDefinition>>,
    actions: HashMap<String, Arc<ActionDefinition>>,
    transitions: Vec<Arc<TransitionDefinition>>,
    graph: OnceLock<StateMachineGraph>,
}

impl StateMachineDefinition {
    pub(crate) fn new(
        machine_type: String,
        states: HashMap<String, Arc<StateDefinition>>,
        actions: HashMap<String, Arc<ActionDefinition>>,
        transitions: Vec<Arc<TransitionDefinition>>,
    ) -> Self {
        Self {
            machine_type,
            states,
            actions,
            transitions,
            graph: OnceLock::new(),
        }
    }

    /// The entity type this machine governs, used in diagnostics.
    pub fn machine_type(&self) -> &str {
        &self.machine_type
    }

    pub fn state(&self, name: &str) -> Option<&Arc<StateDefinition>> {
        self.states.get(name)
    }

    pub fn states(&self) -> &HashMap<String, Arc<StateDefinition>> {
        &self.states
    }

    pub fn action(&self, name: &str) -> Option<&Arc<ActionDefinition>> {
        self.actions.get(name)
    }

    pub fn actions(&self) -> &HashMap<String, Arc<ActionDefinition>> {
        &self.actions
    }

    /// All transitions, in declaration order.
    pub fn transitions(&self) -> &[Arc<TransitionDefinition>] {
        &self.transitions
    }

    /// The single transition a given action performs from a given source
    /// state, if one was declared.
    pub fn transition_for(
        &self,
        action: &str,
        source_state: &str,
    ) -> Option<&Arc<TransitionDefinition>> {
        self.actions
            .get(action)
            .and_then(|a| a.transition_from(source_state))
    }

    /// The derived graph view of this machine, computed on first access and
    /// cached for the definition's lifetime.
    pub fn graph(&self) -> &StateMachineGraph {
        self.graph.get_or_init(|| StateMachineGraph::derive(self))
    }
}
