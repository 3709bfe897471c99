//! Derived graph view of a state machine definition.

use crate::definition::machine::StateMachineDefinition;
use crate::definition::transition::TransitionDefinition;
use crate::graph::{AttrMap, Edge, Graph, GraphError, Node};
use serde_json::Value;
use std::collections::HashMap;

const ENTRY_NODE_ID: &str = "entry";
const EXIT_NODE_ID: &str = "exit";

/// Graph view of a [`StateMachineDefinition`], derived once from the frozen
/// definition.
///
/// Each state becomes one node, except the sentinel empty state which
/// becomes an entry node and an exit node so that creation and deletion
/// edges stay distinguishable even though they share a state name. Each
/// `(transition, target state)` pair becomes one directed edge from the
/// transition's source node, tagged with the owning transition. Transition
/// lookups are keyed structurally on `(name, source state)`; state and
/// action names are arbitrary strings, so no delimiter-joined composite
/// string is collision-free.
///
/// Lookups fail loudly instead of silently returning empty: a miss means
/// the definition and graph have gone out of sync, which should never
/// happen for a graph computed from a frozen definition.
#[derive(Debug)]
pub struct StateMachineGraph {
    graph: Graph,
    node_by_state: HashMap<String, String>,
    edges_by_transition: HashMap<(String, String), Vec<String>>,
}

impl StateMachineGraph {
    pub(crate) fn derive(definition: &StateMachineDefinition) -> Self {
        let mut graph = Graph::new();
        let mut node_by_state = HashMap::new();

        let mut state_names: Vec<&str> = definition.states().keys().map(String::as_str).collect();
        state_names.sort_unstable();

        for name in state_names {
            let state = &definition.states()[name];
            if state.is_sentinel() {
                let mut attrs = AttrMap::new();
                attrs.insert("state".to_string(), Value::String(String::new()));
                attrs.insert("role".to_string(), Value::String("entry".to_string()));
                graph
                    .add_node_with_attrs(ENTRY_NODE_ID, attrs)
                    .expect("entry node id is unique");
                let mut attrs = AttrMap::new();
                attrs.insert("state".to_string(), Value::String(String::new()));
                attrs.insert("role".to_string(), Value::String("exit".to_string()));
                graph
                    .add_node_with_attrs(EXIT_NODE_ID, attrs)
                    .expect("exit node id is unique");
            } else {
                let id = format!("state:{name}");
                let mut attrs = AttrMap::new();
                attrs.insert("state".to_string(), Value::String(name.to_string()));
                if let Some(label) = state.label() {
                    attrs.insert("label".to_string(), Value::String(label.to_string()));
                }
                if let Some(color) = state.color() {
                    attrs.insert("color".to_string(), Value::String(color.to_string()));
                }
                graph
                    .add_node_with_attrs(id.clone(), attrs)
                    .expect("state names are unique in a frozen definition");
                node_by_state.insert(name.to_string(), id);
            }
        }

        let mut edges_by_transition: HashMap<(String, String), Vec<String>> = HashMap::new();
        for transition in definition.transitions() {
            let source = transition.source_state();
            let transition_key = (transition.name().to_string(), source.name().to_string());
            let start_id = if source.is_sentinel() {
                ENTRY_NODE_ID.to_string()
            } else {
                node_by_state[source.name()].clone()
            };

            for target in transition.target_states() {
                let end_id = if target.is_sentinel() {
                    EXIT_NODE_ID.to_string()
                } else {
                    node_by_state[target.name()].clone()
                };

                let edge_id = format!("edge:{}", graph.edge_count());
                let mut attrs = AttrMap::new();
                attrs.insert(
                    "transition".to_string(),
                    Value::String(transition.name().to_string()),
                );
                attrs.insert(
                    "source".to_string(),
                    Value::String(source.name().to_string()),
                );
                attrs.insert(
                    "target".to_string(),
                    Value::String(target.name().to_string()),
                );
                graph
                    .add_edge_with_attrs(edge_id.clone(), &start_id, &end_id, attrs)
                    .expect("edge ids are sequential and never reused");
                edges_by_transition
                    .entry(transition_key.clone())
                    .or_default()
                    .push(edge_id);
            }
        }

        Self {
            graph,
            node_by_state,
            edges_by_transition,
        }
    }

    /// The underlying attributed graph, for analysis and rendering.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The node representing a state.
    ///
    /// For the sentinel empty state this is the entry node (the source side
    /// of creation edges); use [`StateMachineGraph::exit_node`] for the
    /// target side of deletion edges.
    pub fn node_by_state(&self, state: &str) -> Result<&Node, GraphError> {
        if state.is_empty() {
            return Ok(self.entry_node());
        }
        let id = self
            .node_by_state
            .get(state)
            .ok_or_else(|| GraphError::MissingElement {
                id: state.to_string(),
            })?;
        self.graph.require_node(id)
    }

    /// The node creation edges start from.
    pub fn entry_node(&self) -> &Node {
        self.graph
            .node(ENTRY_NODE_ID)
            .expect("every derived graph has an entry node")
    }

    /// The node deletion edges end at.
    pub fn exit_node(&self) -> &Node {
        self.graph
            .node(EXIT_NODE_ID)
            .expect("every derived graph has an exit node")
    }

    /// One edge per target state of the given transition, in declaration
    /// order.
    ///
    /// An action may own several transitions (one per source state); this
    /// lookup returns the edges of exactly the given one.
    pub fn edges_by_transition(
        &self,
        transition: &TransitionDefinition,
    ) -> Result<Vec<&Edge>, GraphError> {
        let key = (
            transition.name().to_string(),
            transition.source_state().name().to_string(),
        );
        let ids = self
            .edges_by_transition
            .get(&key)
            .ok_or_else(|| GraphError::MissingElement {
                id: format!("{key:?}"),
            })?;
        ids.iter().map(|id| self.graph.require_edge(id)).collect()
    }
}
