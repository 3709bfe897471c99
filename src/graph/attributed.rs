//! Generic mutable graph of identified, attribute-bearing nodes and
//! directed edges.
//!
//! Nodes and edges are registered into an owning [`Graph`], which indexes
//! them by id and by incident node for O(1) neighbor lookup. Nodes may carry
//! a nested sub-graph. Attribute mutation goes through the owning graph so
//! that a single notification hook sees every change.

use crate::graph::error::GraphError;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Attribute storage for graph elements.
///
/// Values are untyped JSON so that any front-end metadata (labels, colors,
/// positions) survives without the graph caring about its shape.
pub type AttrMap = BTreeMap<String, Value>;

/// Which kind of element an attribute change happened on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    Node,
    Edge,
}

/// A single attribute mutation, as reported to graph listeners.
#[derive(Clone, Debug)]
pub struct AttrChange {
    pub element: ElementKind,
    pub element_id: String,
    pub key: String,
    pub old: Option<Value>,
    pub new: Value,
}

/// Callback invoked by the owning graph after every attribute mutation.
pub type AttrListener = Box<dyn Fn(&AttrChange) + Send + Sync>;

/// An identified, attribute-bearing node, optionally owning a nested graph.
#[derive(Debug)]
pub struct Node {
    id: String,
    attrs: AttrMap,
    nested: Option<Box<Graph>>,
}

impl Node {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    pub fn attrs(&self) -> &AttrMap {
        &self.attrs
    }

    /// The nested sub-graph, if one was attached via
    /// [`Graph::set_nested_graph`].
    pub fn nested_graph(&self) -> Option<&Graph> {
        self.nested.as_deref()
    }
}

/// A directed edge between two nodes of the same owning graph.
#[derive(Debug)]
pub struct Edge {
    id: String,
    attrs: AttrMap,
    start: String,
    end: String,
}

impl Edge {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    pub fn attrs(&self) -> &AttrMap {
        &self.attrs
    }

    /// Id of the node this edge starts from.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Id of the node this edge points to.
    pub fn end(&self) -> &str {
        &self.end
    }
}

/// Mutable graph owning its nodes and edges.
///
/// Node and edge ids live in separate namespaces; registering a duplicate id
/// fails with [`GraphError::DuplicateElement`], and edges may only connect
/// nodes the graph already knows. Iteration over nodes and over a node's
/// outgoing edges follows insertion order, which keeps traversal
/// deterministic.
///
/// # Example
///
/// ```rust
/// use stateline::graph::Graph;
///
/// let mut graph = Graph::new();
/// graph.add_node("a").unwrap();
/// graph.add_node("b").unwrap();
/// graph.add_edge("a->b", "a", "b").unwrap();
///
/// let out: Vec<_> = graph.edges_from("a").unwrap();
/// assert_eq!(out.len(), 1);
/// assert_eq!(out[0].end(), "b");
/// ```
#[derive(Default)]
pub struct Graph {
    nodes: HashMap<String, Node>,
    edges: HashMap<String, Edge>,
    node_order: Vec<String>,
    edge_order: Vec<String>,
    outgoing: HashMap<String, Vec<String>>,
    incoming: HashMap<String, Vec<String>>,
    listeners: Vec<AttrListener>,
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("nodes", &self.node_order)
            .field("edges", &self.edge_order)
            .finish()
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new node. Fails if the id is already taken by a node.
    pub fn add_node(&mut self, id: impl Into<String>) -> Result<&mut Node, GraphError> {
        self.add_node_with_attrs(id, AttrMap::new())
    }

    /// Register a new node carrying initial attributes.
    ///
    /// Initial attributes do not go through the change notification hook;
    /// only later mutation via [`Graph::set_node_attr`] does.
    pub fn add_node_with_attrs(
        &mut self,
        id: impl Into<String>,
        attrs: AttrMap,
    ) -> Result<&mut Node, GraphError> {
        let id = id.into();
        if self.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateElement { id });
        }
        self.node_order.push(id.clone());
        self.outgoing.insert(id.clone(), Vec::new());
        self.incoming.insert(id.clone(), Vec::new());
        let node = Node {
            id: id.clone(),
            attrs,
            nested: None,
        };
        Ok(self.nodes.entry(id).or_insert(node))
    }

    /// Register a new directed edge between two known nodes.
    pub fn add_edge(
        &mut self,
        id: impl Into<String>,
        start: &str,
        end: &str,
    ) -> Result<&mut Edge, GraphError> {
        self.add_edge_with_attrs(id, start, end, AttrMap::new())
    }

    /// Register a new directed edge carrying initial attributes.
    pub fn add_edge_with_attrs(
        &mut self,
        id: impl Into<String>,
        start: &str,
        end: &str,
        attrs: AttrMap,
    ) -> Result<&mut Edge, GraphError> {
        let id = id.into();
        if self.edges.contains_key(&id) {
            return Err(GraphError::DuplicateElement { id });
        }
        if !self.nodes.contains_key(start) {
            return Err(GraphError::MissingElement {
                id: start.to_string(),
            });
        }
        if !self.nodes.contains_key(end) {
            return Err(GraphError::MissingElement { id: end.to_string() });
        }
        self.edge_order.push(id.clone());
        self.outgoing
            .get_mut(start)
            .expect("outgoing index exists for every node")
            .push(id.clone());
        self.incoming
            .get_mut(end)
            .expect("incoming index exists for every node")
            .push(id.clone());
        let edge = Edge {
            id: id.clone(),
            attrs,
            start: start.to_string(),
            end: end.to_string(),
        };
        Ok(self.edges.entry(id).or_insert(edge))
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// Look up a node, failing loudly if it is unknown.
    pub fn require_node(&self, id: &str) -> Result<&Node, GraphError> {
        self.nodes
            .get(id)
            .ok_or_else(|| GraphError::MissingElement { id: id.to_string() })
    }

    /// Look up an edge, failing loudly if it is unknown.
    pub fn require_edge(&self, id: &str) -> Result<&Edge, GraphError> {
        self.edges
            .get(id)
            .ok_or_else(|| GraphError::MissingElement { id: id.to_string() })
    }

    /// Node ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.node_order.iter().map(String::as_str)
    }

    /// Edge ids in insertion order.
    pub fn edge_ids(&self) -> impl Iterator<Item = &str> {
        self.edge_order.iter().map(String::as_str)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Outgoing edges of a node, in the order they were registered.
    pub fn edges_from(&self, node_id: &str) -> Result<Vec<&Edge>, GraphError> {
        let ids = self.outgoing.get(node_id).ok_or_else(|| {
            GraphError::MissingElement {
                id: node_id.to_string(),
            }
        })?;
        Ok(ids.iter().map(|id| &self.edges[id]).collect())
    }

    /// Incoming edges of a node, in the order they were registered.
    pub fn edges_to(&self, node_id: &str) -> Result<Vec<&Edge>, GraphError> {
        let ids = self.incoming.get(node_id).ok_or_else(|| {
            GraphError::MissingElement {
                id: node_id.to_string(),
            }
        })?;
        Ok(ids.iter().map(|id| &self.edges[id]).collect())
    }

    /// Set an attribute on a node, returning the previous value.
    ///
    /// The mutation is reported to every registered listener; this and
    /// [`Graph::set_edge_attr`] are the only mutation sites, so listeners
    /// observe every change.
    pub fn set_node_attr(
        &mut self,
        node_id: &str,
        key: impl Into<String>,
        value: Value,
    ) -> Result<Option<Value>, GraphError> {
        let key = key.into();
        let node = self.nodes.get_mut(node_id).ok_or_else(|| {
            GraphError::MissingElement {
                id: node_id.to_string(),
            }
        })?;
        let old = node.attrs.insert(key.clone(), value.clone());
        let change = AttrChange {
            element: ElementKind::Node,
            element_id: node_id.to_string(),
            key,
            old: old.clone(),
            new: value,
        };
        self.notify_attr_changed(&change);
        Ok(old)
    }

    /// Set an attribute on an edge, returning the previous value.
    pub fn set_edge_attr(
        &mut self,
        edge_id: &str,
        key: impl Into<String>,
        value: Value,
    ) -> Result<Option<Value>, GraphError> {
        let key = key.into();
        let edge = self.edges.get_mut(edge_id).ok_or_else(|| {
            GraphError::MissingElement {
                id: edge_id.to_string(),
            }
        })?;
        let old = edge.attrs.insert(key.clone(), value.clone());
        let change = AttrChange {
            element: ElementKind::Edge,
            element_id: edge_id.to_string(),
            key,
            old: old.clone(),
            new: value,
        };
        self.notify_attr_changed(&change);
        Ok(old)
    }

    /// Register a listener for attribute changes on any element.
    pub fn on_attr_changed(&mut self, listener: AttrListener) {
        self.listeners.push(listener);
    }

    /// Attach a nested sub-graph to a node, replacing any previous one.
    pub fn set_nested_graph(&mut self, node_id: &str, graph: Graph) -> Result<(), GraphError> {
        let node = self.nodes.get_mut(node_id).ok_or_else(|| {
            GraphError::MissingElement {
                id: node_id.to_string(),
            }
        })?;
        node.nested = Some(Box::new(graph));
        Ok(())
    }

    fn notify_attr_changed(&self, change: &AttrChange) {
        for listener in &self.listeners {
            listener(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn diamond() -> Graph {
        let mut graph = Graph::new();
        for id in ["a", "b", "c", "d"] {
            graph.add_node(id).unwrap();
        }
        graph.add_edge("ab", "a", "b").unwrap();
        graph.add_edge("ac", "a", "c").unwrap();
        graph.add_edge("bd", "b", "d").unwrap();
        graph.add_edge("cd", "c", "d").unwrap();
        graph
    }

    #[test]
    fn duplicate_node_id_is_rejected() {
        let mut graph = Graph::new();
        graph.add_node("a").unwrap();
        let err = graph.add_node("a").unwrap_err();
        assert_eq!(
            err,
            GraphError::DuplicateElement {
                id: "a".to_string()
            }
        );
    }

    #[test]
    fn duplicate_edge_id_is_rejected() {
        let mut graph = diamond();
        let err = graph.add_edge("ab", "a", "d").unwrap_err();
        assert!(matches!(err, GraphError::DuplicateElement { .. }));
    }

    #[test]
    fn edge_requires_known_endpoints() {
        let mut graph = Graph::new();
        graph.add_node("a").unwrap();
        let err = graph.add_edge("ax", "a", "x").unwrap_err();
        assert_eq!(
            err,
            GraphError::MissingElement {
                id: "x".to_string()
            }
        );
        let err = graph.add_edge("xa", "x", "a").unwrap_err();
        assert_eq!(
            err,
            GraphError::MissingElement {
                id: "x".to_string()
            }
        );
    }

    #[test]
    fn outgoing_edges_follow_insertion_order() {
        let graph = diamond();
        let out: Vec<_> = graph
            .edges_from("a")
            .unwrap()
            .iter()
            .map(|e| e.id().to_string())
            .collect();
        assert_eq!(out, vec!["ab", "ac"]);
    }

    #[test]
    fn incoming_edges_are_indexed() {
        let graph = diamond();
        let inc: Vec<_> = graph
            .edges_to("d")
            .unwrap()
            .iter()
            .map(|e| e.id().to_string())
            .collect();
        assert_eq!(inc, vec!["bd", "cd"]);
    }

    #[test]
    fn attr_mutation_notifies_listeners() {
        let mut graph = diamond();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        graph.on_attr_changed(Box::new(move |change| {
            assert_eq!(change.element_id, "a");
            assert_eq!(change.key, "label");
            seen.fetch_add(1, Ordering::SeqCst);
        }));

        let old = graph.set_node_attr("a", "label", json!("start")).unwrap();
        assert_eq!(old, None);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let old = graph.set_node_attr("a", "label", json!("begin")).unwrap();
        assert_eq!(old, Some(json!("start")));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(graph.node("a").unwrap().attr("label"), Some(&json!("begin")));
    }

    #[test]
    fn edge_attrs_are_mutable_through_the_graph() {
        let mut graph = diamond();
        graph.set_edge_attr("ab", "weight", json!(3)).unwrap();
        assert_eq!(graph.edge("ab").unwrap().attr("weight"), Some(&json!(3)));

        let err = graph.set_edge_attr("zz", "weight", json!(1)).unwrap_err();
        assert!(matches!(err, GraphError::MissingElement { .. }));
    }

    #[test]
    fn nested_graph_round_trip() {
        let mut inner = Graph::new();
        inner.add_node("inner").unwrap();

        let mut graph = diamond();
        graph.set_nested_graph("a", inner).unwrap();

        let nested = graph.node("a").unwrap().nested_graph().unwrap();
        assert_eq!(nested.node_count(), 1);
        assert!(graph.node("b").unwrap().nested_graph().is_none());
    }

    #[test]
    fn require_node_fails_loudly() {
        let graph = diamond();
        assert!(graph.require_node("a").is_ok());
        assert!(matches!(
            graph.require_node("zz"),
            Err(GraphError::MissingElement { .. })
        ));
    }
}
