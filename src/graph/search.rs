//! Depth-first and breadth-first traversal over an attributed graph.
//!
//! Both orders share one engine: nodes are marked seen when they are first
//! queued, visited once when dequeued, and their outgoing edges are walked
//! in insertion order. Callbacks can prune expansion per node and veto
//! following individual edges.

use crate::graph::attributed::{Edge, Graph, Node};
use crate::graph::error::GraphError;
use std::collections::{HashSet, VecDeque};

/// Traversal order for [`GraphSearch`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchOrder {
    /// LIFO: the most recently queued node is visited next.
    DepthFirst,
    /// FIFO: nodes are visited in arrival order.
    BreadthFirst,
}

type NodeCallback<'g> = Box<dyn FnMut(&Node) -> bool + 'g>;
type EdgeCallback<'g> = Box<dyn FnMut(&Edge) -> bool + 'g>;

/// Configurable DFS/BFS traversal.
///
/// # Example
///
/// ```rust
/// use stateline::graph::{Graph, GraphSearch};
///
/// let mut graph = Graph::new();
/// graph.add_node("a").unwrap();
/// graph.add_node("b").unwrap();
/// graph.add_edge("ab", "a", "b").unwrap();
/// graph.add_edge("ba", "b", "a").unwrap(); // cycle
///
/// let mut visited = Vec::new();
/// GraphSearch::bfs(&graph)
///     .on_node(|node| {
///         visited.push(node.id().to_string());
///         true
///     })
///     .run(["a"])
///     .unwrap();
///
/// // The cycle does not revisit "a".
/// assert_eq!(visited, vec!["a", "b"]);
/// ```
pub struct GraphSearch<'g> {
    graph: &'g Graph,
    order: SearchOrder,
    on_node: Option<NodeCallback<'g>>,
    on_edge: Option<EdgeCallback<'g>>,
}

impl<'g> GraphSearch<'g> {
    /// Depth-first traversal over `graph`.
    pub fn dfs(graph: &'g Graph) -> Self {
        Self::new(graph, SearchOrder::DepthFirst)
    }

    /// Breadth-first traversal over `graph`.
    pub fn bfs(graph: &'g Graph) -> Self {
        Self::new(graph, SearchOrder::BreadthFirst)
    }

    fn new(graph: &'g Graph, order: SearchOrder) -> Self {
        Self {
            graph,
            order,
            on_node: None,
            on_edge: None,
        }
    }

    /// Called once per node when it is dequeued.
    ///
    /// Returning `false` skips expanding the node's outgoing edges; the node
    /// itself stays marked as seen.
    pub fn on_node<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&Node) -> bool + 'g,
    {
        self.on_node = Some(Box::new(callback));
        self
    }

    /// Called for every outgoing edge of every dequeued node, including
    /// edges whose target was already seen.
    ///
    /// Returning `false` suppresses queueing an unseen target; the target is
    /// marked seen either way so it will not be queued through another edge
    /// later.
    pub fn on_edge<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&Edge) -> bool + 'g,
    {
        self.on_edge = Some(Box::new(callback));
        self
    }

    /// Run the traversal from the given start nodes.
    ///
    /// All start nodes are marked seen and queued in order before any is
    /// visited; traversal proceeds until the queue is empty. Fails if any
    /// start node is unknown to the graph.
    pub fn run<I, S>(mut self, starts: I) -> Result<(), GraphError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let graph = self.graph;
        let mut seen: HashSet<String> = HashSet::new();
        let mut pending: VecDeque<String> = VecDeque::new();

        for start in starts {
            let id = graph.require_node(start.as_ref())?.id().to_string();
            if seen.insert(id.clone()) {
                pending.push_back(id);
            }
        }

        while let Some(id) = match self.order {
            SearchOrder::DepthFirst => pending.pop_back(),
            SearchOrder::BreadthFirst => pending.pop_front(),
        } {
            let node = graph.require_node(&id)?;
            let expand = match self.on_node.as_mut() {
                Some(callback) => callback(node),
                None => true,
            };
            if !expand {
                continue;
            }

            for edge in graph.edges_from(&id)? {
                let follow = match self.on_edge.as_mut() {
                    Some(callback) => callback(edge),
                    None => true,
                };
                let target = edge.end().to_string();
                let first_visit = seen.insert(target.clone());
                if first_visit && follow {
                    pending.push_back(target);
                }
            }
        }

        Ok(())
    }
}
