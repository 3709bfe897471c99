//! Errors for the attributed graph and union-find utilities.

use thiserror::Error;

/// Errors raised by [`Graph`](crate::graph::Graph) operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Graph already contains an element with id '{id}'")]
    DuplicateElement { id: String },

    #[error("Graph has no element with id '{id}'")]
    MissingElement { id: String },
}

/// Errors raised by [`UnionFind`](crate::graph::UnionFind) operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnionFindError {
    #[error("Element {element} was never added to the union-find")]
    UnknownElement { element: String },

    #[error("Element {element} is already present in the union-find")]
    DuplicateElement { element: String },

    #[error("Keys collide on representative {key} and no conflict resolver was supplied")]
    KeyConflict { key: String },
}
