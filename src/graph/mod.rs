//! Generic attributed graph model plus the traversal and union-find
//! utilities used to validate and analyze machine topology.

pub mod attributed;
pub mod error;
pub mod search;
pub mod union_find;

pub use attributed::{AttrChange, AttrListener, AttrMap, Edge, ElementKind, Graph, Node};
pub use error::{GraphError, UnionFindError};
pub use search::{GraphSearch, SearchOrder};
pub use union_find::UnionFind;
