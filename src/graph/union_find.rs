//! Disjoint-set (union-find) over arbitrary hashable identifiers.
//!
//! Used to collapse provably-equivalent graph identifiers, for instance when
//! merging information from multiple sources describing the same machine.

use crate::graph::error::UnionFindError;
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

/// Union-find forest with path compression.
///
/// # Example
///
/// ```rust
/// use stateline::graph::UnionFind;
///
/// let mut uf = UnionFind::new();
/// uf.add("a");
/// uf.add("b");
/// uf.add("c");
/// uf.union(&"a", &"b").unwrap();
///
/// assert_eq!(uf.find(&"a").unwrap(), uf.find(&"b").unwrap());
/// assert_eq!(uf.find_distinct().len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct UnionFind<T: Clone + Eq + Hash + Debug> {
    parents: HashMap<T, T>,
    order: Vec<T>,
}

impl<T: Clone + Eq + Hash + Debug> UnionFind<T> {
    pub fn new() -> Self {
        Self {
            parents: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Add an element as its own singleton component. Idempotent.
    pub fn add(&mut self, element: T) {
        if !self.parents.contains_key(&element) {
            self.order.push(element.clone());
            self.parents.insert(element.clone(), element);
        }
    }

    /// Add an element, failing if it is already present.
    pub fn add_unique(&mut self, element: T) -> Result<(), UnionFindError> {
        if self.parents.contains_key(&element) {
            return Err(UnionFindError::DuplicateElement {
                element: format!("{element:?}"),
            });
        }
        self.add(element);
        Ok(())
    }

    pub fn contains(&self, element: &T) -> bool {
        self.parents.contains_key(element)
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Find the representative of an element's component, compressing the
    /// path along the way. Fails if the element was never added.
    pub fn find(&mut self, element: &T) -> Result<T, UnionFindError> {
        let mut root = self
            .parents
            .get(element)
            .ok_or_else(|| UnionFindError::UnknownElement {
                element: format!("{element:?}"),
            })?
            .clone();
        loop {
            let parent = self.parents[&root].clone();
            if parent == root {
                break;
            }
            root = parent;
        }

        // Path compression: repoint every element on the walked path.
        let mut current = element.clone();
        while current != root {
            let parent = self.parents[&current].clone();
            self.parents.insert(current, root.clone());
            current = parent;
        }

        Ok(root)
    }

    /// Merge the components of two elements. No-op if they already share a
    /// representative.
    pub fn union(&mut self, a: &T, b: &T) -> Result<(), UnionFindError> {
        let root_a = self.find(a)?;
        let root_b = self.find(b)?;
        if root_a != root_b {
            self.parents.insert(root_b, root_a);
        }
        Ok(())
    }

    /// One representative per component, ordered by first appearance of the
    /// component among added elements.
    pub fn find_distinct(&mut self) -> Vec<T> {
        let elements = self.order.clone();
        let mut distinct = Vec::new();
        let mut seen = HashSet::new();
        for element in elements {
            let root = self
                .find(&element)
                .expect("every tracked element has a root");
            if seen.insert(root.clone()) {
                distinct.push(root);
            }
        }
        distinct
    }

    /// Rewrite a map's keys through [`UnionFind::find`].
    ///
    /// When two keys collapse onto the same representative, the supplied
    /// resolver merges their values; without a resolver the collision is an
    /// error. Every key must have been added to the union-find.
    pub fn update_map<V>(
        &mut self,
        map: HashMap<T, V>,
        resolve_conflict: Option<&dyn Fn(V, V) -> V>,
    ) -> Result<HashMap<T, V>, UnionFindError> {
        let mut rewritten: HashMap<T, V> = HashMap::with_capacity(map.len());
        for (key, value) in map {
            let root = self.find(&key)?;
            match rewritten.remove(&root) {
                None => {
                    rewritten.insert(root, value);
                }
                Some(existing) => match resolve_conflict {
                    Some(resolve) => {
                        rewritten.insert(root, resolve(existing, value));
                    }
                    None => {
                        return Err(UnionFindError::KeyConflict {
                            key: format!("{root:?}"),
                        });
                    }
                },
            }
        }
        Ok(rewritten)
    }
}
