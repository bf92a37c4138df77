//! Hierarchy edges and in-memory storage.
//!
//! This module provides:
//! - `HierarchyEdge`: a `(child, parent)` link between two terms
//! - `HierarchyStore`: bidirectional index for parent and child lookups

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::term::TermId;

/// A direct child/parent link in the term hierarchy.
///
/// Serialized with the column names of a conventional hierarchy table
/// (`tid`, `parent`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HierarchyEdge {
    #[serde(rename = "tid")]
    child: TermId,
    parent: TermId,
}

impl HierarchyEdge {
    /// Creates an edge recording that `child` is a direct child of `parent`.
    #[must_use]
    pub fn new(child: impl Into<TermId>, parent: impl Into<TermId>) -> Self {
        Self {
            child: child.into(),
            parent: parent.into(),
        }
    }

    /// Returns the child term.
    #[must_use]
    pub fn child(&self) -> &TermId {
        &self.child
    }

    /// Returns the parent term.
    #[must_use]
    pub fn parent(&self) -> &TermId {
        &self.parent
    }
}

/// In-memory term hierarchy with parent and child indices.
///
/// Provides O(1) access to the direct parents and direct children of any
/// term. The graph is generally a forest, but cycles and self-loops are
/// stored as given.
#[derive(Debug, Default, Clone)]
pub struct HierarchyStore {
    /// child -> parents, in insertion order
    parents: FxHashMap<TermId, Vec<TermId>>,
    /// parent -> children, in insertion order
    children: FxHashMap<TermId, Vec<TermId>>,
    edges: FxHashSet<HierarchyEdge>,
}

impl HierarchyStore {
    /// Creates an empty hierarchy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a hierarchy from a list of edges.
    #[must_use]
    pub fn from_edges(edges: impl IntoIterator<Item = HierarchyEdge>) -> Self {
        let mut store = Self::new();
        store.add_edges(edges);
        store
    }

    /// Adds an edge to the store.
    ///
    /// Returns `false` if the same edge was already present.
    pub fn add_edge(&mut self, edge: HierarchyEdge) -> bool {
        if self.edges.contains(&edge) {
            return false;
        }

        self.parents
            .entry(edge.child.clone())
            .or_default()
            .push(edge.parent.clone());
        self.children
            .entry(edge.parent.clone())
            .or_default()
            .push(edge.child.clone());
        self.edges.insert(edge);
        true
    }

    /// Adds several edges; returns how many were new.
    pub fn add_edges(&mut self, edges: impl IntoIterator<Item = HierarchyEdge>) -> usize {
        edges
            .into_iter()
            .map(|edge| usize::from(self.add_edge(edge)))
            .sum()
    }

    /// Removes an edge. Returns `true` if it was present.
    pub fn remove_edge(&mut self, edge: &HierarchyEdge) -> bool {
        if !self.edges.remove(edge) {
            return false;
        }
        if let Some(parents) = self.parents.get_mut(&edge.child) {
            parents.retain(|p| p != &edge.parent);
        }
        if let Some(children) = self.children.get_mut(&edge.parent) {
            children.retain(|c| c != &edge.child);
        }
        true
    }

    /// Removes every edge touching `term` (cascade delete).
    ///
    /// Returns the number of edges removed.
    pub fn remove_term(&mut self, term: &TermId) -> usize {
        let mut doomed: Vec<HierarchyEdge> = Vec::new();
        if let Some(parents) = self.parents.get(term) {
            doomed.extend(parents.iter().map(|p| HierarchyEdge::new(term.clone(), p.clone())));
        }
        if let Some(children) = self.children.get(term) {
            doomed.extend(children.iter().map(|c| HierarchyEdge::new(c.clone(), term.clone())));
        }

        let removed = doomed.iter().filter(|edge| self.remove_edge(edge)).count();
        self.parents.remove(term);
        self.children.remove(term);
        removed
    }

    /// Direct parents of a term. Unknown terms have none.
    #[must_use]
    pub fn parents_of(&self, term: &TermId) -> &[TermId] {
        self.parents.get(term).map_or(&[], Vec::as_slice)
    }

    /// Direct children of a term. Unknown terms have none.
    #[must_use]
    pub fn children_of(&self, term: &TermId) -> &[TermId] {
        self.children.get(term).map_or(&[], Vec::as_slice)
    }

    /// Total number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of distinct terms appearing in at least one edge.
    #[must_use]
    pub fn term_count(&self) -> usize {
        self.edges
            .iter()
            .flat_map(|edge| [&edge.child, &edge.parent])
            .collect::<FxHashSet<_>>()
            .len()
    }

    /// Returns true if the term appears in at least one edge.
    #[must_use]
    pub fn contains_term(&self, term: &TermId) -> bool {
        !self.parents_of(term).is_empty() || !self.children_of(term).is_empty()
    }

    /// Iterates over all edges in unspecified order.
    pub fn edges(&self) -> impl Iterator<Item = &HierarchyEdge> {
        self.edges.iter()
    }
}
