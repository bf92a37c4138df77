//! The lookup capability the matcher traverses.
//!
//! Expansion never touches storage directly; it asks an [`EdgeLookup`] for
//! the direct parents or children of the terms it has reached. Anything
//! that can answer those two questions can back a filter: the in-memory
//! [`HierarchyStore`], a relational table, a remote service.

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::HierarchyStore;
use crate::error::Result;
use crate::term::TermId;

/// Direction of hierarchy traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Follow parent links (broader match).
    Ancestors,
    /// Follow child links (narrower match).
    Descendants,
}

impl Direction {
    /// Maps a signed depth to a direction: positive walks to ancestors,
    /// negative to descendants, zero walks nowhere.
    #[must_use]
    pub fn from_depth(depth: i32) -> Option<Self> {
        match depth.signum() {
            1 => Some(Self::Ancestors),
            -1 => Some(Self::Descendants),
            _ => None,
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub fn reverse(self) -> Self {
        match self {
            Self::Ancestors => Self::Descendants,
            Self::Descendants => Self::Ancestors,
        }
    }
}

/// Read-only access to the direct relatives of a term.
///
/// Terms unknown to the source must yield an empty list, not an error.
/// Errors are reserved for an unavailable source and abort the caller's
/// expansion.
pub trait EdgeLookup {
    /// Direct parents of `term`.
    fn parents(&self, term: &TermId) -> Result<Vec<TermId>>;

    /// Direct children of `term`.
    fn children(&self, term: &TermId) -> Result<Vec<TermId>>;

    /// Direct relatives of `term` in the given direction.
    fn relatives(&self, term: &TermId, direction: Direction) -> Result<Vec<TermId>> {
        match direction {
            Direction::Ancestors => self.parents(term),
            Direction::Descendants => self.children(term),
        }
    }

    /// Direct relatives of every term in `terms`, concatenated.
    ///
    /// Called once per expansion round. Sources with a per-request cost
    /// should override this with a single batched query.
    fn relatives_of_all(&self, terms: &[TermId], direction: Direction) -> Result<Vec<TermId>> {
        let mut out = Vec::new();
        for term in terms {
            out.extend(self.relatives(term, direction)?);
        }
        Ok(out)
    }
}

impl<L: EdgeLookup + ?Sized> EdgeLookup for &L {
    fn parents(&self, term: &TermId) -> Result<Vec<TermId>> {
        (**self).parents(term)
    }

    fn children(&self, term: &TermId) -> Result<Vec<TermId>> {
        (**self).children(term)
    }

    fn relatives_of_all(&self, terms: &[TermId], direction: Direction) -> Result<Vec<TermId>> {
        (**self).relatives_of_all(terms, direction)
    }
}

impl EdgeLookup for HierarchyStore {
    fn parents(&self, term: &TermId) -> Result<Vec<TermId>> {
        Ok(self.parents_of(term).to_vec())
    }

    fn children(&self, term: &TermId) -> Result<Vec<TermId>> {
        Ok(self.children_of(term).to_vec())
    }
}

/// Lookup adapter with parent and child roles swapped.
#[derive(Debug, Clone)]
pub struct Inverted<L> {
    inner: L,
}

impl<L: EdgeLookup> Inverted<L> {
    /// Wraps a lookup so that `parents` answers `children` and vice versa.
    #[must_use]
    pub fn new(inner: L) -> Self {
        Self { inner }
    }

    /// Returns the wrapped lookup.
    #[must_use]
    pub fn into_inner(self) -> L {
        self.inner
    }
}

impl<L: EdgeLookup> EdgeLookup for Inverted<L> {
    fn parents(&self, term: &TermId) -> Result<Vec<TermId>> {
        self.inner.children(term)
    }

    fn children(&self, term: &TermId) -> Result<Vec<TermId>> {
        self.inner.parents(term)
    }

    fn relatives_of_all(&self, terms: &[TermId], direction: Direction) -> Result<Vec<TermId>> {
        self.inner.relatives_of_all(terms, direction.reverse())
    }
}

/// Memoizing lookup for slow hierarchy sources.
///
/// Successful answers are cached per direction for the lifetime of the
/// wrapper; failures are passed through and not cached.
#[derive(Debug)]
pub struct CachedLookup<L> {
    inner: L,
    cache: Mutex<FxHashMap<(Direction, TermId), Vec<TermId>>>,
}

impl<L: EdgeLookup> CachedLookup<L> {
    /// Wraps a lookup with an empty cache.
    #[must_use]
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            cache: Mutex::new(FxHashMap::default()),
        }
    }

    /// Returns the wrapped lookup.
    #[must_use]
    pub fn get_ref(&self) -> &L {
        &self.inner
    }

    /// Number of cached `(direction, term)` answers.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache.lock().len()
    }

    /// Drops every cached answer.
    pub fn clear(&self) {
        self.cache.lock().clear();
    }

    fn cached(&self, term: &TermId, direction: Direction) -> Result<Vec<TermId>> {
        let key = (direction, term.clone());
        if let Some(hit) = self.cache.lock().get(&key) {
            return Ok(hit.clone());
        }

        // Lock is not held across the inner call; a concurrent miss on the
        // same key just fetches twice.
        let fetched = self.inner.relatives(term, direction)?;
        self.cache.lock().insert(key, fetched.clone());
        Ok(fetched)
    }
}

impl<L: EdgeLookup> EdgeLookup for CachedLookup<L> {
    fn parents(&self, term: &TermId) -> Result<Vec<TermId>> {
        self.cached(term, Direction::Ancestors)
    }

    fn children(&self, term: &TermId) -> Result<Vec<TermId>> {
        self.cached(term, Direction::Descendants)
    }
}
