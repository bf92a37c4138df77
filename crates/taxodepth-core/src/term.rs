//! Term identifiers and term sets.
//!
//! - `TermId`: opaque identifier of a taxonomy term (integer or string)
//! - `MatchSet`: the set of terms a filter condition tests membership against

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Identifier of a taxonomy term.
///
/// Only equality and hashing are meaningful; the ordering exists so that
/// output can be made deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TermId {
    /// Numeric term id.
    Int(u64),
    /// Named term id.
    Name(String),
}

impl TermId {
    /// Converts the id to a JSON value for use in filter conditions.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Int(id) => Value::from(*id),
            Self::Name(name) => Value::from(name.as_str()),
        }
    }

    /// Reads a term id from a JSON value.
    ///
    /// Accepts non-negative integers and strings; anything else is `None`.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_u64().map(Self::Int),
            Value::String(s) => Some(Self::Name(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Parses all-digit text as `Int`, anything else non-empty as `Name`.
impl FromStr for TermId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidTermId("empty term id".to_string()));
        }
        if s.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(id) = s.parse::<u64>() {
                return Ok(Self::Int(id));
            }
        }
        Ok(Self::Name(s.to_string()))
    }
}

impl From<u64> for TermId {
    fn from(id: u64) -> Self {
        Self::Int(id)
    }
}

impl From<&str> for TermId {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for TermId {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// Set of term ids produced by an expansion.
///
/// Duplicates are suppressed; iteration order is unspecified. Use
/// [`MatchSet::to_sorted_vec`] when a stable order is needed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchSet {
    terms: FxHashSet<TermId>,
}

impl MatchSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a term. Returns `true` if it was not already present.
    pub fn insert(&mut self, term: TermId) -> bool {
        self.terms.insert(term)
    }

    /// Returns true if the term is in the set.
    #[must_use]
    pub fn contains(&self, term: &TermId) -> bool {
        self.terms.contains(term)
    }

    /// Number of distinct terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if the set holds no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterates over the terms in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &TermId> {
        self.terms.iter()
    }

    /// Returns true if every term of `other` is also in `self`.
    #[must_use]
    pub fn is_superset(&self, other: &MatchSet) -> bool {
        self.terms.is_superset(&other.terms)
    }

    /// Returns the terms sorted ascending.
    #[must_use]
    pub fn to_sorted_vec(&self) -> Vec<TermId> {
        let mut terms: Vec<TermId> = self.terms.iter().cloned().collect();
        terms.sort_unstable();
        terms
    }
}

impl FromIterator<TermId> for MatchSet {
    fn from_iter<I: IntoIterator<Item = TermId>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

impl Extend<TermId> for MatchSet {
    fn extend<I: IntoIterator<Item = TermId>>(&mut self, iter: I) {
        self.terms.extend(iter);
    }
}

impl IntoIterator for MatchSet {
    type Item = TermId;
    type IntoIter = std::collections::hash_set::IntoIter<TermId>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.into_iter()
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = &'a TermId;
    type IntoIter = std::collections::hash_set::Iter<'a, TermId>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}
