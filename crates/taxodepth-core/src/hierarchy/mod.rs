//! Term hierarchy storage, lookup, and expansion.
//!
//! # Example
//!
//! ```rust
//! use taxodepth_core::hierarchy::{expand, HierarchyEdge, HierarchyStore};
//! use taxodepth_core::TermId;
//!
//! // "apple" is a child of "fruit"
//! let store = HierarchyStore::from_edges([HierarchyEdge::new("apple", "fruit")]);
//!
//! // Narrower match: fruit with depth -1 also matches apple
//! let matched = expand(&[TermId::from("fruit")], -1, &store).unwrap();
//! assert!(matched.contains(&TermId::from("apple")));
//!
//! // Broader match: apple with depth 1 also matches fruit
//! let matched = expand(&[TermId::from("apple")], 1, &store).unwrap();
//! assert!(matched.contains(&TermId::from("fruit")));
//! ```

mod edge;
mod expand;
mod lookup;


pub use edge::{HierarchyEdge, HierarchyStore};
pub use expand::{expand, expand_report, ExpansionStats};
pub use lookup::{CachedLookup, Direction, EdgeLookup, Inverted};
