//! # `taxodepth` Core
//!
//! Depth-aware hierarchical term matching for taxonomy filters.
//!
//! Content tagged with terms from a hierarchy (a taxonomy, a category tree)
//! is usually filtered by exact term. `taxodepth` widens that filter by a
//! signed depth: a negative depth also matches the selected terms'
//! descendants, a positive depth also matches their ancestors.
//!
//! ## Features
//!
//! - **Bounded expansion**: frontier BFS over any [`EdgeLookup`], cycle safe
//! - **Predicates**: equality or membership conditions evaluable on JSON payloads
//! - **Relational rendering**: recursive CTE subqueries for SQL backends
//! - **Layered config**: defaults, `taxodepth.toml`, `TAXODEPTH_*` environment
//!
//! ## Quick Start
//!
//! ```rust
//! use taxodepth_core::{expand, HierarchyEdge, HierarchyStore, TermId};
//!
//! // apple is a kind of fruit
//! let store = HierarchyStore::from_edges([HierarchyEdge::new("apple", "fruit")]);
//!
//! let narrower = expand(&[TermId::from("fruit")], -1, &store)?;
//! assert!(narrower.contains(&TermId::from("apple")));
//!
//! let broader = expand(&[TermId::from("apple")], 1, &store)?;
//! assert!(broader.contains(&TermId::from("fruit")));
//! # Ok::<(), taxodepth_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod error;
pub mod filter;
pub mod handler;
pub mod hierarchy;
pub mod term;
#[cfg(test)]
mod term_tests;

pub use config::{ConfigError, FilterConfig, LoggingConfig, SchemaConfig, TaxoConfig};
pub use error::{Error, Result};
pub use filter::{membership_predicate, Condition, Filter, Operator};
pub use handler::{FilterOptions, QueryContext, TermDepthFilter};
pub use hierarchy::{
    expand, expand_report, CachedLookup, Direction, EdgeLookup, ExpansionStats, HierarchyEdge,
    HierarchyStore, Inverted,
};
pub use term::{MatchSet, TermId};
