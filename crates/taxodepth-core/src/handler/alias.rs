//! Resolving which table instance the condition attaches to.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// The tables already joined into the host query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryContext {
    base_table: String,
    /// table name -> alias
    table_queue: FxHashMap<String, String>,
}

impl QueryContext {
    /// Creates a context for a query over `base_table`, with no tables queued.
    #[must_use]
    pub fn new(base_table: impl Into<String>) -> Self {
        Self {
            base_table: base_table.into(),
            table_queue: FxHashMap::default(),
        }
    }

    /// Records that `table` is joined under `alias`.
    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>, alias: impl Into<String>) -> Self {
        self.table_queue.insert(table.into(), alias.into());
        self
    }

    /// Name of the base table.
    #[must_use]
    pub fn base_table(&self) -> &str {
        &self.base_table
    }

    /// Alias under which `table` is joined.
    #[must_use]
    pub fn alias_of(&self, table: &str) -> Option<&str> {
        self.table_queue.get(table).map(String::as_str)
    }
}

/// Where a resolved alias came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AliasSource {
    /// The filter's configured relationship.
    Relationship,
    /// The alias of the query's base table.
    BaseTable,
}

/// A table alias the condition can attach to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAlias {
    /// The alias.
    pub alias: String,
    /// How it was found.
    pub source: AliasSource,
}

/// Resolves the alias: the relationship if set and non-empty, else the base
/// table's alias, else `None`.
#[must_use]
pub fn resolve_table_alias(relationship: Option<&str>, ctx: &QueryContext) -> Option<ResolvedAlias> {
    if let Some(rel) = relationship.filter(|r| !r.is_empty()) {
        return Some(ResolvedAlias {
            alias: rel.to_string(),
            source: AliasSource::Relationship,
        });
    }

    ctx.alias_of(ctx.base_table()).map(|alias| ResolvedAlias {
        alias: alias.to_string(),
        source: AliasSource::BaseTable,
    })
}
