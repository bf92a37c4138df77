//! The taxonomy depth filter.
//!
//! Ties the pieces together for one filter instance: the selected terms and
//! [`FilterOptions`] go in, a condition for the host query comes out. Two
//! strategies are offered:
//!
//! - [`TermDepthFilter::query`] expands the terms through an
//!   [`EdgeLookup`] and yields a membership [`Condition`] over the match set.
//! - [`TermDepthFilter::subquery`] leaves the expansion to the database and
//!   yields a recursive CTE subquery.
//!
//! Both contribute nothing (`None`) when no terms are selected or when no
//! table alias can be resolved.
//!
//! # Example
//!
//! ```rust
//! use taxodepth_core::handler::{FilterOptions, QueryContext, TermDepthFilter};
//! use taxodepth_core::hierarchy::{HierarchyEdge, HierarchyStore};
//! use taxodepth_core::TermId;
//! use serde_json::json;
//!
//! let store = HierarchyStore::from_edges([HierarchyEdge::new(2u64, 1u64)]);
//! let ctx = QueryContext::new("node").with_table("node", "node");
//! let filter = TermDepthFilter::new([TermId::Int(1)], FilterOptions::default().with_depth(-1));
//!
//! let clause = filter.query(&ctx, &store).unwrap().expect("contributes a condition");
//! assert!(clause.condition.matches(&json!({"node": {"tid": 2}})));
//! ```

mod alias;
mod options;
pub mod subquery;


use serde::{Deserialize, Serialize};
use tracing::debug;

pub use alias::{resolve_table_alias, AliasSource, QueryContext, ResolvedAlias};
pub use options::{FilterOptions, DEPTH_DESCRIPTION, OPERATOR_OPTIONS};
pub use subquery::{render_subquery, Subquery};

use crate::config::SchemaConfig;
use crate::error::Result;
use crate::filter::{membership_predicate, Condition, Operator};
use crate::hierarchy::{expand, EdgeLookup};
use crate::term::{MatchSet, TermId};

/// Condition contributed to the host query by the expansion strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhereClause {
    /// Where-group the condition belongs to.
    pub group: u32,
    /// Membership condition on `{alias}.{real_field}`.
    pub condition: Condition,
    /// The expanded terms behind the condition.
    pub matched: MatchSet,
}

/// Condition contributed to the host query by the relational strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubqueryClause {
    /// Where-group the condition belongs to.
    pub group: u32,
    /// Qualified content id field tested, `{alias}.{content column}`.
    pub field: String,
    /// Content ids the field must be in.
    pub subquery: Subquery,
}

impl SubqueryClause {
    /// Renders `field IN (subquery)`.
    #[must_use]
    pub fn to_sql(&self) -> String {
        format!("{} IN ({})", self.field, self.subquery.sql)
    }
}

/// A "has taxonomy term, with depth" filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermDepthFilter {
    values: Vec<TermId>,
    options: FilterOptions,
}

impl TermDepthFilter {
    /// Creates a filter over the selected terms.
    pub fn new<I, T>(values: I, options: FilterOptions) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TermId>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            options,
        }
    }

    /// The selected terms.
    #[must_use]
    pub fn values(&self) -> &[TermId] {
        &self.values
    }

    /// The filter options.
    #[must_use]
    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Comparison implied by the number of selected terms.
    #[must_use]
    pub fn operator(&self) -> Operator {
        Operator::for_value_count(self.values.len())
    }

    /// Builds the membership condition by expanding through `lookup`.
    ///
    /// Returns `Ok(None)` without touching `lookup` when no terms are
    /// selected or no table alias resolves.
    ///
    /// # Errors
    ///
    /// Propagates hierarchy lookup failures.
    pub fn query<L>(&self, ctx: &QueryContext, lookup: &L) -> Result<Option<WhereClause>>
    where
        L: EdgeLookup + ?Sized,
    {
        let Some(alias) = self.target_alias(ctx) else {
            return Ok(None);
        };
        let field = format!("{alias}.{}", self.options.real_field);

        let matched = expand(&self.values, self.options.depth, lookup)?;
        let condition = membership_predicate(&field, &self.values, &matched);

        Ok(Some(WhereClause {
            group: self.options.group,
            condition,
            matched,
        }))
    }

    /// Builds the relational subquery condition.
    ///
    /// The subquery yields content ids, so the condition attaches to the
    /// aliased table's `schema.index_content_column` rather than to
    /// `real_field`. Returns `None` when no terms are selected or no table
    /// alias resolves.
    #[must_use]
    pub fn subquery(&self, ctx: &QueryContext, schema: &SchemaConfig) -> Option<SubqueryClause> {
        let alias = self.target_alias(ctx)?;
        let field = format!("{alias}.{}", schema.index_content_column);

        Some(SubqueryClause {
            group: self.options.group,
            field,
            subquery: render_subquery(&self.values, self.options.depth, schema),
        })
    }

    /// The table alias to attach to, or `None` if the filter should stay inert.
    fn target_alias(&self, ctx: &QueryContext) -> Option<String> {
        if self.values.is_empty() {
            debug!("no terms selected; depth filter skipped");
            return None;
        }

        let Some(resolved) = resolve_table_alias(self.options.relationship.as_deref(), ctx) else {
            debug!(
                base_table = ctx.base_table(),
                "no table alias resolved; depth filter contributes nothing"
            );
            return None;
        };

        debug!(alias = %resolved.alias, source = ?resolved.source, "depth filter attached");
        Some(resolved.alias)
    }
}
