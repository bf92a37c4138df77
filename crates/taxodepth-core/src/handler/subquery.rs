//! Relational rendering of the depth filter.
//!
//! When the hierarchy lives in the same SQL database as the content, the
//! expansion can run inside the query as a recursive CTE over the hierarchy
//! table. The hop bound is a bound parameter, so the SQL text has the same
//! size for every depth of a given sign. For depth `2` (ancestors) the
//! shape is:
//!
//! ```text
//! WITH RECURSIVE term_depth(term, hops) AS (
//!   SELECT th.parent, 1 FROM taxonomy_term_hierarchy th WHERE th.tid = ?
//!   UNION
//!   SELECT th.parent, td.hops + 1 FROM taxonomy_term_hierarchy th
//!     JOIN term_depth td ON th.tid = td.term
//!     WHERE td.hops < ? AND td.hops < (SELECT COUNT(*) FROM taxonomy_term_hierarchy)
//! )
//! SELECT tn.nid FROM taxonomy_index tn
//!   WHERE tn.tid = ? OR tn.tid IN (SELECT term FROM term_depth)
//! ```
//!
//! i.e. content tagged with the selected term or one of its ancestors up
//! to two hops away. Negative depth swaps the two hierarchy columns and
//! collects descendants instead.
//!
//! A term reachable at all is reachable in fewer hops than there are
//! hierarchy rows, so the row count caps the recursion on cyclic data
//! without changing the result.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::SchemaConfig;
use crate::filter::Operator;
use crate::hierarchy::Direction;
use crate::term::TermId;

const INDEX_ALIAS: &str = "tn";
const HIERARCHY_ALIAS: &str = "th";
const CTE_NAME: &str = "term_depth";
const CTE_ALIAS: &str = "td";

/// A rendered subquery and its positional parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subquery {
    /// SQL text with `?` placeholders.
    pub sql: String,
    /// Values bound to the placeholders, in order.
    pub params: Vec<Value>,
}

/// Renders the content-id subquery for `values` at `depth`.
///
/// `values` must be non-empty; callers skip the filter otherwise. Table and
/// column names are taken verbatim from `schema` and must already be valid
/// identifiers (see [`crate::config::TaxoConfig::validate`]).
#[must_use]
pub fn render_subquery(values: &[TermId], depth: i32, schema: &SchemaConfig) -> Subquery {
    let test = term_test(Operator::for_value_count(values.len()), values.len());
    let seeds: Vec<Value> = values.iter().map(TermId::to_value).collect();

    let content = format!(
        "SELECT {INDEX_ALIAS}.{} FROM {} {INDEX_ALIAS} WHERE {INDEX_ALIAS}.{} {test}",
        schema.index_content_column, schema.index_table, schema.index_term_column
    );

    let Some(direction) = Direction::from_depth(depth) else {
        return Subquery {
            sql: content,
            params: seeds,
        };
    };

    // Column walked from, column collected.
    let (from, to) = match direction {
        Direction::Ancestors => (
            &schema.hierarchy_term_column,
            &schema.hierarchy_parent_column,
        ),
        Direction::Descendants => (
            &schema.hierarchy_parent_column,
            &schema.hierarchy_term_column,
        ),
    };
    let h = &schema.hierarchy_table;

    let sql = format!(
        "WITH RECURSIVE {CTE_NAME}(term, hops) AS (\
         SELECT {HIERARCHY_ALIAS}.{to}, 1 FROM {h} {HIERARCHY_ALIAS} \
         WHERE {HIERARCHY_ALIAS}.{from} {test} \
         UNION \
         SELECT {HIERARCHY_ALIAS}.{to}, {CTE_ALIAS}.hops + 1 FROM {h} {HIERARCHY_ALIAS} \
         JOIN {CTE_NAME} {CTE_ALIAS} ON {HIERARCHY_ALIAS}.{from} = {CTE_ALIAS}.term \
         WHERE {CTE_ALIAS}.hops < ? AND {CTE_ALIAS}.hops < (SELECT COUNT(*) FROM {h})\
         ) {content} OR {INDEX_ALIAS}.{} IN (SELECT term FROM {CTE_NAME})",
        schema.index_term_column
    );

    let mut params = Vec::with_capacity(seeds.len() * 2 + 1);
    params.extend(seeds.iter().cloned());
    params.push(Value::from(depth.unsigned_abs()));
    params.extend(seeds);

    Subquery { sql, params }
}

fn term_test(operator: Operator, count: usize) -> String {
    match operator {
        Operator::Eq => "= ?".to_string(),
        Operator::In => format!("IN ({})", vec!["?"; count].join(", ")),
    }
}
