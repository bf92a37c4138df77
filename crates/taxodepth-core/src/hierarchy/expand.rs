//! Hierarchical term matching.
//!
//! Grows a set of selected terms by their ancestors or descendants, up to a
//! bounded number of hops. This is the in-memory counterpart of the
//! recursive subquery in [`crate::handler::subquery`]: round *k* of the
//! expansion collects the terms the CTE reaches at `hops = k`.

use tracing::debug;

use super::{Direction, EdgeLookup};
use crate::error::Result;
use crate::term::{MatchSet, TermId};

/// Counters describing one expansion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpansionStats {
    /// Rounds actually run (stops early once nothing new is reached).
    pub rounds: u32,
    /// Terms whose relatives were looked up.
    pub lookups: usize,
    /// Terms added on top of the selected values.
    pub added: usize,
}

/// Expands `values` by `|depth|` hierarchy hops.
///
/// Positive `depth` adds ancestors, negative adds descendants, zero
/// returns `values` unchanged without any lookup. The selected values are
/// always part of the result.
///
/// Each round only looks up terms first reached in the previous round, so
/// a term is never expanded twice and cyclic hierarchies terminate after at
/// most `|depth|` rounds.
///
/// # Errors
///
/// Returns the lookup's error if any lookup fails; no partial result is
/// produced.
pub fn expand<L>(values: &[TermId], depth: i32, lookup: &L) -> Result<MatchSet>
where
    L: EdgeLookup + ?Sized,
{
    expand_report(values, depth, lookup).map(|(set, _)| set)
}

/// Same as [`expand`], also returning [`ExpansionStats`].
///
/// # Errors
///
/// Returns the lookup's error if any lookup fails.
pub fn expand_report<L>(
    values: &[TermId],
    depth: i32,
    lookup: &L,
) -> Result<(MatchSet, ExpansionStats)>
where
    L: EdgeLookup + ?Sized,
{
    let mut result: MatchSet = values.iter().cloned().collect();
    let mut stats = ExpansionStats::default();

    let Some(direction) = Direction::from_depth(depth) else {
        return Ok((result, stats));
    };
    let max_rounds = depth.unsigned_abs();

    // Round 0 frontier: the distinct selected values.
    let mut frontier: Vec<TermId> = result.iter().cloned().collect();

    while stats.rounds < max_rounds && !frontier.is_empty() {
        stats.rounds += 1;
        stats.lookups += frontier.len();

        let relatives = lookup.relatives_of_all(&frontier, direction)?;

        frontier = relatives
            .into_iter()
            .filter(|term| result.insert(term.clone()))
            .collect();
        stats.added += frontier.len();

        debug!(
            round = stats.rounds,
            ?direction,
            reached = frontier.len(),
            "hierarchy expansion round"
        );
    }

    debug!(
        selected = values.len(),
        depth,
        matched = result.len(),
        rounds = stats.rounds,
        lookups = stats.lookups,
        "hierarchy expansion complete"
    );

    Ok((result, stats))
}
