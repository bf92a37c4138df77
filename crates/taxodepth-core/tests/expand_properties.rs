//! Property-based tests for hierarchical term expansion.
//!
//! Hierarchies are random edge lists over a small id space so that cycles,
//! self-loops, diamonds and disconnected terms all show up regularly.

use proptest::prelude::*;
use std::collections::{BTreeSet, VecDeque};
use taxodepth_core::{
    expand, expand_report, CachedLookup, HierarchyEdge, HierarchyStore, Inverted, MatchSet,
    TermId,
};

const ID_SPACE: u64 = 12;

fn edges_strategy() -> impl Strategy<Value = Vec<(u64, u64)>> {
    proptest::collection::vec((0..ID_SPACE, 0..ID_SPACE), 0..30)
}

fn values_strategy() -> impl Strategy<Value = Vec<u64>> {
    proptest::collection::vec(0..ID_SPACE + 2, 1..5)
}

fn store_of(edges: &[(u64, u64)]) -> HierarchyStore {
    HierarchyStore::from_edges(
        edges
            .iter()
            .map(|&(child, parent)| HierarchyEdge::new(child, parent)),
    )
}

fn ids(values: &[u64]) -> Vec<TermId> {
    values.iter().copied().map(TermId::Int).collect()
}

/// Every term within `hops` steps of `values`, by plain BFS over the edge list.
fn reachable(edges: &[(u64, u64)], values: &[u64], hops: u32, upward: bool) -> MatchSet {
    let mut seen: BTreeSet<u64> = values.iter().copied().collect();
    let mut queue: VecDeque<(u64, u32)> = seen.iter().map(|&v| (v, 0)).collect();

    while let Some((term, dist)) = queue.pop_front() {
        if dist == hops {
            continue;
        }
        for &(child, parent) in edges {
            let next = match (upward, child == term, parent == term) {
                (true, true, _) => parent,
                (false, _, true) => child,
                _ => continue,
            };
            if seen.insert(next) {
                queue.push_back((next, dist + 1));
            }
        }
    }

    seen.into_iter().map(TermId::Int).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: depth 0 returns exactly the selected values.
    #[test]
    fn prop_zero_depth_is_identity(edges in edges_strategy(), values in values_strategy()) {
        let store = store_of(&edges);

        let matched = expand(&ids(&values), 0, &store).unwrap();

        let expected: MatchSet = ids(&values).into_iter().collect();
        prop_assert_eq!(matched.clone(), expected);
        prop_assert_eq!(expand(&matched.to_sorted_vec(), 0, &store).unwrap(), matched);
    }

    /// Property: the selected values are always part of the result.
    #[test]
    fn prop_result_contains_values(
        edges in edges_strategy(),
        values in values_strategy(),
        depth in -6i32..=6,
    ) {
        let store = store_of(&edges);
        let seeds: MatchSet = ids(&values).into_iter().collect();

        let matched = expand(&ids(&values), depth, &store).unwrap();

        prop_assert!(matched.is_superset(&seeds));
    }

    /// Property: a deeper expansion in the same direction never loses terms.
    #[test]
    fn prop_monotonic_in_depth(
        edges in edges_strategy(),
        values in values_strategy(),
        shallow in 0i32..=4,
        extra in 0i32..=3,
        upward in any::<bool>(),
    ) {
        let store = store_of(&edges);
        let sign = if upward { 1 } else { -1 };

        let near = expand(&ids(&values), sign * shallow, &store).unwrap();
        let far = expand(&ids(&values), sign * (shallow + extra), &store).unwrap();

        prop_assert!(far.is_superset(&near));
    }

    /// Property: ancestors in a hierarchy are descendants in its inverse.
    #[test]
    fn prop_direction_independence(
        edges in edges_strategy(),
        values in values_strategy(),
        depth in -6i32..=6,
    ) {
        let store = store_of(&edges);
        let inverted = Inverted::new(&store);

        let direct = expand(&ids(&values), depth, &store).unwrap();
        let mirrored = expand(&ids(&values), -depth, &inverted).unwrap();

        prop_assert_eq!(direct, mirrored);
    }

    /// Property: the result is exactly the terms within |depth| hops.
    #[test]
    fn prop_matches_reference_bfs(
        edges in edges_strategy(),
        values in values_strategy(),
        depth in -6i32..=6,
    ) {
        let store = store_of(&edges);

        let matched = expand(&ids(&values), depth, &store).unwrap();

        let expected = reachable(&edges, &values, depth.unsigned_abs(), depth > 0);
        prop_assert_eq!(matched, expected);
    }

    /// Property: any depth terminates, with no more rounds than distinct terms.
    #[test]
    fn prop_terminates_on_unbounded_depth(
        edges in edges_strategy(),
        values in values_strategy(),
        upward in any::<bool>(),
    ) {
        let store = store_of(&edges);
        let depth = if upward { i32::MAX } else { i32::MIN };

        let (matched, stats) = expand_report(&ids(&values), depth, &store).unwrap();

        prop_assert!(stats.rounds as usize <= matched.len());
        prop_assert_eq!(stats.added + values.iter().collect::<BTreeSet<_>>().len(), matched.len());
    }

    /// Property: memoizing lookups does not change the result.
    #[test]
    fn prop_cached_lookup_is_transparent(
        edges in edges_strategy(),
        values in values_strategy(),
        depth in -6i32..=6,
    ) {
        let store = store_of(&edges);
        let cached = CachedLookup::new(&store);

        let first = expand(&ids(&values), depth, &cached).unwrap();
        let second = expand(&ids(&values), depth, &cached).unwrap();

        prop_assert_eq!(&first, &expand(&ids(&values), depth, &store).unwrap());
        prop_assert_eq!(first, second);
    }
}

#[test]
fn test_two_cycle_terminates_with_both_terms() {
    let store = store_of(&[(1, 2), (2, 1)]);

    let matched = expand(&[TermId::Int(1)], 5, &store).unwrap();

    assert_eq!(matched.to_sorted_vec(), vec![TermId::Int(1), TermId::Int(2)]);
}

#[test]
fn test_fruit_apple_scenario() {
    let store = HierarchyStore::from_edges([HierarchyEdge::new("apple", "fruit")]);
    let fruit = TermId::from("fruit");
    let apple = TermId::from("apple");

    assert!(expand(&[fruit.clone()], -1, &store).unwrap().contains(&apple));
    assert!(!expand(&[fruit.clone()], 1, &store).unwrap().contains(&apple));
    assert!(expand(&[apple.clone()], 1, &store).unwrap().contains(&fruit));
    assert!(!expand(&[apple], -1, &store).unwrap().contains(&fruit));
}
