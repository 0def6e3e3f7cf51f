//! Engine lock tests: the reference scenarios, terminal-state idempotence,
//! path validity, closed-set policies, and optimality against Dijkstra on
//! random graphs.

use proptest::prelude::*;

use lock_tests::graph_fixture::{detour, diamond, disconnected, line, WeightedGraph};
use lodestar_search::{
    AStar, ClosedSetPolicy, DrainHeapSet, PriorityMembershipSet, SearchPolicy, SearchStatus,
    TieBreak,
};

fn solve(
    graph: WeightedGraph,
    start: u32,
    goal: u32,
    policy: &SearchPolicy,
) -> AStar<WeightedGraph> {
    let mut engine = AStar::new(start, goal, graph, policy);
    engine.solve();
    engine
}

fn path_of(engine: &AStar<WeightedGraph>) -> Option<Vec<u32>> {
    engine.path().map(|p| p.into_iter().copied().collect())
}

fn reopen() -> SearchPolicy {
    SearchPolicy {
        closed_set: ClosedSetPolicy::ReopenOnImprove,
        ..SearchPolicy::default()
    }
}

// ---------------------------------------------------------------------------
// Reference scenarios
// ---------------------------------------------------------------------------

#[test]
fn line_graph_costs_two() {
    let engine = solve(line(), 0, 2, &SearchPolicy::default());
    assert_eq!(engine.status(), SearchStatus::Solved);
    assert_eq!(engine.cost(), Some(2));
    assert_eq!(path_of(&engine), Some(vec![0, 1, 2]));
}

#[test]
fn start_equal_to_goal_is_a_single_node_path() {
    let engine = solve(line(), 1, 1, &SearchPolicy::default());
    assert_eq!(engine.cost(), Some(0));
    assert_eq!(path_of(&engine), Some(vec![1]));
    assert_eq!(engine.stats().expanded, 0);
}

#[test]
fn disconnected_start_exhausts() {
    let engine = solve(disconnected(), 0, 1, &SearchPolicy::default());
    assert_eq!(engine.status(), SearchStatus::Exhausted);
    assert_eq!(engine.cost(), None);
    assert!(engine.solution().is_none());

    let mut out = Vec::new();
    engine.print_solution(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "No solution found.\n");
}

#[test]
fn diamond_displaces_the_worse_candidate() {
    let engine = solve(diamond(), 0, 3, &SearchPolicy::default());
    assert_eq!(engine.cost(), Some(2));
    assert_eq!(path_of(&engine), Some(vec![0, 2, 3]));
    assert_eq!(engine.stats().improved, 1);
}

#[test]
fn drain_frontier_finds_the_same_diamond_path() {
    let policy = SearchPolicy::default();
    let mut engine = AStar::with_frontier(0, 3, diamond(), DrainHeapSet::with_policy(&policy));
    assert!(engine.solve());
    assert_eq!(engine.cost(), Some(2));
    assert_eq!(engine.stats().improved, 1);
}

// ---------------------------------------------------------------------------
// Terminal states
// ---------------------------------------------------------------------------

#[test]
fn solve_is_idempotent_after_success() {
    let mut engine = AStar::new(0, 3, diamond(), &SearchPolicy::default());
    assert!(engine.solve());
    let stats = *engine.stats();
    let frontier_len = engine.frontier().len();
    assert!(engine.solve());
    assert_eq!(*engine.stats(), stats);
    assert_eq!(engine.frontier().len(), frontier_len);
}

#[test]
fn solve_is_idempotent_after_exhaustion() {
    let mut engine = AStar::new(0, 1, disconnected(), &SearchPolicy::default());
    assert!(!engine.solve());
    let stats = *engine.stats();
    assert!(!engine.solve());
    assert_eq!(*engine.stats(), stats);
    assert_eq!(engine.status(), SearchStatus::Exhausted);
}

#[test]
fn print_before_solve_reports_no_solution() {
    let engine = AStar::new(0, 2, line(), &SearchPolicy::default());
    let mut out = Vec::new();
    engine.print_solution(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "No solution found.\n");
}

#[test]
fn printed_solution_is_root_first() {
    let engine = solve(line(), 0, 2, &SearchPolicy::default());
    let mut out = Vec::new();
    engine.print_solution(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let states: Vec<&str> = text
        .lines()
        .zip(text.lines().skip(1))
        .filter(|(header, _)| *header == "State:")
        .map(|(_, state)| state)
        .collect();
    assert_eq!(states, vec!["0", "1", "2"]);
}

// ---------------------------------------------------------------------------
// Closed-set policies
// ---------------------------------------------------------------------------

#[test]
fn finalize_on_pop_never_reexpands() {
    // Dense cycle: every vertex reaches every other.
    let mut graph = WeightedGraph::new();
    for from in 0..6 {
        for to in 0..6 {
            if from != to {
                graph.add_edge(from, to, 1 + u64::from((from + to) % 3));
            }
        }
    }
    let engine = solve(graph, 0, 99, &SearchPolicy::default());
    assert_eq!(engine.status(), SearchStatus::Exhausted);
    assert_eq!(engine.stats().expanded, 6);
    assert_eq!(engine.arena().len(), 6);
}

#[test]
fn finalize_on_pop_with_inconsistent_estimate_keeps_first_arrival() {
    let engine = solve(detour(), 0, 3, &SearchPolicy::default());
    assert_eq!(engine.cost(), Some(6));
    assert_eq!(path_of(&engine), Some(vec![0, 2, 3]));
    assert_eq!(engine.stats().rejected_closed, 1);
}

#[test]
fn reopen_on_improve_recovers_the_cheaper_route() {
    let engine = solve(detour(), 0, 3, &reopen());
    assert_eq!(engine.cost(), Some(5));
    assert_eq!(path_of(&engine), Some(vec![0, 1, 2, 3]));
    assert_eq!(engine.stats().reopened, 1);
    assert_eq!(engine.stats().improved, 1);
}

#[test]
fn reopen_on_improve_terminates_on_cycles_without_a_route() {
    let graph = WeightedGraph::from_edges(&[(0, 1, 1), (1, 0, 1), (1, 2, 2), (2, 0, 1)]);
    let engine = solve(graph, 0, 7, &reopen());
    assert_eq!(engine.status(), SearchStatus::Exhausted);
    assert_eq!(engine.stats().expanded, 3);
    assert_eq!(engine.stats().reopened, 0);
}

#[test]
fn lifo_and_fifo_agree_on_cost() {
    let lifo = SearchPolicy {
        tie_break: TieBreak::Lifo,
        ..SearchPolicy::default()
    };
    let fifo = solve(diamond(), 0, 3, &SearchPolicy::default());
    let lifo = solve(diamond(), 0, 3, &lifo);
    assert_eq!(fifo.cost(), lifo.cost());
}

// ---------------------------------------------------------------------------
// Optimality against Dijkstra
// ---------------------------------------------------------------------------

const NO_ROUTE: u64 = 1_000_000;

/// `floor(d / 2)` of the exact distance to `goal`; consistent for edge
/// costs of at least 1. Vertices that cannot reach the goal get a large
/// constant, which is trivially admissible.
fn half_distance_estimates(
    graph: &WeightedGraph,
    edges: &[(u32, u32, u64)],
    goal: u32,
    vertices: u32,
) -> WeightedGraph {
    let reversed: Vec<(u32, u32, u64)> = edges.iter().map(|&(a, b, c)| (b, a, c)).collect();
    let to_goal = WeightedGraph::from_edges(&reversed).dijkstra(goal);
    let mut graph = graph.clone();
    for v in 0..vertices {
        let estimate = to_goal.get(&v).map_or(NO_ROUTE, |d| d / 2);
        graph = graph.with_estimate(v, estimate);
    }
    graph
}

/// `d * r / 100` of the exact distance to `goal`, with a separate `r` in
/// `0..=100` per vertex. Never overestimates, but neighboring vertices can
/// disagree by more than the edge between them.
fn scaled_distance_estimates(
    graph: &WeightedGraph,
    edges: &[(u32, u32, u64)],
    goal: u32,
    scales: &[u64],
) -> WeightedGraph {
    let reversed: Vec<(u32, u32, u64)> = edges.iter().map(|&(a, b, c)| (b, a, c)).collect();
    let to_goal = WeightedGraph::from_edges(&reversed).dijkstra(goal);
    let mut graph = graph.clone();
    for (v, &scale) in (0u32..).zip(scales) {
        let estimate = to_goal.get(&v).map_or(NO_ROUTE, |d| d * scale / 100);
        graph = graph.with_estimate(v, estimate);
    }
    graph
}

fn random_graph() -> impl Strategy<Value = (u32, Vec<(u32, u32, u64)>, u32)> {
    (2u32..12).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec((0..n, 0..n, 1u64..20), 0..40),
            0..n,
        )
    })
}

fn random_graph_with_scales() -> impl Strategy<Value = (Vec<(u32, u32, u64)>, u32, Vec<u64>)> {
    random_graph().prop_flat_map(|(n, edges, goal)| {
        let len = usize::try_from(n).unwrap_or_default();
        (Just(edges), Just(goal), prop::collection::vec(0u64..=100, len))
    })
}

fn assert_valid_path(graph: &WeightedGraph, path: &[u32], start: u32, goal: u32, cost: u64) {
    assert_eq!(path.first(), Some(&start));
    assert_eq!(path.last(), Some(&goal));
    let mut total = 0;
    for pair in path.windows(2) {
        let step = graph.edge_cost(pair[0], pair[1]);
        assert!(step.is_some(), "{} -> {} is not an edge", pair[0], pair[1]);
        total += step.unwrap_or_default();
    }
    assert_eq!(total, cost);
}

proptest! {
    #[test]
    fn zero_estimate_matches_dijkstra((_, edges, goal) in random_graph()) {
        let graph = WeightedGraph::from_edges(&edges);
        let expected = graph.dijkstra(0).get(&goal).copied();

        for policy in [SearchPolicy::default(), reopen()] {
            let engine = solve(graph.clone(), 0, goal, &policy);
            prop_assert_eq!(engine.cost(), expected);
            if let (Some(path), Some(cost)) = (path_of(&engine), engine.cost()) {
                assert_valid_path(&graph, &path, 0, goal, cost);
            }
        }
    }

    #[test]
    fn consistent_estimate_matches_dijkstra((n, edges, goal) in random_graph()) {
        let base = WeightedGraph::from_edges(&edges);
        let graph = half_distance_estimates(&base, &edges, goal, n);
        let expected = base.dijkstra(0).get(&goal).copied();

        let engine = solve(graph.clone(), 0, goal, &SearchPolicy::default());
        prop_assert_eq!(engine.cost(), expected);
        if let (Some(path), Some(cost)) = (path_of(&engine), engine.cost()) {
            assert_valid_path(&graph, &path, 0, goal, cost);
        }
    }

    #[test]
    fn reopen_matches_dijkstra_with_inconsistent_admissible_estimates(
        (edges, goal, scales) in random_graph_with_scales(),
    ) {
        let base = WeightedGraph::from_edges(&edges);
        let graph = scaled_distance_estimates(&base, &edges, goal, &scales);
        let expected = base.dijkstra(0).get(&goal).copied();

        let engine = solve(graph.clone(), 0, goal, &reopen());
        prop_assert_eq!(engine.cost(), expected);
        if let (Some(path), Some(cost)) = (path_of(&engine), engine.cost()) {
            assert_valid_path(&graph, &path, 0, goal, cost);
        }
    }
}
