// Tests for wait-for graph construction and cycle search

use super::*;

fn named(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{prefix}{i}")).collect()
}

fn build(allocation: Matrix, request: Matrix) -> WaitForGraph {
    let n = allocation.len();
    let m = allocation.first().map_or(0, Vec::len);
    WaitForGraph::build(&named("P", n), &named("R", m), &allocation, &request).unwrap()
}

fn targets(graph: &WaitForGraph, process: &str) -> Vec<String> {
    graph.waits_on(process).unwrap()
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_circular_wait_edges() {
    let graph = build(
        vec![vec![1, 0], vec![0, 1], vec![0, 0]],
        vec![vec![0, 1], vec![1, 0], vec![1, 0]],
    );

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 3);
    assert_eq!(targets(&graph, "P0"), vec!["P1"]);
    assert_eq!(targets(&graph, "P1"), vec!["P0"]);
    assert_eq!(targets(&graph, "P2"), vec!["P0"]);
}

#[test]
fn test_adjacency_lists_every_process_in_order() {
    let graph = build(
        vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]],
        vec![vec![0, 1, 0], vec![0, 0, 1], vec![0, 0, 0]],
    );

    let adjacency = graph.adjacency();
    assert_eq!(
        adjacency,
        vec![
            ("P0".to_string(), vec!["P1".to_string()]),
            ("P1".to_string(), vec!["P2".to_string()]),
            ("P2".to_string(), vec![]),
        ]
    );
}

#[test]
fn test_last_positive_allocation_is_holder() {
    let graph = build(
        vec![vec![1, 1, 0], vec![0, 1, 1], vec![1, 0, 1], vec![0, 0, 0]],
        vec![vec![0, 0, 1], vec![1, 0, 0], vec![0, 1, 0], vec![1, 1, 1]],
    );

    let holders: Vec<Option<&str>> = graph
        .holders()
        .iter()
        .map(|(_, h)| h.as_deref())
        .collect();
    assert_eq!(holders, vec![Some("P2"), Some("P1"), Some("P2")]);

    // P3 requests all three resources but P2 appears once
    assert_eq!(targets(&graph, "P3"), vec!["P2", "P1"]);
}

#[test]
fn test_self_held_request_adds_no_edge() {
    let graph = build(vec![vec![1]], vec![vec![1]]);
    assert_eq!(graph.edge_count(), 0);
    assert!(!graph.has_cycles());
}

#[test]
fn test_request_for_unheld_resource_adds_no_edge() {
    let graph = build(vec![vec![0], vec![0]], vec![vec![2], vec![1]]);
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.holders()[0], ("R0".to_string(), None));
}

#[test]
fn test_build_rejects_ragged_request() {
    let result = WaitForGraph::build(
        &named("P", 2),
        &named("R", 2),
        &vec![vec![1, 0], vec![0, 1]],
        &vec![vec![0, 1], vec![1]],
    );
    assert!(matches!(
        result,
        Err(AnalysisError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_unknown_process_lookup() {
    let graph = build(vec![vec![1]], vec![vec![0]]);
    assert!(graph.contains("P0"));
    assert!(!graph.contains("P7"));
    assert_eq!(graph.waits_on("P7"), None);
}

// ============================================================================
// Cycle Search
// ============================================================================

#[test]
fn test_two_process_cycle_found() {
    let graph = build(
        vec![vec![1, 0], vec![0, 1], vec![0, 0]],
        vec![vec![0, 1], vec![1, 0], vec![1, 0]],
    );
    assert!(graph.has_cycles());
    assert_eq!(graph.find_cycles(), vec![vec!["P0", "P1"]]);
}

#[test]
fn test_three_process_cycle_found() {
    // P0 -> P1 -> P2 -> P0
    let graph = build(
        vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]],
        vec![vec![0, 1, 0], vec![0, 0, 1], vec![1, 0, 0]],
    );
    let cycles = graph.find_cycles();
    assert_eq!(cycles, vec![vec!["P0", "P1", "P2"]]);
}

#[test]
fn test_cycle_entered_through_tail() {
    let graph = build(
        vec![vec![1, 1, 0], vec![0, 1, 1], vec![1, 0, 1], vec![0, 0, 0]],
        vec![vec![0, 0, 1], vec![1, 0, 0], vec![0, 1, 0], vec![1, 1, 1]],
    );
    // P0 -> P2 -> P1 -> P2; P0 only leads into the cycle
    assert_eq!(graph.find_cycles(), vec![vec!["P2", "P1"]]);
}

#[test]
fn test_linear_chain_has_no_cycle() {
    let graph = build(
        vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]],
        vec![vec![0, 1, 0], vec![0, 0, 1], vec![0, 0, 0]],
    );
    assert!(!graph.has_cycles());
    assert!(graph.find_cycles().is_empty());
}

#[test]
fn test_disjoint_cycles_both_reported() {
    // P0 <-> P1 and P2 <-> P3
    let graph = build(
        vec![
            vec![1, 0, 0, 0],
            vec![0, 1, 0, 0],
            vec![0, 0, 1, 0],
            vec![0, 0, 0, 1],
        ],
        vec![
            vec![0, 1, 0, 0],
            vec![1, 0, 0, 0],
            vec![0, 0, 0, 1],
            vec![0, 0, 1, 0],
        ],
    );
    assert_eq!(
        graph.find_cycles(),
        vec![vec!["P0", "P1"], vec!["P2", "P3"]]
    );
}

#[test]
fn test_cycle_search_is_repeatable() {
    let graph = build(
        vec![vec![1, 0], vec![0, 1]],
        vec![vec![0, 1], vec![1, 0]],
    );
    assert_eq!(graph.find_cycles(), graph.find_cycles());
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_dot_output_highlights_requested_nodes() {
    let graph = build(
        vec![vec![1, 0], vec![0, 1]],
        vec![vec![0, 1], vec![1, 0]],
    );
    let dot = graph.to_dot(&["P0".to_string()]);

    assert!(dot.starts_with("digraph"));
    assert!(dot.contains("P0"));
    assert!(dot.contains("P1"));
    assert_eq!(dot.matches("fillcolor").count(), 1);
    assert!(dot.contains("->"));
}

#[test]
fn test_long_wait_chain_on_small_stack() {
    // P0 -> P1 -> ... -> P{n-1} -> P0, each Pi holding Ri and requesting R{i+1}
    let n = 1000;
    let mut allocation = vec![vec![0; n]; n];
    let mut request = vec![vec![0; n]; n];
    for i in 0..n {
        allocation[i][i] = 1;
        request[i][(i + 1) % n] = 1;
    }
    let graph = build(allocation, request);

    let cycles = std::thread::Builder::new()
        .stack_size(128 * 1024)
        .spawn(move || graph.find_cycles())
        .unwrap()
        .join()
        .unwrap();

    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].len(), n);
    assert_eq!(cycles[0].first().map(String::as_str), Some("P0"));
    assert_eq!(cycles[0].last().map(String::as_str), Some("P999"));
}

#[test]
fn test_dot_output_is_valid_graphviz() {
    let graph = build(
        vec![vec![1, 0], vec![0, 1], vec![0, 0]],
        vec![vec![0, 1], vec![1, 0], vec![1, 0]],
    );
    let dot = graph.to_dot(&["P0".to_string(), "P1".to_string()]);

    assert!(dot.trim_end().ends_with('}'));
    assert_eq!(dot.matches("->").count(), graph.edge_count());
    assert_eq!(dot.matches("#e74c3c").count(), 2);
    assert!(dot.contains("label = \"P2\""));
}
