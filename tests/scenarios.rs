//! End-to-end behaviour on small hand-built graphs

use std::collections::HashMap;

use pcst_subgraph::{solve, solve_default, Graph, GraphBuilder, PcstError, PruningStrategy, SolverConfig};

fn prizes(entries: &[(&str, f64)]) -> HashMap<String, f64> {
    entries.iter().map(|&(k, v)| (k.to_string(), v)).collect()
}

fn nodes(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn empty_graph_yields_empty_result() {
    let solution = solve_default(&Graph::default(), &HashMap::new(), None).unwrap();
    assert!(solution.nodes.is_empty());
    assert!(solution.edges.is_empty());
}

#[test]
fn isolated_node_is_never_selected_unrooted() {
    let mut builder = GraphBuilder::with_capacity(1);
    builder.get_or_create_node("n0");
    let graph = builder.build();

    let solution = solve_default(&graph, &prizes(&[("n0", 10.0)]), None).unwrap();
    assert!(solution.nodes.is_empty());
    assert!(solution.edges.is_empty());
}

#[test]
fn path_with_rich_ends_is_kept_whole() {
    let mut builder = GraphBuilder::with_capacity(3);
    builder.add_named_edge("n0", "n1", 1.0);
    builder.add_named_edge("n1", "n2", 1.0);
    let graph = builder.build();
    let p = prizes(&[("n0", 10.0), ("n1", 1.0), ("n2", 10.0)]);

    let solution = solve_default(&graph, &p, None).unwrap();
    assert_eq!(solution.nodes.iter().cloned().collect::<Vec<_>>(), nodes(&["n0", "n1", "n2"]));
    assert_eq!(solution.edges.len(), 2);
    assert_eq!(solution.metrics.net_value, 19.0);
}

#[test]
fn rooted_star_drops_cheap_leaves() {
    let mut builder = GraphBuilder::with_capacity(5);
    for leaf in ["l1", "l2", "l3", "l4"] {
        builder.add_named_edge("center", leaf, 1.0);
    }
    let graph = builder.build();
    let p = prizes(&[
        ("center", 100.0),
        ("l1", 0.5),
        ("l2", 0.5),
        ("l3", 0.5),
        ("l4", 0.5),
    ]);

    let solution = solve_default(&graph, &p, Some("center")).unwrap();
    assert!(solution.contains_node("center"));
    for leaf in ["l1", "l2", "l3", "l4"] {
        assert!(!solution.contains_node(leaf), "{} should be pruned", leaf);
    }
    assert!(solution.edges.is_empty());
}

#[test]
fn costly_poor_component_is_excluded() {
    let mut builder = GraphBuilder::with_capacity(6);
    builder.add_named_edge("n0", "n1", 1.0);
    builder.add_named_edge("n1", "n2", 1.0);
    builder.add_named_edge("n3", "n4", 10.0);
    builder.add_named_edge("n4", "n5", 10.0);
    let graph = builder.build();
    let p = prizes(&[
        ("n0", 10.0),
        ("n1", 10.0),
        ("n2", 10.0),
        ("n3", 0.1),
        ("n4", 0.1),
        ("n5", 0.1),
    ]);

    let solution = solve_default(&graph, &p, None).unwrap();
    for kept in ["n0", "n1", "n2"] {
        assert!(solution.contains_node(kept));
    }
    for dropped in ["n3", "n4", "n5"] {
        assert!(!solution.contains_node(dropped));
    }
}

#[test]
fn validation_failures_are_reported() {
    let mut builder = GraphBuilder::with_capacity(2);
    builder.add_edge("bad", "a", "b", -3.0);
    let graph = builder.build();
    assert_eq!(
        solve_default(&graph, &HashMap::new(), None).unwrap_err(),
        PcstError::InvalidEdgeCost { edge: "bad".into(), cost: -3.0 }
    );

    let mut builder = GraphBuilder::with_capacity(2);
    builder.add_named_edge("a", "b", 1.0);
    let graph = builder.build();
    assert!(matches!(
        solve_default(&graph, &prizes(&[("a", -1.0)]), None),
        Err(PcstError::InvalidPrize { .. })
    ));
    assert_eq!(
        solve_default(&graph, &HashMap::new(), Some("c")).unwrap_err(),
        PcstError::InvalidRoot("c".into())
    );
}

#[test]
fn noisy_edges_are_normalized() {
    let mut builder = GraphBuilder::with_capacity(2);
    builder.add_edge("loop", "a", "a", 0.0);
    builder.add_edge("pricey", "a", "b", 9.0);
    builder.add_edge("cheap", "b", "a", 1.0);
    let graph = builder.build();

    let solution = solve_default(&graph, &prizes(&[("a", 5.0), ("b", 5.0)]), None).unwrap();
    assert_eq!(solution.edges.iter().cloned().collect::<Vec<_>>(), nodes(&["cheap"]));
}

#[test]
fn zero_inputs_are_valid() {
    let mut builder = GraphBuilder::with_capacity(3);
    builder.add_named_edge("a", "b", 0.0);
    builder.add_named_edge("b", "c", 0.0);
    let graph = builder.build();

    let solution = solve_default(&graph, &HashMap::new(), None).unwrap();
    assert!(solution.is_empty());

    let rooted = solve_default(&graph, &HashMap::new(), Some("b")).unwrap();
    assert_eq!(rooted.nodes.iter().cloned().collect::<Vec<_>>(), nodes(&["b"]));
}

#[test]
fn pruning_none_keeps_the_grown_forest() {
    let mut builder = GraphBuilder::with_capacity(3);
    builder.add_named_edge("a", "b", 1.0);
    builder.add_named_edge("b", "c", 1.0);
    let graph = builder.build();
    // c saturates early but is reached by the growing {a, b} cluster
    let p = prizes(&[("a", 10.0), ("b", 10.0), ("c", 0.2)]);

    let config = SolverConfig::default().with_pruning(PruningStrategy::None);
    let unpruned = solve(&graph, &p, None, &config).unwrap();
    assert!(unpruned.contains_edge("b-c"));

    let pruned = solve_default(&graph, &p, None).unwrap();
    assert!(!pruned.contains_edge("b-c"));
    assert!(pruned.contains_edge("a-b"));
}

#[test]
fn simple_pruning_only_strips_zero_prize_leaves() {
    let mut builder = GraphBuilder::with_capacity(4);
    builder.add_named_edge("hub", "a", 1.0);
    builder.add_named_edge("hub", "b", 1.0);
    builder.add_named_edge("hub", "z", 1.0);
    let graph = builder.build();
    let p = prizes(&[("hub", 20.0), ("a", 0.8), ("b", 0.8)]);

    for strategy in [PruningStrategy::Simple, PruningStrategy::Gw] {
        let config = SolverConfig::default().with_pruning(strategy);
        let solution = solve(&graph, &p, Some("hub"), &config).unwrap();
        assert!(!solution.contains_node("z"), "{}", strategy);
        assert!(solution.contains_node("a"), "{}", strategy);
        assert!(solution.contains_node("b"), "{}", strategy);
    }

    let strong = solve(&graph, &p, Some("hub"), &SolverConfig::default()).unwrap();
    assert_eq!(strong.nodes.iter().cloned().collect::<Vec<_>>(), nodes(&["hub"]));
}
