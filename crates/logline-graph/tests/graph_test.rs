use logline_graph::{CommitGraph, DownEdge, Edge, EdgeKind, alg};

#[test]
fn graph_grows_to_cover_edge_endpoints() {
    let mut g = CommitGraph::new();
    g.set_edge(2, 5);
    assert_eq!(g.node_count(), 6);
    assert!(g.has_node(5));
    assert!(!g.has_node(6));
    assert_eq!(g.edge_count(), 1);
}

#[test]
fn graph_tracks_in_and_out_degrees() {
    let mut g = CommitGraph::with_nodes(4);
    g.set_path(&[0, 1, 3]);
    g.set_path(&[0, 2, 3]);

    assert_eq!(g.out_degree(0), 2);
    assert_eq!(g.in_degree(3), 2);
    assert_eq!(g.predecessors(3), &[1, 2]);
    assert_eq!(g.successors(0).collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn graph_remove_edge_updates_predecessors() {
    let mut g = CommitGraph::from_edges(3, [(0, 1), (0, 2), (1, 2)]);
    assert!(g.remove_edge(0, 2));
    assert!(!g.remove_edge(0, 2));
    assert_eq!(g.predecessors(2), &[1]);
    assert_eq!(g.edge_count(), 2);
    assert_eq!(g.down_edges(0), &[DownEdge::new(1, EdgeKind::Normal)]);
}

#[test]
fn graph_queries_out_of_range_nodes_are_empty() {
    let g = CommitGraph::with_nodes(1);
    assert_eq!(g.out_degree(7), 0);
    assert_eq!(g.in_degree(7), 0);
    assert!(g.down_edges(7).is_empty());
    assert!(!g.has_edge(0, 7));
}

#[test]
fn graph_edges_are_listed_per_source_in_insertion_order() {
    let mut g = CommitGraph::with_nodes(3);
    g.set_edge(1, 2);
    g.set_edge(0, 2);
    g.set_edge_with_kind(0, 1, EdgeKind::Dotted);
    assert_eq!(
        g.edges().collect::<Vec<_>>(),
        vec![Edge::normal(0, 2), Edge::dotted(0, 1), Edge::normal(1, 2)]
    );
}

#[test]
fn graph_equality_ignores_predecessor_order() {
    let mut a = CommitGraph::with_nodes(3);
    a.set_edge(0, 2);
    a.set_edge(1, 2);
    let mut b = CommitGraph::with_nodes(3);
    b.set_edge(1, 2);
    b.set_edge(0, 2);
    assert_eq!(a, b);
}

#[test]
fn alg_reachability_follows_every_edge_kind() {
    let mut g = CommitGraph::with_nodes(4);
    g.set_edge(0, 1);
    g.set_edge_with_kind(1, 2, EdgeKind::Dotted);
    g.set_edge(2, 3);

    assert!(alg::is_reachable(&g, 0, 3));
    assert!(!alg::is_reachable(&g, 3, 0));
    assert!(!alg::is_reachable(&g, 0, 0));

    let mut reach: Vec<_> = alg::reachable_from(&g, 1).into_iter().collect();
    reach.sort_unstable();
    assert_eq!(reach, vec![2, 3]);
}

#[test]
fn alg_find_cycles_is_empty_for_a_dag() {
    let g = CommitGraph::from_edges(4, [(0, 1), (0, 2), (1, 3), (2, 3)]);
    assert_eq!(alg::find_cycles(&g), Vec::<Vec<usize>>::new());
}

#[test]
fn alg_find_cycles_reports_each_component_once() {
    let mut g = CommitGraph::with_nodes(6);
    g.set_path(&[3, 4, 3]);
    g.set_path(&[0, 1, 2, 0]);
    g.set_edge(2, 5);
    assert_eq!(alg::find_cycles(&g), vec![vec![0, 1, 2], vec![3, 4]]);
}
