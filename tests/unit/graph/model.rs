use super::*;

fn graph(nodes: &[(&str, u32)], links: &[(&str, &str)], directed: bool) -> GossipResult<Graph> {
    Graph::new(
        nodes.iter().map(|(id, it)| Node::new(*id, *it)).collect(),
        links.iter().map(|(s, t)| Link::new(*s, *t)).collect(),
        directed,
        Map::new(),
    )
}

#[test]
fn empty_node_set_is_rejected_explicitly() {
    let err = graph(&[], &[], false).unwrap_err();
    assert!(matches!(err, GossipError::EmptyGraph));
}

#[test]
fn duplicate_ids_are_malformed() {
    let err = graph(&[("A", 0), ("A", 1)], &[], false).unwrap_err();
    assert!(matches!(err, GossipError::MalformedInput(_)));
    assert!(err.to_string().contains("\"A\""));
}

#[test]
fn unknown_link_endpoint_is_malformed() {
    let err = graph(&[("A", 0)], &[("A", "Z")], false).unwrap_err();
    assert!(matches!(err, GossipError::MalformedInput(_)));
    assert!(err.to_string().contains("target"));
    assert!(err.to_string().contains("\"Z\""));
}

#[test]
fn max_iteration_and_lookup() {
    let g = graph(&[("A", 0), ("B", 4), ("C", 2)], &[("A", "B")], false).unwrap();
    assert_eq!(g.max_iteration(), Iteration(4));
    assert_eq!(g.index_of("C"), Some(2));
    assert_eq!(g.node("B").map(|n| n.iteration), Some(Iteration(4)));
    assert!(g.node("nope").is_none());
    assert_eq!(g.node_count(), 3);
}

#[test]
fn undirected_drawn_edges_collapse_reciprocal_links() {
    let g = graph(
        &[("A", 0), ("B", 1), ("C", 1)],
        &[("A", "B"), ("B", "A"), ("A", "C"), ("C", "C"), ("A", "B")],
        false,
    )
    .unwrap();
    assert_eq!(g.edges().len(), 5);
    assert_eq!(g.drawn_edges(), vec![(0, 1), (0, 2)]);
}

#[test]
fn directed_drawn_edges_keep_both_directions() {
    let g = graph(&[("A", 0), ("B", 1)], &[("A", "B"), ("B", "A")], true).unwrap();
    assert!(g.is_directed());
    assert_eq!(g.drawn_edges(), vec![(0, 1), (1, 0)]);
}
