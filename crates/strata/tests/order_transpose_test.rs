use strata::graph::NodeIx;
use strata::order::cross_count;
use strata::order::transpose::transpose;
use strata::{EdgeLabel, LayoutGraph, NodeLabel};

fn new_graph(nodes: &[(&str, i32)]) -> LayoutGraph {
    let mut g = LayoutGraph::new();
    for &(name, rank) in nodes {
        g.add_node(name, NodeLabel::with_rank(rank));
    }
    g
}

fn ixs(g: &LayoutGraph, names: &[&str]) -> Vec<NodeIx> {
    names.iter().map(|n| g.node_ix(n).unwrap()).collect()
}

fn names(g: &LayoutGraph, layer: &[NodeIx]) -> Vec<String> {
    layer
        .iter()
        .map(|&v| g.node_name(v).unwrap().to_string())
        .collect()
}

#[test]
fn transpose_removes_a_single_crossing() {
    let mut g = new_graph(&[("a", 1), ("b", 1), ("c", 0), ("d", 0)]);
    g.add_named_edge("a", "d", EdgeLabel::default());
    g.add_named_edge("b", "c", EdgeLabel::default());
    let mut layering = vec![ixs(&g, &["c", "d"]), ixs(&g, &["a", "b"])];
    assert_eq!(cross_count(&g, &layering), 1);

    transpose(&g, &mut layering);
    assert_eq!(cross_count(&g, &layering), 0);
    assert_eq!(names(&g, &layering[0]), vec!["d", "c"]);
    assert_eq!(names(&g, &layering[1]), vec!["a", "b"]);
}

#[test]
fn transpose_leaves_a_crossing_free_layering_without_crossings() {
    let mut g = new_graph(&[("a", 1), ("b", 1), ("c", 0), ("d", 0)]);
    g.add_named_edge("a", "c", EdgeLabel::default());
    g.add_named_edge("b", "d", EdgeLabel::default());
    let mut layering = vec![ixs(&g, &["c", "d"]), ixs(&g, &["a", "b"])];

    transpose(&g, &mut layering);
    assert_eq!(cross_count(&g, &layering), 0);
}

#[test]
fn transpose_keeps_a_swap_that_does_not_add_crossings() {
    let mut g = new_graph(&[("a", 1), ("b", 1), ("c", 0)]);
    g.add_named_edge("a", "c", EdgeLabel::default());
    g.add_named_edge("b", "c", EdgeLabel::default());
    let mut layering = vec![ixs(&g, &["c"]), ixs(&g, &["a", "b"])];

    transpose(&g, &mut layering);
    assert_eq!(names(&g, &layering[1]), vec!["b", "a"]);
}

#[test]
fn transpose_never_increases_crossings() {
    // K(3,3) between two ranks, written down in a scrambled order.
    let mut g = new_graph(&[
        ("a", 1),
        ("b", 1),
        ("c", 1),
        ("x", 0),
        ("y", 0),
        ("z", 0),
    ]);
    for s in ["a", "b", "c"] {
        for t in ["x", "y", "z"] {
            g.add_named_edge(s, t, EdgeLabel::default());
        }
    }
    g.add_named_edge("a", "z", EdgeLabel::default());
    let mut layering = vec![ixs(&g, &["x", "y", "z"]), ixs(&g, &["c", "b", "a"])];
    let before = cross_count(&g, &layering);

    transpose(&g, &mut layering);
    let after = cross_count(&g, &layering);
    assert!(after <= before, "{after} > {before}");
    let mut sorted = names(&g, &layering[1]);
    sorted.sort();
    assert_eq!(sorted, vec!["a", "b", "c"]);
}
