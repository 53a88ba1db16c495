use strata::graph::NodeIx;
use strata::order::{self, build_layer_matrix, cross_count, init_order, minimize_crossings};
use strata::{
    EdgeLabel, EdgeSpec, FixedTextMetrics, InputGraph, LayoutGraph, LayoutOptions,
    LayoutPipeline, NodeLabel, NodeSpec,
};

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

fn cities() -> InputGraph {
    let mut g = InputGraph::new();
    for city in [
        "Delhi",
        "Bangalore",
        "Mumbai",
        "Cochin",
        "Jaipur",
        "Goa",
        "Kolkatta",
    ] {
        g.add_node(city, NodeSpec::default());
    }
    for (from, to) in [
        ("Bangalore", "Delhi"),
        ("Mumbai", "Delhi"),
        ("Bangalore", "Mumbai"),
        ("Cochin", "Jaipur"),
        ("Bangalore", "Goa"),
        ("Bangalore", "Kolkatta"),
        ("Goa", "Jaipur"),
        ("Goa", "Mumbai"),
        ("Jaipur", "Kolkatta"),
    ] {
        g.add_named_edge(from, to, EdgeSpec::default());
    }
    g
}

#[test]
fn init_order_walks_breadth_first_from_the_sinks() {
    let mut g = new_graph(&[("d", 2), ("a", 1), ("e", 1), ("b", 0), ("c", 0)]);
    g.add_named_edge("d", "a", EdgeLabel::default());
    g.add_named_edge("d", "e", EdgeLabel::default());
    g.add_named_edge("a", "b", EdgeLabel::default());
    g.add_named_edge("e", "c", EdgeLabel::default());

    let layering = init_order(&g);
    assert_eq!(layering.len(), 3);
    assert_eq!(names(&g, &layering[0]), vec!["b", "c"]);
    assert_eq!(names(&g, &layering[1]), vec!["a", "e"]);
    assert_eq!(names(&g, &layering[2]), vec!["d"]);
}

#[test]
fn init_order_visits_each_node_once() {
    let mut g = new_graph(&[("a", 1), ("b", 1), ("c", 0), ("d", 0)]);
    for (s, t) in [("a", "c"), ("a", "d"), ("b", "c"), ("b", "d")] {
        g.add_named_edge(s, t, EdgeLabel::default());
    }
    let layering = init_order(&g);
    assert_eq!(names(&g, &layering[0]), vec!["c", "d"]);
    assert_eq!(names(&g, &layering[1]), vec!["a", "b"]);
}

#[test]
fn order_removes_a_crossing_and_writes_node_orders() {
    let mut g = new_graph(&[("a", 1), ("b", 1), ("c", 0), ("d", 0)]);
    g.add_named_edge("a", "d", EdgeLabel::default());
    g.add_named_edge("b", "c", EdgeLabel::default());

    let outcome = order::order(&mut g, 24);
    assert_eq!(outcome.crossings, 0);
    assert_eq!(cross_count(&g, &outcome.layering), 0);
    assert_eq!(*outcome.history.last().unwrap(), 0);

    for layer in &outcome.layering {
        for (i, &v) in layer.iter().enumerate() {
            assert_eq!(g.node(v).unwrap().order, i);
        }
    }
    assert_eq!(build_layer_matrix(&g), outcome.layering);
}

#[test]
fn minimize_crossings_leaves_a_crossing_free_layering_alone() {
    let mut g = new_graph(&[("a", 1), ("b", 1), ("c", 0), ("d", 0)]);
    g.add_named_edge("a", "c", EdgeLabel::default());
    g.add_named_edge("b", "d", EdgeLabel::default());
    let layering = vec![ixs(&g, &["c", "d"]), ixs(&g, &["a", "b"])];

    let outcome = minimize_crossings(&mut g, layering.clone(), 24);
    assert_eq!(outcome.layering, layering);
    assert_eq!(outcome.history, vec![0]);
}

#[test]
fn minimize_crossings_history_never_increases() {
    let mut g = new_graph(&[
        ("a", 2),
        ("b", 2),
        ("c", 2),
        ("p", 1),
        ("q", 1),
        ("r", 1),
        ("x", 0),
        ("y", 0),
        ("z", 0),
    ]);
    for (s, t) in [
        ("a", "r"),
        ("b", "p"),
        ("c", "q"),
        ("a", "q"),
        ("p", "z"),
        ("q", "x"),
        ("r", "y"),
        ("r", "x"),
    ] {
        g.add_named_edge(s, t, EdgeLabel::default());
    }
    let layering = vec![
        ixs(&g, &["x", "y", "z"]),
        ixs(&g, &["p", "q", "r"]),
        ixs(&g, &["a", "b", "c"]),
    ];
    let start = cross_count(&g, &layering);

    let outcome = minimize_crossings(&mut g, layering, 24);
    assert_eq!(outcome.history[0], start);
    assert!(outcome.history.windows(2).all(|w| w[1] <= w[0]));
    assert_eq!(outcome.crossings, *outcome.history.last().unwrap());
    assert!(outcome.crossings < start);
}

#[test]
fn order_places_goa_and_cochin_in_the_middle_of_the_second_rank() {
    let input = cities();
    let metrics = FixedTextMetrics::default();
    let mut pipeline = LayoutPipeline::new(&input, &LayoutOptions::default(), &metrics).unwrap();
    pipeline.rank().unwrap();
    let outcome = pipeline.order().unwrap().clone();

    // Ranks count up from the sinks, so the second layer from the top is rank 2.
    assert_eq!(outcome.layering.len(), 4);
    assert_eq!(outcome.layering[2].len(), 5);
    let goa = pipeline.node("Goa").unwrap();
    let cochin = pipeline.node("Cochin").unwrap();
    assert_eq!((goa.rank, goa.order), (2, 2));
    assert_eq!((cochin.rank, cochin.order), (2, 3));
    assert!(outcome.history.windows(2).all(|w| w[1] <= w[0]));
}
