use strata::position::aux_graph::{self, omega};
use strata::position::assign_y;
use strata::graph::NodeIx;
use strata::util::IdGenerator;
use strata::{EdgeLabel, EdgeSpec, InputGraph, LayoutGraph, LayoutOptions, LayoutResult, NodeLabel, NodeSpec};

fn layout(g: &InputGraph) -> LayoutResult {
    strata::layout(g, &LayoutOptions::default()).unwrap()
}

fn fork() -> InputGraph {
    let mut g = InputGraph::new();
    g.add_named_edge("a", "b", EdgeSpec::default());
    g.add_named_edge("a", "c", EdgeSpec::default());
    g
}

#[test]
fn position_stacks_ranks_from_the_top() {
    let mut g = LayoutGraph::new();
    let a = g.add_node("a", NodeLabel { rank: 1, ..NodeLabel::sized(20.0, 10.0) });
    let b = g.add_node("b", NodeLabel { rank: 0, ..NodeLabel::sized(20.0, 40.0) });
    let layering = vec![vec![b], vec![a]];

    assign_y(&mut g, &layering, &LayoutOptions::default());
    assert_eq!(g.node(a).unwrap().y, 5.0);
    assert_eq!(g.node(b).unwrap().y, 5.0 + 18.0 + 20.0 + 5.0);
}

#[test]
fn position_uses_the_tallest_node_of_each_rank() {
    let mut g = InputGraph::new();
    g.add_node("a", NodeSpec::sized(10.0, 10.0));
    g.add_node("b", NodeSpec::sized(10.0, 30.0));
    g.add_node("c", NodeSpec::sized(10.0, 50.0));
    g.add_named_edge("a", "b", EdgeSpec::default());
    g.add_named_edge("a", "c", EdgeSpec::default());

    let result = layout(&g);
    let (b, c) = (result.node("b").unwrap(), result.node("c").unwrap());
    assert_eq!(result.node("a").unwrap().y, 5.0);
    assert_eq!(b.y, c.y);
    assert_eq!(b.y, 5.0 + 5.0 + 18.0 + 25.0);
    assert_eq!(result.height, b.y + 25.0);
}

#[test]
fn position_aligns_a_single_edge_vertically() {
    let mut g = InputGraph::new();
    g.add_named_edge("a", "b", EdgeSpec::default());

    let result = layout(&g);
    let (a, b) = (result.node("a").unwrap(), result.node("b").unwrap());
    assert_eq!(a.x, 27.0);
    assert_eq!(b.x, 27.0);
    assert_eq!(a.y, 18.0);
    assert_eq!(b.y, 72.0);
    assert_eq!(result.width, 54.0);
    assert_eq!(result.height, 90.0);
}

#[test]
fn position_keeps_neighbours_apart_by_their_widths_plus_separation() {
    let result = layout(&fork());
    let (a, b, c) = (
        result.node("a").unwrap(),
        result.node("b").unwrap(),
        result.node("c").unwrap(),
    );
    let (left, right) = if b.order < c.order { (b, c) } else { (c, b) };
    assert_eq!(right.x - left.x, 27.0 + 27.0 + 18.0);
    assert_eq!(left.x, 27.0);
    assert!(left.x <= a.x && a.x <= right.x);
}

#[test]
fn position_never_places_a_node_left_of_zero() {
    let mut g = InputGraph::new();
    g.set_path(&["a", "b", "c", "d"]);
    g.set_path(&["a", "x", "d"]);
    g.set_path(&["a", "y", "z", "d"]);
    g.add_node("w", NodeSpec::sized(200.0, 20.0));
    g.add_named_edge("b", "w", EdgeSpec::default());

    let result = layout(&g);
    let left = result
        .nodes
        .values()
        .map(|n| n.x - n.width / 2.0)
        .fold(f64::INFINITY, f64::min);
    assert!(left >= 0.0, "node edge at {left}");
    for n in result.nodes.values() {
        assert!(n.x + n.width / 2.0 <= result.width);
    }
}

#[test]
fn position_routes_long_edges_through_their_virtual_nodes() {
    let mut g = InputGraph::new();
    g.set_path(&["a", "b", "c", "d"]);
    g.add_named_edge("a", "d", EdgeSpec::default());

    let result = layout(&g);
    let long = result
        .edges
        .iter()
        .find(|e| e.source == "a" && e.target == "d")
        .unwrap();
    assert_eq!(long.points.len(), 4);
    assert!(long.points.windows(2).all(|w| w[0].y < w[1].y));
    assert_eq!(long.points[0].x, result.node("a").unwrap().x);
    assert_eq!(long.points[3].x, result.node("d").unwrap().x);
}

#[test]
fn position_reserves_room_for_edge_labels() {
    let mut g = InputGraph::new();
    g.add_named_edge("a", "b", EdgeSpec::labeled("a long edge label").min_length(2));
    g.add_named_edge("a", "c", EdgeSpec::default());
    g.add_named_edge("c", "b", EdgeSpec::default());

    let result = layout(&g);
    let edge = &result.edges[0];
    let label = edge.label_position.unwrap();
    let c = result.node("c").unwrap();
    assert_eq!(label.y, c.y);
    // The label node is `node_separation` wide on the left and as wide as its text on the right.
    let label_right = label.x + 17.0 * 7.0;
    let label_left = label.x - 18.0;
    let apart = label_left >= c.x + 27.0 + 18.0 || label_right + 18.0 <= c.x - 27.0;
    assert!(apart, "label at {label:?} overlaps c at {}", c.x);
}

#[test]
fn position_omega_pulls_hardest_on_virtual_segments() {
    assert_eq!(omega(false, false), 1);
    assert_eq!(omega(true, false), 2);
    assert_eq!(omega(false, true), 2);
    assert_eq!(omega(true, true), 8);
}

#[test]
fn position_aux_graph_adds_one_omega_node_per_edge() {
    let mut g = LayoutGraph::new();
    let a = g.add_node("a", NodeLabel { rank: 1, ..NodeLabel::sized(10.0, 10.0) });
    let b = g.add_node("b", NodeLabel { rank: 0, ..NodeLabel::sized(10.0, 10.0) });
    let c = g.add_node("c", NodeLabel { rank: 0, ..NodeLabel::sized(30.0, 10.0) });
    g.add_named_edge("a", "b", Default::default());
    g.add_named_edge("a", "c", Default::default());
    let layering = vec![vec![b, c], vec![a]];

    let aux = aux_graph::build(&g, &layering, &LayoutOptions::default(), &mut IdGenerator::new());
    assert_eq!(aux.omega_nodes, 2);
    assert_eq!(aux.graph.node_count(), 5);
    // One separation edge plus two edges per omega node.
    assert_eq!(aux.graph.edge_count(), 5);

    let (aux_b, aux_c) = (aux.mirror_of(b).unwrap(), aux.mirror_of(c).unwrap());
    let separation = aux.graph.out_edges(aux_c)[0];
    assert_eq!(aux.graph.target(separation), Some(aux_b));
    let label = aux.graph.edge(separation).unwrap();
    assert_eq!(label.min_length, 5 + 15 + 18);
    assert_eq!(label.weight, 0);
}

#[test]
fn position_aux_graph_narrows_only_ranks_that_hold_edge_labels() {
    let mut g = LayoutGraph::new();
    let virtual_node = |rank: i32, is_label: bool| NodeLabel {
        rank,
        is_virtual: true,
        is_label,
        ..NodeLabel::sized(2.0, 0.0)
    };
    let v1 = g.add_node("v1", virtual_node(0, false));
    let v2 = g.add_node("v2", virtual_node(0, false));
    let l1 = g.add_node("l1", virtual_node(1, true));
    let l2 = g.add_node("l2", virtual_node(1, false));
    let layering = vec![vec![v1, v2], vec![l1, l2]];

    let aux = aux_graph::build(&g, &layering, &LayoutOptions::default(), &mut IdGenerator::new());
    let gap = |right: NodeIx| {
        let e = aux.graph.out_edges(aux.mirror_of(right).unwrap())[0];
        aux.graph.edge(e).unwrap().min_length
    };
    assert_eq!(gap(v2), 1 + 1 + 18);
    assert_eq!(gap(l2), 1 + 1 + 9);
}

#[test]
fn position_aux_graph_saturates_heavy_omega_weights() {
    let mut g = LayoutGraph::new();
    let chain = |rank: i32| NodeLabel {
        rank,
        is_virtual: true,
        ..NodeLabel::sized(2.0, 0.0)
    };
    let a = g.add_node("a", chain(1));
    let b = g.add_node("b", chain(0));
    g.add_edge(a, b, EdgeLabel::new(u32::MAX / 2, 1));
    let layering = vec![vec![b], vec![a]];

    let aux = aux_graph::build(&g, &layering, &LayoutOptions::default(), &mut IdGenerator::new());
    assert_eq!(aux.omega_nodes, 1);
    let e = aux.graph.in_edges(aux.mirror_of(a).unwrap())[0];
    assert_eq!(aux.graph.edge(e).unwrap().weight, u32::MAX);
}
