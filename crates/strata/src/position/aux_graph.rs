//! Auxiliary constraint graph for horizontal placement.
//!
//! In this graph a node's rank is its x coordinate. Separation edges run from each node to its
//! left neighbour with the minimum center distance as `min_length` and no weight. Each layout edge
//! gets an omega node pointing at both of its endpoints with `min_length` 0, so the simplex pays
//! `weight * Ω` for every unit of horizontal offset between the endpoints.

use crate::model::{EdgeLabel, LayoutGraph, NodeLabel};
use crate::options::LayoutOptions;
use crate::order::Layering;
use crate::util::{IdGenerator, add_dummy_node};
use strata_graph::NodeIx;

pub struct AuxGraph {
    pub graph: LayoutGraph,
    /// Auxiliary node for each layout node, indexed by layout node id.
    pub mirror: Vec<Option<NodeIx>>,
    pub omega_nodes: usize,
}

impl AuxGraph {
    pub fn mirror_of(&self, v: NodeIx) -> Option<NodeIx> {
        self.mirror.get(v.index()).copied().flatten()
    }

    /// x coordinate computed for layout node `v`.
    pub fn x(&self, v: NodeIx) -> Option<f64> {
        let aux = self.mirror_of(v)?;
        self.graph.node(aux).map(|n| f64::from(n.rank))
    }
}

/// Straightening factor Ω: long chains of virtual nodes are pulled hardest.
pub fn omega(source_is_virtual: bool, target_is_virtual: bool) -> u32 {
    match (source_is_virtual, target_is_virtual) {
        (false, false) => 1,
        (true, true) => 8,
        _ => 2,
    }
}

pub fn build(
    g: &LayoutGraph,
    layering: &Layering,
    options: &LayoutOptions,
    ids: &mut IdGenerator,
) -> AuxGraph {
    let mut graph = LayoutGraph::new();
    let mut mirror: Vec<Option<NodeIx>> = vec![None; g.node_bound()];
    for (v, label) in g.nodes() {
        let name = g.node_name(v).unwrap_or_default();
        let aux = graph.add_node(
            name,
            NodeLabel {
                is_virtual: label.is_virtual,
                is_label: label.is_label,
                ..Default::default()
            },
        );
        mirror[v.index()] = Some(aux);
    }

    for layer in layering {
        // A label rank holds an edge label and otherwise only virtual chain nodes.
        let label_only = layer
            .iter()
            .all(|&v| g.node(v).is_some_and(|n| n.is_virtual))
            && layer
                .iter()
                .any(|&v| g.node(v).is_some_and(|n| n.is_label));
        let separation = if label_only {
            options.label_rank_separation
        } else {
            options.node_separation
        };
        for pair in layer.windows(2) {
            let (Some(left), Some(right)) = (g.node(pair[0]), g.node(pair[1])) else {
                continue;
            };
            let (Some(aux_left), Some(aux_right)) = (mirror[pair[0].index()], mirror[pair[1].index()])
            else {
                continue;
            };
            let gap = left.right_width + right.left_width + separation;
            graph.add_edge(
                aux_right,
                aux_left,
                EdgeLabel {
                    weight: 0,
                    min_length: gap.ceil() as u32,
                    is_virtual: true,
                    label: None,
                },
            );
        }
    }

    let mut omega_nodes = 0;
    for e in g.edge_ixs() {
        let Some((s, t)) = g.endpoints(e) else {
            continue;
        };
        let (Some(aux_s), Some(aux_t)) = (mirror[s.index()], mirror[t.index()]) else {
            continue;
        };
        let is_virtual = |v: NodeIx| g.node(v).is_some_and(|n| n.is_virtual);
        let weight = g
            .edge(e)
            .map_or(0, |l| l.weight)
            .saturating_mul(omega(is_virtual(s), is_virtual(t)));
        let omega_node = add_dummy_node(
            &mut graph,
            ids,
            "_omega",
            NodeLabel {
                is_virtual: true,
                ..Default::default()
            },
        );
        for endpoint in [aux_s, aux_t] {
            graph.add_edge(
                omega_node,
                endpoint,
                EdgeLabel {
                    weight,
                    min_length: 0,
                    is_virtual: true,
                    label: None,
                },
            );
        }
        omega_nodes += 1;
    }

    AuxGraph {
        graph,
        mirror,
        omega_nodes,
    }
}
