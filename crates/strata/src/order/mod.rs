//! Crossing minimization.
//!
//! Runs after virtualization, so every edge joins two adjacent ranks. The layering starts from a
//! breadth-first order and is then improved by alternating weighted-median sweeps (even
//! iterations) with adjacent transpositions (every iteration). An iteration that ends with more
//! crossings than it started with is rolled back.

pub mod cross_count;
pub mod init_order;
pub mod median;
pub mod transpose;

use crate::model::LayoutGraph;
use crate::rank::util::layer_index;
use strata_graph::NodeIx;
use tracing::{debug, trace};

pub use cross_count::{cross_count, two_layer_cross_count};
pub use init_order::init_order;

/// Nodes of each rank, left to right, indexed by rank.
pub type Layering = Vec<Vec<NodeIx>>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderOutcome {
    pub layering: Layering,
    pub crossings: usize,
    /// Crossings before the first iteration and after every iteration that ran.
    pub history: Vec<usize>,
}

pub fn order(g: &mut LayoutGraph, max_iterations: usize) -> OrderOutcome {
    let layering = init_order(g);
    minimize_crossings(g, layering, max_iterations)
}

/// Improves `layering` in place and writes the final `order` onto every node.
pub fn minimize_crossings(
    g: &mut LayoutGraph,
    mut layering: Layering,
    max_iterations: usize,
) -> OrderOutcome {
    let mut crossings = cross_count(g, &layering);
    let mut history = vec![crossings];
    for i in 0..max_iterations {
        if crossings == 0 {
            break;
        }
        let previous = layering.clone();
        median::wmedian(g, &mut layering, i);
        transpose::transpose(g, &mut layering);
        let next = cross_count(g, &layering);
        trace!(iteration = i, before = crossings, after = next, "ordering iteration");
        if next > crossings {
            layering = previous;
        } else {
            crossings = next;
        }
        history.push(crossings);
    }

    assign_order(g, &layering);
    debug!(
        crossings,
        iterations = history.len() - 1,
        ranks = layering.len(),
        "crossing minimization finished"
    );
    OrderOutcome {
        layering,
        crossings,
        history,
    }
}

pub fn assign_order(g: &mut LayoutGraph, layering: &[Vec<NodeIx>]) {
    for layer in layering {
        for (i, &v) in layer.iter().enumerate() {
            if let Some(label) = g.node_mut(v) {
                label.order = i;
            }
        }
    }
}

/// Rebuilds the layering from the `rank`/`order` fields on the nodes.
pub fn build_layer_matrix(g: &LayoutGraph) -> Layering {
    let Some(max_rank) = g.nodes().map(|(_, n)| n.rank).max() else {
        return Vec::new();
    };
    let mut layering: Layering = vec![Vec::new(); layer_index(max_rank) + 1];
    for (v, label) in g.nodes() {
        layering[layer_index(label.rank)].push(v);
    }
    for layer in &mut layering {
        layer.sort_by_key(|&v| g.node(v).map_or(usize::MAX, |n| n.order));
    }
    layering
}
