use super::Layering;
use crate::model::LayoutGraph;
use crate::rank::util::layer_index;
use std::collections::VecDeque;
use strata_graph::{NodeIx, alg};

/// Initial order: breadth-first from the sinks (by rank, then id), following incoming edges in
/// insertion order. A node is appended to its rank the moment it leaves the queue.
pub fn init_order(g: &LayoutGraph) -> Layering {
    let rank = |v: NodeIx| g.node(v).map_or(0, |n| n.rank);
    let Some(max_rank) = g.nodes().map(|(_, n)| n.rank).max() else {
        return Vec::new();
    };
    let mut layering: Layering = vec![Vec::new(); layer_index(max_rank) + 1];

    let mut sinks = alg::sinks(g);
    sinks.sort_by_key(|&v| rank(v));

    let mut visited = vec![false; g.node_bound()];
    let mut queue = VecDeque::new();
    for v in sinks {
        visited[v.index()] = true;
        queue.push_back(v);
    }
    while let Some(v) = queue.pop_front() {
        layering[layer_index(rank(v))].push(v);
        for u in g.predecessors(v) {
            if !visited[u.index()] {
                visited[u.index()] = true;
                queue.push_back(u);
            }
        }
    }

    // Every node of a DAG drains into some sink; anything left over is appended by id.
    for v in g.node_ixs() {
        if !visited[v.index()] {
            layering[layer_index(rank(v))].push(v);
        }
    }
    layering
}
