use crate::error::{Error, Result};
use crate::model::LayoutGraph;
use std::collections::VecDeque;
use strata_graph::{EdgeIx, NodeIx, alg};

/// Initial feasible ranking, swept from the sinks upward.
///
/// Each node gets the largest `target.rank + min_length` over its outgoing edges once all of them
/// are known, so every edge is satisfied but not necessarily tight.
pub fn init_rank(g: &mut LayoutGraph) -> Result<()> {
    let mut pending: Vec<usize> = vec![0; g.node_bound()];
    let mut ranks: Vec<i32> = vec![0; g.node_bound()];
    let mut queue = VecDeque::new();
    for v in g.node_ixs() {
        pending[v.index()] = g.out_degree(v);
        if pending[v.index()] == 0 {
            queue.push_back(v);
        }
    }

    let mut processed = 0;
    while let Some(v) = queue.pop_front() {
        processed += 1;
        let rank = g
            .out_edges(v)
            .iter()
            .filter_map(|&e| {
                let t = g.target(e)?;
                Some(ranks[t.index()] + min_length(g, e))
            })
            .max()
            .unwrap_or(0);
        ranks[v.index()] = rank;
        for u in g.predecessors(v) {
            let slot = &mut pending[u.index()];
            *slot -= 1;
            if *slot == 0 {
                queue.push_back(u);
            }
        }
    }

    if processed < g.node_count() {
        return Err(cycle_error(g));
    }

    let nodes: Vec<_> = g.node_ixs().collect();
    for v in nodes {
        if let Some(label) = g.node_mut(v) {
            label.rank = ranks[v.index()];
        }
    }
    Ok(())
}

pub(crate) fn cycle_error(g: &LayoutGraph) -> Error {
    let cycle = alg::find_cycle(g)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|v| g.node_name(v).map(str::to_string))
        .collect();
    Error::Cyclic { cycle }
}

pub fn min_length(g: &LayoutGraph, e: EdgeIx) -> i32 {
    g.edge(e).map_or(0, |l| l.min_length as i32)
}

/// `source.rank - target.rank - min_length`, read from the node labels.
pub fn slack(g: &LayoutGraph, e: EdgeIx) -> i32 {
    let Some((s, t)) = g.endpoints(e) else {
        return 0;
    };
    let rank = |v: NodeIx| g.node(v).map_or(0, |n| n.rank);
    rank(s) - rank(t) - min_length(g, e)
}

/// Shifts all ranks so the smallest one is 0.
pub fn normalize_ranks(g: &mut LayoutGraph) {
    let Some(min) = g.nodes().map(|(_, n)| n.rank).min() else {
        return;
    };
    let nodes: Vec<_> = g.node_ixs().collect();
    for v in nodes {
        if let Some(label) = g.node_mut(v) {
            label.rank -= min;
        }
    }
}

/// Maps a normalized rank to a layer index.
pub(crate) fn layer_index(rank: i32) -> usize {
    usize::try_from(rank).unwrap_or(0)
}
