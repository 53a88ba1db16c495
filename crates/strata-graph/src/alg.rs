//! Traversal helpers the layout core relies on: topological order, cycle detection and weak
//! components.

use crate::{Graph, NodeIx};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("graph is not a DAG: node {node} cannot be placed in topological order")]
pub struct NotADag {
    pub node: NodeIx,
}

/// Kahn's algorithm. Sources are seeded in ascending id order and successors are released in edge
/// insertion order, so the result is stable for a given graph.
pub fn topsort<N, E>(g: &Graph<N, E>) -> Result<Vec<NodeIx>, NotADag> {
    let mut pending: Vec<usize> = vec![0; g.node_bound()];
    let mut queue: VecDeque<NodeIx> = VecDeque::new();
    for v in g.node_ixs() {
        pending[v.index()] = g.in_degree(v);
        if pending[v.index()] == 0 {
            queue.push_back(v);
        }
    }

    let mut out: Vec<NodeIx> = Vec::with_capacity(g.node_count());
    while let Some(v) = queue.pop_front() {
        out.push(v);
        for w in g.successors(v) {
            let slot = &mut pending[w.index()];
            *slot -= 1;
            if *slot == 0 {
                queue.push_back(w);
            }
        }
    }

    if out.len() < g.node_count() {
        let node = g
            .node_ixs()
            .find(|v| pending[v.index()] > 0)
            .unwrap_or_else(|| NodeIx::new(0));
        return Err(NotADag { node });
    }
    Ok(out)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

/// Returns the nodes of one directed cycle in traversal order, or `None` for a DAG.
///
/// Uses an explicit stack so deep chains do not exhaust the call stack.
pub fn find_cycle<N, E>(g: &Graph<N, E>) -> Option<Vec<NodeIx>> {
    let mut mark = vec![Mark::Unvisited; g.node_bound()];
    for root in g.node_ixs() {
        if mark[root.index()] != Mark::Unvisited {
            continue;
        }
        mark[root.index()] = Mark::OnStack;
        let mut stack: Vec<(NodeIx, usize)> = vec![(root, 0)];
        while let Some(frame) = stack.last_mut() {
            let v = frame.0;
            let Some(&e) = g.out_edges(v).get(frame.1) else {
                mark[v.index()] = Mark::Done;
                stack.pop();
                continue;
            };
            frame.1 += 1;
            let Some(w) = g.target(e) else {
                continue;
            };
            match mark[w.index()] {
                Mark::Unvisited => {
                    mark[w.index()] = Mark::OnStack;
                    stack.push((w, 0));
                }
                Mark::OnStack => {
                    let start = stack.iter().position(|&(x, _)| x == w).unwrap_or(0);
                    return Some(stack[start..].iter().map(|&(x, _)| x).collect());
                }
                Mark::Done => {}
            }
        }
    }
    None
}

pub fn is_acyclic<N, E>(g: &Graph<N, E>) -> bool {
    find_cycle(g).is_none()
}

/// Weakly connected components, each sorted by id, ordered by their smallest id.
pub fn components<N, E>(g: &Graph<N, E>) -> Vec<Vec<NodeIx>> {
    let mut seen = vec![false; g.node_bound()];
    let mut out: Vec<Vec<NodeIx>> = Vec::new();
    for start in g.node_ixs() {
        if seen[start.index()] {
            continue;
        }
        seen[start.index()] = true;
        let mut component = vec![start];
        let mut queue: VecDeque<NodeIx> = VecDeque::from([start]);
        while let Some(v) = queue.pop_front() {
            for w in g.successors(v).chain(g.predecessors(v)) {
                if !seen[w.index()] {
                    seen[w.index()] = true;
                    component.push(w);
                    queue.push_back(w);
                }
            }
        }
        component.sort_unstable();
        out.push(component);
    }
    out
}

/// Nodes without outgoing edges, in ascending id order.
pub fn sinks<N, E>(g: &Graph<N, E>) -> Vec<NodeIx> {
    g.node_ixs().filter(|&v| g.out_degree(v) == 0).collect()
}

/// Nodes without incoming edges, in ascending id order.
pub fn sources<N, E>(g: &Graph<N, E>) -> Vec<NodeIx> {
    g.node_ixs().filter(|&v| g.in_degree(v) == 0).collect()
}
