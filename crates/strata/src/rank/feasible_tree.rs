//! Tight spanning tree construction.

use super::network_simplex::{NetworkSimplex, slack_of};
use crate::error::{Error, Result};
use std::collections::VecDeque;
use strata_graph::EdgeIx;
use tracing::debug;

impl NetworkSimplex<'_> {
    /// Grows a spanning tree of zero-slack edges from the lowest-id node.
    ///
    /// When growth stalls, the tree is shifted by the slack of the tightest edge leaving it and
    /// growth resumes. Each retry adds at least one node; running out of retries is a
    /// [`Error::Convergence`]. On success the tree is numbered and every cut value is set.
    pub fn feasible_tree(&mut self) -> Result<()> {
        let node_count = self.g.node_count();
        let Some(start) = self.g.node_ixs().next() else {
            return Err(Error::InvalidArgument(
                "cannot build a spanning tree for a graph without nodes".to_string(),
            ));
        };

        self.tree.clear();
        self.tree.add_node(start);
        let limit = self.max_tree_retries.unwrap_or(node_count);
        let mut retries = 0;
        while self.tight_tree() < node_count {
            if retries >= limit {
                return Err(Error::Convergence {
                    retries,
                    spanned: self.tree.len(),
                    nodes: node_count,
                });
            }
            retries += 1;

            let Some((e, source_in_tree)) = self.min_slack_edge() else {
                return Err(Error::Consistency(format!(
                    "no edge leaves the partial tree of {} nodes; the graph must be weakly connected",
                    self.tree.len()
                )));
            };
            let slack = self.slack(e);
            let delta = if source_in_tree { -slack } else { slack };
            for &v in self.tree.nodes() {
                self.rank[v.index()] += delta;
            }
        }

        self.tree.init_low_lim(self.g);
        self.init_cut_values();
        self.store_ranks();
        debug!(nodes = node_count, retries, "feasible tree spans the graph");
        Ok(())
    }

    /// Breadth-first growth along tight edges. Returns the tree size.
    fn tight_tree(&mut self) -> usize {
        let mut queue: VecDeque<_> = self.tree.nodes().iter().copied().collect();
        while let Some(v) = queue.pop_front() {
            for &e in self.g.out_edges(v).iter().chain(self.g.in_edges(v)) {
                let Some(w) = self.g.opposite(e, v) else {
                    continue;
                };
                if self.tree.contains_node(w) || slack_of(self.g, &self.rank, e) != 0 {
                    continue;
                }
                self.tree.add_node(w);
                self.tree.add_edge(e, v, w);
                queue.push_back(w);
            }
        }
        self.tree.len()
    }

    /// The lowest-slack edge with exactly one endpoint in the tree, and whether that endpoint is
    /// the source.
    fn min_slack_edge(&self) -> Option<(EdgeIx, bool)> {
        let mut best: Option<(i32, EdgeIx, bool)> = None;
        for e in self.g.edge_ixs() {
            let Some((s, t)) = self.g.endpoints(e) else {
                continue;
            };
            let source_in_tree = self.tree.contains_node(s);
            if source_in_tree == self.tree.contains_node(t) {
                continue;
            }
            let slack = self.slack(e);
            if best.is_none_or(|(b, _, _)| slack < b) {
                best = Some((slack, e, source_in_tree));
            }
        }
        best.map(|(_, e, source_in_tree)| (e, source_in_tree))
    }
}
