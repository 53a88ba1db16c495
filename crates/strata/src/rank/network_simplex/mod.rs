//! Network simplex engine.
//!
//! The engine minimizes `sum(weight * (source.rank - target.rank))` subject to
//! `source.rank - target.rank >= min_length`. It works on a dense copy of the ranks plus a
//! [`TreeState`]; both live for one run only. Ranks are written back to the node labels when
//! `feasible_tree` or `iterate` completes, or on demand through [`NetworkSimplex::store_ranks`].
//!
//! The same engine ranks the layout graph (with [`Balancing::TopBottom`]) and computes x
//! coordinates on the auxiliary constraint graph (with [`Balancing::LeftRight`]).

mod edges;

use super::tree::TreeState;
use crate::error::{Error, Result};
use crate::model::LayoutGraph;
use crate::options::{Balancing, SimplexOptions};
use strata_graph::{EdgeIx, NodeIx};
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimplexOutcome {
    /// Number of tree edge exchanges performed.
    pub iterations: usize,
    /// `false` when the iteration cap stopped the run before optimality was reached.
    pub converged: bool,
}

/// Full run: initial ranking, feasible tree, exchanges, normalization and balancing.
pub fn network_simplex(
    g: &mut LayoutGraph,
    options: &SimplexOptions,
    mode: Balancing,
) -> Result<SimplexOutcome> {
    if g.is_empty() {
        return Err(Error::InvalidArgument(
            "cannot rank a graph without nodes".to_string(),
        ));
    }
    super::util::init_rank(g)?;
    let mut ns = NetworkSimplex::new(g, options);
    ns.feasible_tree()?;
    ns.iterate(options.max_iterations, mode)
}

pub struct NetworkSimplex<'g> {
    pub(crate) g: &'g mut LayoutGraph,
    pub(crate) rank: Vec<i32>,
    pub(crate) tree: TreeState,
    pub(crate) max_tree_retries: Option<usize>,
}

impl<'g> NetworkSimplex<'g> {
    /// Starts from the ranks currently stored on the node labels.
    pub fn new(g: &'g mut LayoutGraph, options: &SimplexOptions) -> Self {
        let mut rank = vec![0; g.node_bound()];
        for (v, label) in g.nodes() {
            rank[v.index()] = label.rank;
        }
        let tree = TreeState::new(g.node_bound(), g.edge_bound());
        Self {
            g,
            rank,
            tree,
            max_tree_retries: options.max_tree_retries,
        }
    }

    pub fn graph(&self) -> &LayoutGraph {
        self.g
    }

    pub fn rank(&self, v: NodeIx) -> i32 {
        self.rank.get(v.index()).copied().unwrap_or(0)
    }

    pub fn slack(&self, e: EdgeIx) -> i32 {
        slack_of(self.g, &self.rank, e)
    }

    pub fn is_tree_edge(&self, e: EdgeIx) -> bool {
        self.tree.contains_edge(e)
    }

    pub fn tree_edges(&self) -> Vec<EdgeIx> {
        self.g
            .edge_ixs()
            .filter(|&e| self.tree.contains_edge(e))
            .collect()
    }

    /// Cut value of a tree edge; `None` for edges outside the tree.
    pub fn cut_value(&self, e: EdgeIx) -> Option<i64> {
        self.tree
            .contains_edge(e)
            .then(|| self.tree.cut_value(e))
    }

    /// `(low, lim)` of a tree node.
    pub fn low_lim(&self, v: NodeIx) -> Option<(usize, usize)> {
        self.tree
            .contains_node(v)
            .then(|| (self.tree.low(v), self.tree.lim(v)))
    }

    pub fn parent_edge(&self, v: NodeIx) -> Option<EdgeIx> {
        self.tree.parent_edge(v)
    }

    pub fn store_ranks(&mut self) {
        for v in 0..self.rank.len() {
            if let Some(label) = self.g.node_mut(NodeIx::new(v)) {
                label.rank = self.rank[v];
            }
        }
    }

    pub(crate) fn weight(&self, e: EdgeIx) -> i64 {
        self.g.edge(e).map_or(0, |l| i64::from(l.weight))
    }

    /// Runs exchanges until no tree edge has a negative cut value or `max_iterations` exchanges
    /// were made, then normalizes and balances. Requires a feasible tree.
    pub fn iterate(&mut self, max_iterations: usize, mode: Balancing) -> Result<SimplexOutcome> {
        let mut iterations = 0;
        let converged = loop {
            let Some(leaving) = self.leave_edge() else {
                break true;
            };
            if iterations >= max_iterations {
                break false;
            }
            let entering = self.enter_edge(leaving)?;
            trace!(
                %leaving,
                %entering,
                cut_value = self.tree.cut_value(leaving),
                slack = self.slack(entering),
                "exchange tree edge"
            );
            self.exchange(leaving, entering)?;
            iterations += 1;
        };

        if converged {
            debug!(iterations, nodes = self.g.node_count(), "network simplex converged");
        } else {
            warn!(
                iterations,
                nodes = self.g.node_count(),
                "network simplex hit its iteration cap; result is best effort"
            );
        }

        self.normalize();
        self.balance(mode);
        self.normalize();
        self.store_ranks();
        Ok(SimplexOutcome {
            iterations,
            converged,
        })
    }

    /// Shifts ranks so the smallest is 0.
    pub fn normalize(&mut self) {
        let Some(min) = self.g.node_ixs().map(|v| self.rank[v.index()]).min() else {
            return;
        };
        for v in self.g.node_ixs() {
            self.rank[v.index()] -= min;
        }
    }

    /// Recomputes every tree edge's cut value in postorder.
    pub fn init_cut_values(&mut self) {
        let postorder = self.tree.postorder().to_vec();
        for v in postorder {
            if let Some(e) = self.tree.parent_edge(v) {
                let cut = self.calc_cut_value(v, e);
                self.tree.set_cut_value(e, cut);
            }
        }
    }

    /// Cut value of the tree edge `parent_edge` joining `child` to its parent.
    ///
    /// Every other tree edge at `child` leads to a grandchild whose cut value is already known,
    /// so the value follows from the edges at `child` alone.
    pub(crate) fn calc_cut_value(&self, child: NodeIx, parent_edge: EdgeIx) -> i64 {
        let child_is_tail = self.g.source(parent_edge) == Some(child);
        let mut cut = self.weight(parent_edge);

        let incident = self
            .g
            .out_edges(child)
            .iter()
            .map(|&e| (e, child_is_tail))
            .chain(self.g.in_edges(child).iter().map(|&e| (e, !child_is_tail)));
        for (e, points_to_head) in incident {
            if e == parent_edge {
                continue;
            }
            let weight = self.weight(e);
            cut += if points_to_head { weight } else { -weight };
            if self.tree.contains_edge(e) {
                let other = self.tree.cut_value(e);
                cut += if points_to_head { -other } else { other };
            }
        }
        cut
    }

    pub(crate) fn shift_subtree(&mut self, root: NodeIx, delta: i32) {
        for &v in self.tree.subtree(root) {
            self.rank[v.index()] += delta;
        }
    }
}

pub(crate) fn slack_of(g: &LayoutGraph, rank: &[i32], e: EdgeIx) -> i32 {
    let Some((s, t)) = g.endpoints(e) else {
        return 0;
    };
    let r = |v: NodeIx| rank.get(v.index()).copied().unwrap_or(0);
    r(s) - r(t) - super::util::min_length(g, e)
}
