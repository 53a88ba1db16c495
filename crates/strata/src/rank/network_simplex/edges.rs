use super::{NetworkSimplex, slack_of};
use crate::error::{Error, Result};
use strata_graph::{EdgeIx, NodeIx};

impl NetworkSimplex<'_> {
    /// The lowest-id tree edge with a negative cut value, if any.
    pub fn leave_edge(&self) -> Option<EdgeIx> {
        self.g
            .edge_ixs()
            .find(|&e| self.tree.contains_edge(e) && self.tree.cut_value(e) < 0)
    }

    /// The minimum-slack non-tree edge that reconnects the two halves left by removing `leaving`.
    pub fn enter_edge(&self, leaving: EdgeIx) -> Result<EdgeIx> {
        self.entering_candidate(leaving).ok_or_else(|| {
            Error::Consistency(format!(
                "no edge can replace tree edge {leaving}; the graph must be weakly connected"
            ))
        })
    }

    /// Root of the subtree cut off by removing tree edge `e`, and whether that root is `e`'s
    /// target.
    pub(crate) fn split(&self, e: EdgeIx) -> Option<(NodeIx, bool)> {
        let (s, t) = self.g.endpoints(e)?;
        if self.tree.lim(s) < self.tree.lim(t) {
            Some((s, false))
        } else {
            Some((t, true))
        }
    }

    /// Candidates run opposite to `leaving` across the cut. Only edges incident to the subtree
    /// are inspected; ties on slack go to the lowest edge id.
    pub(crate) fn entering_candidate(&self, leaving: EdgeIx) -> Option<EdgeIx> {
        let (root, root_is_target) = self.split(leaving)?;
        let mut best: Option<(i32, EdgeIx)> = None;
        for &v in self.tree.subtree(root) {
            let incident = if root_is_target {
                self.g.out_edges(v)
            } else {
                self.g.in_edges(v)
            };
            for &f in incident {
                let outside = if root_is_target {
                    self.g.target(f)
                } else {
                    self.g.source(f)
                };
                let Some(outside) = outside else {
                    continue;
                };
                if self.tree.in_subtree(root, outside) {
                    continue;
                }
                let slack = slack_of(self.g, &self.rank, f);
                if best.is_none_or(|b| (slack, f) < b) {
                    best = Some((slack, f));
                }
            }
        }
        best.map(|(_, f)| f)
    }

    /// Swaps `leaving` out of the tree and `entering` in.
    ///
    /// The cut-off subtree is shifted so `entering` becomes tight and the tree is renumbered. The
    /// only cut values that change are those on the cycle `entering` closed, which in the new tree
    /// is the path between `leaving`'s endpoints; every other tree edge splits the nodes exactly as
    /// before.
    pub fn exchange(&mut self, leaving: EdgeIx, entering: EdgeIx) -> Result<()> {
        if !self.tree.contains_edge(leaving) || self.tree.contains_edge(entering) {
            return Err(Error::Consistency(format!(
                "cannot exchange {leaving} for {entering}: expected a tree edge and a non-tree edge"
            )));
        }
        let (Some((root, _)), Some((ls, lt)), Some((es, et))) = (
            self.split(leaving),
            self.g.endpoints(leaving),
            self.g.endpoints(entering),
        ) else {
            return Err(Error::Consistency(format!(
                "edge {leaving} or {entering} is missing from the graph"
            )));
        };

        let slack = slack_of(self.g, &self.rank, entering);
        let delta = if self.tree.in_subtree(root, es) {
            -slack
        } else {
            slack
        };
        self.shift_subtree(root, delta);

        self.tree.remove_edge(leaving, ls, lt);
        self.tree.add_edge(entering, es, et);
        self.tree.init_low_lim(self.g);
        self.update_cut_values_between(ls, lt);
        Ok(())
    }

    fn update_cut_values_between(&mut self, a: NodeIx, b: NodeIx) {
        let lca = self.lowest_common_ancestor(a, b);
        for start in [a, b] {
            let mut v = start;
            while v != lca {
                let Some(e) = self.tree.parent_edge(v) else {
                    break;
                };
                let cut = self.calc_cut_value(v, e);
                self.tree.set_cut_value(e, cut);
                let Some(parent) = self.g.opposite(e, v) else {
                    break;
                };
                v = parent;
            }
        }
    }

    fn lowest_common_ancestor(&self, a: NodeIx, b: NodeIx) -> NodeIx {
        let mut v = a;
        while !self.tree.in_subtree(v, b) {
            match self
                .tree
                .parent_edge(v)
                .and_then(|e| self.g.opposite(e, v))
            {
                Some(parent) => v = parent,
                None => break,
            }
        }
        v
    }
}
