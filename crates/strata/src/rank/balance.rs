//! Post-optimization balancing.

use super::network_simplex::{NetworkSimplex, slack_of};
use super::util::{layer_index, min_length};
use crate::options::Balancing;

impl NetworkSimplex<'_> {
    /// Rebalances a normalized, optimal ranking without changing its cost.
    pub fn balance(&mut self, mode: Balancing) {
        match mode {
            Balancing::TopBottom => self.balance_top_bottom(),
            Balancing::LeftRight => self.balance_left_right(),
        }
    }

    /// Moves every real node whose incoming and outgoing weights are equal to the least populated
    /// rank it can occupy, preferring the lowest such rank.
    fn balance_top_bottom(&mut self) {
        let real: Vec<_> = self
            .g
            .nodes()
            .filter(|(_, n)| !n.is_virtual)
            .map(|(v, _)| v)
            .collect();
        let Some(max_rank) = real.iter().map(|v| self.rank[v.index()]).max() else {
            return;
        };

        let mut counts = vec![0usize; layer_index(max_rank) + 1];
        for v in &real {
            counts[layer_index(self.rank[v.index()])] += 1;
        }

        for v in real {
            let (mut in_weight, mut out_weight) = (0i64, 0i64);
            let (mut lowest, mut highest) = (0, max_rank);
            for &e in self.g.in_edges(v) {
                in_weight += self.weight(e);
                if let Some(s) = self.g.source(e) {
                    highest = highest.min(self.rank[s.index()] - min_length(self.g, e));
                }
            }
            for &e in self.g.out_edges(v) {
                out_weight += self.weight(e);
                if let Some(t) = self.g.target(e) {
                    lowest = lowest.max(self.rank[t.index()] + min_length(self.g, e));
                }
            }
            if in_weight != out_weight || lowest > highest {
                continue;
            }

            let current = self.rank[v.index()];
            let mut best = lowest;
            for r in lowest + 1..=highest {
                if counts[layer_index(r)] < counts[layer_index(best)] {
                    best = r;
                }
            }
            if best != current {
                counts[layer_index(current)] -= 1;
                counts[layer_index(best)] += 1;
                self.rank[v.index()] = best;
            }
        }
    }

    /// For each zero cut value tree edge, slides the subtree below it halfway toward its best
    /// replacement edge when that edge has slack to spare.
    fn balance_left_right(&mut self) {
        for e in self.tree_edges() {
            if self.tree.cut_value(e) != 0 {
                continue;
            }
            let Some(f) = self.entering_candidate(e) else {
                continue;
            };
            let slack = slack_of(self.g, &self.rank, f);
            if slack <= 1 {
                continue;
            }
            let (Some((root, _)), Some(source)) = (self.split(e), self.g.source(f)) else {
                continue;
            };
            let delta = if self.tree.in_subtree(root, source) {
                -(slack / 2)
            } else {
                slack / 2
            };
            self.shift_subtree(root, delta);
        }
    }
}
