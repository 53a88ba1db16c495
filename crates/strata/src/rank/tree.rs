//! Spanning-tree state for one network simplex run.
//!
//! Membership, adjacency, postorder numbering and cut values are kept in dense vectors indexed by
//! node/edge id. The tree is rooted at the first node that joined it; `low`/`lim` give every node
//! the interval of postorder numbers covered by its subtree, which turns "is `x` below `v`" into
//! two integer comparisons.

use crate::model::LayoutGraph;
use strata_graph::{EdgeIx, NodeIx};

#[derive(Debug, Clone, Default)]
pub struct TreeState {
    node_in_tree: Vec<bool>,
    edge_in_tree: Vec<bool>,
    /// Tree nodes in the order they joined.
    nodes: Vec<NodeIx>,
    adjacency: Vec<Vec<EdgeIx>>,
    low: Vec<usize>,
    lim: Vec<usize>,
    parent_edge: Vec<Option<EdgeIx>>,
    /// Node with postorder number `lim` at index `lim - 1`.
    by_lim: Vec<NodeIx>,
    cut_value: Vec<i64>,
}

#[derive(Debug, Clone, Copy)]
struct DfsFrame {
    v: NodeIx,
    parent_edge: Option<EdgeIx>,
    low: usize,
    next: usize,
}

impl TreeState {
    pub fn new(node_bound: usize, edge_bound: usize) -> Self {
        Self {
            node_in_tree: vec![false; node_bound],
            edge_in_tree: vec![false; edge_bound],
            nodes: Vec::new(),
            adjacency: vec![Vec::new(); node_bound],
            low: vec![0; node_bound],
            lim: vec![0; node_bound],
            parent_edge: vec![None; node_bound],
            by_lim: Vec::new(),
            cut_value: vec![0; edge_bound],
        }
    }

    pub fn clear(&mut self) {
        *self = Self::new(self.node_in_tree.len(), self.edge_in_tree.len());
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[NodeIx] {
        &self.nodes
    }

    pub fn root(&self) -> Option<NodeIx> {
        self.nodes.first().copied()
    }

    pub fn contains_node(&self, v: NodeIx) -> bool {
        self.node_in_tree.get(v.index()).copied().unwrap_or(false)
    }

    pub fn contains_edge(&self, e: EdgeIx) -> bool {
        self.edge_in_tree.get(e.index()).copied().unwrap_or(false)
    }

    pub fn add_node(&mut self, v: NodeIx) {
        if let Some(slot) = self.node_in_tree.get_mut(v.index()) {
            if !*slot {
                *slot = true;
                self.nodes.push(v);
            }
        }
    }

    /// Marks `e` as a tree edge between `a` and `b`.
    pub fn add_edge(&mut self, e: EdgeIx, a: NodeIx, b: NodeIx) {
        if let Some(slot) = self.edge_in_tree.get_mut(e.index()) {
            *slot = true;
        }
        for v in [a, b] {
            if let Some(adjacent) = self.adjacency.get_mut(v.index()) {
                adjacent.push(e);
            }
        }
    }

    pub fn remove_edge(&mut self, e: EdgeIx, a: NodeIx, b: NodeIx) {
        if let Some(slot) = self.edge_in_tree.get_mut(e.index()) {
            *slot = false;
        }
        if let Some(cut) = self.cut_value.get_mut(e.index()) {
            *cut = 0;
        }
        for v in [a, b] {
            if let Some(adjacent) = self.adjacency.get_mut(v.index()) {
                adjacent.retain(|&x| x != e);
            }
        }
    }

    pub fn low(&self, v: NodeIx) -> usize {
        self.low.get(v.index()).copied().unwrap_or(0)
    }

    pub fn lim(&self, v: NodeIx) -> usize {
        self.lim.get(v.index()).copied().unwrap_or(0)
    }

    pub fn parent_edge(&self, v: NodeIx) -> Option<EdgeIx> {
        self.parent_edge.get(v.index()).copied().flatten()
    }

    pub fn cut_value(&self, e: EdgeIx) -> i64 {
        self.cut_value.get(e.index()).copied().unwrap_or(0)
    }

    pub fn set_cut_value(&mut self, e: EdgeIx, value: i64) {
        if let Some(cut) = self.cut_value.get_mut(e.index()) {
            *cut = value;
        }
    }

    /// Whether `v` lies in the subtree rooted at `root`.
    pub fn in_subtree(&self, root: NodeIx, v: NodeIx) -> bool {
        let lim = self.lim(v);
        self.low(root) <= lim && lim <= self.lim(root)
    }

    /// Nodes of the subtree rooted at `root`, in postorder.
    pub fn subtree(&self, root: NodeIx) -> &[NodeIx] {
        let (low, lim) = (self.low(root), self.lim(root));
        if low == 0 || lim > self.by_lim.len() {
            return &[];
        }
        &self.by_lim[low - 1..lim]
    }

    /// All tree nodes in postorder (children before parents, root last).
    pub fn postorder(&self) -> &[NodeIx] {
        &self.by_lim
    }

    /// Renumbers the tree from its root with an explicit-stack DFS, refreshing `low`, `lim` and
    /// the parent edge of every node.
    pub fn init_low_lim(&mut self, g: &LayoutGraph) {
        self.by_lim.clear();
        let Some(root) = self.root() else {
            return;
        };

        let mut next_lim = 1;
        let mut stack = vec![DfsFrame {
            v: root,
            parent_edge: None,
            low: next_lim,
            next: 0,
        }];
        while let Some(frame) = stack.last_mut() {
            let v = frame.v;
            if let Some(&e) = self.adjacency[v.index()].get(frame.next) {
                frame.next += 1;
                if Some(e) == frame.parent_edge {
                    continue;
                }
                let Some(w) = g.opposite(e, v) else {
                    continue;
                };
                stack.push(DfsFrame {
                    v: w,
                    parent_edge: Some(e),
                    low: next_lim,
                    next: 0,
                });
                continue;
            }

            let done = *frame;
            stack.pop();
            self.low[v.index()] = done.low;
            self.lim[v.index()] = next_lim;
            self.parent_edge[v.index()] = done.parent_edge;
            self.by_lim.push(v);
            next_lim += 1;
        }
    }
}
