use crate::model::{LayoutGraph, NodeLabel};
use strata_graph::NodeIx;

/// Hands out numbered names for synthetic nodes. One generator belongs to one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    counter: usize,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, prefix: &str) -> String {
        self.counter += 1;
        format!("{prefix}{}", self.counter)
    }
}

/// Adds a synthetic node under a fresh name that does not clash with any existing node.
pub fn add_dummy_node(
    g: &mut LayoutGraph,
    ids: &mut IdGenerator,
    prefix: &str,
    label: NodeLabel,
) -> NodeIx {
    loop {
        let name = ids.next_id(prefix);
        if g.node_ix(&name).is_none() {
            return g.add_node(name, label);
        }
    }
}
