//! Virtualization of multi-rank edges.
//!
//! Every edge spanning more than one rank is replaced by unit-length virtual edges through one
//! virtual node per intermediate rank. A labelled edge gets a label node, sized by the text
//! metrics, at the midpoint rank of its chain instead of a plain virtual node.

use crate::model::{EdgeLabel, LayoutGraph, NodeLabel};
use crate::options::LayoutOptions;
use crate::text_metrics::TextMetrics;
use crate::util::{IdGenerator, add_dummy_node};
use strata_graph::{EdgeIx, NodeIx};
use tracing::debug;

/// A long edge replaced by a chain of virtual nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualChain {
    /// Id of the replaced edge. It is no longer part of the graph.
    pub edge: EdgeIx,
    pub source: NodeIx,
    pub target: NodeIx,
    /// Virtual nodes from the source side down to the target side.
    pub nodes: Vec<NodeIx>,
    pub label_node: Option<NodeIx>,
}

pub fn run(
    g: &mut LayoutGraph,
    ids: &mut IdGenerator,
    metrics: &dyn TextMetrics,
    options: &LayoutOptions,
) -> Vec<VirtualChain> {
    let edges: Vec<EdgeIx> = g.edge_ixs().collect();
    let chains: Vec<VirtualChain> = edges
        .into_iter()
        .filter_map(|e| virtualize_edge(g, e, ids, metrics, options))
        .collect();
    debug!(
        chains = chains.len(),
        nodes = g.node_count(),
        edges = g.edge_count(),
        "virtualized long edges"
    );
    chains
}

fn virtualize_edge(
    g: &mut LayoutGraph,
    e: EdgeIx,
    ids: &mut IdGenerator,
    metrics: &dyn TextMetrics,
    options: &LayoutOptions,
) -> Option<VirtualChain> {
    let (source, target) = g.endpoints(e)?;
    let source_rank = g.node(source)?.rank;
    let target_rank = g.node(target)?.rank;
    if source_rank - target_rank <= 1 {
        return None;
    }

    let edge = g.remove_edge(e)?;
    let label_rank = edge
        .label
        .as_ref()
        .map(|_| (source_rank + target_rank) / 2);

    let mut nodes = Vec::new();
    let mut label_node = None;
    let mut below = target;
    for rank in target_rank + 1..source_rank {
        let is_label_rank = label_rank == Some(rank);
        let label = match edge.label.as_deref() {
            Some(text) if is_label_rank => NodeLabel {
                rank,
                height: metrics.text_height(text),
                left_width: options.node_separation,
                right_width: metrics.text_width(text),
                is_virtual: true,
                is_label: true,
                label: Some(text.to_string()),
                ..Default::default()
            },
            _ => NodeLabel {
                rank,
                left_width: options.virtual_node_width / 2.0,
                right_width: options.virtual_node_width / 2.0,
                is_virtual: true,
                ..Default::default()
            },
        };
        let prefix = if is_label_rank { "_label" } else { "_virtual" };
        let v = add_dummy_node(g, ids, prefix, label);
        if is_label_rank {
            label_node = Some(v);
        }
        g.add_edge(v, below, chain_edge(&edge));
        nodes.push(v);
        below = v;
    }
    g.add_edge(source, below, chain_edge(&edge));
    nodes.reverse();

    Some(VirtualChain {
        edge: e,
        source,
        target,
        nodes,
        label_node,
    })
}

fn chain_edge(original: &EdgeLabel) -> EdgeLabel {
    EdgeLabel {
        weight: original.weight,
        min_length: 1,
        is_virtual: true,
        label: None,
    }
}
