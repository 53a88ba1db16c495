//! Coordinate assignment.
//!
//! y comes straight from the per-rank heights. x comes from a second network simplex run over
//! the auxiliary constraint graph built in [`aux_graph`]; the layout graph's own ranks are never
//! touched by that run because the auxiliary graph holds its own node labels.

pub mod aux_graph;

use crate::error::Result;
use crate::model::LayoutGraph;
use crate::options::{Balancing, LayoutOptions};
use crate::order::Layering;
use crate::rank::{SimplexOutcome, network_simplex};
use crate::util::IdGenerator;
use tracing::debug;

pub fn position(
    g: &mut LayoutGraph,
    layering: &Layering,
    options: &LayoutOptions,
    ids: &mut IdGenerator,
) -> Result<SimplexOutcome> {
    assign_y(g, layering, options);
    assign_x(g, layering, options, ids)
}

/// The highest rank sits at `y = half_height(top)`; each lower rank is placed
/// `half_height(above) + rank_separation + half_height(own)` further down.
pub fn assign_y(g: &mut LayoutGraph, layering: &Layering, options: &LayoutOptions) {
    let half: Vec<f64> = layering
        .iter()
        .map(|layer| {
            layer
                .iter()
                .filter_map(|&v| g.node(v))
                .map(|n| n.height / 2.0)
                .fold(0.0, f64::max)
        })
        .collect();

    let mut y = 0.0;
    for r in (0..layering.len()).rev() {
        y += match half.get(r + 1) {
            Some(above) => above + options.rank_separation + half[r],
            None => half[r],
        };
        for &v in &layering[r] {
            if let Some(label) = g.node_mut(v) {
                label.y = y;
            }
        }
    }
}

/// Solves the auxiliary graph and shifts the result so the leftmost node edge is at 0.
pub fn assign_x(
    g: &mut LayoutGraph,
    layering: &Layering,
    options: &LayoutOptions,
    ids: &mut IdGenerator,
) -> Result<SimplexOutcome> {
    let mut aux = aux_graph::build(g, layering, options, ids);
    debug!(
        nodes = aux.graph.node_count(),
        edges = aux.graph.edge_count(),
        omega_nodes = aux.omega_nodes,
        "built auxiliary constraint graph"
    );
    let outcome = network_simplex(
        &mut aux.graph,
        &options.position_simplex(),
        Balancing::LeftRight,
    )?;

    let nodes: Vec<_> = g.node_ixs().collect();
    let mut left_edge = f64::INFINITY;
    for &v in &nodes {
        let x = aux.x(v).unwrap_or(0.0);
        if let Some(label) = g.node_mut(v) {
            label.x = x;
            left_edge = left_edge.min(x - label.left_width);
        }
    }
    if left_edge.is_finite() {
        for v in nodes {
            if let Some(label) = g.node_mut(v) {
                label.x -= left_edge;
            }
        }
    }
    Ok(outcome)
}
