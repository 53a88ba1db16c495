//! Rank assignment by network simplex.
//!
//! Ranks satisfy `source.rank - target.rank >= min_length` on every edge, so sinks end on rank 0
//! and the top of the drawing is the highest rank.

pub mod balance;
pub mod feasible_tree;
pub mod network_simplex;
pub mod tree;
pub mod util;

use crate::error::Result;
use crate::model::LayoutGraph;
use crate::options::{Balancing, SimplexOptions};

pub use network_simplex::{NetworkSimplex, SimplexOutcome, network_simplex};

/// Ranks every node of `g` in place. Cyclic input is rejected before any rank is written.
pub fn rank(g: &mut LayoutGraph, options: &SimplexOptions) -> Result<SimplexOutcome> {
    network_simplex(g, options, Balancing::TopBottom)
}
