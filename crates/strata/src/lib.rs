//! Layered (Sugiyama-style) layout for directed acyclic graphs.
//!
//! A layout runs in three stages over a private copy of the input graph:
//!
//! 1. [`rank`]: network simplex assigns every node an integer rank, minimizing the weighted
//!    total edge length subject to each edge's `min_length`.
//! 2. [`order`]: long edges are split into chains of virtual nodes, then weighted-median sweeps
//!    and adjacent transpositions reduce edge crossings.
//! 3. [`position`]: y follows the rank heights; x is the solution of a second simplex run over an
//!    auxiliary constraint graph.
//!
//! ```
//! use strata::{EdgeSpec, InputGraph, LayoutOptions, NodeSpec};
//!
//! let mut g = InputGraph::new();
//! g.add_node("a", NodeSpec::default());
//! g.add_node("b", NodeSpec::default());
//! g.add_named_edge("a", "b", EdgeSpec::default());
//!
//! let layout = strata::layout(&g, &LayoutOptions::default()).unwrap();
//! assert_eq!(layout.node("a").unwrap().rank, 1);
//! assert_eq!(layout.node("b").unwrap().rank, 0);
//! ```

#![forbid(unsafe_code)]

pub use strata_graph as graph;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod model;
pub mod normalize;
pub mod options;
pub mod order;
pub mod pipeline;
pub mod position;
pub mod rank;
pub mod result;
pub mod text_metrics;
pub mod util;

pub use error::{Error, Result};
pub use model::{EdgeLabel, EdgeSpec, InputGraph, LayoutGraph, NodeLabel, NodeSpec, Point};
pub use options::{Balancing, LayoutOptions, SimplexOptions};
pub use pipeline::{LayoutPipeline, Stage};
pub use result::{EdgeLayout, LayoutResult, NodeLayout};
pub use text_metrics::{FixedTextMetrics, TextMetrics};

/// Lays out `input` with [`FixedTextMetrics`] sizing edge labels.
pub fn layout(input: &InputGraph, options: &LayoutOptions) -> Result<LayoutResult> {
    layout_with_metrics(input, options, &FixedTextMetrics::default())
}

pub fn layout_with_metrics(
    input: &InputGraph,
    options: &LayoutOptions,
    metrics: &dyn TextMetrics,
) -> Result<LayoutResult> {
    let _span = tracing::debug_span!(
        "layout",
        nodes = input.node_count(),
        edges = input.edge_count()
    )
    .entered();
    LayoutPipeline::new(input, options, metrics)?.finish()
}
