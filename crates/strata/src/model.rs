//! Label types carried by the input graph and by the private layout graph.

use serde::{Deserialize, Serialize};
use strata_graph::Graph;

/// The graph every stage works on. Built from an [`InputGraph`] and owned by one pipeline run.
pub type LayoutGraph = Graph<NodeLabel, EdgeLabel>;

/// The graph callers hand to [`crate::layout`].
pub type InputGraph = Graph<NodeSpec, EdgeSpec>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeLabel {
    pub rank: i32,
    pub order: usize,
    pub x: f64,
    pub y: f64,
    pub height: f64,
    pub left_width: f64,
    pub right_width: f64,
    pub is_virtual: bool,
    pub is_label: bool,
    /// Text of the edge label a label node stands in for.
    pub label: Option<String>,
}

impl NodeLabel {
    /// A real node of the given size, split evenly around its center.
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            height,
            left_width: width / 2.0,
            right_width: width / 2.0,
            ..Default::default()
        }
    }

    pub fn with_rank(rank: i32) -> Self {
        Self {
            rank,
            ..Default::default()
        }
    }

    pub fn width(&self) -> f64 {
        self.left_width + self.right_width
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeLabel {
    pub weight: u32,
    /// Minimum rank distance. Input edges have at least 1; constraint edges built for x placement
    /// may use 0.
    pub min_length: u32,
    pub is_virtual: bool,
    pub label: Option<String>,
}

impl Default for EdgeLabel {
    fn default() -> Self {
        Self {
            weight: 1,
            min_length: 1,
            is_virtual: false,
            label: None,
        }
    }
}

impl EdgeLabel {
    pub fn new(weight: u32, min_length: u32) -> Self {
        Self {
            weight,
            min_length,
            ..Default::default()
        }
    }
}

/// Input node. Missing sizes fall back to the configured defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeSpec {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl NodeSpec {
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }
}

/// Input edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EdgeSpec {
    pub weight: u32,
    pub min_length: u32,
    pub label: Option<String>,
}

impl Default for EdgeSpec {
    fn default() -> Self {
        Self {
            weight: 1,
            min_length: 1,
            label: None,
        }
    }
}

impl EdgeSpec {
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Default::default()
        }
    }

    pub fn weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    pub fn min_length(mut self, min_length: u32) -> Self {
        self.min_length = min_length;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}
