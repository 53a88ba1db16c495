//! Layout output.

use crate::error::Result;
use crate::model::Point;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLayout {
    pub rank: i32,
    pub order: usize,
    /// Center x.
    pub x: f64,
    /// Center y.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeLayout {
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Source center, the centers of the virtual nodes it was routed through, target center.
    pub points: Vec<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_position: Option<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    /// Every input node, in input order.
    pub nodes: IndexMap<String, NodeLayout>,
    /// Every input edge, in input order.
    pub edges: Vec<EdgeLayout>,
    pub width: f64,
    pub height: f64,
    pub crossings: usize,
    /// Set when a simplex run stopped at its iteration cap.
    pub best_effort: bool,
}

impl LayoutResult {
    pub fn node(&self, name: &str) -> Option<&NodeLayout> {
        self.nodes.get(name)
    }

    /// Names of the original nodes on `rank`, left to right.
    pub fn rank_order(&self, rank: i32) -> Vec<&str> {
        let mut on_rank: Vec<(&str, usize)> = self
            .nodes
            .iter()
            .filter(|(_, n)| n.rank == rank)
            .map(|(name, n)| (name.as_str(), n.order))
            .collect();
        on_rank.sort_by_key(|&(_, order)| order);
        on_rank.into_iter().map(|(name, _)| name).collect()
    }

    pub fn max_rank(&self) -> Option<i32> {
        self.nodes.values().map(|n| n.rank).max()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
