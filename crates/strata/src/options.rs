//! Layout configuration.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Tunables for one layout run. Every field has a default, so a partial JSON document is enough:
///
/// ```
/// let options = strata::LayoutOptions::from_json(r#"{ "nodeSeparation": 24 }"#).unwrap();
/// assert_eq!(options.node_separation, 24.0);
/// assert_eq!(options.rank_separation, 18.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    /// Horizontal gap between neighbouring nodes of a rank.
    pub node_separation: f64,
    /// Vertical gap between neighbouring ranks.
    pub rank_separation: f64,
    /// Horizontal gap used instead of `node_separation` on label ranks: ranks holding an edge
    /// label node and otherwise only virtual nodes.
    pub label_rank_separation: f64,
    pub virtual_node_width: f64,
    pub default_node_width: f64,
    pub default_node_height: f64,
    /// Exchange cap for the ranking simplex run.
    pub rank_iterations: usize,
    /// Exchange cap for the x-coordinate simplex run.
    pub position_iterations: usize,
    pub order_iterations: usize,
    /// Bound on feasible-tree retries. `None` uses the node count.
    pub max_tree_retries: Option<usize>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            node_separation: 18.0,
            rank_separation: 18.0,
            label_rank_separation: 9.0,
            virtual_node_width: 2.0,
            default_node_width: 54.0,
            default_node_height: 36.0,
            rank_iterations: 1000,
            position_iterations: 2000,
            order_iterations: 24,
            max_tree_retries: None,
        }
    }
}

impl LayoutOptions {
    pub fn from_json(text: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(text)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("nodeSeparation", self.node_separation),
            ("rankSeparation", self.rank_separation),
            ("labelRankSeparation", self.label_rank_separation),
            ("virtualNodeWidth", self.virtual_node_width),
            ("defaultNodeWidth", self.default_node_width),
            ("defaultNodeHeight", self.default_node_height),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidArgument(format!(
                    "`{name}` must be a finite, non-negative length (got {value})"
                )));
            }
        }
        Ok(())
    }

    pub fn rank_simplex(&self) -> SimplexOptions {
        SimplexOptions {
            max_iterations: self.rank_iterations,
            max_tree_retries: self.max_tree_retries,
        }
    }

    pub fn position_simplex(&self) -> SimplexOptions {
        SimplexOptions {
            max_iterations: self.position_iterations,
            max_tree_retries: self.max_tree_retries,
        }
    }
}

/// Post-optimization balancing applied by the simplex engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Balancing {
    /// Ranking: move nodes with equal in/out weight to the least crowded feasible rank.
    #[default]
    TopBottom,
    /// x placement: center subtrees hanging off zero cut value tree edges.
    LeftRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimplexOptions {
    pub max_iterations: usize,
    pub max_tree_retries: Option<usize>,
}

impl Default for SimplexOptions {
    fn default() -> Self {
        LayoutOptions::default().rank_simplex()
    }
}
