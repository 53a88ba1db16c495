use crate::pipeline::Stage;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid graph: cycle through {}", .cycle.join(" -> "))]
    Cyclic { cycle: Vec<String> },

    #[error("invalid graph: expected one weakly connected component, found {components}")]
    Disconnected { components: usize },

    #[error(
        "feasible tree did not converge after {retries} retries ({spanned} of {nodes} nodes spanned)"
    )]
    Convergence {
        retries: usize,
        spanned: usize,
        nodes: usize,
    },

    #[error("network simplex invariant violated: {0}")]
    Consistency(String),

    #[error("layout stage `{requested}` cannot run while the pipeline is `{current}`")]
    Stage { requested: Stage, current: Stage },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
