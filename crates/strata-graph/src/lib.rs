//! Directed multigraph container used by `strata`.
//!
//! Nodes and edges live in slot vectors and are addressed by stable integer ids. Iteration is in
//! ascending id order, and every node keeps its in/out edge lists in insertion order, so the
//! algorithms built on top of this crate produce the same result on every run.

#![forbid(unsafe_code)]

pub mod alg;
mod graph;

pub use graph::{EdgeIx, Graph, NodeIx};
