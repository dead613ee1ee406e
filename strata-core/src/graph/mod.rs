//! Dependency Graph
//!
//! This module builds the dependency graph from a manifest and computes
//! node depths over it.
//!
//! # Overview
//!
//! The graph is a directed acyclic graph where:
//!
//! - Nodes are participating manifest entries (models)
//! - Edges point from a parent to the children that depend on it
//!
//! The depth of a node is 1 + the number of edges on the longest chain of
//! participating ancestors back to a root.
//!
//! # Design Decisions
//!
//! 1. The builder keeps both directions: `parents` drives in-degrees and
//!    `children` drives propagation.
//!
//! 2. Adjacency is indexed by id in insertion order, so one invocation
//!    always visits nodes in the same order.
//!
//! 3. Cycles are not rejected. Nodes caught in one simply never finalize.

mod builder;
mod depth;
mod node;

pub use builder::{build_graph, DependencyGraph};
pub use depth::{compute_depths, DepthReport};
pub use node::{Node, NodeKind};
