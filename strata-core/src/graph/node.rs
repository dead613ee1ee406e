//! Graph Nodes
//!
//! This module defines the node types that live in the dependency graph.

use std::fmt;

/// The kind of node in a dependency manifest.
///
/// Only [`NodeKind::Model`] participates in depth computation. Every kind
/// owns an identifier namespace: the leading segment of its ids, so a model
/// id looks like `model.package.name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A transformation. These are the nodes depth is computed for.
    Model,
    Seed,
    Snapshot,
    Test,
    /// A raw external source table.
    Source,
    Analysis,
    Operation,
    Exposure,
    Metric,
    /// Anything the manifest reports that we do not recognise.
    Other,
}

impl NodeKind {
    /// Whether nodes of this kind get a depth.
    pub fn participates(&self) -> bool {
        matches!(self, NodeKind::Model)
    }

    /// The leading id segment for nodes of this kind.
    pub fn namespace(&self) -> &'static str {
        match self {
            NodeKind::Model => "model",
            NodeKind::Seed => "seed",
            NodeKind::Snapshot => "snapshot",
            NodeKind::Test => "test",
            NodeKind::Source => "source",
            NodeKind::Analysis => "analysis",
            NodeKind::Operation => "operation",
            NodeKind::Exposure => "exposure",
            NodeKind::Metric => "metric",
            NodeKind::Other => "other",
        }
    }
}

impl From<&str> for NodeKind {
    fn from(kind: &str) -> Self {
        match kind.trim().to_ascii_lowercase().as_str() {
            "model" => NodeKind::Model,
            "seed" => NodeKind::Seed,
            "snapshot" => NodeKind::Snapshot,
            "test" => NodeKind::Test,
            "source" => NodeKind::Source,
            "analysis" => NodeKind::Analysis,
            "operation" => NodeKind::Operation,
            "exposure" => NodeKind::Exposure,
            "metric" => NodeKind::Metric,
            _ => NodeKind::Other,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.namespace())
    }
}

/// A resolved node: every field is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Globally unique identifier, stable across recomputation.
    pub id: String,

    /// Short human-facing name. Distinct ids may share one.
    pub name: String,

    pub kind: NodeKind,
}

impl Node {
    /// Create a node from its parts.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }

    /// Shorthand for a participating node.
    pub fn model(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, NodeKind::Model)
    }

    pub fn participates(&self) -> bool {
        self.kind.participates()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_models_participate() {
        assert!(NodeKind::Model.participates());
        for kind in [
            NodeKind::Seed,
            NodeKind::Snapshot,
            NodeKind::Test,
            NodeKind::Source,
            NodeKind::Other,
        ] {
            assert!(!kind.participates(), "{kind} should not participate");
        }
    }

    #[test]
    fn kind_parsing_is_case_insensitive() {
        assert_eq!(NodeKind::from("model"), NodeKind::Model);
        assert_eq!(NodeKind::from("Model"), NodeKind::Model);
        assert_eq!(NodeKind::from(" seed "), NodeKind::Seed);
        assert_eq!(NodeKind::from("semantic_model"), NodeKind::Other);
        assert_eq!(NodeKind::from(""), NodeKind::Other);
    }

    #[test]
    fn namespace_round_trips_through_parse() {
        let kind = NodeKind::Snapshot;
        assert_eq!(NodeKind::from(kind.namespace()), kind);
    }
}
