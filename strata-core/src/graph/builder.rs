//! Graph Builder
//!
//! Turns a flat node list and a parent map into the forward adjacency the
//! depth engine walks.
//!
//! Parent ids are kept only when they sit inside the participating
//! namespace. The check is a prefix test on the id (`model.`), so a parent
//! is never re-resolved against the node list. Missing parent-map entries
//! mean "no parents".

use indexmap::IndexMap;
use tracing::debug;

use super::node::{Node, NodeKind};
use crate::config::EngineConfig;
use crate::manifest::Manifest;

/// Participating nodes plus parent and child adjacency between them.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// Participating nodes in input order.
    participants: Vec<Node>,

    /// Participant id to the participating parents it depends on.
    parents: IndexMap<String, Vec<String>>,

    /// Parent id to the participants that depend on it.
    /// Every participant has an entry, possibly empty.
    children: IndexMap<String, Vec<String>>,
}

impl DependencyGraph {
    /// Build the graph for a manifest.
    pub fn from_manifest(manifest: &Manifest, config: &EngineConfig) -> Self {
        build_graph(manifest.resolved_nodes(config), &manifest.parent_map, config)
    }

    pub fn participants(&self) -> &[Node] {
        &self.participants
    }

    /// Participating parents of `id`. Empty when unknown.
    pub fn parents(&self, id: &str) -> &[String] {
        self.parents.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Participants depending on `id`. Empty when unknown.
    pub fn children(&self, id: &str) -> &[String] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.participants.len()
    }

    pub fn edge_count(&self) -> usize {
        self.parents.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

/// Build a [`DependencyGraph`] from resolved nodes and a raw parent map.
///
/// Non-participating nodes are dropped, and so are parent ids outside the
/// participating namespace.
pub fn build_graph<I>(
    nodes: I,
    parent_map: &IndexMap<String, Vec<String>>,
    config: &EngineConfig,
) -> DependencyGraph
where
    I: IntoIterator<Item = Node>,
{
    let prefix = config.namespace_prefix(NodeKind::Model.namespace());

    let participants: Vec<Node> = nodes.into_iter().filter(Node::participates).collect();

    let mut parents: IndexMap<String, Vec<String>> = IndexMap::with_capacity(participants.len());
    let mut children: IndexMap<String, Vec<String>> = IndexMap::with_capacity(participants.len());

    for node in &participants {
        children.entry(node.id.clone()).or_default();

        let retained: Vec<String> = parent_map
            .get(&node.id)
            .map(|raw| {
                raw.iter()
                    .filter(|parent| parent.starts_with(&prefix))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        parents.insert(node.id.clone(), retained);
    }

    for (child, retained) in &parents {
        for parent in retained {
            children.entry(parent.clone()).or_default().push(child.clone());
        }
    }

    let graph = DependencyGraph {
        participants,
        parents,
        children,
    };

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built dependency graph"
    );

    graph
}
